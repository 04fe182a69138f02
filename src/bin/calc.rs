use std::path::PathBuf;

use clap::Parser;
use nutrilabel::form::LabelForm;

/// Prints the per-100 and per-portion values a label would show, as JSON
#[derive(Parser, Debug)]
#[command(name = "nutrilabel-calc")]
#[command(about = "Normalize a nutrition form and print both bases as JSON", long_about = None)]
struct Args {
    /// Label form (JSON, TOML or YAML; use "-" for stdin)
    #[arg(value_name = "FORM")]
    form: PathBuf,

    /// Include energy in kilojoules
    #[arg(long)]
    kilojoules: bool,

    /// Pretty-print the JSON
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<(), String> {
    nutrilabel::logging::init();

    let args = Args::parse();

    let mut form = LabelForm::load(&args.form).map_err(|e| e.to_string())?;
    form.kilojoules |= args.kilojoules;
    let table = form.into_request().table();

    let json = if args.pretty {
        serde_json::to_string_pretty(&table)
    } else {
        serde_json::to_string(&table)
    }
    .map_err(|e| format!("Failed to serialize table: {}", e))?;

    println!("{}", json);
    Ok(())
}
