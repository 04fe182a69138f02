use std::path::PathBuf;

use clap::Parser;
use nutrilabel::backend::{OutputKind, default_file_name, export_label, write_output};
use nutrilabel::fonts::CosmicTextMeasure;
use nutrilabel::form::LabelForm;
use nutrilabel::label::LabelFormat;
use nutrilabel::nutrition::Basis;
use nutrilabel::style::LabelStyle;

/// Nutrition-facts label generator
#[derive(Parser, Debug)]
#[command(name = "nutrilabel")]
#[command(about = "Render a nutrition-facts label to SVG, HTML, PNG or PDF", long_about = None)]
struct Args {
    /// Label form (JSON, TOML or YAML; use "-" for stdin)
    #[arg(value_name = "FORM")]
    form: PathBuf,

    /// Output file path (extension determines format: .svg, .html, .png or .pdf)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Label format, overriding the form
    #[arg(short, long, value_enum)]
    format: Option<LabelFormat>,

    /// Output kind when no output path is given
    #[arg(short, long, value_enum, default_value_t = OutputKind::Pdf)]
    export: OutputKind,

    /// Directory for the generated file name when no output path is given
    #[arg(long, value_name = "DIR", default_value = ".")]
    out_dir: PathBuf,

    /// Built-in style name or path to a style file (TOML or YAML)
    #[arg(short, long, value_name = "STYLE", default_value = "standard")]
    style: String,

    /// Raster scale multiplier for PNG output (e.g. 2.0 for sharper output)
    #[arg(long, default_value_t = 1.0)]
    png_scale: f32,

    /// Show energy in kilojoules next to kilocalories
    #[arg(long)]
    kilojoules: bool,

    /// Basis the form's amounts were entered in, overriding the form
    #[arg(long, value_enum)]
    basis: Option<Basis>,
}

fn main() -> Result<(), String> {
    nutrilabel::logging::init();

    let args = Args::parse();

    let style = LabelStyle::load(&args.style).map_err(|e| e.to_string())?;

    let mut form = LabelForm::load(&args.form).map_err(|e| e.to_string())?;
    if let Some(format) = args.format {
        form.format = format;
    }
    if let Some(basis) = args.basis {
        form.basis = basis;
    }
    form.kilojoules |= args.kilojoules;
    let request = form.into_request();

    let (output, kind) = match args.output {
        Some(path) => {
            let kind = OutputKind::from_path(&path).map_err(|e| e.to_string())?;
            (path, kind)
        }
        None => {
            let name = default_file_name(
                request.format,
                args.export,
                chrono::Local::now().naive_local(),
            );
            (args.out_dir.join(name), args.export)
        }
    };

    let mut measure = CosmicTextMeasure::with_font(&style.font_family, style.font_path.as_deref());
    let bytes = export_label(&request, kind, &style, args.png_scale, &mut measure)
        .map_err(|e| e.to_string())?;
    write_output(&output, &bytes).map_err(|e| e.to_string())?;
    eprintln!("{} saved to: {}", kind.label(), output.display());

    Ok(())
}
