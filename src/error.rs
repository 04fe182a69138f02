use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by form loading, style loading and export.
///
/// Malformed numbers, a zero portion and missing fonts are not errors: they
/// degrade softly inside the normalizer and the renderers.
#[derive(Debug, Error)]
pub enum LabelError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse form: {0}")]
    Form(String),

    #[error("Failed to parse style: {0}")]
    Style(String),

    #[error("Failed to parse SVG: {0}")]
    Svg(String),

    #[error("Failed to rasterize label: {0}")]
    Raster(String),

    #[error("Failed to convert SVG to PDF: {0}")]
    Pdf(String),

    #[error("Unsupported output format: .{0} (use .svg, .html, .png or .pdf)")]
    UnsupportedOutput(String),
}

pub type LabelResult<T> = Result<T, LabelError>;
