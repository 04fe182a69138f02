//! Turns a `LabelLayout` into files: SVG and HTML text, PNG and PDF bytes.

pub mod export;
pub mod html;
pub mod svg;

pub use export::{OutputKind, default_file_name, export_label, svg_to_pdf, svg_to_png, write_output};
pub use html::to_html;
pub use svg::{to_page_svg, to_svg};
