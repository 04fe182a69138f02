use std::path::Path;

use chrono::NaiveDateTime;
use clap::ValueEnum;
use resvg::usvg;
use tiny_skia::{Pixmap, Transform};

use super::{html, svg};
use crate::error::{LabelError, LabelResult};
use crate::fonts::TextMeasure;
use crate::label::{LabelFormat, LabelRequest};
use crate::style::{LabelStyle, Units};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputKind {
    Svg,
    Html,
    Png,
    Pdf,
}

impl OutputKind {
    pub const ALL: [OutputKind; 4] = [
        OutputKind::Svg,
        OutputKind::Html,
        OutputKind::Png,
        OutputKind::Pdf,
    ];

    pub fn extension(self) -> &'static str {
        match self {
            OutputKind::Svg => "svg",
            OutputKind::Html => "html",
            OutputKind::Png => "png",
            OutputKind::Pdf => "pdf",
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "svg" => Some(OutputKind::Svg),
            "html" | "htm" => Some(OutputKind::Html),
            "png" => Some(OutputKind::Png),
            "pdf" => Some(OutputKind::Pdf),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> LabelResult<Self> {
        let ext = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");
        Self::from_extension(ext).ok_or_else(|| LabelError::UnsupportedOutput(ext.to_string()))
    }

    /// PDF draws in points, everything else in pixels.
    pub fn units(self) -> Units {
        match self {
            OutputKind::Pdf => Units::Points,
            _ => Units::Pixels,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OutputKind::Svg => "SVG",
            OutputKind::Html => "HTML",
            OutputKind::Png => "PNG",
            OutputKind::Pdf => "PDF",
        }
    }
}

/// `label_<format>_<YYYYmmdd_HHMMSS>.<ext>`
pub fn default_file_name(format: LabelFormat, kind: OutputKind, at: NaiveDateTime) -> String {
    format!(
        "label_{}_{}.{}",
        format.name(),
        at.format("%Y%m%d_%H%M%S"),
        kind.extension()
    )
}

/// Renders `request` to the bytes of one output file.
pub fn export_label<T: TextMeasure>(
    request: &LabelRequest,
    kind: OutputKind,
    style: &LabelStyle,
    png_scale: f32,
    measure: &mut T,
) -> LabelResult<Vec<u8>> {
    let layout = request.render(style, kind.units(), measure);

    let bytes = match kind {
        OutputKind::Svg => svg::to_svg(&layout, style).into_bytes(),
        OutputKind::Html => html::to_html(&layout, style, &request.product_name).into_bytes(),
        OutputKind::Png => svg_to_png(&svg::to_svg(&layout, style), png_scale, style)?,
        OutputKind::Pdf => svg_to_pdf(&svg::to_page_svg(&layout, style), style)?,
    };

    tracing::info!(
        kind = kind.label(),
        format = request.format.name(),
        bytes = bytes.len(),
        "label exported"
    );
    Ok(bytes)
}

pub fn write_output(path: &Path, bytes: &[u8]) -> LabelResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| LabelError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, bytes).map_err(|source| LabelError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Which family the rasterizers use for the generic sans-serif and serif
/// names, given every family installed.
#[derive(Debug, Clone, PartialEq, Eq)]
struct FallbackChoice {
    requested_available: bool,
    generic: Option<String>,
}

impl FallbackChoice {
    fn pick<'a>(families: impl IntoIterator<Item = &'a str>, requested: &str) -> Self {
        let mut requested_available = false;
        let mut sans = None;
        let mut first = None;

        for family in families {
            if family == requested {
                requested_available = true;
            }
            if first.is_none() {
                first = Some(family);
            }
            if sans.is_none() && family.to_ascii_lowercase().contains("sans") {
                sans = Some(family);
            }
        }

        let generic = if requested_available {
            Some(requested)
        } else {
            sans.or(first)
        };

        Self {
            requested_available,
            generic: generic.map(str::to_string),
        }
    }
}

// resvg and svg2pdf each bring their own usvg, so each gets its own fontdb.
macro_rules! prepare_fontdb {
    ($fontdb:expr, $style:expr) => {{
        let fontdb = $fontdb;
        let style: &LabelStyle = $style;
        fontdb.load_system_fonts();

        let local_fonts = Path::new("fonts");
        if local_fonts.is_dir() {
            fontdb.load_fonts_dir(local_fonts);
        }
        if let Some(path) = style.font_path.as_deref() {
            if let Err(e) = fontdb.load_font_file(path) {
                tracing::warn!(path = %path.display(), error = %e, "font file unavailable");
            }
        }

        let families: Vec<String> = fontdb
            .faces()
            .flat_map(|face| face.families.iter().map(|(family, _)| family.clone()))
            .collect();
        let choice = FallbackChoice::pick(families.iter().map(String::as_str), &style.font_family);
        if !choice.requested_available {
            tracing::warn!(
                family = %style.font_family,
                fallback = choice.generic.as_deref().unwrap_or("none"),
                "font family not installed"
            );
        }
        if let Some(family) = choice.generic.as_deref() {
            fontdb.set_sans_serif_family(family);
            fontdb.set_serif_family(family);
        }
    }};
}

pub fn svg_to_png(svg: &str, scale: f32, style: &LabelStyle) -> LabelResult<Vec<u8>> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(LabelError::Raster(format!("invalid PNG scale: {scale}")));
    }

    let mut opts = usvg::Options::default();
    prepare_fontdb!(opts.fontdb_mut(), style);

    let tree = usvg::Tree::from_str(svg, &opts)
        .map_err(|e| LabelError::Svg(e.to_string()))?;

    let width = (tree.size().width() * scale).ceil() as u32;
    let height = (tree.size().height() * scale).ceil() as u32;

    let mut pixmap = Pixmap::new(width, height)
        .ok_or_else(|| LabelError::Raster(format!("cannot allocate {width}x{height} pixmap")))?;
    resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

    pixmap
        .encode_png()
        .map_err(|e| LabelError::Raster(e.to_string()))
}

/// One-page PDF. Expects the page-sized SVG from [`svg::to_page_svg`].
pub fn svg_to_pdf(svg: &str, style: &LabelStyle) -> LabelResult<Vec<u8>> {
    use svg2pdf::usvg::fontdb;

    let mut db = fontdb::Database::new();
    prepare_fontdb!(&mut db, style);

    let opts = svg2pdf::usvg::Options {
        fontdb: std::sync::Arc::new(db),
        ..Default::default()
    };
    let tree = svg2pdf::usvg::Tree::from_str(svg, &opts)
        .map_err(|e| LabelError::Svg(e.to_string()))?;

    // Text as paths, so a missing font never leaves blank cells.
    let options = svg2pdf::ConversionOptions {
        embed_text: false,
        ..Default::default()
    };

    svg2pdf::to_pdf(&tree, options, svg2pdf::PageOptions::default())
        .map_err(|e| LabelError::Pdf(e.to_string()))
}
