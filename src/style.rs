use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LabelError, LabelResult};

const FONT_FAMILY: &str = "Arial";
const FONT_SIZE: f32 = 10.0;
const TITLE_FONT_SIZE: f32 = 16.0;
const FOOTNOTE_FONT_SIZE: f32 = 8.0;
const WIDTH: f32 = 300.0;
const LINEAR_WIDTH: f32 = 460.0;
const PADDING: f32 = 6.0;
const INDENT: f32 = 10.0;
const ROW_HEIGHT: f32 = 15.0;
const HEADER_HEIGHT: f32 = 58.0;
const FOOTER_HEIGHT: f32 = 22.0;
// US Letter in points.
const PAGE_WIDTH: f32 = 612.0;
const PAGE_HEIGHT: f32 = 792.0;

const BUILTIN_STYLES: &[(&str, &str)] = &[
    ("compact", include_str!("../styles/compact.toml")),
    ("standard", include_str!("../styles/standard.toml")),
];

/// Unit the layout is computed in. Geometry numbers are shared; only line
/// weights differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Units {
    Pixels,
    Points,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineWeights {
    /// Outer box.
    pub frame: f32,
    /// Below the header, above the footer, before the vitamin/mineral section.
    pub thick: f32,
    /// Below the column header row.
    pub medium: f32,
    /// Between rows and between columns.
    pub thin: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelStyle {
    #[serde(default = "default_font_family")]
    pub font_family: String,
    /// Extra font file to load; a missing file falls back to the default face.
    #[serde(default)]
    pub font_path: Option<PathBuf>,

    #[serde(default = "default_font_size")]
    pub font_size: f32,
    #[serde(default = "default_title_font_size")]
    pub title_font_size: f32,
    #[serde(default = "default_footnote_font_size")]
    pub footnote_font_size: f32,

    /// Total width of the grid formats with proportional columns.
    #[serde(default = "default_width")]
    pub width: f32,
    /// Wrap width of the linear format.
    #[serde(default = "default_linear_width")]
    pub linear_width: f32,
    #[serde(default = "default_padding")]
    pub padding: f32,
    /// Indent per sub-row level (saturated fat under total fat, ...).
    #[serde(default = "default_indent")]
    pub indent: f32,

    #[serde(default = "default_row_height")]
    pub row_height: f32,
    #[serde(default = "default_header_height")]
    pub header_height: f32,
    #[serde(default = "default_footer_height")]
    pub footer_height: f32,

    #[serde(default = "default_page_width")]
    pub page_width: f32,
    #[serde(default = "default_page_height")]
    pub page_height: f32,

    #[serde(default = "default_line_weights_px")]
    pub line_weights_px: LineWeights,
    #[serde(default = "default_line_weights_pt")]
    pub line_weights_pt: LineWeights,
}

fn default_font_family() -> String {
    FONT_FAMILY.to_string()
}
fn default_font_size() -> f32 {
    FONT_SIZE
}
fn default_title_font_size() -> f32 {
    TITLE_FONT_SIZE
}
fn default_footnote_font_size() -> f32 {
    FOOTNOTE_FONT_SIZE
}
fn default_width() -> f32 {
    WIDTH
}
fn default_linear_width() -> f32 {
    LINEAR_WIDTH
}
fn default_padding() -> f32 {
    PADDING
}
fn default_indent() -> f32 {
    INDENT
}
fn default_row_height() -> f32 {
    ROW_HEIGHT
}
fn default_header_height() -> f32 {
    HEADER_HEIGHT
}
fn default_footer_height() -> f32 {
    FOOTER_HEIGHT
}
fn default_page_width() -> f32 {
    PAGE_WIDTH
}
fn default_page_height() -> f32 {
    PAGE_HEIGHT
}
fn default_line_weights_px() -> LineWeights {
    LineWeights {
        frame: 2.0,
        thick: 5.0,
        medium: 2.0,
        thin: 0.75,
    }
}
fn default_line_weights_pt() -> LineWeights {
    LineWeights {
        frame: 1.5,
        thick: 3.0,
        medium: 1.5,
        thin: 0.5,
    }
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self::standard()
    }
}

impl LabelStyle {
    pub fn standard() -> Self {
        LabelStyle {
            font_family: FONT_FAMILY.to_string(),
            font_path: None,

            font_size: FONT_SIZE,
            title_font_size: TITLE_FONT_SIZE,
            footnote_font_size: FOOTNOTE_FONT_SIZE,

            width: WIDTH,
            linear_width: LINEAR_WIDTH,
            padding: PADDING,
            indent: INDENT,

            row_height: ROW_HEIGHT,
            header_height: HEADER_HEIGHT,
            footer_height: FOOTER_HEIGHT,

            page_width: PAGE_WIDTH,
            page_height: PAGE_HEIGHT,

            line_weights_px: default_line_weights_px(),
            line_weights_pt: default_line_weights_pt(),
        }
    }

    pub fn line_weights(&self, units: Units) -> LineWeights {
        match units {
            Units::Pixels => self.line_weights_px,
            Units::Points => self.line_weights_pt,
        }
    }

    pub fn from_builtin(name: &str) -> LabelResult<Self> {
        let normalized = name.trim().to_ascii_lowercase().replace('-', "_");
        let content = BUILTIN_STYLES
            .iter()
            .find(|(n, _)| *n == normalized)
            .map(|(_, c)| *c)
            .ok_or_else(|| {
                LabelError::Style(format!(
                    "Unknown built-in style '{}'. Available: {}",
                    name,
                    Self::list_builtins().join(", ")
                ))
            })?;
        Self::from_toml(content)
    }

    pub fn list_builtins() -> Vec<&'static str> {
        BUILTIN_STYLES.iter().map(|(n, _)| *n).collect()
    }

    pub fn from_toml(content: &str) -> LabelResult<Self> {
        toml::from_str(content).map_err(|e| LabelError::Style(format!("TOML: {}", e)))
    }

    pub fn from_yaml(content: &str) -> LabelResult<Self> {
        serde_yaml::from_str(content).map_err(|e| LabelError::Style(format!("YAML: {}", e)))
    }

    /// Resolves `--style`: an existing file (TOML or YAML), else a built-in name.
    pub fn load(name_or_path: &str) -> LabelResult<Self> {
        let path = Path::new(name_or_path);
        if !(path.exists() && path.is_file()) {
            return Self::from_builtin(name_or_path);
        }

        let content = std::fs::read_to_string(path).map_err(|source| LabelError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let is_yaml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));
        if is_yaml {
            return Self::from_yaml(&content);
        }

        Self::from_toml(&content).or_else(|_| Self::from_yaml(&content))
    }
}

#[cfg(test)]
mod tests {
    use super::{LabelStyle, Units};

    #[test]
    fn standard_builtin_matches_default() {
        let builtin = LabelStyle::from_builtin("standard").expect("standard style");
        assert_eq!(builtin, LabelStyle::default());
    }

    #[test]
    fn from_builtin_accepts_case_insensitive_names() {
        let lower = LabelStyle::from_builtin("compact").expect("lowercase");
        let upper = LabelStyle::from_builtin(" Compact ").expect("mixed case");
        assert_eq!(lower, upper);
        assert!(lower.width < LabelStyle::default().width);
    }

    #[test]
    fn unknown_builtin_lists_available_styles() {
        let err = LabelStyle::from_builtin("glossy").unwrap_err().to_string();
        assert!(err.contains("compact, standard"), "{err}");
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let style = LabelStyle::from_yaml("row_height: 20.0\nfont_family: Helvetica\n")
            .expect("partial yaml");
        assert_eq!(style.row_height, 20.0);
        assert_eq!(style.font_family, "Helvetica");
        assert_eq!(style.header_height, LabelStyle::default().header_height);
    }

    #[test]
    fn pdf_weights_are_points() {
        let style = LabelStyle::default();
        assert!(style.line_weights(Units::Points).thick < style.line_weights(Units::Pixels).thick);
    }
}
