//! Label strings: number formatting policy, serving lines and the footnote.

use serde::{Deserialize, Serialize};

use crate::nutrition::{PortionInfo, ProductType, ValueFormat, round_to};
use crate::xml::sanitize_label_text;

pub const TITLE: &str = "Nutrition Facts";
pub const FOOTNOTE_PREFIX: &str = "Not a significant source of";
const FOOTNOTE_DEFAULT_SUFFIX: &str = "other nutrients.";

pub fn format_amount(value: f64, format: ValueFormat) -> String {
    match format {
        ValueFormat::Integer => {
            let rounded = value.round() as i64;
            rounded.to_string()
        }
        ValueFormat::Trimmed => trim_decimal(format!("{:.1}", positive_zero(round_to(value, 1)))),
        ValueFormat::OneDecimal => format!("{:.1}", positive_zero(round_to(value, 1))),
    }
}

fn positive_zero(value: f64) -> f64 {
    if value == 0.0 { 0.0 } else { value }
}

fn trim_decimal(text: String) -> String {
    if !text.contains('.') {
        return text;
    }
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

pub fn format_energy(kcal: i64, kj: Option<i64>) -> String {
    match kj {
        Some(kj) => format!("{} kcal ({} kJ)", kcal, kj),
        None => format!("{} kcal", kcal),
    }
}

pub fn serving_size_line(portion: &PortionInfo) -> String {
    format!(
        "Serving size: {} {}",
        format_amount(portion.size, ValueFormat::Trimmed),
        portion.unit.symbol()
    )
}

pub fn servings_line(portion: &PortionInfo) -> String {
    let count = format_amount(portion.servings_per_container, ValueFormat::Trimmed);
    if portion.approximate {
        format!("Servings per container: about {}", count)
    } else {
        format!("Servings per container: {}", count)
    }
}

pub fn product_type_line(product_type: ProductType) -> String {
    format!("Product type: {}", product_type.label())
}

pub fn per_100_header(portion: &PortionInfo) -> String {
    format!("per 100 {}", portion.unit.symbol())
}

pub const PER_PORTION_HEADER: &str = "per portion";

/// The user-editable end of "Not a significant source of ...".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FootnoteText(String);

impl FootnoteText {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self(suffix.into())
    }

    pub fn suffix(&self) -> &str {
        &self.0
    }

    pub fn rendered(&self) -> String {
        let cleaned = sanitize_label_text(&self.0);
        let suffix = cleaned
            .strip_prefix(FOOTNOTE_PREFIX)
            .map(str::trim_start)
            .unwrap_or(&cleaned);

        if suffix.is_empty() {
            format!("{} {}", FOOTNOTE_PREFIX, FOOTNOTE_DEFAULT_SUFFIX)
        } else {
            format!("{} {}", FOOTNOTE_PREFIX, suffix)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nutrition::PortionUnit;

    #[test]
    fn grams_strip_trailing_zeros() {
        assert_eq!(format_amount(10.0, ValueFormat::Trimmed), "10");
        assert_eq!(format_amount(0.82, ValueFormat::Trimmed), "0.8");
        assert_eq!(format_amount(2.25, ValueFormat::Trimmed), "2.3");
        assert_eq!(format_amount(0.04, ValueFormat::Trimmed), "0");
    }

    #[test]
    fn milligrams_are_whole_numbers() {
        assert_eq!(format_amount(820.0, ValueFormat::Integer), "820");
        assert_eq!(format_amount(149.5, ValueFormat::Integer), "150");
        assert_eq!(format_amount(-0.2, ValueFormat::Integer), "0");
    }

    #[test]
    fn micrograms_keep_one_decimal() {
        assert_eq!(format_amount(5.0, ValueFormat::OneDecimal), "5.0");
        assert_eq!(format_amount(2.46, ValueFormat::OneDecimal), "2.5");
    }

    #[test]
    fn energy_appends_kilojoules_in_parentheses() {
        assert_eq!(format_energy(274, None), "274 kcal");
        assert_eq!(format_energy(274, Some(1146)), "274 kcal (1146 kJ)");
    }

    #[test]
    fn footnote_is_always_prefixed_once() {
        assert_eq!(
            FootnoteText::new("vitamin C and iron.").rendered(),
            "Not a significant source of vitamin C and iron."
        );
        assert_eq!(
            FootnoteText::new("Not a significant source of calcium.").rendered(),
            "Not a significant source of calcium."
        );
        assert_eq!(
            FootnoteText::default().rendered(),
            "Not a significant source of other nutrients."
        );
    }

    #[test]
    fn approximate_servings_read_about() {
        let mut portion = PortionInfo::new(250.0, PortionUnit::Milliliter, 2.5);
        assert_eq!(serving_size_line(&portion), "Serving size: 250 mL");
        assert_eq!(servings_line(&portion), "Servings per container: 2.5");
        portion.approximate = true;
        assert_eq!(servings_line(&portion), "Servings per container: about 2.5");
        assert_eq!(per_100_header(&portion), "per 100 mL");
    }
}
