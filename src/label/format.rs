use serde::{Deserialize, Serialize};

use super::draw::RowKind;
use crate::nutrition::Nutrient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum LabelFormat {
    #[default]
    Vertical,
    Simplified,
    Tabular,
    Linear,
}

/// How the two bases are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnGeometry {
    /// Separate "per 100" and "per portion" columns.
    Split,
    /// One column holding both values.
    Combined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrangement {
    Grid,
    /// Two grid blocks next to each other.
    SideBySide,
    /// Wrapped sentence.
    Flow,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WidthPolicy {
    /// Fractions of the style width, one per column.
    Proportional(&'static [f32]),
    /// Widest rendered text per column.
    Measured,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormatDescriptor {
    pub columns: ColumnGeometry,
    pub arrangement: Arrangement,
    pub widths: WidthPolicy,
    pub excluded: &'static [Nutrient],
}

impl FormatDescriptor {
    pub fn includes(&self, row: RowKind) -> bool {
        match row {
            RowKind::Nutrient(n) => !self.excluded.contains(&n),
            RowKind::Energy | RowKind::Micronutrient(_) => true,
        }
    }
}

impl LabelFormat {
    pub const ALL: [LabelFormat; 4] = [
        LabelFormat::Vertical,
        LabelFormat::Simplified,
        LabelFormat::Tabular,
        LabelFormat::Linear,
    ];

    pub fn descriptor(self) -> FormatDescriptor {
        match self {
            LabelFormat::Vertical => FormatDescriptor {
                columns: ColumnGeometry::Split,
                arrangement: Arrangement::Grid,
                widths: WidthPolicy::Proportional(&[0.5, 0.25, 0.25]),
                excluded: &[],
            },
            LabelFormat::Simplified => FormatDescriptor {
                columns: ColumnGeometry::Combined,
                arrangement: Arrangement::Grid,
                widths: WidthPolicy::Proportional(&[0.55, 0.45]),
                excluded: &[
                    Nutrient::Fiber,
                    Nutrient::MonounsaturatedFat,
                    Nutrient::PolyunsaturatedFat,
                ],
            },
            LabelFormat::Tabular => FormatDescriptor {
                columns: ColumnGeometry::Split,
                arrangement: Arrangement::SideBySide,
                widths: WidthPolicy::Measured,
                excluded: &[],
            },
            LabelFormat::Linear => FormatDescriptor {
                columns: ColumnGeometry::Split,
                arrangement: Arrangement::Flow,
                widths: WidthPolicy::Measured,
                excluded: &[],
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            LabelFormat::Vertical => "vertical",
            LabelFormat::Simplified => "simplified",
            LabelFormat::Tabular => "tabular",
            LabelFormat::Linear => "linear",
        }
    }
}
