mod draw;
mod format;
mod frame;
mod grid;
mod linear;
mod rows;
mod text;

pub use draw::{Anchor, DrawOp, LabelLayout, LineRole, RowKind, TextRole};
pub use format::{Arrangement, ColumnGeometry, FormatDescriptor, LabelFormat, WidthPolicy};
pub use rows::{LabelRow, Section, build_rows};
pub use text::{FOOTNOTE_PREFIX, FootnoteText, TITLE, format_amount, format_energy};

use crate::fonts::TextMeasure;
use crate::nutrition::{
    NormalizeOptions, NutrientProfile, NutrientTable, PortionInfo, ProductType, normalize,
};
use crate::style::{LabelStyle, Units};
use frame::Frame;

/// Everything one render needs, built fresh from the form.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelRequest {
    pub product_name: String,
    pub profile: NutrientProfile,
    pub portion: PortionInfo,
    pub product_type: Option<ProductType>,
    pub format: LabelFormat,
    pub footnote: FootnoteText,
    pub kilojoules: bool,
}

impl LabelRequest {
    pub fn table(&self) -> NutrientTable {
        normalize(
            &self.profile,
            &self.portion,
            NormalizeOptions {
                kilojoules: self.kilojoules,
            },
        )
    }

    /// Normalizes and lays out in one go.
    pub fn render<T: TextMeasure>(
        &self,
        style: &LabelStyle,
        units: Units,
        measure: &mut T,
    ) -> LabelLayout {
        render_label(
            &self.table(),
            self.format,
            self.product_type,
            &self.footnote,
            style,
            units,
            measure,
        )
    }
}

/// Lays out a normalized table as draw instructions for `format`.
pub fn render_label<T: TextMeasure>(
    table: &NutrientTable,
    format: LabelFormat,
    product_type: Option<ProductType>,
    footnote: &FootnoteText,
    style: &LabelStyle,
    units: Units,
    measure: &mut T,
) -> LabelLayout {
    let descriptor = format.descriptor();
    let rows = build_rows(table, &descriptor);
    let frame = Frame {
        style,
        weights: style.line_weights(units),
        portion: &table.portion,
        product_type,
        footnote: footnote.rendered(),
    };

    let layout = match descriptor.arrangement {
        Arrangement::Grid => grid::layout_proportional(&frame, &descriptor, &rows, measure),
        Arrangement::SideBySide => grid::layout_tabular(&frame, &descriptor, &rows, measure),
        Arrangement::Flow => linear::layout_linear(&frame, &rows, measure),
    };

    tracing::debug!(
        format = format.name(),
        rows = rows.len(),
        width = layout.width,
        height = layout.height,
        ops = layout.ops.len(),
        "label laid out"
    );
    layout
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::fonts::TextMeasure;

    /// Every char is 0.55 em wide, bold adds 10%.
    pub struct FixedAdvance;

    impl TextMeasure for FixedAdvance {
        fn measure_text(&mut self, text: &str, font_size: f32, is_bold: bool) -> (f32, f32) {
            let advance = if is_bold { 0.605 } else { 0.55 };
            (
                text.chars().count() as f32 * font_size * advance,
                font_size * 1.2,
            )
        }
    }
}
