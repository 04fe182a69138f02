//! Parts shared by every format: outer box, header block and footer block.

use super::draw::{Anchor, Canvas, LineRole, TextRole};
use super::text::{TITLE, product_type_line, serving_size_line, servings_line};
use crate::fonts::TextMeasure;
use crate::nutrition::{PortionInfo, ProductType};
use crate::style::{LabelStyle, LineWeights};

pub(super) struct Frame<'a> {
    pub style: &'a LabelStyle,
    pub weights: LineWeights,
    pub portion: &'a PortionInfo,
    pub product_type: Option<ProductType>,
    pub footnote: String,
}

impl Frame<'_> {
    /// Baseline of a line of body text in a row starting at `top`.
    pub fn baseline(&self, top: f32) -> f32 {
        top + (self.style.row_height + self.style.font_size * 0.7) / 2.0
    }

    fn header_lines(&self) -> Vec<String> {
        let mut lines = vec![serving_size_line(self.portion), servings_line(self.portion)];
        lines.extend(self.product_type.map(product_type_line));
        lines
    }

    /// The style's header height, plus one row per line beyond the two
    /// serving lines.
    pub fn header_height(&self) -> f32 {
        let extra = self.header_lines().len().saturating_sub(2);
        self.style.header_height + extra as f32 * self.style.row_height
    }

    /// Narrowest width that fits title, serving lines and footnote.
    pub fn min_width<T: TextMeasure>(&self, measure: &mut T) -> f32 {
        let style = self.style;
        let mut widest = measure.measure_text(TITLE, style.title_font_size, true).0;
        for line in self.header_lines() {
            widest = widest.max(measure.measure_text(&line, style.font_size, false).0);
        }
        widest = widest.max(
            measure
                .measure_text(&self.footnote, style.footnote_font_size, false)
                .0,
        );
        widest + style.padding * 2.0
    }

    pub fn height(&self, body_rows: usize) -> f32 {
        self.header_height()
            + body_rows as f32 * self.style.row_height
            + self.style.footer_height
    }

    /// Outer box, title, serving lines and the thick rule below them.
    /// Returns the y where the body starts.
    pub fn draw_header(&self, canvas: &mut Canvas, width: f32, height: f32) -> f32 {
        let style = self.style;
        canvas.rect(0.0, 0.0, width, height, self.weights.frame);

        let mut y = style.padding + style.title_font_size;
        canvas.text(
            style.padding,
            y,
            TITLE,
            style.title_font_size,
            Anchor::Start,
            false,
            TextRole::Title,
        );

        for line in self.header_lines() {
            y += style.row_height;
            canvas.text(
                style.padding,
                y,
                line,
                style.font_size,
                Anchor::Start,
                false,
                TextRole::ServingInfo,
            );
        }

        let header_height = self.header_height();
        canvas.hline(
            0.0,
            width,
            header_height,
            self.weights.thick,
            LineRole::HeaderBreak,
        );
        header_height
    }

    pub fn draw_footer(&self, canvas: &mut Canvas, width: f32, height: f32) {
        let style = self.style;
        let top = height - style.footer_height;
        canvas.hline(0.0, width, top, self.weights.thick, LineRole::FooterBreak);
        canvas.text(
            style.padding,
            top + (style.footer_height + style.footnote_font_size * 0.7) / 2.0,
            self.footnote.clone(),
            style.footnote_font_size,
            Anchor::Start,
            false,
            TextRole::Footnote,
        );
    }
}
