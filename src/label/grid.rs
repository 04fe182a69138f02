//! Table formats: Vertical and Simplified (proportional columns) and
//! Tabular (two measured blocks side by side).

use super::draw::{Anchor, Canvas, LabelLayout, LineRole, RowKind, TextRole};
use super::format::{ColumnGeometry, FormatDescriptor, WidthPolicy};
use super::frame::Frame;
use super::rows::{LabelRow, Section};
use super::text::{PER_PORTION_HEADER, per_100_header};
use crate::fonts::TextMeasure;
use crate::nutrition::Nutrient;

struct Block<'a> {
    x: f32,
    widths: Vec<f32>,
    rows: &'a [LabelRow],
}

impl Block<'_> {
    fn width(&self) -> f32 {
        self.widths.iter().sum()
    }
}

fn column_headers(frame: &Frame, columns: ColumnGeometry) -> Vec<String> {
    let per_100 = per_100_header(frame.portion);
    match columns {
        ColumnGeometry::Split => vec![per_100, PER_PORTION_HEADER.to_string()],
        ColumnGeometry::Combined => vec![format!("{} | {}", per_100, PER_PORTION_HEADER)],
    }
}

/// Vertical and Simplified: the style width split by fixed fractions.
///
/// The fractions hold, but the label widens when a column's widest text, the
/// header lines or the footnote would not fit.
pub(super) fn layout_proportional<T: TextMeasure>(
    frame: &Frame,
    descriptor: &FormatDescriptor,
    rows: &[LabelRow],
    measure: &mut T,
) -> LabelLayout {
    let fractions: &[f32] = match descriptor.widths {
        WidthPolicy::Proportional(fractions) => fractions,
        WidthPolicy::Measured => &[],
    };
    let headers = column_headers(frame, descriptor.columns);
    let needed = measure_columns(frame, rows, &headers, descriptor.columns, measure);

    let width = fractions
        .iter()
        .zip(&needed)
        .map(|(fraction, need)| need / fraction)
        .fold(frame.style.width.max(frame.min_width(measure)), f32::max);
    if width > frame.style.width {
        tracing::debug!(width, style_width = frame.style.width, "label widened to fit its text");
    }
    let widths = fractions.iter().map(|f| f * width).collect();

    let height = frame.height(rows.len() + 1);
    let mut canvas = Canvas::new();
    let top = frame.draw_header(&mut canvas, width, height);

    let block = Block { x: 0.0, widths, rows };
    draw_block(&mut canvas, frame, &block, top, &headers, descriptor.columns);

    frame.draw_footer(&mut canvas, width, height);
    canvas.finish(width, height)
}

fn in_left_block(kind: RowKind) -> bool {
    match kind {
        RowKind::Energy | RowKind::Micronutrient(_) => true,
        RowKind::Nutrient(n) => matches!(
            n,
            Nutrient::TotalFat
                | Nutrient::SaturatedFat
                | Nutrient::TransFat
                | Nutrient::MonounsaturatedFat
                | Nutrient::PolyunsaturatedFat
        ),
    }
}

/// Tabular: energy, fats and micronutrients on the left, carbohydrates to
/// sodium on the right. Columns are as wide as their widest text.
pub(super) fn layout_tabular<T: TextMeasure>(
    frame: &Frame,
    descriptor: &FormatDescriptor,
    rows: &[LabelRow],
    measure: &mut T,
) -> LabelLayout {
    let (left, right): (Vec<LabelRow>, Vec<LabelRow>) =
        rows.iter().cloned().partition(|row| in_left_block(row.kind));
    let headers = column_headers(frame, descriptor.columns);

    let mut left_widths = measure_columns(frame, &left, &headers, descriptor.columns, measure);
    let mut right_widths = measure_columns(frame, &right, &headers, descriptor.columns, measure);

    let content_width: f32 = left_widths.iter().sum::<f32>() + right_widths.iter().sum::<f32>();
    let deficit = frame.min_width(measure) - content_width;
    if deficit > 0.0 {
        left_widths[0] += deficit / 2.0;
        right_widths[0] += deficit / 2.0;
    }

    let left = Block {
        x: 0.0,
        widths: left_widths,
        rows: &left,
    };
    let right = Block {
        x: left.width(),
        widths: right_widths,
        rows: &right,
    };
    let width = left.width() + right.width();
    let height = frame.height(left.rows.len().max(right.rows.len()) + 1);

    let mut canvas = Canvas::new();
    let top = frame.draw_header(&mut canvas, width, height);
    draw_block(&mut canvas, frame, &left, top, &headers, descriptor.columns);
    draw_block(&mut canvas, frame, &right, top, &headers, descriptor.columns);
    canvas.vline(
        right.x,
        top,
        height - frame.style.footer_height,
        frame.weights.medium,
        LineRole::ColumnDivider,
    );

    frame.draw_footer(&mut canvas, width, height);
    canvas.finish(width, height)
}

fn measure_columns<T: TextMeasure>(
    frame: &Frame,
    rows: &[LabelRow],
    headers: &[String],
    columns: ColumnGeometry,
    measure: &mut T,
) -> Vec<f32> {
    let style = frame.style;
    let pad = style.padding * 2.0;

    let mut label_width: f32 = 0.0;
    for row in rows {
        let (w, _) = measure.measure_text(row.label(), style.font_size, row.emphasis());
        label_width = label_width.max(w + row.depth as f32 * style.indent);
    }

    let mut widths = vec![label_width + pad];
    for (i, header) in headers.iter().enumerate() {
        let mut column: f32 = measure.measure_text(header, style.font_size, true).0;
        for row in rows {
            if let Some(value) = row.values(columns).get(i) {
                column = column.max(measure.measure_text(value, style.font_size, row.emphasis()).0);
            }
        }
        widths.push(column + pad);
    }
    widths
}

fn draw_block(
    canvas: &mut Canvas,
    frame: &Frame,
    block: &Block,
    top: f32,
    headers: &[String],
    columns: ColumnGeometry,
) {
    let style = frame.style;
    let weights = frame.weights;
    let right_edge = block.x + block.width();

    let mut column_edges = Vec::with_capacity(block.widths.len());
    let mut edge = block.x;
    for w in &block.widths {
        column_edges.push((edge, edge + w));
        edge += w;
    }

    let mut y = top;
    for (header, (left, right)) in headers.iter().zip(column_edges.iter().skip(1)) {
        canvas.text(
            (left + right) / 2.0,
            frame.baseline(y),
            header.clone(),
            style.font_size,
            Anchor::Middle,
            false,
            TextRole::ColumnHeader,
        );
    }
    y += style.row_height;
    canvas.hline(
        block.x,
        right_edge,
        y,
        weights.medium,
        LineRole::ColumnHeaderBreak,
    );

    for (i, row) in block.rows.iter().enumerate() {
        let baseline = frame.baseline(y);
        let emphasis = row.emphasis();

        canvas.text(
            block.x + style.padding + row.depth as f32 * style.indent,
            baseline,
            row.label(),
            style.font_size,
            Anchor::Start,
            emphasis,
            TextRole::RowLabel(row.kind),
        );
        for (value, (_, right)) in row.values(columns).into_iter().zip(column_edges.iter().skip(1)) {
            canvas.text(
                right - style.padding,
                baseline,
                value,
                style.font_size,
                Anchor::End,
                emphasis,
                TextRole::RowValue(row.kind),
            );
        }
        y += style.row_height;

        match block.rows.get(i + 1) {
            Some(next)
                if next.section == Section::Micronutrients
                    && row.section == Section::Macronutrients =>
            {
                canvas.hline(block.x, right_edge, y, weights.thick, LineRole::SectionBreak);
            }
            Some(_) => canvas.hline(block.x, right_edge, y, weights.thin, LineRole::RowDivider),
            None => {}
        }
    }

    for (left, _) in column_edges.iter().skip(1) {
        canvas.vline(*left, top, y, weights.thin, LineRole::ColumnDivider);
    }
}
