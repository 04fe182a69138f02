//! Linear format: the label as one wrapped sentence.

use super::draw::{Anchor, Canvas, LabelLayout, LineRole, TextRole};
use super::frame::Frame;
use super::rows::{LabelRow, Section};
use super::text::{PER_PORTION_HEADER, per_100_header};
use crate::fonts::TextMeasure;

enum Piece {
    Span {
        text: String,
        emphasis: bool,
        role: TextRole,
    },
    /// Start a new line with a section rule above it.
    SectionBreak,
}

fn span(text: impl Into<String>, emphasis: bool, role: TextRole) -> Piece {
    Piece::Span {
        text: text.into(),
        emphasis,
        role,
    }
}

fn pieces(frame: &Frame, rows: &[LabelRow]) -> Vec<Piece> {
    let mut out = vec![
        span(
            format!("{} / {}:", per_100_header(frame.portion), PER_PORTION_HEADER),
            false,
            TextRole::ColumnHeader,
        ),
        span(" ", false, TextRole::Connector),
    ];

    for (i, row) in rows.iter().enumerate() {
        if i > 0 {
            let starts_section = row.section == Section::Micronutrients
                && rows[i - 1].section == Section::Macronutrients;
            if starts_section {
                out.push(span(".", false, TextRole::Connector));
                out.push(Piece::SectionBreak);
            } else {
                out.push(span(", ", false, TextRole::Connector));
            }
        }

        let emphasis = row.emphasis();
        out.push(span(
            format!("{} ", row.label()),
            emphasis,
            TextRole::RowLabel(row.kind),
        ));
        out.push(span(
            format!("{} / {}", row.per_100, row.per_portion),
            emphasis,
            TextRole::RowValue(row.kind),
        ));
    }
    out.push(span(".", false, TextRole::Connector));
    out
}

struct PlacedRun {
    x: f32,
    line: usize,
    text: String,
    emphasis: bool,
    role: TextRole,
}

/// Greedy word wrap over measured token widths.
struct Flow<'m, T: TextMeasure> {
    measure: &'m mut T,
    font_size: f32,
    left: f32,
    right: f32,
    cursor: f32,
    line: usize,
    runs: Vec<PlacedRun>,
    section_breaks: Vec<usize>,
}

impl<T: TextMeasure> Flow<'_, T> {
    fn at_line_start(&self) -> bool {
        self.cursor <= self.left
    }

    fn new_line(&mut self) {
        self.line += 1;
        self.cursor = self.left;
    }

    fn push(&mut self, text: &str, emphasis: bool, role: TextRole) {
        let mut run = String::new();
        let mut run_x = self.cursor;

        for token in text.split_inclusive(' ') {
            if self.at_line_start() && token.trim().is_empty() {
                continue;
            }

            let (full, _) = self.measure.measure_text(token, self.font_size, emphasis);
            let (visible, _) = self
                .measure
                .measure_text(token.trim_end(), self.font_size, emphasis);

            if !self.at_line_start() && self.cursor + visible > self.right {
                self.flush(&mut run, run_x, emphasis, role);
                self.new_line();
                run_x = self.cursor;
                if token.trim().is_empty() {
                    continue;
                }
            }

            run.push_str(token);
            self.cursor += full;
        }

        self.flush(&mut run, run_x, emphasis, role);
    }

    fn flush(&mut self, run: &mut String, x: f32, emphasis: bool, role: TextRole) {
        let text = run.trim_end();
        if !text.is_empty() {
            self.runs.push(PlacedRun {
                x,
                line: self.line,
                text: text.to_string(),
                emphasis,
                role,
            });
        }
        run.clear();
    }

    fn section_break(&mut self) {
        if !self.at_line_start() {
            self.new_line();
        }
        self.section_breaks.push(self.line);
    }
}

pub(super) fn layout_linear<T: TextMeasure>(
    frame: &Frame,
    rows: &[LabelRow],
    measure: &mut T,
) -> LabelLayout {
    let style = frame.style;
    let width = style.linear_width.max(frame.min_width(measure));

    let mut flow = Flow {
        measure,
        font_size: style.font_size,
        left: style.padding,
        right: width - style.padding,
        cursor: style.padding,
        line: 0,
        runs: Vec::new(),
        section_breaks: Vec::new(),
    };

    for piece in pieces(frame, rows) {
        match piece {
            Piece::Span {
                text,
                emphasis,
                role,
            } => flow.push(&text, emphasis, role),
            Piece::SectionBreak => flow.section_break(),
        }
    }

    let lines = flow.line + 1;
    let height = frame.height(lines);

    let mut canvas = Canvas::new();
    let top = frame.draw_header(&mut canvas, width, height);

    for line in &flow.section_breaks {
        let y = top + *line as f32 * style.row_height;
        canvas.hline(0.0, width, y, frame.weights.thick, LineRole::SectionBreak);
    }

    for run in flow.runs {
        canvas.text(
            run.x,
            frame.baseline(top + run.line as f32 * style.row_height),
            run.text,
            style.font_size,
            Anchor::Start,
            run.emphasis,
            run.role,
        );
    }

    frame.draw_footer(&mut canvas, width, height);
    canvas.finish(width, height)
}
