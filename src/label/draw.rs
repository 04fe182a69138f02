//! Backend-neutral draw instructions.

use crate::nutrition::{Micronutrient, Nutrient};

/// Which label row a piece of text belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowKind {
    Energy,
    Nutrient(Nutrient),
    Micronutrient(Micronutrient),
}

impl RowKind {
    /// Regulation-mandated bold rows; identical on every format.
    pub fn is_emphasized(self) -> bool {
        match self {
            RowKind::Energy => true,
            RowKind::Nutrient(n) => n.is_emphasized(),
            RowKind::Micronutrient(_) => false,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RowKind::Energy => "Energy",
            RowKind::Nutrient(n) => n.label(),
            RowKind::Micronutrient(m) => m.label(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRole {
    Title,
    ServingInfo,
    ColumnHeader,
    RowLabel(RowKind),
    RowValue(RowKind),
    /// Punctuation between spans of the linear format.
    Connector,
    Footnote,
}

impl TextRole {
    pub fn row(self) -> Option<RowKind> {
        match self {
            TextRole::RowLabel(kind) | TextRole::RowValue(kind) => Some(kind),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRole {
    HeaderBreak,
    ColumnHeaderBreak,
    RowDivider,
    ColumnDivider,
    /// Opens the vitamin/mineral section.
    SectionBreak,
    FooterBreak,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    pub fn as_svg(self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        stroke_width: f32,
    },
    HLine {
        x1: f32,
        x2: f32,
        y: f32,
        stroke_width: f32,
        role: LineRole,
    },
    VLine {
        x: f32,
        y1: f32,
        y2: f32,
        stroke_width: f32,
        role: LineRole,
    },
    /// `y` is the baseline.
    Text {
        x: f32,
        y: f32,
        content: String,
        font_size: f32,
        anchor: Anchor,
        emphasis: bool,
        role: TextRole,
    },
}

/// Output of the layout renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelLayout {
    pub width: f32,
    pub height: f32,
    pub ops: Vec<DrawOp>,
}

impl LabelLayout {
    pub fn texts(&self) -> impl Iterator<Item = (&str, bool, TextRole)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text {
                content,
                emphasis,
                role,
                ..
            } => Some((content.as_str(), *emphasis, *role)),
            _ => None,
        })
    }

    pub fn count_lines(&self, wanted: LineRole) -> usize {
        self.ops
            .iter()
            .filter(|op| match op {
                DrawOp::HLine { role, .. } | DrawOp::VLine { role, .. } => *role == wanted,
                _ => false,
            })
            .count()
    }
}

/// Collects ops while a layout is being built.
pub(crate) struct Canvas {
    ops: Vec<DrawOp>,
}

impl Canvas {
    pub fn new() -> Self {
        Self { ops: Vec::new() }
    }

    pub fn rect(&mut self, x: f32, y: f32, width: f32, height: f32, stroke_width: f32) {
        self.ops.push(DrawOp::Rect {
            x,
            y,
            width,
            height,
            stroke_width,
        });
    }

    pub fn hline(&mut self, x1: f32, x2: f32, y: f32, stroke_width: f32, role: LineRole) {
        self.ops.push(DrawOp::HLine {
            x1,
            x2,
            y,
            stroke_width,
            role,
        });
    }

    pub fn vline(&mut self, x: f32, y1: f32, y2: f32, stroke_width: f32, role: LineRole) {
        self.ops.push(DrawOp::VLine {
            x,
            y1,
            y2,
            stroke_width,
            role,
        });
    }

    #[allow(clippy::too_many_arguments)]
    pub fn text(
        &mut self,
        x: f32,
        y: f32,
        content: impl Into<String>,
        font_size: f32,
        anchor: Anchor,
        emphasis: bool,
        role: TextRole,
    ) {
        self.ops.push(DrawOp::Text {
            x,
            y,
            content: content.into(),
            font_size,
            anchor,
            emphasis,
            role,
        });
    }

    pub fn finish(self, width: f32, height: f32) -> LabelLayout {
        LabelLayout {
            width,
            height,
            ops: self.ops,
        }
    }
}
