use crate::label::{DrawOp, LabelLayout, TextRole};
use crate::style::LabelStyle;
use crate::xml::escape_xml;

const BACKGROUND: &str = "#ffffff";
const INK: &str = "#000000";

pub(crate) fn is_bold(emphasis: bool, role: TextRole) -> bool {
    emphasis || matches!(role, TextRole::Title | TextRole::ColumnHeader)
}

fn svg_body(layout: &LabelLayout, style: &LabelStyle) -> String {
    let font_family = escape_xml(&format!("{}, sans-serif", style.font_family));
    let mut content = String::new();

    for op in &layout.ops {
        match op {
            DrawOp::Rect {
                x,
                y,
                width,
                height,
                stroke_width,
            } => {
                // Inset by half the stroke so the frame stays on the canvas.
                let half = stroke_width / 2.0;
                content.push_str(&format!(
                    r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="none" stroke="{}" stroke-width="{:.2}" />"#,
                    x + half,
                    y + half,
                    (width - stroke_width).max(0.0),
                    (height - stroke_width).max(0.0),
                    INK,
                    stroke_width,
                ));
            }
            DrawOp::HLine {
                x1,
                x2,
                y,
                stroke_width,
                ..
            } => {
                content.push_str(&format!(
                    r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="{:.2}" />"#,
                    x1, y, x2, y, INK, stroke_width,
                ));
            }
            DrawOp::VLine {
                x,
                y1,
                y2,
                stroke_width,
                ..
            } => {
                content.push_str(&format!(
                    r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="{:.2}" />"#,
                    x, y1, x, y2, INK, stroke_width,
                ));
            }
            DrawOp::Text {
                x,
                y,
                content: text,
                font_size,
                anchor,
                emphasis,
                role,
            } => {
                let weight_attr = if is_bold(*emphasis, *role) {
                    " font-weight=\"700\""
                } else {
                    ""
                };
                content.push_str(&format!(
                    r#"<text x="{:.2}" y="{:.2}" font-family="{}" font-size="{:.2}" fill="{}" text-anchor="{}"{}>{}</text>"#,
                    x,
                    y,
                    font_family,
                    font_size,
                    INK,
                    anchor.as_svg(),
                    weight_attr,
                    escape_xml(text),
                ));
            }
        }
    }

    content
}

/// Standalone SVG of the label: white background, black ink.
pub fn to_svg(layout: &LabelLayout, style: &LabelStyle) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}"><rect width="100%" height="100%" fill="{bg}" />{body}</svg>"#,
        w = layout.width,
        h = layout.height,
        bg = BACKGROUND,
        body = svg_body(layout, style),
    )
}

/// The label centered on a page of the style's page size. The page grows
/// when the label does not fit.
pub fn to_page_svg(layout: &LabelLayout, style: &LabelStyle) -> String {
    let page_w = style.page_width.max(layout.width + style.padding * 2.0);
    let page_h = style.page_height.max(layout.height + style.padding * 2.0);
    let dx = (page_w - layout.width) / 2.0;
    let dy = (page_h - layout.height) / 2.0;

    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {pw} {ph}" width="{pw}" height="{ph}"><rect width="100%" height="100%" fill="{bg}" /><g transform="translate({dx:.2},{dy:.2})"><rect width="{w}" height="{h}" fill="{bg}" />{body}</g></svg>"#,
        pw = page_w,
        ph = page_h,
        bg = BACKGROUND,
        dx = dx,
        dy = dy,
        w = layout.width,
        h = layout.height,
        body = svg_body(layout, style),
    )
}
