use super::svg::is_bold;
use crate::label::{Anchor, DrawOp, LabelLayout, TITLE};
use crate::style::LabelStyle;
use crate::xml::escape_xml;

const STYLESHEET: &str = "body{margin:24px;background:#f4f4f4;}\
.label{position:relative;background:#ffffff;box-sizing:border-box;}\
.label div{position:absolute;box-sizing:border-box;}\
.label .rule{background:#000000;}\
.label .t{white-space:nowrap;line-height:1;color:#000000;}\
.label .b{font-weight:700;}";

/// Share of the font size that sits above the baseline.
const ASCENT: f32 = 0.8;

/// Self-contained HTML preview built from the same draw instructions as the
/// SVG output.
pub fn to_html(layout: &LabelLayout, style: &LabelStyle, product_name: &str) -> String {
    let title = if product_name.trim().is_empty() {
        TITLE.to_string()
    } else {
        format!("{TITLE}: {}", product_name.trim())
    };
    let font_family = escape_xml(&format!("{}, sans-serif", style.font_family));

    let mut body = String::new();
    for op in &layout.ops {
        match op {
            DrawOp::Rect {
                x,
                y,
                width,
                height,
                stroke_width,
            } => {
                body.push_str(&format!(
                    r#"<div style="left:{x:.2}px;top:{y:.2}px;width:{width:.2}px;height:{height:.2}px;border:{stroke_width:.2}px solid #000000;"></div>"#
                ));
            }
            DrawOp::HLine {
                x1,
                x2,
                y,
                stroke_width,
                ..
            } => {
                body.push_str(&format!(
                    r#"<div class="rule" style="left:{:.2}px;top:{:.2}px;width:{:.2}px;height:{:.2}px;"></div>"#,
                    x1,
                    y - stroke_width / 2.0,
                    x2 - x1,
                    stroke_width,
                ));
            }
            DrawOp::VLine {
                x,
                y1,
                y2,
                stroke_width,
                ..
            } => {
                body.push_str(&format!(
                    r#"<div class="rule" style="left:{:.2}px;top:{:.2}px;width:{:.2}px;height:{:.2}px;"></div>"#,
                    x - stroke_width / 2.0,
                    y1,
                    stroke_width,
                    y2 - y1,
                ));
            }
            DrawOp::Text {
                x,
                y,
                content,
                font_size,
                anchor,
                emphasis,
                role,
            } => {
                let class = if is_bold(*emphasis, *role) { "t b" } else { "t" };
                let top = y - font_size * ASCENT;
                let position = match anchor {
                    Anchor::Start => format!("left:{x:.2}px;"),
                    Anchor::Middle => format!("left:{x:.2}px;transform:translateX(-50%);"),
                    Anchor::End => format!("right:{:.2}px;", layout.width - x),
                };
                body.push_str(&format!(
                    r#"<div class="{class}" style="{position}top:{top:.2}px;font-size:{font_size:.2}px;">{}</div>"#,
                    escape_xml(content),
                ));
            }
        }
    }

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n<style>{css}</style>\n</head>\n<body>\n<div class=\"label\" style=\"width:{w}px;height:{h}px;font-family:{font_family};\">{body}</div>\n</body>\n</html>\n",
        title = escape_xml(&title),
        css = STYLESHEET,
        w = layout.width,
        h = layout.height,
    )
}
