/// XML 1.0 valid char ranges:
/// - 0x09, 0x0A, 0x0D
/// - 0x20..=0xD7FF
/// - 0xE000..=0xFFFD
/// - 0x10000..=0x10FFFF
fn is_valid_xml_char(c: char) -> bool {
    matches!(
        c as u32,
        0x09 | 0x0A | 0x0D | 0x20..=0xD7FF | 0xE000..=0xFFFD | 0x10000..=0x10FFFF
    )
}

/// Cleans free text typed into the form (product name, footnote) for a
/// single label line: invalid XML chars dropped, whitespace runs collapsed.
pub fn sanitize_label_text(text: &str) -> String {
    text.chars()
        .filter(|&c| is_valid_xml_char(c))
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Escapes text for SVG and HTML output alike.
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if !is_valid_xml_char(c) {
            continue;
        }
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::{escape_xml, sanitize_label_text};

    #[test]
    fn footnote_text_loses_control_chars_and_newlines() {
        let s = "vitamin\u{0007} C\n  and\tiron ";
        assert_eq!(sanitize_label_text(s), "vitamin C and iron");
    }

    #[test]
    fn escape_special_xml_chars() {
        let s = r#"Fat & "oil" <10%>"#;
        assert_eq!(
            escape_xml(s),
            "Fat &amp; &quot;oil&quot; &lt;10%&gt;"
        );
    }

    #[test]
    fn micro_sign_survives_escaping() {
        assert_eq!(escape_xml("5.0 µg RE"), "5.0 µg RE");
    }
}
