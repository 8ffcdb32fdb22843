//! HTML escaping for cell values.

use crate::data::CellValue;

/// Characters replaced by a numeric reference, besides `<`, `>` and `&`.
const ENCODED_RANGE: std::ops::RangeInclusive<char> = '\u{00A0}'..='\u{9999}';

/// Convert a cell to a string that is safe to place inside an HTML element.
///
/// Null becomes the empty string. Every `<`, `>`, `&` and every character in
/// U+00A0..=U+9999 becomes `&#<decimal code point>;`. Everything else,
/// quotes included, is passed through.
pub fn escape_text(value: &CellValue) -> String {
    match value {
        CellValue::Null => String::new(),
        CellValue::Text(s) => escape_str(s),
        other => escape_str(&other.to_string()),
    }
}

/// [`escape_text`] for plain strings.
pub fn escape_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '<' | '>' | '&') || ENCODED_RANGE.contains(&c) {
            out.push_str("&#");
            out.push_str(&(c as u32).to_string());
            out.push(';');
        } else {
            out.push(c);
        }
    }
    out
}

/// Escape a value for a single- or double-quoted attribute: [`escape_str`]
/// plus both quote characters.
pub fn escape_attr(s: &str) -> String {
    escape_str(s).replace('"', "&#34;").replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_is_empty() {
        assert_eq!(escape_text(&CellValue::Null), "");
    }

    #[test]
    fn test_markup_characters() {
        let escaped = escape_str("<script>alert('x') && 1</script>");
        assert_eq!(
            escaped,
            "&#60;script&#62;alert('x') &#38;&#38; 1&#60;/script&#62;"
        );
        assert!(!escaped.contains('<'));
        assert!(!escaped.contains('>'));
    }

    #[test]
    fn test_ascii_punctuation_passes_through() {
        assert_eq!(escape_str(r#"a "quoted" / path;"#), r#"a "quoted" / path;"#);
    }

    #[test]
    fn test_encoded_range() {
        // NBSP, e-acute, euro sign, and the last encoded code point
        assert_eq!(escape_str("\u{00A0}"), "&#160;");
        assert_eq!(escape_str("café"), "caf&#233;");
        assert_eq!(escape_str("€5"), "&#8364;5");
        assert_eq!(escape_str("\u{9999}"), "&#39321;");
        // just outside the range on either side
        assert_eq!(escape_str("\u{009F}"), "\u{009F}");
        assert_eq!(escape_str("\u{999A}"), "\u{999A}");
        assert_eq!(escape_str("😀"), "😀");
    }

    #[test]
    fn test_non_text_cells() {
        assert_eq!(escape_text(&CellValue::Number(42.0)), "42");
        assert_eq!(escape_text(&CellValue::Bool(false)), "false");
        assert_eq!(escape_text(&CellValue::text("<b>")), "&#60;b&#62;");
    }

    #[test]
    fn test_attribute_quotes() {
        assert_eq!(escape_attr(r#"a'b"c<"#), "a&#39;b&#34;c&#60;");
    }
}
