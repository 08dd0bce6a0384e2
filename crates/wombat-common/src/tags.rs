//! Tag-name classification shared across the parser and serializer.

/// Tags that never take content and need no closing tag, per
/// <https://html.spec.whatwg.org/multipage/syntax.html#void-elements>
/// (extended with the legacy `command` and `keygen` names).
pub const VOID_ELEMENTS: &[&str] = &[
    "AREA", "BASE", "BR", "COL", "COMMAND", "EMBED", "HR", "IMG", "INPUT", "KEYGEN", "LINK",
    "META", "PARAM", "SOURCE", "TRACK", "WBR",
];

/// Elements whose content is raw text: markup inside them is not parsed and
/// entities are never decoded or encoded.
pub const RAW_TEXT_ELEMENTS: &[&str] = &["SCRIPT", "STYLE"];

/// Returns `true` if `tag_name` names a void element. The comparison is
/// ASCII case-insensitive.
#[must_use]
pub fn is_void_element(tag_name: &str) -> bool {
    VOID_ELEMENTS
        .iter()
        .any(|v| v.eq_ignore_ascii_case(tag_name))
}

/// Returns `true` if `tag_name` names a raw-text element. The comparison is
/// ASCII case-insensitive.
#[must_use]
pub fn is_raw_text_element(tag_name: &str) -> bool {
    RAW_TEXT_ELEMENTS
        .iter()
        .any(|v| v.eq_ignore_ascii_case(tag_name))
}

// ========== tests ==========

#[cfg(test)]
mod tests {
    use super::{is_raw_text_element, is_void_element};

    #[test]
    fn test_void_elements() {
        assert!(is_void_element("br"));
        assert!(is_void_element("IMG"));
        assert!(is_void_element("Input"));
        assert!(!is_void_element("div"));
    }

    #[test]
    fn test_raw_text_elements() {
        assert!(is_raw_text_element("script"));
        assert!(is_raw_text_element("STYLE"));
        assert!(!is_raw_text_element("textarea"));
    }
}
