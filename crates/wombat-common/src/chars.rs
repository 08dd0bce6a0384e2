//! Character classification and plain-text normalization helpers.

/// Returns `true` for characters the markup grammar treats as whitespace.
///
/// The set is every code point at or below U+0020 together with the C1
/// control block U+0080 through U+009F. This is deliberately wider than the
/// five ASCII whitespace characters named by
/// <https://html.spec.whatwg.org/multipage/syntax.html#syntax-attributes>
/// so that control characters never survive into tag or attribute names.
#[must_use]
pub const fn is_whitespace(c: char) -> bool {
    c <= '\u{20}' || matches!(c, '\u{80}'..='\u{9f}')
}

/// Returns `true` if `c` may start an XML `Name`.
///
/// Follows the `NameStartChar` production from
/// <https://www.w3.org/TR/xml/#NT-NameStartChar>.
#[must_use]
pub const fn is_name_start_char(c: char) -> bool {
    matches!(c,
        ':' | '_'
        | 'A'..='Z'
        | 'a'..='z'
        | '\u{c0}'..='\u{d6}'
        | '\u{d8}'..='\u{f6}'
        | '\u{f8}'..='\u{2ff}'
        | '\u{370}'..='\u{37d}'
        | '\u{37f}'..='\u{1fff}'
        | '\u{200c}'..='\u{200d}'
        | '\u{2070}'..='\u{218f}'
        | '\u{2c00}'..='\u{2fef}'
        | '\u{3001}'..='\u{d7ff}'
        | '\u{f900}'..='\u{fdcf}'
        | '\u{fdf0}'..='\u{fffd}'
        | '\u{10000}'..='\u{effff}')
}

/// Returns `true` if `c` may appear after the first character of an XML
/// `Name`.
///
/// Follows the `NameChar` production from
/// <https://www.w3.org/TR/xml/#NT-NameChar>.
#[must_use]
pub const fn is_name_char(c: char) -> bool {
    is_name_start_char(c)
        || matches!(c,
            '-' | '.'
            | '0'..='9'
            | '\u{b7}'
            | '\u{300}'..='\u{36f}'
            | '\u{203f}'..='\u{2040}')
}

/// Collapses every run of whitespace in `value` to a single space.
///
/// Leading and trailing runs collapse to a single space as well; callers that
/// also trim apply the trim first.
#[must_use]
pub fn collapse_whitespace(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut in_run = false;
    for c in value.chars() {
        if c.is_whitespace() || is_whitespace(c) {
            if !in_run {
                out.push(' ');
                in_run = true;
            }
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}

// ========== tests ==========
