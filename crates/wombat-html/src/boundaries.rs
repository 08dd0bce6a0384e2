//! The tag-boundary auto-close table.
//!
//! Largely based on '13.1.2.4 Optional tags' from the HTML spec:
//! <https://html.spec.whatwg.org/multipage/syntax.html#optional-tags>.
//! Opening a tag that appears as a key here implicitly closes the listed
//! currently-open tags, so `<li>one<li>two` nests the way browsers read it
//! instead of the way the missing end tags would suggest.

const P_BOUNDARY: &[&str] = &["P"];
const DEFINITION_BOUNDARY: &[&str] = &["DD", "DT"];
const TABLE_SECTION_BOUNDARY: &[&str] = &["TBODY", "THEAD", "TFOOT"];
const TABLE_CELL_BOUNDARY: &[&str] = &["TD", "TH"];
const FORM_ELEMENT_BOUNDARY: &[&str] = &[
    "BUTTON", "DATALIST", "OPTGROUP", "OPTION", "PROGRESS", "SELECT", "TEXTAREA",
];

/// Returns `true` when opening `new_tag` implicitly closes a currently-open
/// `open_tag`. Both names are expected uppercase.
#[must_use]
pub fn implicitly_closes(new_tag: &str, open_tag: &str) -> bool {
    let boundary: &[&str] = match new_tag {
        "ADDRESS" | "ARTICLE" | "ASIDE" | "BLOCKQUOTE" | "DIV" | "FIELDSET" | "FOOTER" | "H1"
        | "H2" | "H3" | "H4" | "H5" | "H6" | "HEADER" | "HGROUP" | "HR" | "MAIN" | "NAV" | "P"
        | "PRE" | "SECTION" | "DL" | "TABLE" | "OL" | "UL" | "FORM" => P_BOUNDARY,

        "BODY" => &["HEAD", "TITLE"],

        "DD" | "DT" => DEFINITION_BOUNDARY,

        "TBODY" | "THEAD" | "TFOOT" => TABLE_SECTION_BOUNDARY,
        "TD" | "TH" => TABLE_CELL_BOUNDARY,
        "TR" => &["TR"],

        "LI" => &["LI"],

        "BUTTON" | "DATALIST" | "INPUT" | "OUTPUT" | "PROGRESS" | "SELECT" | "TEXTAREA" => {
            FORM_ELEMENT_BOUNDARY
        }
        "OPTGROUP" => &["OPTGROUP", "OPTION"],
        "OPTION" => &["OPTION"],

        _ => &[],
    };
    boundary.contains(&open_tag)
}

// ========== tests ==========

#[cfg(test)]
mod tests {
    use super::implicitly_closes;

    #[test]
    fn test_paragraph_boundaries() {
        assert!(implicitly_closes("DIV", "P"));
        assert!(implicitly_closes("TABLE", "P"));
        assert!(!implicitly_closes("SPAN", "P"));
        assert!(!implicitly_closes("DIV", "DIV"));
    }

    #[test]
    fn test_body_closes_head() {
        assert!(implicitly_closes("BODY", "HEAD"));
        assert!(implicitly_closes("BODY", "TITLE"));
        assert!(!implicitly_closes("BODY", "P"));
    }

    #[test]
    fn test_option_groups() {
        assert!(implicitly_closes("OPTION", "OPTION"));
        assert!(!implicitly_closes("OPTION", "OPTGROUP"));
        assert!(implicitly_closes("OPTGROUP", "OPTION"));
        assert!(implicitly_closes("SELECT", "OPTION"));
    }
}
