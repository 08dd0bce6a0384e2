//! Selector syntax errors.

use thiserror::Error;

fn diagnostic(message: &str, selector: &str, column: &usize) -> String {
    format!(
        "SyntaxError: {message}\n\n{selector}\n{caret}^\n    at index {column}",
        caret = " ".repeat(*column)
    )
}

/// A syntax error in a selector, carrying the offending selector text and
/// the character position the parser stopped at. The `Display` form renders
/// a caret diagnostic pointing at the position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", diagnostic(.message, .selector, .column))]
pub struct SelectorError {
    /// What the parser expected or found.
    pub message: String,
    /// The full selector text being parsed.
    pub selector: String,
    /// The character position the error points at.
    pub column: usize,
}

// ========== tests ==========
