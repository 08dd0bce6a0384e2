//! A character cursor over a fixed input string.
//!
//! Both the HTML parser and the CSS selector parser drive one of these.
//! The cursor addresses whole `char`s rather than bytes so that multi-byte
//! input never splits, and it reports end of input as `None` instead of a
//! sentinel character.

use crate::chars::is_whitespace;

/// A forward/backward character cursor over an input string.
///
/// The cursor starts on the first character. Every read operation returns
/// `Some(char)` while in bounds and `None` once the cursor has moved past the
/// last character. A cursor at end of input stays there until explicitly
/// repositioned.
#[derive(Debug, Clone)]
pub struct Lexer {
    chars: Vec<char>,
    index: usize,
}

impl Lexer {
    /// Creates a cursor positioned on the first character of `input`.
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            index: 0,
        }
    }

    /// The current cursor position, in characters from the start of input.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// The total input length in characters.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.chars.len()
    }

    /// Returns `true` if the input is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Returns `true` once the cursor has consumed all input.
    #[must_use]
    pub const fn at_end(&self) -> bool {
        self.index >= self.chars.len()
    }

    /// The character under the cursor, or `None` at end of input.
    #[must_use]
    pub fn current(&self) -> Option<char> {
        self.chars.get(self.index).copied()
    }

    /// Advances the cursor one character and returns the new current
    /// character.
    pub fn next_char(&mut self) -> Option<char> {
        self.index = (self.index + 1).min(self.chars.len());
        self.current()
    }

    /// The character after the cursor, without moving it.
    #[must_use]
    pub fn peek(&self) -> Option<char> {
        self.chars.get(self.index + 1).copied()
    }

    /// Moves the cursor by `amount` characters (negative moves backward) and
    /// returns the new current character.
    ///
    /// The position saturates at the ends of the input.
    pub fn advance(&mut self, amount: isize) -> Option<char> {
        let len = isize::try_from(self.chars.len()).unwrap_or(isize::MAX);
        let target = isize::try_from(self.index)
            .unwrap_or(isize::MAX)
            .saturating_add(amount)
            .clamp(0, len);
        self.index = usize::try_from(target).unwrap_or(0);
        self.current()
    }

    /// Repositions the cursor to `index`, saturating at end of input.
    pub fn seek(&mut self, index: usize) -> Option<char> {
        self.index = index.min(self.chars.len());
        self.current()
    }

    /// Skips forward while the current character is markup whitespace and
    /// returns the first non-whitespace character.
    pub fn skip_whitespace(&mut self) -> Option<char> {
        while let Some(c) = self.current() {
            if !is_whitespace(c) {
                return Some(c);
            }
            let _ = self.next_char();
        }
        None
    }

    /// Advances one character, then skips whitespace.
    pub fn next_after_whitespace(&mut self) -> Option<char> {
        let _ = self.next_char();
        self.skip_whitespace()
    }

    /// Returns `true` and consumes `literal` if the input at the cursor
    /// starts with it. On a match the cursor lands on the character after
    /// the literal; otherwise the cursor does not move.
    pub fn match_literal(&mut self, literal: &str, case_sensitive: bool) -> bool {
        let mut offset = 0usize;
        for expected in literal.chars() {
            let Some(actual) = self.chars.get(self.index + offset).copied() else {
                return false;
            };
            let matched = if case_sensitive {
                actual == expected
            } else {
                actual.eq_ignore_ascii_case(&expected)
            };
            if !matched {
                return false;
            }
            offset += 1;
        }
        self.index = (self.index + offset).min(self.chars.len());
        true
    }

    /// Moves the cursor to the next occurrence of `literal` at or after the
    /// current position, or to end of input when there is none. Returns the
    /// character the cursor lands on.
    pub fn seek_to_literal(&mut self, literal: &str, case_sensitive: bool) -> Option<char> {
        let needle: Vec<char> = literal.chars().collect();
        if needle.is_empty() {
            return self.current();
        }
        let mut i = self.index;
        while i + needle.len() <= self.chars.len() {
            let matched = needle.iter().enumerate().all(|(k, expected)| {
                let actual = self.chars[i + k];
                if case_sensitive {
                    actual == *expected
                } else {
                    actual.eq_ignore_ascii_case(expected)
                }
            });
            if matched {
                self.index = i;
                return self.current();
            }
            i += 1;
        }
        self.index = self.chars.len();
        None
    }

    /// The input text between character positions `start` (inclusive) and
    /// `end` (exclusive), clamped to the input bounds.
    #[must_use]
    pub fn slice(&self, start: usize, end: usize) -> String {
        let end = end.min(self.chars.len());
        let start = start.min(end);
        self.chars[start..end].iter().collect()
    }
}

// ========== tests ==========

#[cfg(test)]
mod tests {
    use super::Lexer;

    #[test]
    fn test_basic_cursor_movement() {
        let mut lexer = Lexer::new("abc");
        assert_eq!(lexer.current(), Some('a'));
        assert_eq!(lexer.peek(), Some('b'));
        assert_eq!(lexer.next_char(), Some('b'));
        assert_eq!(lexer.next_char(), Some('c'));
        assert_eq!(lexer.next_char(), None);
        assert!(lexer.at_end());
        assert_eq!(lexer.next_char(), None);
    }

    #[test]
    fn test_advance_saturates() {
        let mut lexer = Lexer::new("abcd");
        assert_eq!(lexer.advance(2), Some('c'));
        assert_eq!(lexer.advance(-1), Some('b'));
        assert_eq!(lexer.advance(-10), Some('a'));
        assert_eq!(lexer.advance(10), None);
        assert_eq!(lexer.index(), 4);
    }

    #[test]
    fn test_match_literal() {
        let mut lexer = Lexer::new("<!DOCTYPE html>");
        assert!(lexer.match_literal("<!doctype", false));
        assert_eq!(lexer.current(), Some(' '));
        assert!(!lexer.match_literal("HTML", true));
        assert_eq!(lexer.current(), Some(' '));
    }

    #[test]
    fn test_seek_to_literal() {
        let mut lexer = Lexer::new("one two THREE");
        assert_eq!(lexer.seek_to_literal("three", false), Some('T'));
        assert_eq!(lexer.index(), 8);
        assert_eq!(lexer.seek_to_literal("missing", true), None);
        assert!(lexer.at_end());
    }

    #[test]
    fn test_skip_whitespace() {
        let mut lexer = Lexer::new("  \t\nx y");
        assert_eq!(lexer.skip_whitespace(), Some('x'));
        assert_eq!(lexer.next_after_whitespace(), Some('y'));
    }

    #[test]
    fn test_slice_clamps() {
        let lexer = Lexer::new("héllo");
        assert_eq!(lexer.slice(1, 4), "éll");
        assert_eq!(lexer.slice(3, 99), "lo");
    }

    #[test]
    fn test_empty_input() {
        let mut lexer = Lexer::new("");
        assert!(lexer.is_empty());
        assert_eq!(lexer.current(), None);
        assert_eq!(lexer.skip_whitespace(), None);
        assert!(!lexer.match_literal("x", true));
    }
}
