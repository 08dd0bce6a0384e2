//! The selector parser.
//!
//! A single pass over the selector text builds the [`SelectorList`] AST,
//! reporting the first syntax error with a caret diagnostic. The grammar is
//! the Selectors Level 4 subset the matcher understands, plus a few forms
//! that parse but never match (`:lang()`, `:dir()`, `:nth-col()`), kept so
//! that a selector list naming them degrades to "no match" instead of
//! failing outright.

use wombat_common::chars::is_whitespace;
use wombat_common::Lexer;

use crate::ast::{
    AttrComparison, AttributeSelector, Combinator, ComplexItem, ComplexSelector,
    CompoundSelector, PseudoParams, SelectorList, SimpleSelector,
};
use crate::error::SelectorError;

/// What a functional pseudo-class expects between its parentheses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParamKind {
    Selectors,
    Identifier,
    Nth { allows_of: bool },
}

fn param_expectation(name: &str) -> Option<ParamKind> {
    match name {
        "is" | "not" | "where" | "has" => Some(ParamKind::Selectors),
        "lang" | "dir" => Some(ParamKind::Identifier),
        "nth-child" | "nth-last-child" => Some(ParamKind::Nth { allows_of: true }),
        "nth-of-type" | "nth-last-of-type" | "nth-col" | "nth-last-col" => {
            Some(ParamKind::Nth { allows_of: false })
        }
        _ => None,
    }
}

/// Parses a full selector list.
///
/// # Errors
/// [`SelectorError`] describing the first syntax error, with the character
/// position it occurred at.
pub fn parse_selector_list(selector: &str) -> Result<SelectorList, SelectorError> {
    let normalized = selector
        .replace("\r\n", "\n")
        .replace(['\r', '\u{c}'], "\n");
    let mut lexer = Lexer::new(&normalized);
    let complexes = parse_list(&mut lexer, None, false, &normalized)?;
    Ok(SelectorList { complexes })
}

fn syntax_error(
    message: impl Into<String>,
    lexer: &Lexer,
    source: &str,
    offset: isize,
) -> SelectorError {
    let column = isize::try_from(lexer.index())
        .unwrap_or(0)
        .saturating_add(offset);
    SelectorError {
        message: message.into(),
        selector: source.to_owned(),
        column: usize::try_from(column).unwrap_or(0),
    }
}

/// The recursive list parser. `terminator` is `)` inside functional
/// pseudo-classes and `None` at the top level; `relative` allows a leading
/// combinator by prepending an implicit `:scope` compound.
fn parse_list(
    lexer: &mut Lexer,
    terminator: Option<char>,
    relative: bool,
    source: &str,
) -> Result<Vec<ComplexSelector>, SelectorError> {
    // A complex selector under construction always ends with a compound,
    // possibly empty; the trailing empty compound is bookkeeping that marks
    // a pending descendant combinator and is resolved at the end.
    let mut ast: Vec<Vec<ComplexItem>> = vec![vec![ComplexItem::Compound(CompoundSelector::default())]];
    let mut the_char = lexer.skip_whitespace();

    while let Some(c) = the_char {
        if Some(c) == terminator {
            break;
        }
        match c {
            '*' => {
                let complex = ast.last_mut().unwrap_or_else(|| unreachable!());
                let compound = last_compound(complex);
                if !compound.simples.is_empty() {
                    return Err(syntax_error(
                        "Universal selectors must come before all other simple selectors.",
                        lexer,
                        source,
                        0,
                    ));
                }
                compound.simples.push(SimpleSelector::Universal);
            }

            '#' | '.' => {
                let _ = lexer.next_char();
                let name = parse_identifier(lexer);
                if name.is_empty() {
                    return Err(syntax_error("Expected an identifier.", lexer, source, 0));
                }
                let simple = if c == '#' {
                    SimpleSelector::Id(name)
                } else {
                    SimpleSelector::Class(name)
                };
                push_simple(&mut ast, simple);
            }

            '[' => {
                let simple = parse_attribute(lexer, source)?;
                push_simple(&mut ast, simple);
            }

            ':' => {
                let simple = parse_pseudo(lexer, source)?;
                push_simple(&mut ast, simple);
            }

            '>' | '+' | '~' => {
                let combinator = match c {
                    '>' => Combinator::Child,
                    '+' => Combinator::NextSibling,
                    _ => Combinator::SubsequentSibling,
                };
                let complex = ast.last_mut().unwrap_or_else(|| unreachable!());
                let trailing_empty = matches!(
                    complex.last(),
                    Some(ComplexItem::Compound(compound)) if compound.simples.is_empty()
                );
                if trailing_empty {
                    if complex.len() == 1 {
                        if relative {
                            complex.insert(0, scope_compound());
                        } else {
                            return Err(syntax_error(
                                "Absolute selectors cannot start with a combinator.",
                                lexer,
                                source,
                                0,
                            ));
                        }
                    } else if matches!(
                        complex.get(complex.len() - 2),
                        Some(ComplexItem::Combinator(_))
                    ) {
                        return Err(syntax_error(
                            "Cannot have multiple combinators in a row.",
                            lexer,
                            source,
                            0,
                        ));
                    }
                    let at = complex.len() - 1;
                    complex.insert(at, ComplexItem::Combinator(combinator));
                } else {
                    complex.push(ComplexItem::Combinator(combinator));
                    complex.push(ComplexItem::Compound(CompoundSelector::default()));
                }
            }

            ',' => {
                let complex = ast.last_mut().unwrap_or_else(|| unreachable!());
                let trailing_empty = matches!(
                    complex.last(),
                    Some(ComplexItem::Compound(compound)) if compound.simples.is_empty()
                );
                if trailing_empty {
                    // A stray comma before any compound is ignored.
                    if complex.len() > 1 {
                        let _ = complex.pop();
                        if matches!(complex.last(), Some(ComplexItem::Combinator(_))) {
                            return Err(syntax_error(
                                "Complex selectors are not allowed to end with a combinator.",
                                lexer,
                                source,
                                -1,
                            ));
                        }
                        ast.push(vec![ComplexItem::Compound(CompoundSelector::default())]);
                    }
                } else {
                    ast.push(vec![ComplexItem::Compound(CompoundSelector::default())]);
                }
                let _ = lexer.skip_whitespace();
            }

            _ => {
                if is_whitespace(c) {
                    let complex = ast.last_mut().unwrap_or_else(|| unreachable!());
                    let trailing_empty = matches!(
                        complex.last(),
                        Some(ComplexItem::Compound(compound)) if compound.simples.is_empty()
                    );
                    if !trailing_empty {
                        complex.push(ComplexItem::Compound(CompoundSelector::default()));
                    }
                    let _ = lexer.skip_whitespace();
                    let _ = lexer.advance(-1);
                } else if is_identifier_start(c) {
                    let complex = ast.last_mut().unwrap_or_else(|| unreachable!());
                    let compound = last_compound(complex);
                    if !compound.simples.is_empty() {
                        return Err(syntax_error(
                            "Type (tag name) selectors must come before all other simple selectors.",
                            lexer,
                            source,
                            0,
                        ));
                    }
                    let name = parse_identifier(lexer).to_uppercase();
                    compound.simples.push(SimpleSelector::Type(name));
                } else {
                    return Err(syntax_error(
                        format!("Unexpected character '{c}'."),
                        lexer,
                        source,
                        0,
                    ));
                }
            }
        }
        the_char = lexer.next_char();
    }

    // Resolve the trailing bookkeeping compound.
    let trailing_empty = ast.last().is_some_and(|complex| {
        matches!(
            complex.last(),
            Some(ComplexItem::Compound(compound)) if compound.simples.is_empty()
        )
    });
    if trailing_empty {
        let complex = ast.last_mut().unwrap_or_else(|| unreachable!());
        if complex.len() == 1 {
            let _ = ast.pop();
        } else {
            let _ = complex.pop();
        }
    }
    if ast
        .last()
        .is_some_and(|complex| matches!(complex.last(), Some(ComplexItem::Combinator(_))))
    {
        return Err(syntax_error(
            "Complex selectors are not allowed to end with a combinator.",
            lexer,
            source,
            -1,
        ));
    }

    Ok(ast
        .into_iter()
        .map(|items| ComplexSelector { items })
        .collect())
}

fn scope_compound() -> ComplexItem {
    ComplexItem::Compound(CompoundSelector {
        simples: vec![SimpleSelector::PseudoClass("scope".to_owned())],
    })
}

fn last_compound(complex: &mut Vec<ComplexItem>) -> &mut CompoundSelector {
    if !matches!(complex.last(), Some(ComplexItem::Compound(_))) {
        complex.push(ComplexItem::Compound(CompoundSelector::default()));
    }
    match complex.last_mut() {
        Some(ComplexItem::Compound(compound)) => compound,
        _ => unreachable!(),
    }
}

fn push_simple(ast: &mut [Vec<ComplexItem>], simple: SimpleSelector) {
    if let Some(complex) = ast.last_mut() {
        last_compound(complex).simples.push(simple);
    }
}

fn parse_attribute(lexer: &mut Lexer, source: &str) -> Result<SimpleSelector, SelectorError> {
    let _ = lexer.next_after_whitespace();
    let name = parse_identifier(lexer);
    if name.is_empty() {
        return Err(syntax_error("Expected an identifier.", lexer, source, 0));
    }

    let mut comparison = AttrComparison::Equals;
    let mut value: Option<String> = None;
    let mut ignore_case = false;

    let the_char = lexer.next_after_whitespace();
    if the_char != Some(']') {
        match the_char {
            Some('=') => {}
            Some(op @ ('~' | '|' | '^' | '$' | '*')) => {
                if lexer.peek() != Some('=') {
                    return Err(syntax_error("Expected '='.", lexer, source, 1));
                }
                comparison = match op {
                    '~' => AttrComparison::Includes,
                    '|' => AttrComparison::DashMatch,
                    '^' => AttrComparison::Prefix,
                    '$' => AttrComparison::Suffix,
                    _ => AttrComparison::Substring,
                };
                let _ = lexer.next_char();
            }
            _ => {
                let shown = the_char.map_or_else(|| "END_OF_INPUT".to_owned(), String::from);
                return Err(syntax_error(
                    format!("Unexpected character '{shown}'."),
                    lexer,
                    source,
                    0,
                ));
            }
        }

        let the_char = lexer.next_after_whitespace();
        if let Some(quote @ ('\'' | '"')) = the_char {
            // https://drafts.csswg.org/css-syntax-3/#consume-string-token
            let mut text = String::new();
            let mut c = lexer.next_char();
            while let Some(ch) = c {
                if ch == quote || ch == '\n' {
                    break;
                }
                if ch == '\\' {
                    text.push(parse_escaped_code_point(lexer));
                    c = lexer.current();
                } else {
                    text.push(ch);
                    c = lexer.next_char();
                }
            }
            value = Some(text);
        } else {
            let ident = parse_identifier(lexer);
            if ident.is_empty() {
                return Err(syntax_error("Expected an identifier.", lexer, source, 0));
            }
            value = Some(ident);
        }

        if lexer.next_after_whitespace() != Some(']') {
            let ident = parse_identifier(lexer);
            let ident_len = isize::try_from(ident.chars().count()).unwrap_or(0);
            match ident.as_str() {
                "i" | "I" => ignore_case = true,
                "s" | "S" => ignore_case = false,
                "" => {}
                _ => {
                    return Err(syntax_error(
                        format!("Unexpected identifier '{ident}'."),
                        lexer,
                        source,
                        1 - ident_len,
                    ));
                }
            }
            if lexer.next_after_whitespace() != Some(']') {
                return Err(syntax_error("Expected ']'.", lexer, source, ident_len - 1));
            }
        }
    }

    Ok(SimpleSelector::Attribute(AttributeSelector {
        name,
        comparison,
        value,
        ignore_case,
    }))
}

fn parse_pseudo(lexer: &mut Lexer, source: &str) -> Result<SimpleSelector, SelectorError> {
    let _ = lexer.next_char();
    if lexer.match_literal(":", true) {
        // https://drafts.csswg.org/selectors-4/#pseudo-elements
        let name = parse_identifier(lexer);
        if name.is_empty() {
            return Err(syntax_error(
                "Expected a pseudo-element name.",
                lexer,
                source,
                0,
            ));
        }
        return Ok(SimpleSelector::PseudoElement(name));
    }

    let name = parse_identifier(lexer);
    if name.is_empty() {
        return Err(syntax_error(
            "Expected a pseudo-class name.",
            lexer,
            source,
            0,
        ));
    }

    let Some(kind) = param_expectation(&name) else {
        // Single-colon spellings of the legacy pseudo-elements. Leaving
        // other names as pseudo-classes lets unknown ones parse and simply
        // never match.
        if matches!(name.as_str(), "before" | "after" | "first-line" | "first-letter") {
            return Ok(SimpleSelector::PseudoElement(name));
        }
        return Ok(SimpleSelector::PseudoClass(name));
    };

    if lexer.next_char() != Some('(') {
        return Err(syntax_error("Expected '('.", lexer, source, 0));
    }

    let params = match kind {
        ParamKind::Nth { allows_of } => {
            let Some((a, b)) = parse_anb(lexer) else {
                return Err(syntax_error("Invalid parameter.", lexer, source, 1));
            };
            let mut of = None;
            if allows_of {
                let save = lexer.index();
                let ident = parse_identifier(lexer);
                if ident.eq_ignore_ascii_case("of") {
                    let _ = lexer.next_char();
                    let complexes = parse_list(lexer, Some(')'), false, source)?;
                    if complexes.is_empty() {
                        return Err(syntax_error(
                            "Expected at least one selector.",
                            lexer,
                            source,
                            0,
                        ));
                    }
                    of = Some(SelectorList { complexes });
                } else {
                    let _ = lexer.seek(save);
                }
            }
            if lexer.skip_whitespace() != Some(')') {
                return Err(syntax_error("Expected ')'.", lexer, source, 0));
            }
            PseudoParams::Nth { a, b, of }
        }

        ParamKind::Selectors => {
            let _ = lexer.next_char();
            let complexes = parse_list(lexer, Some(')'), true, source)?;
            if complexes.is_empty() {
                return Err(syntax_error(
                    "Expected at least one selector.",
                    lexer,
                    source,
                    0,
                ));
            }
            PseudoParams::Selectors(SelectorList { complexes })
        }

        ParamKind::Identifier => {
            if !lexer
                .next_after_whitespace()
                .is_some_and(is_identifier_start)
            {
                return Err(syntax_error("Expected an identifier.", lexer, source, 0));
            }
            let ident = parse_identifier(lexer);
            let _ = lexer.next_char();
            PseudoParams::Identifier(ident)
        }
    };

    if lexer.skip_whitespace() != Some(')') {
        return Err(syntax_error("Expected ')'.", lexer, source, 0));
    }

    Ok(SimpleSelector::PseudoFunction { name, params })
}

/// Scans the `An+B` microsyntax
/// (<https://drafts.csswg.org/css-syntax-3/#anb-microsyntax>) starting at
/// the opening parenthesis. On success the cursor sits after the pattern's
/// trailing whitespace; on failure it is restored to the parenthesis.
fn parse_anb(lexer: &mut Lexer) -> Option<(i32, i32)> {
    let start = lexer.index();
    let mut c = lexer.next_char();
    while c.is_some_and(char::is_whitespace) {
        c = lexer.next_char();
    }

    if lexer.match_literal("even", true) {
        skip_pattern_whitespace(lexer);
        return Some((2, 0));
    }
    if lexer.match_literal("odd", true) {
        skip_pattern_whitespace(lexer);
        return Some((2, 1));
    }

    let mut sign = 1i32;
    if let Some(s @ ('+' | '-')) = c {
        if s == '-' {
            sign = -1;
        }
        c = lexer.next_char();
    }
    let mut digits = String::new();
    while let Some(d) = c.filter(char::is_ascii_digit) {
        digits.push(d);
        c = lexer.next_char();
    }

    if c == Some('n') {
        let a = if digits.is_empty() {
            sign
        } else {
            sign * digits.parse::<i32>().unwrap_or(0)
        };
        let _ = lexer.next_char();
        skip_pattern_whitespace(lexer);

        let mut b = 0;
        let after_step = lexer.index();
        if let Some(bs @ ('+' | '-')) = lexer.current() {
            let b_sign = if bs == '-' { -1 } else { 1 };
            let _ = lexer.next_char();
            skip_pattern_whitespace(lexer);
            let mut b_digits = String::new();
            while let Some(d) = lexer.current().filter(char::is_ascii_digit) {
                b_digits.push(d);
                let _ = lexer.next_char();
            }
            if b_digits.is_empty() {
                // A sign with no offset is not part of the pattern.
                let _ = lexer.seek(after_step);
            } else {
                b = b_sign * b_digits.parse::<i32>().unwrap_or(0);
                skip_pattern_whitespace(lexer);
            }
        }
        return Some((a, b));
    }

    if !digits.is_empty() {
        skip_pattern_whitespace(lexer);
        return Some((0, sign * digits.parse::<i32>().unwrap_or(0)));
    }

    let _ = lexer.seek(start);
    None
}

fn skip_pattern_whitespace(lexer: &mut Lexer) {
    while lexer.current().is_some_and(char::is_whitespace) {
        let _ = lexer.next_char();
    }
}

// https://drafts.csswg.org/css-syntax-3/#consume-name
fn parse_identifier(lexer: &mut Lexer) -> String {
    let mut name = String::new();
    let mut c = lexer.current();
    if c.is_some_and(is_identifier_start) {
        while let Some(ch) = c {
            if ch == '\\' {
                name.push(parse_escaped_code_point(lexer));
                c = lexer.current();
            } else {
                name.push(ch);
                c = lexer.next_char();
            }
            let continues = c
                .is_some_and(|next| is_identifier_start(next) || next.is_ascii_digit() || next == '-');
            if !continues {
                break;
            }
        }
        let _ = lexer.advance(-1);
    }
    name
}

// https://drafts.csswg.org/css-syntax-3/#consume-escaped-code-point
fn parse_escaped_code_point(lexer: &mut Lexer) -> char {
    let mut c = lexer.next_char();

    if c.is_some_and(|ch| ch.is_ascii_hexdigit()) {
        let mut hex = String::new();
        for _ in 0..6 {
            let Some(ch) = c.filter(char::is_ascii_hexdigit) else {
                break;
            };
            hex.push(ch);
            c = lexer.next_char();
        }
        if c.is_some_and(is_whitespace) {
            let _ = lexer.next_char();
        }
        let code = u32::from_str_radix(&hex, 16).unwrap_or(0);
        if code == 0 || (0xD800..=0xDFFF).contains(&code) || code > 0x0010_FFFF {
            return '\u{FFFD}';
        }
        return char::from_u32(code).unwrap_or('\u{FFFD}');
    }

    let Some(ch) = c else {
        return '\u{FFFD}';
    };
    let _ = lexer.next_char();
    ch
}

fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '\\' || c >= '\u{80}'
}

// ========== tests ==========

#[cfg(test)]
mod tests {
    use super::parse_selector_list;
    use crate::ast::{
        AttrComparison, Combinator, ComplexItem, PseudoParams, SimpleSelector,
    };

    fn first_compound(selector: &str) -> Vec<SimpleSelector> {
        let list = parse_selector_list(selector).expect("selector should parse");
        match &list.complexes[0].items[0] {
            ComplexItem::Compound(compound) => compound.simples.clone(),
            ComplexItem::Combinator(_) => panic!("expected a compound"),
        }
    }

    #[test]
    fn test_compound_parts() {
        let simples = first_compound("div#main.note[href^='http' i]:first-child::before");
        assert_eq!(simples.len(), 6);
        assert_eq!(simples[0], SimpleSelector::Type("DIV".to_owned()));
        assert_eq!(simples[1], SimpleSelector::Id("main".to_owned()));
        assert_eq!(simples[2], SimpleSelector::Class("note".to_owned()));
        let SimpleSelector::Attribute(attr) = &simples[3] else {
            panic!("expected an attribute selector");
        };
        assert_eq!(attr.name, "href");
        assert_eq!(attr.comparison, AttrComparison::Prefix);
        assert_eq!(attr.value.as_deref(), Some("http"));
        assert!(attr.ignore_case);
        assert_eq!(
            simples[4],
            SimpleSelector::PseudoClass("first-child".to_owned())
        );
        assert_eq!(
            simples[5],
            SimpleSelector::PseudoElement("before".to_owned())
        );
    }

    #[test]
    fn test_combinators_and_lists() {
        let list = parse_selector_list("a > b + c ~ d e, f").unwrap();
        assert_eq!(list.complexes.len(), 2);
        let items = &list.complexes[0].items;
        // Descendant compounds sit next to each other with no combinator.
        assert_eq!(items.len(), 8);
        assert_eq!(items[1], ComplexItem::Combinator(Combinator::Child));
        assert_eq!(items[3], ComplexItem::Combinator(Combinator::NextSibling));
        assert_eq!(
            items[5],
            ComplexItem::Combinator(Combinator::SubsequentSibling)
        );
        assert!(matches!(items[6], ComplexItem::Compound(_)));
        assert!(matches!(items[7], ComplexItem::Compound(_)));
        assert_eq!(list.complexes[1].items.len(), 1);
    }

    #[test]
    fn test_empty_and_stray_commas() {
        assert!(parse_selector_list("").unwrap().is_empty());
        let list = parse_selector_list(",a,,b,").unwrap();
        assert_eq!(list.complexes.len(), 2);
    }

    #[test]
    fn test_leading_combinator_is_rejected() {
        let error = parse_selector_list("> div").unwrap_err();
        assert_eq!(
            error.message,
            "Absolute selectors cannot start with a combinator."
        );
    }

    #[test]
    fn test_double_combinator_is_rejected() {
        let error = parse_selector_list("a > > b").unwrap_err();
        assert_eq!(error.message, "Cannot have multiple combinators in a row.");
    }

    #[test]
    fn test_trailing_combinator_is_rejected() {
        let error = parse_selector_list("a >").unwrap_err();
        assert_eq!(
            error.message,
            "Complex selectors are not allowed to end with a combinator."
        );
    }

    #[test]
    fn test_misplaced_type_and_universal_selectors() {
        assert!(parse_selector_list(".note div").is_ok());
        assert_eq!(
            parse_selector_list("[x]div").unwrap_err().message,
            "Type (tag name) selectors must come before all other simple selectors."
        );
        assert_eq!(
            parse_selector_list(".note*").unwrap_err().message,
            "Universal selectors must come before all other simple selectors."
        );
    }

    #[test]
    fn test_relative_selectors_get_implicit_scope() {
        let SimpleSelector::PseudoFunction { name, params } = &first_compound(":has(> li)")[0]
        else {
            panic!("expected a pseudo function");
        };
        assert_eq!(name, "has");
        let PseudoParams::Selectors(inner) = params else {
            panic!("expected selector params");
        };
        let ComplexItem::Compound(scope) = &inner.complexes[0].items[0] else {
            panic!("expected a compound");
        };
        assert!(scope.is_relative());
    }

    #[test]
    fn test_nth_patterns() {
        let cases = [
            (":nth-child(even)", (2, 0)),
            (":nth-child(odd)", (2, 1)),
            (":nth-child(7)", (0, 7)),
            (":nth-child(n)", (1, 0)),
            (":nth-child(-n+3)", (-1, 3)),
            (":nth-child(2n)", (2, 0)),
            (":nth-child( 3n + 1 )", (3, 1)),
            (":nth-child(2n-1)", (2, -1)),
        ];
        for (selector, expected) in cases {
            let simples = first_compound(selector);
            let SimpleSelector::PseudoFunction {
                params: PseudoParams::Nth { a, b, of },
                ..
            } = &simples[0]
            else {
                panic!("expected an nth pattern for {selector}");
            };
            assert_eq!((*a, *b), expected, "pattern {selector}");
            assert!(of.is_none());
        }
    }

    #[test]
    fn test_nth_of_clause() {
        let simples = first_compound(":nth-child(2n of .item, li)");
        let SimpleSelector::PseudoFunction {
            params: PseudoParams::Nth { a, b, of },
            ..
        } = &simples[0]
        else {
            panic!("expected an nth pattern");
        };
        assert_eq!((*a, *b), (2, 0));
        assert_eq!(of.as_ref().unwrap().complexes.len(), 2);
    }

    #[test]
    fn test_invalid_nth_patterns() {
        assert!(parse_selector_list(":nth-child(foo)").is_err());
        assert!(parse_selector_list(":nth-child(3 n)").is_err());
        assert!(parse_selector_list(":nth-child(+ 2n)").is_err());
        assert!(parse_selector_list(":nth-child()").is_err());
    }

    #[test]
    fn test_empty_functional_selector_is_rejected() {
        let error = parse_selector_list(":is()").unwrap_err();
        assert_eq!(error.message, "Expected at least one selector.");
    }

    #[test]
    fn test_attribute_forms() {
        let simples = first_compound("[disabled]");
        let SimpleSelector::Attribute(attr) = &simples[0] else {
            panic!("expected an attribute selector");
        };
        assert_eq!(attr.comparison, AttrComparison::Equals);
        assert!(attr.value.is_none());

        for (selector, comparison) in [
            ("[a=b]", AttrComparison::Equals),
            ("[a~=b]", AttrComparison::Includes),
            ("[a|=b]", AttrComparison::DashMatch),
            ("[a^=b]", AttrComparison::Prefix),
            ("[a$=b]", AttrComparison::Suffix),
            ("[a*=b]", AttrComparison::Substring),
        ] {
            let simples = first_compound(selector);
            let SimpleSelector::Attribute(attr) = &simples[0] else {
                panic!("expected an attribute selector for {selector}");
            };
            assert_eq!(attr.comparison, comparison, "operator of {selector}");
            assert_eq!(attr.value.as_deref(), Some("b"));
        }
    }

    #[test]
    fn test_attribute_errors() {
        assert_eq!(
            parse_selector_list("[a~b]").unwrap_err().message,
            "Expected '='."
        );
        assert_eq!(
            parse_selector_list("[a=b x]").unwrap_err().message,
            "Unexpected identifier 'x'."
        );
        assert_eq!(
            parse_selector_list("[]").unwrap_err().message,
            "Expected an identifier."
        );
    }

    #[test]
    fn test_escaped_identifiers() {
        let simples = first_compound(".a\\.b");
        assert_eq!(simples[0], SimpleSelector::Class("a.b".to_owned()));
        let simples = first_compound(".\\41 b");
        assert_eq!(simples[0], SimpleSelector::Class("Ab".to_owned()));
        let simples = first_compound(".x\\0");
        assert_eq!(simples[0], SimpleSelector::Class("x\u{FFFD}".to_owned()));
    }

    #[test]
    fn test_error_column_points_at_the_problem() {
        let error = parse_selector_list("div > {").unwrap_err();
        assert_eq!(error.message, "Unexpected character '{'.");
        assert_eq!(error.column, 6);
    }

    #[test]
    fn test_unknown_pseudo_class_parses() {
        let simples = first_compound(":hover");
        assert_eq!(simples[0], SimpleSelector::PseudoClass("hover".to_owned()));
    }
}
