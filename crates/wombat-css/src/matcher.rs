//! Matching compiled selectors against document trees.
//!
//! A complex selector is evaluated right to left against a candidate node,
//! walking the tree through a small combinator state machine. Relative
//! selectors (the argument of `:has()`) run left to right from the anchor
//! instead, with the sibling directions flipped. Unknown pseudo-class and
//! pseudo-function names never match; validity of the selector itself was
//! already checked at parse time.

use std::borrow::Cow;
use std::str::FromStr;

use strum_macros::EnumString;
use wombat_common::warning::warn_once;
use wombat_dom::{AttrValue, Document, NodeId, NodeKind};

use crate::ast::{
    AttrComparison, AttributeSelector, Combinator, ComplexItem, ComplexSelector,
    CompoundSelector, PseudoParams, SelectorList, SimpleSelector,
};
use crate::error::SelectorError;
use crate::parser::parse_selector_list;

/// Tags whose `:enabled` and `:disabled` state follows the `disabled`
/// attribute.
const FORM_STATE_TAGS: [&str; 7] = [
    "BUTTON", "INPUT", "SELECT", "TEXTAREA", "OPTGROUP", "OPTION", "FIELDSET",
];

/// Tags that `:required` and `:optional` apply to.
const REQUIRABLE_TAGS: [&str; 3] = ["INPUT", "SELECT", "TEXTAREA"];

/// Returns the first descendant of `scope` matching `selector`, in
/// pre-order.
///
/// # Errors
/// [`SelectorError`] when the selector does not compile.
pub fn query_selector(
    doc: &Document,
    scope: NodeId,
    selector: &str,
) -> Result<Option<NodeId>, SelectorError> {
    let list = parse_selector_list(selector)?;
    let mut found = None;
    doc.for_each(scope, Some(NodeKind::Element), |d, node| {
        if matches_selector_list(d, scope, node, &list) {
            found = Some(node);
            return false;
        }
        true
    });
    Ok(found)
}

/// Returns every descendant of `scope` matching `selector`, in pre-order.
///
/// # Errors
/// [`SelectorError`] when the selector does not compile.
pub fn query_selector_all(
    doc: &Document,
    scope: NodeId,
    selector: &str,
) -> Result<Vec<NodeId>, SelectorError> {
    let list = parse_selector_list(selector)?;
    let mut found = Vec::new();
    doc.for_each(scope, Some(NodeKind::Element), |d, node| {
        if matches_selector_list(d, scope, node, &list) {
            found.push(node);
        }
        true
    });
    Ok(found)
}

/// Tests whether `node` itself matches `selector`, with `node` as the
/// `:scope` element.
///
/// # Errors
/// [`SelectorError`] when the selector does not compile.
pub fn matches(doc: &Document, node: NodeId, selector: &str) -> Result<bool, SelectorError> {
    let list = parse_selector_list(selector)?;
    Ok(matches_selector_list(doc, node, node, &list))
}

/// Returns `node` or its nearest ancestor matching `selector`. The walk
/// stops at the first non-element ancestor.
///
/// # Errors
/// [`SelectorError`] when the selector does not compile.
pub fn closest(
    doc: &Document,
    node: NodeId,
    selector: &str,
) -> Result<Option<NodeId>, SelectorError> {
    let list = parse_selector_list(selector)?;
    let mut current = Some(node);
    while let Some(candidate) = current {
        if doc.kind(candidate) != NodeKind::Element {
            break;
        }
        if matches_selector_list(doc, node, candidate, &list) {
            return Ok(Some(candidate));
        }
        current = doc.parent(candidate);
    }
    Ok(None)
}

/// Tests `node` against a pre-compiled selector list, with `scope` as the
/// `:scope` element.
#[must_use]
pub fn matches_selector_list(
    doc: &Document,
    scope: NodeId,
    node: NodeId,
    list: &SelectorList,
) -> bool {
    matches_list(doc, scope, node, list, false)
}

/// The combinator state carried between compounds of a complex selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatchState {
    Initial,
    Descendant,
    Child,
    NextSibling,
    SubsequentSibling,
}

fn matches_list(
    doc: &Document,
    scope: NodeId,
    node: NodeId,
    list: &SelectorList,
    relative: bool,
) -> bool {
    'list: for complex in &list.complexes {
        // In relative mode only the alternatives that were given an
        // implicit :scope anchor participate.
        if relative
            && matches!(
                complex.items.first(),
                Some(ComplexItem::Compound(compound)) if !compound.is_relative()
            )
        {
            continue;
        }

        let mut state = MatchState::Initial;
        let mut current = Some(node);
        let order: Vec<&ComplexItem> = if relative {
            complex.items.iter().collect()
        } else {
            complex.items.iter().rev().collect()
        };

        'complex: for item in order {
            let compound = match item {
                ComplexItem::Combinator(Combinator::Child) => {
                    state = MatchState::Child;
                    continue;
                }
                ComplexItem::Combinator(Combinator::NextSibling) => {
                    state = MatchState::NextSibling;
                    continue;
                }
                ComplexItem::Combinator(Combinator::SubsequentSibling) => {
                    state = MatchState::SubsequentSibling;
                    continue;
                }
                ComplexItem::Compound(compound) => compound,
            };

            match state {
                MatchState::Initial => {
                    if !matches_compound(doc, scope, current, compound) {
                        continue 'list;
                    }
                    state = MatchState::Descendant;
                }

                MatchState::Descendant => loop {
                    current = current.and_then(|n| doc.parent(n));
                    if current.is_none() {
                        continue 'list;
                    }
                    if matches_compound(doc, scope, current, compound) {
                        continue 'complex;
                    }
                },

                MatchState::Child => {
                    current = current.and_then(|n| doc.parent(n));
                    if !matches_compound(doc, scope, current, compound) {
                        continue 'list;
                    }
                }

                MatchState::NextSibling => {
                    // Adjacency counts every node kind, not just elements.
                    current = current.and_then(|n| {
                        if relative {
                            doc.next_sibling(n)
                        } else {
                            doc.previous_sibling(n)
                        }
                    });
                    if !matches_compound(doc, scope, current, compound) {
                        continue 'list;
                    }
                }

                MatchState::SubsequentSibling => {
                    let Some(anchor) = current else {
                        continue 'list;
                    };
                    let Some(parent) = doc.parent(anchor) else {
                        continue 'list;
                    };
                    let siblings = doc.children(parent);
                    let Some(at) = siblings.iter().position(|&s| s == anchor) else {
                        continue 'list;
                    };
                    let found = if relative {
                        siblings[at + 1..]
                            .iter()
                            .copied()
                            .find(|&s| matches_compound(doc, scope, Some(s), compound))
                    } else {
                        siblings[..at]
                            .iter()
                            .rev()
                            .copied()
                            .find(|&s| matches_compound(doc, scope, Some(s), compound))
                    };
                    match found {
                        Some(s) => current = Some(s),
                        None => continue 'list,
                    }
                }
            }
        }
        return true;
    }
    false
}

fn matches_compound(
    doc: &Document,
    scope: NodeId,
    node: Option<NodeId>,
    compound: &CompoundSelector,
) -> bool {
    let Some(node) = node else {
        return false;
    };
    if doc.kind(node) != NodeKind::Element {
        return false;
    }
    for simple in &compound.simples {
        let matched = match simple {
            SimpleSelector::Universal => return true,
            SimpleSelector::Type(name) => doc.tag_name(node) == Some(name.as_str()),
            SimpleSelector::Id(name) => doc.element_id(node) == *name,
            SimpleSelector::Class(name) => doc.class_list_contains(node, name),
            SimpleSelector::Attribute(attr) => matches_attribute(doc, node, attr),
            // Pseudo-elements never filter at the node level.
            SimpleSelector::PseudoElement(_) => true,
            SimpleSelector::PseudoClass(name) => matches_pseudo_class(doc, scope, node, name),
            SimpleSelector::PseudoFunction { name, params } => {
                matches_pseudo_function(doc, scope, node, name, params)
            }
        };
        if !matched {
            return false;
        }
    }
    true
}

fn matches_attribute(doc: &Document, node: NodeId, attr: &AttributeSelector) -> bool {
    // [name] and [name=""] are both presence tests.
    if attr.comparison == AttrComparison::Equals
        && attr.value.as_ref().is_none_or(String::is_empty)
    {
        return doc.has_attribute(node, &attr.name);
    }
    // Bare attributes carry no text and only match presence tests.
    let Some(AttrValue::Value(raw)) = doc.get_attribute(node, &attr.name) else {
        return false;
    };
    let Some(expected) = attr.value.as_deref() else {
        return false;
    };
    if expected.is_empty() {
        return false;
    }
    let actual: Cow<'_, str> = if attr.ignore_case {
        Cow::Owned(raw.to_lowercase())
    } else {
        Cow::Borrowed(raw)
    };
    let expected: Cow<'_, str> = if attr.ignore_case {
        Cow::Owned(expected.to_lowercase())
    } else {
        Cow::Borrowed(expected)
    };
    match attr.comparison {
        AttrComparison::Equals => actual == expected,
        AttrComparison::Includes => actual.split_whitespace().any(|word| word == expected),
        AttrComparison::DashMatch => {
            actual == expected
                || actual
                    .strip_prefix(expected.as_ref())
                    .is_some_and(|rest| rest.starts_with('-'))
        }
        AttrComparison::Prefix => actual.starts_with(expected.as_ref()),
        AttrComparison::Suffix => actual.ends_with(expected.as_ref()),
        AttrComparison::Substring => actual.contains(expected.as_ref()),
    }
}

/// The pseudo-classes the matcher evaluates. Names outside this set parse
/// fine and simply never match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "kebab-case")]
enum PseudoClassKind {
    Scope,
    Enabled,
    Disabled,
    Checked,
    Required,
    Optional,
    Root,
    Empty,
    FirstChild,
    LastChild,
    OnlyChild,
    FirstOfType,
    LastOfType,
    OnlyOfType,
}

fn matches_pseudo_class(doc: &Document, scope: NodeId, node: NodeId, name: &str) -> bool {
    let Ok(kind) = PseudoClassKind::from_str(name) else {
        warn_once("CSS", &format!("unsupported pseudo-class ':{name}'"));
        return false;
    };
    match kind {
        PseudoClassKind::Scope => node == scope,
        PseudoClassKind::Enabled => {
            is_tagged(doc, node, &FORM_STATE_TAGS) && !doc.has_attribute(node, "disabled")
        }
        PseudoClassKind::Disabled => {
            is_tagged(doc, node, &FORM_STATE_TAGS) && doc.has_attribute(node, "disabled")
        }
        PseudoClassKind::Checked => match doc.tag_name(node) {
            Some("INPUT") => {
                matches!(
                    doc.get_attribute(node, "type"),
                    Some(AttrValue::Value(t)) if t == "checkbox" || t == "radio"
                ) && doc.has_attribute(node, "checked")
            }
            Some("OPTION") => doc.has_attribute(node, "selected"),
            _ => false,
        },
        PseudoClassKind::Required => {
            is_tagged(doc, node, &REQUIRABLE_TAGS) && doc.has_attribute(node, "required")
        }
        PseudoClassKind::Optional => {
            is_tagged(doc, node, &REQUIRABLE_TAGS) && !doc.has_attribute(node, "required")
        }
        PseudoClassKind::Root => doc.document_element() == Some(node),
        PseudoClassKind::Empty => doc.children(node).is_empty(),
        PseudoClassKind::FirstChild => {
            element_siblings_edge(doc, node, false).is_some_and(|first| first == node)
        }
        PseudoClassKind::LastChild => {
            element_siblings_edge(doc, node, true).is_some_and(|last| last == node)
        }
        PseudoClassKind::OnlyChild => {
            element_siblings_edge(doc, node, false) == Some(node)
                && element_siblings_edge(doc, node, true) == Some(node)
        }
        PseudoClassKind::FirstOfType => {
            type_siblings_edge(doc, node, false).is_some_and(|first| first == node)
        }
        PseudoClassKind::LastOfType => {
            type_siblings_edge(doc, node, true).is_some_and(|last| last == node)
        }
        PseudoClassKind::OnlyOfType => {
            type_siblings_edge(doc, node, false) == Some(node)
                && type_siblings_edge(doc, node, true) == Some(node)
        }
    }
}

fn is_tagged(doc: &Document, node: NodeId, tags: &[&str]) -> bool {
    doc.tag_name(node).is_some_and(|tag| tags.contains(&tag))
}

/// The first (or last) element among `node`'s siblings, `None` for a
/// parentless node.
fn element_siblings_edge(doc: &Document, node: NodeId, from_end: bool) -> Option<NodeId> {
    let parent = doc.parent(node)?;
    let is_element = |&id: &NodeId| doc.kind(id) == NodeKind::Element;
    let siblings = doc.children(parent);
    if from_end {
        siblings.iter().rev().copied().find(|id| is_element(id))
    } else {
        siblings.iter().copied().find(|id| is_element(id))
    }
}

/// The first (or last) sibling sharing `node`'s tag name.
fn type_siblings_edge(doc: &Document, node: NodeId, from_end: bool) -> Option<NodeId> {
    let parent = doc.parent(node)?;
    let tag = doc.tag_name(node);
    let same_type = |&id: &NodeId| doc.tag_name(id) == tag;
    let siblings = doc.children(parent);
    if from_end {
        siblings.iter().rev().copied().find(|id| same_type(id))
    } else {
        siblings.iter().copied().find(|id| same_type(id))
    }
}

/// The functional pseudo-classes the matcher evaluates. `:lang()`,
/// `:dir()`, `:nth-col()`, and `:nth-last-col()` parse but are not in this
/// set, so they never match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "kebab-case")]
enum PseudoFunctionKind {
    Is,
    Not,
    Where,
    Has,
    NthChild,
    NthLastChild,
    NthOfType,
    NthLastOfType,
}

fn matches_pseudo_function(
    doc: &Document,
    scope: NodeId,
    node: NodeId,
    name: &str,
    params: &PseudoParams,
) -> bool {
    let Ok(kind) = PseudoFunctionKind::from_str(name) else {
        warn_once("CSS", &format!("unsupported pseudo-class ':{name}()'"));
        return false;
    };
    match (kind, params) {
        (PseudoFunctionKind::Is | PseudoFunctionKind::Where, PseudoParams::Selectors(list)) => {
            matches_list(doc, scope, node, list, false)
        }
        (PseudoFunctionKind::Not, PseudoParams::Selectors(list)) => {
            !matches_list(doc, scope, node, list, false)
        }
        (PseudoFunctionKind::Has, PseudoParams::Selectors(list)) => matches_has(doc, node, list),
        (PseudoFunctionKind::NthChild, PseudoParams::Nth { a, b, of }) => {
            matches_nth_child(doc, node, *a, *b, of.as_ref(), false)
        }
        (PseudoFunctionKind::NthLastChild, PseudoParams::Nth { a, b, of }) => {
            matches_nth_child(doc, node, *a, *b, of.as_ref(), true)
        }
        (PseudoFunctionKind::NthOfType, PseudoParams::Nth { a, b, .. }) => {
            matches_nth_of_type(doc, node, *a, *b, false)
        }
        (PseudoFunctionKind::NthLastOfType, PseudoParams::Nth { a, b, .. }) => {
            matches_nth_of_type(doc, node, *a, *b, true)
        }
        _ => false,
    }
}

fn matches_has(doc: &Document, node: NodeId, list: &SelectorList) -> bool {
    let any_relative = list.complexes.iter().any(is_relative_complex);
    let mut has = any_relative && matches_list(doc, node, node, list, true);
    if !has {
        doc.for_each(node, Some(NodeKind::Element), |d, descendant| {
            if matches_list(d, node, descendant, list, false) {
                has = true;
                return false;
            }
            true
        });
    }
    has
}

fn is_relative_complex(complex: &ComplexSelector) -> bool {
    matches!(
        complex.items.first(),
        Some(ComplexItem::Compound(compound)) if compound.is_relative()
    )
}

fn matches_nth_child(
    doc: &Document,
    node: NodeId,
    a: i32,
    b: i32,
    of: Option<&SelectorList>,
    from_end: bool,
) -> bool {
    let Some(parent) = doc.parent(node) else {
        return false;
    };
    let mut counter = ChildCounter::new(a, b);
    for sibling in sibling_order(doc.children(parent), from_end) {
        if doc.kind(sibling) != NodeKind::Element {
            continue;
        }
        if let Some(list) = of
            && !matches_list(doc, parent, sibling, list, false)
        {
            continue;
        }
        let hit = counter.step();
        if sibling == node {
            return hit;
        }
    }
    false
}

fn matches_nth_of_type(doc: &Document, node: NodeId, a: i32, b: i32, from_end: bool) -> bool {
    let Some(parent) = doc.parent(node) else {
        return false;
    };
    let tag = doc.tag_name(node);
    let mut counter = ChildCounter::new(a, b);
    for sibling in sibling_order(doc.children(parent), from_end) {
        if doc.tag_name(sibling) != tag {
            continue;
        }
        let hit = counter.step();
        if sibling == node {
            return hit;
        }
    }
    false
}

fn sibling_order(siblings: &[NodeId], from_end: bool) -> Vec<NodeId> {
    if from_end {
        siblings.iter().rev().copied().collect()
    } else {
        siblings.to_vec()
    }
}

/// Counts qualifying siblings and reports whether each one's index
/// satisfies the `An+B` pattern.
#[derive(Debug)]
struct ChildCounter {
    a: i32,
    b: i32,
    current: i32,
}

impl ChildCounter {
    const fn new(a: i32, b: i32) -> Self {
        Self { a, b, current: 0 }
    }

    /// Advances to the next qualifying sibling and reports whether its
    /// index matches the pattern.
    fn step(&mut self) -> bool {
        if self.a == 0 && self.b == 0 {
            return false;
        }
        self.current += 1;
        if self.a == 0 {
            return self.current == self.b;
        }
        ((self.a < 0 && self.b >= self.current) || (self.a > 0 && self.current >= self.b))
            && (self.current + self.b) % self.a == 0
    }
}

// ========== tests ==========
