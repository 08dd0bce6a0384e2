//! The parsed selector representation.
//!
//! Follows the structure of Selectors Level 4
//! (<https://drafts.csswg.org/selectors-4/>): a selector list holds complex
//! selectors, a complex selector alternates compound selectors with
//! combinators, and a compound selector is a run of simple selectors.
//! Pseudo-class names are kept as written, so unrecognized ones parse fine
//! and simply never match.

/// A comma-separated list of complex selectors.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectorList {
    /// The alternatives; the list matches when any of them does.
    pub complexes: Vec<ComplexSelector>,
}

impl SelectorList {
    /// Returns `true` when the list has no selectors. An empty list never
    /// matches anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.complexes.is_empty()
    }
}

/// Compound selectors joined by combinators, e.g. `ul > li a`.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexSelector {
    /// Compounds, optionally separated by explicit combinators. Two
    /// adjacent compounds with no combinator between them relate as
    /// descendants. Starts and ends with a compound.
    pub items: Vec<ComplexItem>,
}

/// One element of a complex selector.
#[derive(Debug, Clone, PartialEq)]
pub enum ComplexItem {
    /// A run of simple selectors applying to one element.
    Compound(CompoundSelector),
    /// The relationship to the element matched by the next compound.
    Combinator(Combinator),
}

/// How two compounds of a complex selector relate. The descendant
/// relationship has no variant; it is expressed by compound adjacency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// `>`: the parent.
    Child,
    /// `+`: the immediately preceding sibling, of any node kind.
    NextSibling,
    /// `~`: any preceding sibling.
    SubsequentSibling,
}

/// A run of simple selectors applying to a single element.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompoundSelector {
    /// The simple selectors; a universal or type selector can only appear
    /// first.
    pub simples: Vec<SimpleSelector>,
}

impl CompoundSelector {
    /// Returns `true` when the compound's first simple selector is the
    /// `:scope` pseudo-class, marking a relative selector.
    #[must_use]
    pub fn is_relative(&self) -> bool {
        matches!(self.simples.first(), Some(SimpleSelector::PseudoClass(name)) if name == "scope")
    }
}

/// A single simple selector.
#[derive(Debug, Clone, PartialEq)]
pub enum SimpleSelector {
    /// `*`
    Universal,
    /// A tag name selector, stored uppercase.
    Type(String),
    /// `#name`
    Id(String),
    /// `.name`
    Class(String),
    /// `[name]` and its comparison forms.
    Attribute(AttributeSelector),
    /// `:name`; the name is kept as written.
    PseudoClass(String),
    /// `:name(...)`
    PseudoFunction {
        /// The function name, as written.
        name: String,
        /// The parsed argument.
        params: PseudoParams,
    },
    /// `::name`, or one of the four single-colon legacy pseudo-elements.
    PseudoElement(String),
}

/// An attribute presence or value test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSelector {
    /// The attribute name.
    pub name: String,
    /// How the value is compared.
    pub comparison: AttrComparison,
    /// The expected value; `None` is a bare presence test.
    pub value: Option<String>,
    /// `true` after an `i` flag: compare case-insensitively.
    pub ignore_case: bool,
}

/// The comparison operator of an attribute selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrComparison {
    /// `=`, or a bare `[name]` presence test.
    Equals,
    /// `~=`: whitespace-separated word match.
    Includes,
    /// `|=`: exact match or `value-` prefix.
    DashMatch,
    /// `^=`: prefix match.
    Prefix,
    /// `$=`: suffix match.
    Suffix,
    /// `*=`: substring match.
    Substring,
}

/// The argument of a functional pseudo-class.
#[derive(Debug, Clone, PartialEq)]
pub enum PseudoParams {
    /// A nested selector list, as in `:is()`, `:not()`, `:where()`, and
    /// `:has()`.
    Selectors(SelectorList),
    /// A single identifier, as in `:lang()` and `:dir()`.
    Identifier(String),
    /// An `An+B` step pattern, with an optional `of <selector-list>`
    /// filter on `:nth-child()` and `:nth-last-child()`.
    Nth {
        /// The step.
        a: i32,
        /// The offset.
        b: i32,
        /// Restricts counting to siblings matching this list.
        of: Option<SelectorList>,
    },
}
