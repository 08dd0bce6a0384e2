//! Parse-time behavior switches.
//!
//! A document captures one [`ParserOptions`] value when it is parsed and the
//! record stays frozen for the document's lifetime. Later mutations, such as
//! replacing an element's markup, reuse the captured record so a document
//! never mixes parsing regimes.

/// Selects which characters the serializer turns back into entity
/// references.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EncodeEntities {
    /// Serialize text verbatim.
    #[default]
    Off,
    /// Encode every occurrence of a replacement string from the entity
    /// table.
    Table,
    /// Encode only the listed characters, and only those with a table
    /// entry.
    Chars(String),
}

/// Behavior switches for parsing and serialization.
///
/// Every switch defaults to off, which yields the most literal reading of
/// the input: no entity expansion, no whitespace normalization, and strict
/// tag syntax.
#[derive(Debug, Clone, Default)]
pub struct ParserOptions {
    /// Accept any element as the document root rather than requiring
    /// `html`.
    pub allow_custom_root_element: bool,
    /// Accept XML-style `/>` self-closing syntax on any tag.
    pub allow_self_closing_syntax: bool,
    /// Accept `<![CDATA[ ... ]]>` sections and preserve them as CDATA
    /// nodes.
    pub allow_cdata: bool,
    /// Accept `<? ... ?>` processing instructions.
    pub allow_processing_instructions: bool,
    /// Expand entity references in text and attribute values while parsing.
    pub decode_entities: bool,
    /// Entity encoding applied when serializing text back to markup.
    pub encode_entities: EncodeEntities,
    /// Collapse whitespace runs in text nodes to a single space.
    pub collapse_whitespace: bool,
    /// Trim leading and trailing whitespace from text nodes.
    pub trim_whitespace: bool,
    /// Lowercase attribute names while parsing.
    pub lower_attribute_case: bool,
}
