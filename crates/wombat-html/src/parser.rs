//! The forgiving HTML parser.
//!
//! A single forward pass over the input drives a small state machine per
//! tag (start tag, attributes, end tag) and a scope chain of open elements.
//! Recovery from malformed input never fails the parse: an unreadable start
//! tag becomes text, an unreadable end tag becomes a comment, and unclosed
//! elements are closed by the end of input. The auto-close rules in
//! [`crate::boundaries`] supply the browser-style handling of optional end
//! tags.

use wombat_common::chars::{collapse_whitespace, is_name_char, is_name_start_char, is_whitespace};
use wombat_common::tags::{is_raw_text_element, is_void_element};
use wombat_common::{EntityCodec, Lexer, ParserOptions};
use wombat_dom::{AttrValue, Document, NodeId, NodeKind};

use crate::boundaries::implicitly_closes;

/// Parses `html` into a new [`Document`] using the default entity table.
/// The root is promoted to a document when a recognized document element is
/// present.
#[must_use]
pub fn parse_document(html: &str, options: ParserOptions) -> Document {
    parse_document_with_codec(html, options, EntityCodec::default())
}

/// Parses `html` into a new [`Document`] with an explicit entity codec.
#[must_use]
pub fn parse_document_with_codec(
    html: &str,
    options: ParserOptions,
    codec: EntityCodec,
) -> Document {
    let mut doc = parse_fragment_with_codec(html, options, codec);
    doc.setup_document();
    doc
}

/// Parses `html` into a fragment-rooted [`Document`], skipping document
/// promotion. Used for markup destined for a subtree rather than a whole
/// document.
#[must_use]
pub fn parse_fragment(html: &str, options: ParserOptions) -> Document {
    parse_fragment_with_codec(html, options, EntityCodec::default())
}

/// Parses `html` into a fragment-rooted [`Document`] with an explicit
/// entity codec.
#[must_use]
pub fn parse_fragment_with_codec(
    html: &str,
    options: ParserOptions,
    codec: EntityCodec,
) -> Document {
    let mut parser = Parser::new(html, Document::with_codec(options, codec));
    parser.run();
    parser.doc
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagState {
    StartTag,
    Attribute,
    EndTag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextMode {
    /// Trimmed or collapsed, then entity-decoded, per the options.
    Plain,
    /// `SCRIPT`/`STYLE` content: trimmed at most, never decoded.
    Raw,
}

struct Parser {
    lexer: Lexer,
    doc: Document,
    options: ParserOptions,
    /// Open elements, outermost first. `scope[0]` is the arena root; an
    /// end tag resolving to the root ends the parse.
    scope: Vec<NodeId>,
}

impl Parser {
    fn new(html: &str, doc: Document) -> Self {
        let options = doc.options().clone();
        Self {
            lexer: Lexer::new(html),
            doc,
            options,
            scope: vec![Document::ROOT],
        }
    }

    fn run(&mut self) {
        let mut the_char = if self.options.trim_whitespace {
            self.lexer.skip_whitespace()
        } else {
            self.lexer.current()
        };
        while the_char.is_some() && !self.scope.is_empty() {
            if the_char == Some('<') {
                self.parse_tag();
            } else {
                self.parse_text();
            }
            the_char = if self.options.trim_whitespace {
                self.lexer.skip_whitespace()
            } else {
                self.lexer.current()
            };
        }
    }

    fn innermost(&self) -> Option<NodeId> {
        self.scope.last().copied()
    }

    fn attach(&mut self, node: NodeId) {
        if let Some(parent) = self.innermost() {
            let _ = self.doc.append_child(parent, node);
        }
    }

    fn add_text_node(&mut self, start: usize, end: usize, mode: TextMode) {
        let trim = |text: String| {
            text.trim_matches(|c: char| c.is_whitespace() || is_whitespace(c))
                .to_owned()
        };
        let mut value = self.lexer.slice(start, end);
        match mode {
            TextMode::Raw => {
                if self.options.trim_whitespace {
                    value = trim(value);
                }
            }
            TextMode::Plain => {
                if self.options.trim_whitespace {
                    value = trim(value);
                } else if self.options.collapse_whitespace {
                    value = collapse_whitespace(&value);
                }
                if self.options.decode_entities {
                    value = self.doc.codec().decode(&value);
                }
            }
        }
        let node = self.doc.create_text_node(&value);
        self.attach(node);
    }

    fn parse_text(&mut self) {
        let start = self.lexer.index();
        let raw_container = self
            .innermost()
            .and_then(|id| self.doc.tag_name(id))
            .filter(|tag| is_raw_text_element(tag))
            .map(str::to_owned);
        if let Some(tag) = raw_container {
            let close = format!("</{tag}");
            let _ = self.lexer.seek_to_literal(&close, false);
            self.add_text_node(start, self.lexer.index(), TextMode::Raw);
        } else {
            let _ = self.lexer.seek_to_literal("<", true);
            self.add_text_node(start, self.lexer.index(), TextMode::Plain);
        }
    }

    fn parse_tag(&mut self) {
        let mut state = TagState::StartTag;
        let mut tag_start = self.lexer.index();
        let mut the_char = self.lexer.next_char();
        let mut current_element: Option<NodeId> = None;

        'main: while the_char.is_some() && the_char != Some('>') {
            let mut start_idx = self.lexer.index();
            let mut name: Option<String> = None;

            if state == TagState::StartTag {
                if matches!(the_char, Some('!' | '?')) {
                    self.parse_declaration(the_char.unwrap_or('!'));
                    break 'main;
                }
                if the_char == Some('/') {
                    the_char = self.lexer.next_char();
                    state = TagState::EndTag;
                    start_idx += 1;
                }
            }

            let end_idx;
            if state == TagState::Attribute {
                while let Some(c) = the_char {
                    let leading_equals = c == '=' && self.lexer.index() == start_idx;
                    let closes_tag = self.options.allow_self_closing_syntax
                        && c == '/'
                        && self.lexer.peek() == Some('>');
                    if leading_equals
                        || (!is_whitespace(c) && !matches!(c, '>' | '=') && !closes_tag)
                    {
                        the_char = self.lexer.next_char();
                    } else {
                        break;
                    }
                }
                end_idx = self.lexer.index();
            } else {
                while let Some(c) = the_char {
                    let name_start = c.is_ascii_alphabetic();
                    let name_rest = self.lexer.index() > start_idx
                        && (c.is_ascii_digit() || matches!(c, '-' | '_' | ':'));
                    if name_start || name_rest {
                        the_char = self.lexer.next_char();
                    } else {
                        break;
                    }
                }
                end_idx = self.lexer.index();
                if the_char.is_none() {
                    // Input ended inside the tag name: the whole tag text
                    // becomes a text node.
                    self.add_text_node(tag_start, end_idx, TextMode::Plain);
                    return;
                }
                the_char = self.lexer.skip_whitespace();
                if state == TagState::EndTag {
                    the_char = self.lexer.seek_to_literal(">", true);
                }
            }

            if start_idx == end_idx {
                // No name at the cursor: recover based on state.
                if self.options.allow_self_closing_syntax
                    && the_char == Some('/')
                    && self.lexer.peek() == Some('>')
                {
                    // "/>" closes the innermost open element.
                    the_char = self.lexer.next_char();
                    state = TagState::EndTag;
                    name = self
                        .innermost()
                        .and_then(|id| self.doc.tag_name(id))
                        .map(str::to_owned);
                } else if state == TagState::StartTag {
                    let _ = self.lexer.seek_to_literal("<", true);
                    self.add_text_node(tag_start, self.lexer.index(), TextMode::Plain);
                    tag_start = self.lexer.index();
                    the_char = self.lexer.next_char();
                    continue 'main;
                } else if state == TagState::EndTag {
                    if start_idx != self.lexer.index() {
                        // An unreadable end tag is preserved verbatim as a
                        // comment; "</>" is dropped outright.
                        let data = self.lexer.slice(start_idx, self.lexer.index());
                        let node = self.doc.create_comment(&data);
                        self.attach(node);
                    }
                    break 'main;
                } else {
                    let _ = self.lexer.next_char();
                    the_char = self.lexer.skip_whitespace();
                    continue 'main;
                }
            } else {
                let mut text = self.lexer.slice(start_idx, end_idx);
                if state != TagState::Attribute {
                    text = text.to_uppercase();
                }
                name = Some(text);
                the_char = self.lexer.skip_whitespace();
            }

            match state {
                TagState::StartTag => {
                    if let Some(tag) = &name {
                        while let Some(open) = self.innermost() {
                            let Some(open_tag) = self.doc.tag_name(open) else {
                                break;
                            };
                            if implicitly_closes(tag, open_tag) {
                                let _ = self.scope.pop();
                            } else {
                                break;
                            }
                        }
                        if let Ok(element) = self.doc.create_element(tag) {
                            if let Some(parent) = self.innermost() {
                                let _ = self.doc.append_child(parent, element);
                            }
                            current_element = Some(element);
                            state = TagState::Attribute;
                            if !is_void_element(tag) {
                                self.scope.push(element);
                            }
                        }
                    }
                }

                TagState::Attribute => {
                    let attr_name = name.unwrap_or_default();
                    let mut value: Option<(usize, usize)> = None;
                    if the_char == Some('=') {
                        let _ = self.lexer.next_char();
                        the_char = self.lexer.skip_whitespace();
                        if let Some(quote @ ('"' | '\'')) = the_char {
                            let _ = self.lexer.next_char();
                            let value_start = self.lexer.index();
                            let _ = self.lexer.seek_to_literal(&quote.to_string(), true);
                            value = Some((value_start, self.lexer.index()));
                            let _ = self.lexer.next_char();
                            the_char = self.lexer.skip_whitespace();
                        } else {
                            let value_start = self.lexer.index();
                            while let Some(c) = the_char {
                                let closes_tag = self.options.allow_self_closing_syntax
                                    && c == '/'
                                    && self.lexer.peek() == Some('>');
                                if is_whitespace(c) || c == '>' || closes_tag {
                                    break;
                                }
                                the_char = self.lexer.next_char();
                            }
                            value = Some((value_start, self.lexer.index()));
                            the_char = self.lexer.skip_whitespace();
                        }
                    }
                    if let Some(element) = current_element {
                        // First declaration of a name wins, valued or bare.
                        let duplicate = self.doc.has_attribute(element, &attr_name);
                        if !duplicate {
                            let attr_value = match value {
                                None => AttrValue::Bare,
                                Some((start, end)) => {
                                    let text = self.lexer.slice(start, end);
                                    if text.is_empty() {
                                        AttrValue::Bare
                                    } else if self.options.decode_entities {
                                        AttrValue::Value(self.doc.codec().decode(&text))
                                    } else {
                                        AttrValue::Value(text)
                                    }
                                }
                            };
                            self.doc.set_attribute(element, &attr_name, attr_value);
                        }
                    }
                }

                TagState::EndTag => {
                    // Resolve against the nearest open element of the same
                    // name; an unmatched end tag is ignored.
                    let target = self
                        .scope
                        .iter()
                        .rposition(|&open| self.doc.tag_name(open) == name.as_deref());
                    if let Some(pos) = target {
                        self.scope.truncate(pos);
                    }
                }
            }
        }

        let _ = self.lexer.next_char();
    }

    /// Handles everything introduced by `<!` or `<?`: processing
    /// instructions, CDATA sections, the doctype, and comments. The cursor
    /// is left on the closing `>` (or at end of input).
    fn parse_declaration(&mut self, first: char) {
        let mut the_char = Some(first);

        if self.options.allow_processing_instructions {
            let question_idx = self.lexer.index();
            if self.lexer.match_literal("?", true) {
                let target_start = self.lexer.index();
                the_char = self.lexer.current();
                if the_char.is_some_and(is_name_start_char) {
                    while the_char.is_some_and(is_name_char) {
                        the_char = self.lexer.next_char();
                    }
                    let terminated = match the_char {
                        None => true,
                        Some('?') => self.lexer.peek() == Some('>'),
                        Some(c) => is_whitespace(c),
                    };
                    if terminated {
                        let target = self.lexer.slice(target_start, self.lexer.index());
                        let _ = self.lexer.skip_whitespace();
                        let data_start = self.lexer.index();
                        let _ = self.lexer.seek_to_literal("?>", true);
                        let data = self.lexer.slice(data_start, self.lexer.index());
                        let _ = self.lexer.advance(1);
                        if let Ok(node) = self.doc.create_processing_instruction(&target, &data) {
                            self.attach(node);
                        }
                        return;
                    }
                }
                // Not a well-formed target: reread the "?" as comment text.
                let _ = self.lexer.seek(question_idx);
            }
        }

        if self.options.allow_cdata && self.lexer.match_literal("![CDATA[", true) {
            let data_start = self.lexer.index();
            let _ = self.lexer.seek_to_literal("]]>", true);
            let data = self.lexer.slice(data_start, self.lexer.index());
            let _ = self.lexer.advance(2);
            if let Ok(node) = self.doc.create_cdata_section(&data) {
                self.attach(node);
            }
            return;
        }

        if self.lexer.match_literal("!DOCTYPE", false) {
            let _ = self.lexer.skip_whitespace();
            let text_start = self.lexer.index();
            let _ = self.lexer.seek_to_literal(">", true);
            self.read_doctype(text_start);
            return;
        }

        // Anything else is a comment.
        let mut end_tag: Option<&str> = None;
        if self.lexer.match_literal("!--", true) {
            if !self.lexer.match_literal(">", true) && !self.lexer.match_literal("->", true) {
                end_tag = Some("-->");
            }
        } else {
            if the_char == Some('!') {
                let _ = self.lexer.next_char();
            }
            end_tag = Some(">");
        }
        let data_start = self.lexer.index();
        let data_end;
        if let Some(terminator) = end_tag {
            let _ = self.lexer.seek_to_literal(terminator, true);
            data_end = self.lexer.index();
            let step = isize::try_from(terminator.len()).unwrap_or(1) - 1;
            let _ = self.lexer.advance(step);
        } else {
            // "<!-->" or "<!--->": the terminator was already consumed.
            data_end = data_start;
            let _ = self.lexer.advance(-1);
        }
        let data = self.lexer.slice(data_start, data_end);
        let node = self.doc.create_comment(&data);
        self.attach(node);
    }

    /// Reads the doctype text already delimited by the cursor and attaches
    /// the node at the root. A doctype is refused once the root has one, or
    /// once any element has been parsed at the root level.
    fn read_doctype(&mut self, text_start: usize) {
        if self.doc.doctype().is_some() {
            return;
        }
        let blocked = self.doc.children(Document::ROOT).iter().any(|&child| {
            !matches!(
                self.doc.kind(child),
                NodeKind::Text
                    | NodeKind::CdataSection
                    | NodeKind::ProcessingInstruction
                    | NodeKind::Comment
            )
        });
        if blocked {
            return;
        }

        let text = self.lexer.slice(text_start, self.lexer.index());
        let mut words = text.split_whitespace();
        let name = words.next().unwrap_or("").to_owned();
        let rest: Vec<&str> = words.collect();

        let mut public_id = String::new();
        let mut system_id = String::new();
        if rest.len() > 1 {
            let id_type = rest[0].to_lowercase();
            let mut pieces: std::collections::VecDeque<String> =
                rest[1..].join(" ").split('"').map(str::to_owned).collect();
            // Identifiers are only read when they are quoted, which the
            // leading empty piece attests.
            if pieces.front().is_some_and(|piece| piece.is_empty()) {
                if id_type == "public" {
                    let _ = pieces.pop_front();
                    public_id = pieces.pop_front().unwrap_or_default();
                    let _ = pieces.pop_front();
                    system_id = pieces.pop_front().unwrap_or_default();
                } else if id_type == "system" {
                    let _ = pieces.pop_front();
                    system_id = pieces.pop_front().unwrap_or_default();
                }
            }
        }

        let node = self.doc.create_document_type(&name, &public_id, &system_id);
        let _ = self.doc.append_child(Document::ROOT, node);
    }
}

// ========== tests ==========

#[cfg(test)]
mod tests {
    use wombat_common::ParserOptions;
    use wombat_dom::{AttrValue, Document, NodeKind};

    use super::{parse_document, parse_fragment};

    fn options() -> ParserOptions {
        ParserOptions::default()
    }

    #[test]
    fn test_simple_tree() {
        let doc = parse_fragment("<div><span>hi</span></div>", options());
        let root = doc.root();
        assert_eq!(doc.children(root).len(), 1);
        let div = doc.children(root)[0];
        assert_eq!(doc.tag_name(div), Some("DIV"));
        let span = doc.children(div)[0];
        assert_eq!(doc.tag_name(span), Some("SPAN"));
        assert_eq!(doc.text_content(span), "hi");
    }

    #[test]
    fn test_unclosed_elements_close_at_end_of_input() {
        let doc = parse_fragment("<ul><li>one<li>two", options());
        let ul = doc.children(doc.root())[0];
        let items = doc.children(ul);
        assert_eq!(items.len(), 2);
        assert_eq!(doc.text_content(items[0]), "one");
        assert_eq!(doc.text_content(items[1]), "two");
    }

    #[test]
    fn test_void_elements_take_no_children() {
        let doc = parse_fragment("<div><br>text</div>", options());
        let div = doc.children(doc.root())[0];
        let children = doc.children(div);
        assert_eq!(children.len(), 2);
        assert_eq!(doc.tag_name(children[0]), Some("BR"));
        assert!(doc.children(children[0]).is_empty());
        assert_eq!(doc.node_value(children[1]), Some("text"));
    }

    #[test]
    fn test_attributes_first_declaration_wins() {
        let doc = parse_fragment("<a href='one' href=\"two\" checked>", options());
        let a = doc.children(doc.root())[0];
        assert_eq!(
            doc.get_attribute(a, "href"),
            Some(&AttrValue::Value("one".to_owned()))
        );
        assert_eq!(doc.get_attribute(a, "checked"), Some(&AttrValue::Bare));
    }

    #[test]
    fn test_unquoted_and_empty_attribute_values() {
        let doc = parse_fragment("<input type=text value=''>", options());
        let input = doc.children(doc.root())[0];
        assert_eq!(
            doc.get_attribute(input, "type"),
            Some(&AttrValue::Value("text".to_owned()))
        );
        assert_eq!(doc.get_attribute(input, "value"), Some(&AttrValue::Bare));
    }

    #[test]
    fn test_malformed_start_tag_becomes_text() {
        let doc = parse_fragment("<1bad>after", options());
        let children = doc.children(doc.root());
        assert_eq!(children.len(), 1);
        assert_eq!(doc.kind(children[0]), NodeKind::Text);
        assert_eq!(doc.node_value(children[0]), Some("<1bad>after"));
    }

    #[test]
    fn test_malformed_end_tag_becomes_comment() {
        let doc = parse_fragment("<div></ oops></div>", options());
        let div = doc.children(doc.root())[0];
        let children = doc.children(div);
        assert_eq!(children.len(), 1);
        assert_eq!(doc.kind(children[0]), NodeKind::Comment);
        assert_eq!(doc.node_value(children[0]), Some(" oops"));
    }

    #[test]
    fn test_empty_end_tag_is_dropped() {
        let doc = parse_fragment("<div>a</>b</div>", options());
        let div = doc.children(doc.root())[0];
        assert_eq!(doc.text_content(div), "ab");
    }

    #[test]
    fn test_truncated_tag_becomes_text() {
        let doc = parse_fragment("before<di", options());
        let children = doc.children(doc.root());
        assert_eq!(children.len(), 2);
        assert_eq!(doc.node_value(children[1]), Some("<di"));
    }

    #[test]
    fn test_comments() {
        let doc = parse_fragment("<!-- note --><!arbitrary>", options());
        let children = doc.children(doc.root());
        assert_eq!(children.len(), 2);
        assert_eq!(doc.node_value(children[0]), Some(" note "));
        assert_eq!(doc.node_value(children[1]), Some("arbitrary"));
    }

    #[test]
    fn test_empty_comment_does_not_swallow_following_text() {
        let doc = parse_fragment("<!-->x", options());
        let children = doc.children(doc.root());
        assert_eq!(children.len(), 2);
        assert_eq!(doc.kind(children[0]), NodeKind::Comment);
        assert_eq!(doc.node_value(children[0]), Some(""));
        assert_eq!(doc.node_value(children[1]), Some("x"));
    }

    #[test]
    fn test_raw_text_content_is_not_parsed() {
        let doc = parse_fragment("<script>if (a < b) { run(); }</script>", options());
        let script = doc.children(doc.root())[0];
        assert_eq!(doc.text_content(script), "if (a < b) { run(); }");
    }

    #[test]
    fn test_doctype_only_before_elements() {
        let doc = parse_fragment("<p></p><!DOCTYPE html>", options());
        assert!(doc.doctype().is_none());
        let doc = parse_fragment("<!-- x --><!DOCTYPE html>", options());
        assert!(doc.doctype().is_some());
    }

    #[test]
    fn test_doctype_public_and_system_ids() {
        let doc = parse_fragment(
            "<!DOCTYPE html PUBLIC \"-//W3C//DTD XHTML 1.0//EN\" \"http://x/dtd\">",
            options(),
        );
        let data = doc.doctype_data(doc.doctype().unwrap()).unwrap();
        assert_eq!(data.name, "html");
        assert_eq!(data.public_id, "-//W3C//DTD XHTML 1.0//EN");
        assert_eq!(data.system_id, "http://x/dtd");
    }

    #[test]
    fn test_second_doctype_is_refused() {
        let doc = parse_fragment("<!DOCTYPE html><!DOCTYPE other>", options());
        let data = doc.doctype_data(doc.doctype().unwrap()).unwrap();
        assert_eq!(data.name, "html");
        assert_eq!(
            doc.children(doc.root())
                .iter()
                .filter(|&&c| doc.kind(c) == NodeKind::DocumentType)
                .count(),
            1
        );
    }

    #[test]
    fn test_processing_instructions_when_enabled() {
        let opts = ParserOptions {
            allow_processing_instructions: true,
            ..ParserOptions::default()
        };
        let doc = parse_fragment("<?xml version=\"1.0\"?>", opts);
        let children = doc.children(doc.root());
        assert_eq!(doc.kind(children[0]), NodeKind::ProcessingInstruction);
        assert_eq!(doc.node_name(children[0]), "xml");
        assert_eq!(doc.node_value(children[0]), Some("version=\"1.0\""));
    }

    #[test]
    fn test_processing_instruction_without_option_is_comment() {
        let doc = parse_fragment("<?xml version=\"1.0\"?>", options());
        let children = doc.children(doc.root());
        assert_eq!(doc.kind(children[0]), NodeKind::Comment);
        assert_eq!(doc.node_value(children[0]), Some("?xml version=\"1.0\"?"));
    }

    #[test]
    fn test_cdata_when_enabled() {
        let opts = ParserOptions {
            allow_cdata: true,
            ..ParserOptions::default()
        };
        let doc = parse_fragment("<div><![CDATA[a < b]]></div>", opts);
        let div = doc.children(doc.root())[0];
        let cdata = doc.children(div)[0];
        assert_eq!(doc.kind(cdata), NodeKind::CdataSection);
        assert_eq!(doc.node_value(cdata), Some("a < b"));
    }

    #[test]
    fn test_self_closing_syntax_closes_innermost() {
        let opts = ParserOptions {
            allow_self_closing_syntax: true,
            ..ParserOptions::default()
        };
        let doc = parse_fragment("<div><span/>after</div>", opts);
        let div = doc.children(doc.root())[0];
        let children = doc.children(div);
        assert_eq!(children.len(), 2);
        assert_eq!(doc.tag_name(children[0]), Some("SPAN"));
        assert!(doc.children(children[0]).is_empty());
        assert_eq!(doc.node_value(children[1]), Some("after"));
    }

    #[test]
    fn test_whitespace_options() {
        let trim = ParserOptions {
            trim_whitespace: true,
            ..ParserOptions::default()
        };
        let doc = parse_fragment("<p>  padded  text  </p>", trim);
        let p = doc.children(doc.root())[0];
        assert_eq!(doc.text_content(p), "padded  text");

        let collapse = ParserOptions {
            collapse_whitespace: true,
            ..ParserOptions::default()
        };
        let doc = parse_fragment("<p>  padded\n\n text </p>", collapse);
        let p = doc.children(doc.root())[0];
        assert_eq!(doc.text_content(p), " padded text ");
    }

    #[test]
    fn test_entity_decoding() {
        let opts = ParserOptions {
            decode_entities: true,
            ..ParserOptions::default()
        };
        let doc = parse_fragment("<p title=\"a &amp; b\">x &lt; y</p>", opts);
        let p = doc.children(doc.root())[0];
        assert_eq!(doc.text_content(p), "x < y");
        assert_eq!(
            doc.get_attribute(p, "title"),
            Some(&AttrValue::Value("a & b".to_owned()))
        );
    }

    #[test]
    fn test_document_promotion() {
        let doc = parse_document(
            "<!DOCTYPE html><html><head><title>T</title></head><body>b</body></html>",
            options(),
        );
        assert_eq!(doc.kind(doc.root()), NodeKind::Document);
        assert!(doc.doctype().is_some());
        assert!(doc.document_element().is_some());
        assert!(doc.head().is_some());
        assert!(doc.body().is_some());
        assert_eq!(doc.title(), "T");
    }

    #[test]
    fn test_fragment_without_html_element_stays_fragment() {
        let doc = parse_document("<div>just a fragment</div>", options());
        assert_eq!(doc.kind(doc.root()), NodeKind::DocumentFragment);
        assert!(doc.document_element().is_none());
    }

    #[test]
    fn test_custom_root_element() {
        let opts = ParserOptions {
            allow_custom_root_element: true,
            allow_self_closing_syntax: true,
            ..ParserOptions::default()
        };
        let doc = parse_document("<!DOCTYPE svg><svg><circle r=\"4\"/></svg>", opts);
        assert_eq!(doc.kind(doc.root()), NodeKind::Document);
        let de = doc.document_element().unwrap();
        assert_eq!(doc.tag_name(de), Some("SVG"));
    }

    #[test]
    fn test_strays_are_rehomed_on_promotion() {
        let doc = parse_document(
            "<html><head></head><body><p>x</p></body></html>trailing",
            options(),
        );
        let body = doc.body().unwrap();
        let children = doc.children(body);
        assert_eq!(children.len(), 2);
        assert_eq!(doc.node_value(children[1]), Some("trailing"));
    }

    #[test]
    fn test_unmatched_end_tag_is_ignored() {
        let doc = parse_fragment("<div>a</em>b</div>", options());
        let div = doc.children(doc.root())[0];
        assert_eq!(doc.text_content(div), "ab");
        assert_eq!(doc.children(doc.root()).len(), 1);
    }

    #[test]
    fn test_head_title_boundary() {
        let doc = parse_document("<html><head><title>T<body>b</html>", options());
        assert!(doc.head().is_some());
        let body = doc.body().expect("body should close head and title");
        assert_eq!(doc.text_content(body), "b");
        assert_eq!(doc.title(), "T");
    }

    #[test]
    fn test_table_cells_auto_close() {
        let doc = parse_fragment("<table><tr><td>1<td>2</tr><tr><td>3</tr></table>", options());
        let table = doc.children(doc.root())[0];
        let rows = doc.children(table);
        assert_eq!(rows.len(), 2);
        assert_eq!(doc.children(rows[0]).len(), 2);
        assert_eq!(doc.text_content(doc.children(rows[0])[1]), "2");
        assert_eq!(doc.children(rows[1]).len(), 1);
    }

    #[test]
    fn test_document_round_trip() {
        let html = "<!DOCTYPE html><html><head></head><body><p class=\"note\">hi</p></body></html>";
        let doc = parse_document(html, options());
        assert_eq!(doc.outer_html(Document::ROOT), html);
    }
}
