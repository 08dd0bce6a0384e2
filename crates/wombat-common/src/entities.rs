//! Character reference encoding and decoding.
//!
//! A codec is built from a table of entity names and their replacement text.
//! Decoding expands both named references from the table and numeric
//! references of the `&#160;` and `&#xA0;` forms, per
//! <https://html.spec.whatwg.org/multipage/syntax.html#character-references>.
//! Encoding runs the table in reverse, replacing occurrences of replacement
//! text with the shortest entity name that produces it.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::options::EncodeEntities;

/// The built-in entity table: the five XML predefined entities plus the two
/// non-ASCII names legacy documents lean on most.
pub const DEFAULT_ENTITIES: &[(&str, &str)] = &[
    ("amp", "&"),
    ("apos", "'"),
    ("copy", "\u{a9}"),
    ("gt", ">"),
    ("lt", "<"),
    ("nbsp", "\u{a0}"),
    ("quot", "\""),
];

static DEFAULT_CODEC: LazyLock<EntityCodec> = LazyLock::new(|| EntityCodec::new(DEFAULT_ENTITIES));

/// Translates between entity references and their replacement text.
///
/// The decoding direction maps every table name to its replacement. The
/// encoding direction keeps one name per distinct replacement, preferring the
/// shortest name, and tries longer replacements first so that overlapping
/// replacement strings resolve deterministically.
#[derive(Debug, Clone)]
pub struct EntityCodec {
    decoding: HashMap<String, String>,
    // (replacement, "&name;") pairs, longest replacement first.
    encoding: Vec<(String, String)>,
}

impl EntityCodec {
    /// Builds a codec from `(name, replacement)` pairs.
    ///
    /// An empty table produces an inert codec: [`Self::decode`] and
    /// [`Self::encode`] both return their input unchanged, numeric
    /// references included.
    #[must_use]
    pub fn new(entities: &[(&str, &str)]) -> Self {
        let mut decoding = HashMap::with_capacity(entities.len());
        let mut best_name: HashMap<&str, &str> = HashMap::new();
        for (name, replacement) in entities {
            let _ = decoding.insert((*name).to_owned(), (*replacement).to_owned());
            match best_name.get(replacement) {
                Some(existing) if existing.len() <= name.len() => {}
                _ => {
                    let _ = best_name.insert(replacement, name);
                }
            }
        }
        let mut encoding: Vec<(String, String)> = best_name
            .into_iter()
            .map(|(replacement, name)| (replacement.to_owned(), format!("&{name};")))
            .collect();
        encoding.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));
        Self { decoding, encoding }
    }

    /// The process-wide codec built from [`DEFAULT_ENTITIES`].
    #[must_use]
    pub fn default_table() -> &'static Self {
        &DEFAULT_CODEC
    }

    /// Returns `true` if the codec was built from an empty table.
    #[must_use]
    pub fn is_inert(&self) -> bool {
        self.decoding.is_empty()
    }

    /// Expands entity references in `text`.
    ///
    /// Named references are looked up in the table, falling back to an
    /// ASCII-lowercase lookup; an unknown name passes through verbatim.
    /// Numeric references outside the Unicode scalar range decode to
    /// U+FFFD REPLACEMENT CHARACTER. The terminating `;` is optional.
    #[must_use]
    pub fn decode(&self, text: &str) -> String {
        if self.decoding.is_empty() || !text.contains('&') {
            return text.to_owned();
        }
        let chars: Vec<char> = text.chars().collect();
        let mut out = String::with_capacity(text.len());
        let mut i = 0;
        while i < chars.len() {
            if chars[i] != '&' {
                out.push(chars[i]);
                i += 1;
                continue;
            }
            match scan_reference(&chars, i) {
                Some(reference) => {
                    out.push_str(&self.expand(&reference, &chars, i));
                    i += reference.consumed;
                }
                None => {
                    out.push('&');
                    i += 1;
                }
            }
        }
        out
    }

    fn expand(&self, reference: &Reference, chars: &[char], start: usize) -> String {
        match reference.kind {
            ReferenceKind::Decimal => decode_code_point(&reference.body, 10),
            ReferenceKind::Hex => decode_code_point(&reference.body, 16),
            ReferenceKind::Named => self
                .decoding
                .get(&reference.body)
                .or_else(|| self.decoding.get(&reference.body.to_ascii_lowercase()))
                .cloned()
                .unwrap_or_else(|| {
                    chars[start..start + reference.consumed].iter().collect()
                }),
        }
    }

    /// Encodes characters of `text` back into entity references, as selected
    /// by `mode`.
    ///
    /// [`EncodeEntities::Table`] replaces every occurrence of a table
    /// replacement string. [`EncodeEntities::Chars`] replaces only the listed
    /// characters, and only those the table has a name for.
    /// [`EncodeEntities::Off`] returns the input unchanged.
    #[must_use]
    pub fn encode(&self, text: &str, mode: &EncodeEntities) -> String {
        match mode {
            EncodeEntities::Off => text.to_owned(),
            EncodeEntities::Table => self.encode_table(text),
            EncodeEntities::Chars(set) => self.encode_chars(text, set),
        }
    }

    fn encode_table(&self, text: &str) -> String {
        if self.encoding.is_empty() {
            return text.to_owned();
        }
        let chars: Vec<char> = text.chars().collect();
        let mut out = String::with_capacity(text.len());
        let mut i = 0;
        'outer: while i < chars.len() {
            for (replacement, entity) in &self.encoding {
                if starts_with_at(&chars, i, replacement) {
                    out.push_str(entity);
                    i += replacement.chars().count();
                    continue 'outer;
                }
            }
            out.push(chars[i]);
            i += 1;
        }
        out
    }

    fn encode_chars(&self, text: &str, set: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            let entity = if set.contains(c) {
                self.encoding.iter().find_map(|(replacement, entity)| {
                    let mut rep = replacement.chars();
                    (rep.next() == Some(c) && rep.next().is_none()).then_some(entity)
                })
            } else {
                None
            };
            match entity {
                Some(entity) => out.push_str(entity),
                None => out.push(c),
            }
        }
        out
    }
}

impl Default for EntityCodec {
    fn default() -> Self {
        DEFAULT_CODEC.clone()
    }
}

enum ReferenceKind {
    Decimal,
    Hex,
    Named,
}

struct Reference {
    kind: ReferenceKind,
    body: String,
    // Characters consumed from the input, including '&' and any ';'.
    consumed: usize,
}

/// Scans one reference starting at the `&` at `chars[start]`. Returns `None`
/// when what follows cannot begin a reference, in which case the `&` is
/// literal text.
fn scan_reference(chars: &[char], start: usize) -> Option<Reference> {
    let mut i = start + 1;
    let kind = if chars.get(i) == Some(&'#') {
        i += 1;
        if matches!(chars.get(i), Some('x' | 'X')) {
            i += 1;
            ReferenceKind::Hex
        } else {
            ReferenceKind::Decimal
        }
    } else {
        ReferenceKind::Named
    };
    let body_start = i;
    while let Some(&c) = chars.get(i) {
        let keep = match kind {
            ReferenceKind::Decimal => c.is_ascii_digit(),
            ReferenceKind::Hex => c.is_ascii_hexdigit(),
            ReferenceKind::Named => c.is_ascii_alphanumeric(),
        };
        if !keep {
            break;
        }
        i += 1;
    }
    if i == body_start {
        return None;
    }
    let body: String = chars[body_start..i].iter().collect();
    if chars.get(i) == Some(&';') {
        i += 1;
    }
    Some(Reference {
        kind,
        body,
        consumed: i - start,
    })
}

fn decode_code_point(digits: &str, radix: u32) -> String {
    u32::from_str_radix(digits, radix)
        .ok()
        .and_then(char::from_u32)
        .unwrap_or('\u{fffd}')
        .to_string()
}

fn starts_with_at(chars: &[char], at: usize, needle: &str) -> bool {
    let mut i = at;
    for expected in needle.chars() {
        if chars.get(i) != Some(&expected) {
            return false;
        }
        i += 1;
    }
    true
}

// ========== tests ==========
