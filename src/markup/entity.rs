//! Lexical entities of tokenized markup.
//!
//! A document is a flat sequence of [`Entity`] values. Each entity renders back
//! to exactly the source text it was parsed from, so concatenating the rendered
//! entities of an unmodified document reproduces the input byte for byte.

use std::fmt;

/// Elements that never take a closing tag, even when written without `/>`.
const VOID_ELEMENTS: &[&str] = &[
    "br", "hr", "img", "meta", "link", "input", "col", "area", "base", "wbr",
];

/// Accented letters that may appear inside a word.
const ACCENTED: &[char] = &[
    'à', 'â', 'ä', 'ç', 'é', 'è', 'ê', 'ë', 'î', 'ï', 'ô', 'ö', 'ù', 'û', 'ü', 'æ', 'œ', 'À', 'Â',
    'Ä', 'Ç', 'É', 'È', 'Ê', 'Ë', 'Î', 'Ï', 'Ô', 'Ö', 'Ù', 'Û', 'Ü', 'Æ', 'Œ',
];

/// Check if a character may be part of a word.
///
/// Words are made of ASCII letters and digits, apostrophes, hyphens and a
/// small set of accented letters.
pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '\'' || c == '-' || ACCENTED.contains(&c)
}

/// Structural role of a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// `<p class="x">`
    Opening,
    /// `</p>`
    Closing,
    /// `<br/>`, void elements, comments, doctypes and processing instructions.
    SelfClosing,
}

/// A markup tag, stored as the raw text between `<` and `>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    raw: String,
    name: String,
    kind: TagKind,
}

impl Tag {
    /// Classify the raw text found between angle brackets.
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let body = raw.strip_prefix('/').unwrap_or(&raw);
        let name: String = body
            .split(|c: char| c.is_whitespace() || c == '/')
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        let kind = if raw.starts_with('/') {
            TagKind::Closing
        } else if raw.starts_with('!')
            || raw.starts_with('?')
            || raw.trim_end().ends_with('/')
            || VOID_ELEMENTS.contains(&name.as_str())
        {
            TagKind::SelfClosing
        } else {
            TagKind::Opening
        };

        Self { raw, name, kind }
    }

    /// Build an opening tag from a name and pre-escaped attribute pairs.
    pub fn opening(name: &str, attrs: &[(&str, &str)]) -> Self {
        let mut raw = String::from(name);
        for (key, value) in attrs {
            raw.push(' ');
            raw.push_str(key);
            raw.push_str("=\"");
            raw.push_str(value);
            raw.push('"');
        }
        Self::new(raw)
    }

    /// Build the closing tag for `name`.
    pub fn closing(name: &str) -> Self {
        Self::new(format!("/{name}"))
    }

    /// Raw text between the angle brackets.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Lowercased element name (`p`, `h2`, `!--`, `?xml`, ...).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> TagKind {
        self.kind
    }

    pub fn is_opening(&self) -> bool {
        self.kind == TagKind::Opening
    }

    pub fn is_closing(&self) -> bool {
        self.kind == TagKind::Closing
    }

    /// Paragraph-like blocks: `<p>` and the six heading levels.
    pub fn is_block_name(&self) -> bool {
        matches!(
            self.name.as_str(),
            "p" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6"
        )
    }

    /// Opening tag of a paragraph-like block.
    pub fn opens_block(&self) -> bool {
        self.is_opening() && self.is_block_name()
    }

    /// Value of a double-quoted attribute, if present.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        let needle = format!("{key}=\"");
        let mut search = 0;
        while let Some(found) = self.raw[search..].find(&needle) {
            let start = search + found;
            let preceded_by_space = self.raw[..start]
                .chars()
                .next_back()
                .is_some_and(char::is_whitespace);
            let value_start = start + needle.len();
            if preceded_by_space {
                let len = memchr::memchr(b'"', self.raw[value_start..].as_bytes())?;
                return Some(&self.raw[value_start..value_start + len]);
            }
            search = value_start;
        }
        None
    }
}

/// One lexical unit of tokenized markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entity {
    /// Markup between `<` and `>`.
    Tag(Tag),
    /// Named character reference between `&` and `;` (e.g. `mdash`).
    CharRef(String),
    /// A single source character.
    Literal(char),
}

impl Entity {
    pub fn tag(raw: impl Into<String>) -> Self {
        Entity::Tag(Tag::new(raw))
    }

    pub fn as_tag(&self) -> Option<&Tag> {
        match self {
            Entity::Tag(tag) => Some(tag),
            _ => None,
        }
    }

    pub fn is_tag(&self) -> bool {
        matches!(self, Entity::Tag(_))
    }

    pub fn is_char_ref(&self) -> bool {
        matches!(self, Entity::CharRef(_))
    }

    pub fn literal(&self) -> Option<char> {
        match self {
            Entity::Literal(c) => Some(*c),
            _ => None,
        }
    }

    /// A Literal whose character may be part of a word.
    pub fn is_word_char(&self) -> bool {
        match self {
            Entity::Literal(c) => is_word_char(*c),
            Entity::Tag(_) | Entity::CharRef(_) => false,
        }
    }

    /// Opening tag of a paragraph or heading.
    pub fn opens_block(&self) -> bool {
        self.as_tag().is_some_and(Tag::opens_block)
    }

    /// Append the source text of this entity to `out`.
    pub fn render_into(&self, out: &mut String) {
        match self {
            Entity::Tag(tag) => {
                out.push('<');
                out.push_str(&tag.raw);
                out.push('>');
            }
            Entity::CharRef(name) => {
                out.push('&');
                out.push_str(name);
                out.push(';');
            }
            Entity::Literal(c) => out.push(*c),
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Tag(tag) => write!(f, "<{}>", tag.raw),
            Entity::CharRef(name) => write!(f, "&{name};"),
            Entity::Literal(c) => write!(f, "{c}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_classification() {
        assert_eq!(Tag::new("p class=\"x\"").kind(), TagKind::Opening);
        assert_eq!(Tag::new("/p").kind(), TagKind::Closing);
        assert_eq!(Tag::new("br/").kind(), TagKind::SelfClosing);
        assert_eq!(Tag::new("span id=\"w3\" /").kind(), TagKind::SelfClosing);
        assert_eq!(Tag::new("br").kind(), TagKind::SelfClosing);
        assert_eq!(Tag::new("!-- note --").kind(), TagKind::SelfClosing);
        assert_eq!(Tag::new("?xml version=\"1.0\"?").kind(), TagKind::SelfClosing);
        assert_eq!(Tag::new("!DOCTYPE html").kind(), TagKind::SelfClosing);
    }

    #[test]
    fn test_tag_name() {
        assert_eq!(Tag::new("P CLASS=\"x\"").name(), "p");
        assert_eq!(Tag::new("/h2").name(), "h2");
        assert_eq!(Tag::new("br/").name(), "br");
        assert_eq!(Tag::new("div\nclass=\"x\"").name(), "div");
    }

    #[test]
    fn test_block_detection() {
        assert!(Tag::new("p").opens_block());
        assert!(Tag::new("h3 id=\"c\"").opens_block());
        assert!(!Tag::new("/p").opens_block());
        assert!(!Tag::new("pre").opens_block());
        assert!(!Tag::new("div").opens_block());
    }

    #[test]
    fn test_attribute_lookup() {
        let tag = Tag::new("a data-href=\"no\" href=\"ONE_01_A.html\" title=\"x\"");
        assert_eq!(tag.attribute("href"), Some("ONE_01_A.html"));
        assert_eq!(tag.attribute("title"), Some("x"));
        assert_eq!(tag.attribute("id"), None);
    }

    #[test]
    fn test_opening_builder() {
        let tag = Tag::opening("a", &[("href", "#w1"), ("title", "cat")]);
        assert_eq!(tag.raw(), "a href=\"#w1\" title=\"cat\"");
        assert!(tag.is_opening());
        assert!(Tag::closing("a").is_closing());
    }

    #[test]
    fn test_word_chars() {
        for c in ['a', 'Z', '7', '\'', '-', 'é', 'Œ'] {
            assert!(is_word_char(c), "{c:?} should be a word char");
        }
        for c in [' ', '.', ',', '"', '\n', '\u{2019}'] {
            assert!(!is_word_char(c), "{c:?} should not be a word char");
        }
        assert!(!Entity::CharRef("eacute".into()).is_word_char());
        assert!(!Entity::tag("i").is_word_char());
    }

    #[test]
    fn test_render() {
        assert_eq!(Entity::tag("p").to_string(), "<p>");
        assert_eq!(Entity::CharRef("amp".into()).to_string(), "&amp;");
        assert_eq!(Entity::Literal('x').to_string(), "x");
    }
}
