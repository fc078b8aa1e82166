//! Hyperlink insertion around a single word.
//!
//! The common case wraps the word in one `<a>...</a>` pair. When markup
//! intrudes into the word (`wo<i>rld</i>`), a single pair would cross the
//! intruding tags, so the link is split into several fragments that each
//! cover only literals and share the same destination and title:
//!
//! ```text
//! <a ...>wo</a><i><a ...>rld</a></i>
//! ```

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use super::{Catalog, LinkDirective};
use crate::document::{Direction, Document, Origin};
use crate::error::{Error, Result};
use crate::markup::{Entity, Tag};

/// Characters escaped in the file part of an href.
const HREF_FILE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`');

/// Markup settings for inserted links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkOptions {
    /// Extension of chapter files, used to build hrefs.
    pub extension: String,
    /// Class attribute of inserted anchors.
    pub class: String,
}

impl Default for LinkOptions {
    fn default() -> Self {
        Self {
            extension: "html".to_string(),
            class: "echo".to_string(),
        }
    }
}

/// Percent-encode a chapter file name for use in an href.
pub fn file_href(file_name: &str) -> String {
    utf8_percent_encode(file_name, HREF_FILE).to_string()
}

/// Element id that marks the word at `ordinal`.
pub fn marker_id(ordinal: i64) -> String {
    format!("w{ordinal}")
}

/// Escape text for use inside a double-quoted attribute.
pub fn escape_attribute(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Positions where link tags go for the word spanning `[lo, hi)`.
///
/// Besides the two ends, every boundary between a word literal and a tag
/// inside the word is a split point. Returned in descending order so that
/// inserting at one point never shifts a point still to be processed.
pub fn insertion_points(doc: &Document, lo: usize, hi: usize) -> Vec<usize> {
    let entities = doc.entities();
    let mut points = vec![lo, hi];
    for pos in lo + 1..hi {
        let (left, right) = (&entities[pos - 1], &entities[pos]);
        if (left.is_word_char() && right.is_tag()) || (left.is_tag() && right.is_word_char()) {
            points.push(pos);
        }
    }
    points.sort_unstable_by(|a, b| b.cmp(a));
    points.dedup();
    points
}

/// Applies link directives to the chapter they originate from.
pub struct AnchorInserter<'a> {
    catalog: &'a Catalog,
    options: &'a LinkOptions,
}

impl<'a> AnchorInserter<'a> {
    pub fn new(catalog: &'a Catalog, options: &'a LinkOptions) -> Self {
        Self { catalog, options }
    }

    /// The opening anchor tag for a directive.
    pub fn open_tag(&self, directive: &LinkDirective) -> Tag {
        let destination = directive.destination();
        let file = destination.chapter.file_name(&self.options.extension);
        let href = format!("{}#{}", file_href(&file), marker_id(destination.ordinal));
        Tag::opening(
            "a",
            &[
                ("class", escape_attribute(&self.options.class).as_str()),
                ("href", href.as_str()),
                ("title", escape_attribute(directive.phrase()).as_str()),
            ],
        )
    }

    /// Insert the link for `directive` into `doc`.
    ///
    /// Returns the number of link fragments inserted. The document is left
    /// untouched when validation fails.
    pub fn apply(&self, doc: &mut Document, directive: &LinkDirective) -> Result<usize> {
        let source = directive.source();
        if doc.name() != source.chapter.to_string() {
            return Err(Error::InvalidDirective(format!(
                "directive from {} applied to {}",
                source.chapter,
                doc.name()
            )));
        }
        self.catalog.validate(directive.destination())?;

        let lo = doc.word_start(source.ordinal)?;
        let hi = doc.word_end(lo);
        let found = doc.word_text(lo);
        if !found.eq_ignore_ascii_case(directive.first_word()) {
            return Err(Error::Consistency {
                chapter: doc.name().to_string(),
                ordinal: source.ordinal,
                expected: directive.first_word().to_string(),
                found,
            });
        }

        let open = self.open_tag(directive);
        let points = insertion_points(doc, lo, hi);
        for (i, &point) in points.iter().enumerate() {
            let tag = if i % 2 == 0 {
                Tag::closing("a")
            } else {
                open.clone()
            };
            doc.insert(point, Entity::Tag(tag));
        }

        log::trace!(
            "{}: linked {:?} at {} to {}",
            doc.name(),
            found,
            source.ordinal,
            directive.destination()
        );
        Ok(points.len() / 2)
    }
}

/// Insert an empty `<span id="wN">` target before the word at `ordinal`.
///
/// Returns `false` if the word already carries the marker.
pub fn mark_destination(doc: &mut Document, ordinal: i64) -> Result<bool> {
    let pos = doc.word_start(ordinal)?;
    let id = marker_id(ordinal);

    let run_start = doc
        .adjacent_content(Origin::At(pos), Direction::Backward)
        .map_or(0, |prev| prev + 1);
    let already_marked = doc.entities()[run_start..pos].iter().any(|e| {
        e.as_tag().is_some_and(|t| {
            t.is_opening() && t.name() == "span" && t.attribute("id") == Some(id.as_str())
        })
    });
    if already_marked {
        return Ok(false);
    }

    doc.insert_all(
        pos,
        [
            Entity::Tag(Tag::opening("span", &[("id", id.as_str())])),
            Entity::Tag(Tag::closing("span")),
        ],
    );
    Ok(true)
}
