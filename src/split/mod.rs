//! Splitting a whole-book document into chapter documents.
//!
//! A book is cut at its title paragraphs: blocks written entirely in
//! upper-case letters. Each chapter document is the body between two titles
//! wrapped in a fixed header and footer; the header repeats the title in an
//! `h2`, so the title words take the negative ordinals and the body starts
//! at ordinal 0.
//!
//! ```
//! use phraselink::document::Document;
//! use phraselink::split::{BookProfile, split_book};
//!
//! let book = Document::parse_book(
//!     "MOBY",
//!     "<p>LOOMINGS</p><p>Call me Ishmael.</p><p>THE CARPET BAG</p><p>I stuffed a shirt.</p>",
//! )
//! .unwrap();
//! let chapters = split_book(book, &BookProfile::new("MOBY")).unwrap();
//! assert_eq!(chapters.len(), 2);
//! assert_eq!(chapters[1].id.to_string(), "MOBY_02_THE_CARPET_BAG");
//! assert_eq!(chapters[1].document.word_text(chapters[1].document.word_start(0).unwrap()), "I");
//! ```

mod navigation;
mod profile;
mod template;
mod title;
mod trim;

use std::ops::Range;

pub use navigation::resolve_navigation;
pub use profile::{BookProfile, ProfileSet};
pub use template::{
    INDEX_STEM, NEXT_PLACEHOLDER, PREVIOUS_PLACEHOLDER, chapter_footer, chapter_header,
};
pub use title::{block_title, is_title_block};
pub use trim::{trim_back_matter, trim_front_matter};

use crate::document::{Block, ChapterId, Document};
use crate::error::Result;
use crate::markup::tokenize;

/// One chapter cut from a book.
#[derive(Debug, Clone)]
pub struct Chapter {
    pub id: ChapterId,
    pub document: Document,
    /// Entities of `document` that came from the book, between header and
    /// footer.
    pub body: Range<usize>,
}

impl Chapter {
    /// File name of the chapter with the given extension.
    pub fn file_name(&self, extension: &str) -> String {
        self.id.file_name(extension)
    }

    /// Markup of the body without header and footer.
    pub fn body_markup(&self) -> String {
        self.document.render_range(self.body.clone())
    }
}

/// Trim `book` according to `profile` and cut it at its title paragraphs.
///
/// Anything before the first title is dropped, as is anything after the
/// last block of the book. Navigation links are resolved before returning.
pub fn split_book(mut book: Document, profile: &BookProfile) -> Result<Vec<Chapter>> {
    if let Some(marker) = &profile.front_marker {
        trim_front_matter(&mut book, marker)?;
    }
    if let Some(sentinel) = &profile.back_sentinel {
        trim_back_matter(&mut book, sentinel)?;
    }

    let blocks = book.paragraphs().collect::<Result<Vec<Block>>>()?;
    let Some(last) = blocks.last() else {
        log::warn!("{}: no paragraphs found", book.name());
        return Ok(Vec::new());
    };
    let end = last.close + 1;
    let titles: Vec<Block> = blocks
        .iter()
        .copied()
        .filter(|&block| is_title_block(&book, block))
        .collect();
    if titles.is_empty() {
        log::warn!("{}: no chapter titles found", book.name());
    }

    let extension = &profile.extension;
    let footer = tokenize(&chapter_footer(extension))?;
    let mut chapters = Vec::with_capacity(titles.len());
    for (i, title) in titles.iter().enumerate() {
        let body_end = titles.get(i + 1).map_or(end, |next| next.open);
        let id = ChapterId::new(
            profile.book.as_str(),
            i as u32 + 1,
            &block_title(&book, *title),
        )?;

        let mut entities = tokenize(&chapter_header(&id, extension))?;
        let body_start = entities.len();
        entities.extend_from_slice(&book.entities()[title.close + 1..body_end]);
        let body = body_start..entities.len();
        entities.extend(footer.iter().cloned());

        let document = Document::new(id.to_string(), id.base_offset(), entities);
        log::debug!("{}: {} words", id, document.word_count() - id.title_word_count());
        chapters.push(Chapter { id, document, body });
    }

    resolve_navigation(&mut chapters, extension);
    log::info!("{}: split into {} chapters", book.name(), chapters.len());
    Ok(chapters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    const BOOK: &str = "<html><body>\n\
        <p>Produced by volunteers.</p>\n\
        <h2>LOOMINGS</h2>\n<p>Call me <i>Ishmael</i>.</p>\n\
        <h2>THE CARPET BAG</h2>\n<p>I stuffed a shirt or two.</p>\n<p>Then I left.</p>\n\
        <h2>THE SPOUTER INN</h2>\n<p>Entering that inn.</p>\n\
        <p>End of the Project Gutenberg EBook</p>\n<p>License.</p>\n\
        </body></html>";

    fn split(profile: &BookProfile) -> Vec<Chapter> {
        split_book(Document::parse_book("MOBY", BOOK).unwrap(), profile).unwrap()
    }

    #[test]
    fn test_split_titles() {
        let chapters = split(&BookProfile::new("MOBY"));
        let names: Vec<String> = chapters.iter().map(|c| c.id.to_string()).collect();
        assert_eq!(
            names,
            ["MOBY_01_LOOMINGS", "MOBY_02_THE_CARPET_BAG", "MOBY_03_THE_SPOUTER_INN"]
        );
        assert_eq!(chapters[0].body_markup(), "\n<p>Call me <i>Ishmael</i>.</p>\n");
        assert_eq!(
            chapters[1].body_markup(),
            "\n<p>I stuffed a shirt or two.</p>\n<p>Then I left.</p>\n"
        );
        assert!(chapters[2].body_markup().ends_with("<p>License.</p>"));
    }

    #[test]
    fn test_split_ordinals() {
        let chapters = split(&BookProfile::new("MOBY"));
        let doc = &chapters[1].document;
        assert_eq!(doc.base_offset(), -3);
        assert_eq!(doc.ordinal_range(), -3..9);
        assert_eq!(doc.word_text(doc.word_start(-3).unwrap()), "THE");
        assert_eq!(doc.word_text(doc.word_start(0).unwrap()), "I");
        assert_eq!(doc.word_text(doc.word_start(6).unwrap()), "Then");
    }

    #[test]
    fn test_split_with_back_sentinel() {
        let profile = BookProfile::new("MOBY")
            .with_front_marker("LOOMINGS")
            .with_back_sentinel("Project Gutenberg");
        let chapters = split(&profile);
        assert_eq!(chapters.len(), 3);
        assert_eq!(chapters[2].body_markup(), "\n<p>Entering that inn.</p>");
    }

    #[test]
    fn test_split_navigation() {
        let chapters = split(&BookProfile::new("MOBY").with_extension("xhtml"));
        let first = chapters[0].document.render();
        assert!(first.contains("<a href=\"index.xhtml\">&larr;</a>"));
        assert!(first.contains("<a href=\"MOBY_02_THE_CARPET_BAG.xhtml\">&rarr;</a>"));
        let middle = chapters[1].document.render();
        assert!(middle.contains("<a href=\"MOBY_01_LOOMINGS.xhtml\">&larr;</a>"));
        assert!(middle.contains("<a href=\"MOBY_03_THE_SPOUTER_INN.xhtml\">&rarr;</a>"));
        let last = chapters[2].document.render();
        assert!(last.contains("<a href=\"index.xhtml\">&rarr;</a>"));
        assert!(!last.contains(PREVIOUS_PLACEHOLDER));
        assert!(!last.contains(NEXT_PLACEHOLDER));
    }

    #[test]
    fn test_split_without_titles() {
        let book = Document::parse_book("MOBY", "<p>No titles here.</p>").unwrap();
        let chapters = split_book(book, &BookProfile::new("MOBY")).unwrap();
        assert!(chapters.is_empty());
    }

    #[test]
    fn test_split_missing_front_marker() {
        let book = Document::parse_book("MOBY", BOOK).unwrap();
        let err = split_book(book, &BookProfile::new("MOBY").with_front_marker("ETYMOLOGY"));
        assert!(matches!(err, Err(Error::MarkerNotFound { .. })));
    }

    #[test]
    fn test_split_unbalanced_book() {
        let book = Document::parse_book("MOBY", "<p>LOOMINGS</p><p>Open").unwrap();
        let err = split_book(book, &BookProfile::new("MOBY"));
        assert!(matches!(err, Err(Error::Structural { .. })));
    }
}
