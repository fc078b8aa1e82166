//! Chapter identifiers encoded in file names.
//!
//! A chapter file is named `BOOKID_INDEX_TITLE_WORDS.ext`: the book id, a
//! decimal chapter index and the title with its words joined by `_`.

use std::fmt;
use std::path::Path;

use crate::error::{Error, Result};
use crate::markup::is_word_char;

/// Separator between the components of a chapter identifier.
pub const SEPARATOR: char = '_';

/// Identity of one chapter of one book.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChapterId {
    book: String,
    index: u32,
    title: String,
}

impl ChapterId {
    /// Create an identifier. The title is whitespace-normalized.
    pub fn new(book: impl Into<String>, index: u32, title: &str) -> Result<Self> {
        let book = book.into();
        if book.is_empty() || book.contains(SEPARATOR) || book.contains(char::is_whitespace) {
            return Err(Error::InvalidChapterId(format!("bad book id {book:?}")));
        }
        let title = title.split_whitespace().collect::<Vec<_>>().join(" ");
        if title.contains(SEPARATOR) {
            return Err(Error::InvalidChapterId(format!(
                "title {title:?} contains {SEPARATOR:?}"
            )));
        }
        Ok(Self { book, index, title })
    }

    /// Parse a file stem such as `MOBY_03_THE_CARPET_BAG`.
    pub fn parse(stem: &str) -> Result<Self> {
        let mut parts = stem.splitn(3, SEPARATOR);
        let book = parts.next().unwrap_or_default();
        let index = parts
            .next()
            .and_then(|s| s.parse::<u32>().ok())
            .ok_or_else(|| Error::InvalidChapterId(stem.to_string()))?;
        let title = parts.next().unwrap_or_default().replace(SEPARATOR, " ");
        Self::new(book, index, &title)
    }

    /// Parse the identifier from a path's file stem.
    pub fn from_path(path: &Path) -> Result<Self> {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| Error::InvalidChapterId(path.display().to_string()))?;
        Self::parse(stem)
    }

    pub fn book(&self) -> &str {
        &self.book
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    /// Title with words separated by single spaces.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Number of words the title contributes ahead of the chapter body.
    pub fn title_word_count(&self) -> usize {
        let mut count = 0;
        let mut in_word = false;
        for c in self.title.chars() {
            let word = is_word_char(c);
            if word && !in_word {
                count += 1;
            }
            in_word = word;
        }
        count
    }

    /// Ordinal of the first title word; the body starts at ordinal 0.
    pub fn base_offset(&self) -> i64 {
        -(self.title_word_count() as i64)
    }

    /// File name with the given extension (without the dot).
    pub fn file_name(&self, extension: &str) -> String {
        format!("{self}.{extension}")
    }
}

impl fmt::Display for ChapterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{SEPARATOR}{:02}", self.book, self.index)?;
        for word in self.title.split(' ').filter(|w| !w.is_empty()) {
            write!(f, "{SEPARATOR}{word}")?;
        }
        Ok(())
    }
}
