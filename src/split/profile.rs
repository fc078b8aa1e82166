//! Per-book splitting settings.
//!
//! Profiles are read from a TOML file with one `[[book]]` table per book:
//!
//! ```toml
//! [[book]]
//! book = "MOBY"
//! front_marker = "ETYMOLOGY"
//! back_sentinel = "End of Project Gutenberg"
//! ```

#[cfg(feature = "cli")]
use std::path::Path;

#[cfg(feature = "cli")]
use crate::error::{Error, Result};

fn default_extension() -> String {
    "html".to_string()
}

/// How to cut one whole-book document into chapters.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Deserialize))]
pub struct BookProfile {
    /// Book id used as the first component of chapter identifiers.
    pub book: String,
    /// Text inside the first paragraph to keep; everything before it is dropped.
    pub front_marker: Option<String>,
    /// Text inside the first paragraph of back matter; it and everything after
    /// it are dropped.
    pub back_sentinel: Option<String>,
    /// Extension of the chapter files written for this book.
    #[cfg_attr(feature = "cli", serde(default = "default_extension"))]
    pub extension: String,
}

impl BookProfile {
    pub fn new(book: impl Into<String>) -> Self {
        Self {
            book: book.into(),
            front_marker: None,
            back_sentinel: None,
            extension: default_extension(),
        }
    }

    pub fn with_front_marker(mut self, marker: impl Into<String>) -> Self {
        self.front_marker = Some(marker.into());
        self
    }

    pub fn with_back_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.back_sentinel = Some(sentinel.into());
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }
}

/// A collection of book profiles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Deserialize))]
pub struct ProfileSet {
    #[cfg_attr(feature = "cli", serde(default, rename = "book"))]
    pub books: Vec<BookProfile>,
}

impl ProfileSet {
    /// Parse a TOML profiles file.
    #[cfg(feature = "cli")]
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::Config(e.to_string()))
    }

    /// Read and parse a TOML profiles file.
    #[cfg(feature = "cli")]
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// Add a profile, replacing any profile for the same book.
    pub fn insert(&mut self, profile: BookProfile) {
        match self.books.iter_mut().find(|p| p.book == profile.book) {
            Some(existing) => *existing = profile,
            None => self.books.push(profile),
        }
    }

    pub fn get(&self, book: &str) -> Option<&BookProfile> {
        self.books.iter().find(|p| p.book == book)
    }

    /// The profile for `book`, or a profile with no front/back trimming.
    pub fn get_or_default(&self, book: &str) -> BookProfile {
        self.get(book)
            .cloned()
            .unwrap_or_else(|| BookProfile::new(book))
    }
}
