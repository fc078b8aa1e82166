//! Word ranges of every chapter that can be linked to.

use std::collections::HashMap;
use std::ops::Range;

use super::Location;
use crate::document::{ChapterId, Document};
use crate::error::{Error, Result};

/// Known chapters and the ordinals each one can address.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    chapters: HashMap<ChapterId, Range<i64>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a chapter with its valid ordinal range.
    pub fn insert(&mut self, chapter: ChapterId, ordinals: Range<i64>) {
        self.chapters.insert(chapter, ordinals);
    }

    /// Register a chapter document, measuring its words.
    pub fn insert_document(&mut self, chapter: ChapterId, doc: &Document) {
        self.insert(chapter, doc.ordinal_range());
    }

    pub fn ordinals(&self, chapter: &ChapterId) -> Option<&Range<i64>> {
        self.chapters.get(chapter)
    }

    pub fn len(&self) -> usize {
        self.chapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }

    /// Check that a location names a known chapter and an existing word.
    pub fn validate(&self, location: &Location) -> Result<()> {
        match self.chapters.get(&location.chapter) {
            Some(range) if range.contains(&location.ordinal) => Ok(()),
            _ => Err(Error::MissingDestination(location.to_string())),
        }
    }
}
