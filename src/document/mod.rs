//! Versioned, word-addressable document model.
//!
//! A [`Document`] is a flat entity sequence with a generation counter that is
//! bumped by every mutation. Everything derived from positions (the word
//! lookup memo, block cursors) records the generation it was computed at and
//! refuses to be reused once the document has moved on.
//!
//! The submodules add the positional algorithms, all built on
//! [`Document::adjacent`]:
//! - [`scan`]: the directional scanner and literal-text search
//! - [`words`]: word boundaries and the ordinal lookup memo
//! - [`balance`]: opening/closing tag matching
//! - [`paragraphs`]: paragraph and heading blocks

mod balance;
mod chapter_id;
mod paragraphs;
mod scan;
mod words;

use std::cell::Cell;
use std::ops::Range;

pub use chapter_id::{ChapterId, SEPARATOR};
pub use paragraphs::{Block, BlockCursor, Paragraphs};
pub use scan::{Direction, Origin};
pub use words::WordMemo;

use crate::error::Result;
use crate::markup::{Entity, render, tokenize};

/// An ordered, mutable entity sequence with a generation counter.
#[derive(Debug, Clone)]
pub struct Document {
    name: String,
    base: i64,
    entities: Vec<Entity>,
    generation: u64,
    word_memo: Cell<Option<WordMemo>>,
}

impl Document {
    /// Wrap an entity sequence.
    ///
    /// `base` is the ordinal of the first word in the document; chapter
    /// documents use a negative base so their body starts at ordinal 0.
    pub fn new(name: impl Into<String>, base: i64, entities: Vec<Entity>) -> Self {
        Self {
            name: name.into(),
            base,
            entities,
            generation: 0,
            word_memo: Cell::new(None),
        }
    }

    /// Tokenize a chapter file; the base offset comes from the title.
    pub fn parse_chapter(id: &ChapterId, text: &str) -> Result<Self> {
        Ok(Self::new(id.to_string(), id.base_offset(), tokenize(text)?))
    }

    /// Tokenize a whole-book file. Its first word is ordinal 0.
    pub fn parse_book(book: impl Into<String>, text: &str) -> Result<Self> {
        Ok(Self::new(book, 0, tokenize(text)?))
    }

    /// Chapter or book identifier this document was parsed from.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ordinal of the first word.
    pub fn base_offset(&self) -> i64 {
        self.base
    }

    /// Number of mutations applied so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn get(&self, pos: usize) -> Option<&Entity> {
        self.entities.get(pos)
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Insert an entity before `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos > len`.
    pub fn insert(&mut self, pos: usize, entity: Entity) {
        self.entities.insert(pos, entity);
        self.bump();
    }

    /// Insert a run of entities before `pos`.
    pub fn insert_all(&mut self, pos: usize, entities: impl IntoIterator<Item = Entity>) {
        self.entities.splice(pos..pos, entities);
        self.bump();
    }

    /// Replace the entity at `pos`, returning the old one.
    pub fn replace(&mut self, pos: usize, entity: Entity) -> Entity {
        let old = std::mem::replace(&mut self.entities[pos], entity);
        self.bump();
        old
    }

    /// Remove a range of entities, returning them in order.
    pub fn remove_range(&mut self, range: Range<usize>) -> Vec<Entity> {
        let removed: Vec<Entity> = self.entities.drain(range).collect();
        self.bump();
        removed
    }

    /// Render the document back to markup.
    pub fn render(&self) -> String {
        render(&self.entities)
    }

    /// Render a sub-range of the document.
    pub fn render_range(&self, range: Range<usize>) -> String {
        render(&self.entities[range])
    }

    fn bump(&mut self) {
        self.generation += 1;
    }
}
