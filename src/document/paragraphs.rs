//! Paragraph and heading blocks.

use std::ops::Range;

use super::{Direction, Document, Origin};
use crate::error::{Error, Result};
use crate::markup::Entity;

/// A paragraph-like block: an opening `p`/`hN` tag and its balancing close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub open: usize,
    pub close: usize,
}

impl Block {
    /// Entities of the block including both tags.
    pub fn range(&self) -> Range<usize> {
        self.open..self.close + 1
    }

    /// Entities between the two tags.
    pub fn inner(&self) -> Range<usize> {
        self.open + 1..self.close
    }
}

/// Detached cursor over the blocks of a document.
///
/// The cursor records the document generation when it is created; using it
/// after the document has been mutated fails with [`Error::StaleIterator`].
#[derive(Debug, Clone)]
pub struct BlockCursor {
    origin: Origin,
    generation: u64,
}

impl BlockCursor {
    /// A cursor positioned before the first entity of `doc`.
    pub fn new(doc: &Document) -> Self {
        Self {
            origin: Origin::BeforeStart,
            generation: doc.generation(),
        }
    }

    fn check(&self, doc: &Document) -> Result<()> {
        if doc.generation() != self.generation {
            return Err(Error::StaleIterator {
                created: self.generation,
                current: doc.generation(),
            });
        }
        Ok(())
    }

    fn next_open(&self, doc: &Document) -> Option<usize> {
        doc.adjacent(self.origin, Direction::Forward, |_, e| e.opens_block())
    }

    /// Whether another block follows the cursor.
    pub fn has_next(&self, doc: &Document) -> Result<bool> {
        self.check(doc)?;
        Ok(self.next_open(doc).is_some())
    }

    /// Return the next block and move past its opening tag's balancing close.
    pub fn next_block(&mut self, doc: &Document) -> Result<Option<Block>> {
        self.check(doc)?;
        let Some(open) = self.next_open(doc) else {
            return Ok(None);
        };
        let close = doc.closing_match(open)?;
        self.origin = Origin::At(close);
        Ok(Some(Block { open, close }))
    }
}

/// Borrowing iterator over the blocks of a document.
///
/// Yields an error once and then stops if the markup is unbalanced.
pub struct Paragraphs<'a> {
    doc: &'a Document,
    cursor: BlockCursor,
    done: bool,
}

impl Iterator for Paragraphs<'_> {
    type Item = Result<Block>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.cursor.next_block(self.doc) {
            Ok(Some(block)) => Some(Ok(block)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl Document {
    /// A detached block cursor bound to the current generation.
    pub fn block_cursor(&self) -> BlockCursor {
        BlockCursor::new(self)
    }

    /// Iterate over paragraph-like blocks in document order.
    pub fn paragraphs(&self) -> Paragraphs<'_> {
        Paragraphs {
            doc: self,
            cursor: BlockCursor::new(self),
            done: false,
        }
    }

    /// Literal text of a block, tags removed and character references kept
    /// as written.
    pub fn block_text(&self, block: Block) -> String {
        let mut out = String::new();
        for entity in &self.entities[block.inner()] {
            match entity {
                Entity::Literal(c) => out.push(*c),
                Entity::CharRef(_) => entity.render_into(&mut out),
                Entity::Tag(_) => {}
            }
        }
        out
    }
}
