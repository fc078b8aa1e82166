//! Word boundaries and ordinal lookup.
//!
//! A word is a maximal run of word-character literals; tags inside the run
//! are transparent. Ordinals count word starts from the document's base
//! offset.
//!
//! Lookups go through a single-entry memo `(index, position, generation)`:
//! - same index at the same generation: answered from the memo
//! - higher index at the same generation: scan resumes from the memo
//! - anything else: scan restarts from the document start
//!
//! Sequential access, the dominant pattern when walking a chapter's links, is
//! therefore amortized linear.

use super::{Direction, Document, Origin};
use crate::error::{Error, Result};

/// Memoized result of the last successful word lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordMemo {
    /// Zero-based word count from the start of the document.
    pub index: usize,
    /// Entity position of the word's first literal.
    pub position: usize,
    /// Document generation the position is valid for.
    pub generation: u64,
}

impl Document {
    /// Whether a word starts at `pos`.
    pub fn is_word_start(&self, pos: usize) -> bool {
        self.entities.get(pos).is_some_and(|e| e.is_word_char())
            && !self
                .adjacent_content(Origin::At(pos), Direction::Backward)
                .is_some_and(|prev| self.entities[prev].is_word_char())
    }

    fn next_word_start(&self, origin: Origin) -> Option<usize> {
        self.adjacent(origin, Direction::Forward, |pos, _| self.is_word_start(pos))
    }

    /// Entity position of the first literal of the word at `ordinal`.
    ///
    /// Ordinals below the base offset fail with [`Error::WordTooLow`]; ordinals
    /// past the last word fail with [`Error::WordTooHigh`].
    pub fn word_start(&self, ordinal: i64) -> Result<usize> {
        if ordinal < self.base {
            return Err(Error::WordTooLow {
                chapter: self.name.clone(),
                ordinal,
                base: self.base,
            });
        }
        let too_high = || Error::WordTooHigh {
            chapter: self.name.clone(),
            ordinal,
        };
        let index = ordinal
            .checked_sub(self.base)
            .and_then(|i| usize::try_from(i).ok())
            .ok_or_else(too_high)?;

        let (mut count, mut pos) = match self.word_memo.get() {
            Some(memo) if memo.generation == self.generation && memo.index == index => {
                return Ok(memo.position);
            }
            Some(memo) if memo.generation == self.generation && memo.index < index => {
                (memo.index, memo.position)
            }
            _ => {
                log::trace!("{}: word scan restarts for ordinal {ordinal}", self.name);
                let first = self
                    .next_word_start(Origin::BeforeStart)
                    .ok_or_else(too_high)?;
                (0, first)
            }
        };

        while count < index {
            pos = self
                .next_word_start(Origin::At(pos))
                .ok_or_else(too_high)?;
            count += 1;
        }

        self.word_memo.set(Some(WordMemo {
            index,
            position: pos,
            generation: self.generation,
        }));
        Ok(pos)
    }

    /// Exclusive end of the word starting at `start`: one past its last
    /// literal, scanning through embedded tags but not trailing ones.
    pub fn word_end(&self, start: usize) -> usize {
        let mut last = start;
        while let Some(next) = self.adjacent_content(Origin::At(last), Direction::Forward) {
            if !self.entities[next].is_word_char() {
                break;
            }
            last = next;
        }
        last + 1
    }

    /// Literal text of the word starting at `start`.
    pub fn word_text(&self, start: usize) -> String {
        self.entities[start..self.word_end(start)]
            .iter()
            .filter_map(|e| e.literal())
            .collect()
    }

    /// Number of words in the document.
    pub fn word_count(&self) -> usize {
        let mut count = 0;
        let mut origin = Origin::BeforeStart;
        while let Some(pos) = self.next_word_start(origin) {
            count += 1;
            origin = Origin::At(pos);
        }
        count
    }

    /// Valid ordinals: from the base offset up to the last word.
    pub fn ordinal_range(&self) -> std::ops::Range<i64> {
        self.base..self.base + self.word_count() as i64
    }

    /// The memo left by the last lookup.
    pub fn word_memo(&self) -> Option<WordMemo> {
        self.word_memo.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ChapterId;
    use crate::markup::Entity;

    fn doc(text: &str) -> Document {
        Document::parse_book("BOOK", text).unwrap()
    }

    #[test]
    fn test_hello_world_ordinals() {
        let d = doc("<p>Hello <i>world</i>.</p>");
        let hello = d.word_start(0).unwrap();
        assert_eq!(hello, 1);
        assert_eq!(d.word_text(hello), "Hello");

        let world = d.word_start(1).unwrap();
        assert_eq!(world, 8);
        assert_eq!(d.word_text(world), "world");
        // closing </i> is not part of the word
        assert_eq!(d.word_end(world), 13);

        assert!(matches!(d.word_start(2), Err(Error::WordTooHigh { ordinal: 2, .. })));
        assert_eq!(d.word_count(), 2);
    }

    #[test]
    fn test_embedded_tags_are_transparent() {
        let d = doc("<p>wo<i>r</i>ld next</p>");
        let start = d.word_start(0).unwrap();
        assert_eq!(d.word_text(start), "world");
        assert_eq!(d.word_end(start), 8);
        assert_eq!(d.word_text(d.word_start(1).unwrap()), "next");
    }

    #[test]
    fn test_char_refs_and_punctuation_split_words() {
        let d = doc("don't re-enter caf&eacute;s, ok");
        let words: Vec<String> = (0..d.word_count() as i64)
            .map(|k| d.word_text(d.word_start(k).unwrap()))
            .collect();
        assert_eq!(words, vec!["don't", "re-enter", "caf", "s", "ok"]);
    }

    #[test]
    fn test_negative_ordinals_address_title() {
        let id = ChapterId::parse("BOOK_01_THE_TWO").unwrap();
        let d = Document::parse_chapter(&id, "<h2>THE TWO</h2><p>First body.</p>").unwrap();
        assert_eq!(d.word_text(d.word_start(-2).unwrap()), "THE");
        assert_eq!(d.word_text(d.word_start(-1).unwrap()), "TWO");
        assert_eq!(d.word_text(d.word_start(0).unwrap()), "First");
        assert_eq!(d.ordinal_range(), -2..2);
        assert!(matches!(
            d.word_start(-3),
            Err(Error::WordTooLow {
                ordinal: -3,
                base: -2,
                ..
            })
        ));
    }

    #[test]
    fn test_memo_hit_and_forward_resume() {
        let d = doc("one two three four");
        let third = d.word_start(2).unwrap();
        assert_eq!(
            d.word_memo(),
            Some(WordMemo {
                index: 2,
                position: third,
                generation: 0
            })
        );
        assert_eq!(d.word_start(2).unwrap(), third);
        let fourth = d.word_start(3).unwrap();
        assert_eq!(d.word_text(fourth), "four");
        assert_eq!(d.word_memo().unwrap().index, 3);

        // going backwards restarts the scan
        assert_eq!(d.word_text(d.word_start(0).unwrap()), "one");
        assert_eq!(d.word_memo().unwrap().index, 0);
    }

    #[test]
    fn test_memo_invalidated_by_mutation() {
        let mut d = doc("alpha beta");
        let beta = d.word_start(1).unwrap();
        assert_eq!(beta, 6);

        d.insert(0, Entity::tag("b"));
        d.insert(2, Entity::tag("/b"));
        let beta = d.word_start(1).unwrap();
        assert_eq!(beta, 8);
        assert_eq!(d.word_text(beta), "beta");
        assert_eq!(d.word_memo().unwrap().generation, 2);
    }

    #[test]
    fn test_extreme_ordinals_are_out_of_range() {
        let id = ChapterId::parse("BOOK_01_ONE").unwrap();
        let d = Document::parse_chapter(&id, "<h2>ONE</h2><p>alpha</p>").unwrap();
        assert!(matches!(
            d.word_start(i64::MAX),
            Err(Error::WordTooHigh { ordinal: i64::MAX, .. })
        ));
        assert!(matches!(
            d.word_start(i64::MIN),
            Err(Error::WordTooLow { ordinal: i64::MIN, .. })
        ));
        assert_eq!(d.word_memo(), None);
    }

    #[test]
    fn test_empty_document_has_no_words() {
        let d = doc("<p></p>");
        assert_eq!(d.word_count(), 0);
        assert!(matches!(d.word_start(0), Err(Error::WordTooHigh { .. })));
    }
}
