//! Directional scanning.
//!
//! [`Document::adjacent`] is the single traversal primitive: step one entity
//! at a time in one direction until a predicate holds. Word boundaries, tag
//! matching, block bounds and text search are all phrased in terms of it.

use super::{Block, Document};
use crate::markup::Entity;

/// Scan direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Where a scan starts. The origin itself is never examined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Just before the first entity.
    BeforeStart,
    /// Just after the last entity.
    AfterEnd,
    /// At an entity position.
    At(usize),
}

impl Document {
    /// Find the nearest position from `origin` in `direction` whose entity
    /// satisfies `pred`.
    ///
    /// The predicate receives the position and the entity there.
    pub fn adjacent<P>(&self, origin: Origin, direction: Direction, mut pred: P) -> Option<usize>
    where
        P: FnMut(usize, &Entity) -> bool,
    {
        let len = self.entities.len();
        match direction {
            Direction::Forward => {
                let start = match origin {
                    Origin::BeforeStart => 0,
                    Origin::AfterEnd => return None,
                    Origin::At(pos) => pos + 1,
                };
                (start..len).find(|&pos| pred(pos, &self.entities[pos]))
            }
            Direction::Backward => {
                let end = match origin {
                    Origin::BeforeStart => return None,
                    Origin::AfterEnd => len,
                    Origin::At(pos) => pos.min(len),
                };
                (0..end).rev().find(|&pos| pred(pos, &self.entities[pos]))
            }
        }
    }

    /// Nearest non-tag entity in `direction`; tags are transparent.
    pub fn adjacent_content(&self, origin: Origin, direction: Direction) -> Option<usize> {
        self.adjacent(origin, direction, |_, e| !e.is_tag())
    }

    /// Find `needle` as consecutive literals, skipping any tags in between.
    ///
    /// Returns the position of the literal matching the first character.
    pub fn find_text(&self, origin: Origin, needle: &str) -> Option<usize> {
        let mut chars = needle.chars();
        let first = chars.next()?;
        let rest: Vec<char> = chars.collect();

        let mut from = origin;
        while let Some(candidate) =
            self.adjacent(from, Direction::Forward, |_, e| e.literal() == Some(first))
        {
            if self.matches_from(candidate, &rest) {
                return Some(candidate);
            }
            from = Origin::At(candidate);
        }
        None
    }

    fn matches_from(&self, start: usize, rest: &[char]) -> bool {
        let mut pos = start;
        for &expected in rest {
            match self.adjacent_content(Origin::At(pos), Direction::Forward) {
                Some(next) if self.entities[next].literal() == Some(expected) => pos = next,
                _ => return false,
            }
        }
        true
    }

    /// The innermost paragraph-like block containing `pos`.
    pub fn enclosing_block(&self, pos: usize) -> Option<Block> {
        let mut from = Origin::At(pos + 1);
        while let Some(open) = self.adjacent(from, Direction::Backward, |_, e| e.opens_block()) {
            if let Ok(close) = self.closing_match(open)
                && close >= pos
            {
                return Some(Block { open, close });
            }
            from = Origin::At(open);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(text: &str) -> Document {
        Document::parse_book("BOOK", text).unwrap()
    }

    #[test]
    fn test_adjacent_forward_and_backward() {
        let d = doc("a<b>c");
        let is_literal = |_: usize, e: &Entity| e.literal().is_some();
        assert_eq!(d.adjacent(Origin::BeforeStart, Direction::Forward, is_literal), Some(0));
        assert_eq!(d.adjacent(Origin::At(0), Direction::Forward, is_literal), Some(2));
        assert_eq!(d.adjacent(Origin::At(2), Direction::Forward, is_literal), None);
        assert_eq!(d.adjacent(Origin::AfterEnd, Direction::Backward, is_literal), Some(2));
        assert_eq!(d.adjacent(Origin::At(2), Direction::Backward, is_literal), Some(0));
        assert_eq!(d.adjacent(Origin::At(0), Direction::Backward, is_literal), None);
        assert_eq!(d.adjacent(Origin::AfterEnd, Direction::Forward, is_literal), None);
        assert_eq!(d.adjacent(Origin::BeforeStart, Direction::Backward, is_literal), None);
    }

    #[test]
    fn test_find_text_across_tags() {
        let d = doc("<p>The E<i>N</i>D of it</p><p>THE END</p>");
        let first = d.find_text(Origin::BeforeStart, "END").unwrap();
        assert_eq!(d.get(first), Some(&Entity::Literal('E')));
        assert_eq!(first, 5);

        let second = d.find_text(Origin::At(first), "END").unwrap();
        assert!(second > first);
        assert_eq!(d.find_text(Origin::BeforeStart, "FINIS"), None);
        assert_eq!(d.find_text(Origin::BeforeStart, ""), None);
    }

    #[test]
    fn test_find_text_stops_at_char_ref() {
        let d = doc("<p>A&amp;B</p>");
        assert_eq!(d.find_text(Origin::BeforeStart, "AB"), None);
    }

    #[test]
    fn test_enclosing_block() {
        let d = doc("<div><p>one</p><h3>two <b>x</b></h3></div>");
        let x = d.find_text(Origin::BeforeStart, "x").unwrap();
        let block = d.enclosing_block(x).unwrap();
        assert_eq!(d.get(block.open).and_then(Entity::as_tag).unwrap().name(), "h3");

        let o = d.find_text(Origin::BeforeStart, "one").unwrap();
        let block = d.enclosing_block(o).unwrap();
        assert_eq!(block.open, 1);
        assert_eq!(d.enclosing_block(0), None);
    }
}
