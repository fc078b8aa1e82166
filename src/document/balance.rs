//! Tag balance matching.

use super::{Direction, Document, Origin};
use crate::error::{Error, Result};
use crate::markup::{Entity, TagKind};

impl Document {
    /// Position of the closing tag that balances the opening tag at `open`.
    ///
    /// Only tags with the same name are considered; each same-name opening
    /// tag increases the depth and each closing tag decreases it. Fails with
    /// [`Error::Structural`] if `open` is not an opening tag or the depth never
    /// returns to zero.
    pub fn closing_match(&self, open: usize) -> Result<usize> {
        let tag = self
            .entities
            .get(open)
            .and_then(Entity::as_tag)
            .filter(|tag| tag.is_opening())
            .ok_or_else(|| Error::Structural {
                position: open,
                reason: "balance match requested for a non-opening entity".to_string(),
            })?;
        let name = tag.name();

        let mut depth = 1usize;
        let mut pos = open;
        while let Some(next) = self.adjacent(Origin::At(pos), Direction::Forward, |_, e| {
            e.as_tag().is_some_and(|t| t.name() == name)
        }) {
            match self.entities[next].as_tag().map(|t| t.kind()) {
                Some(TagKind::Opening) => depth += 1,
                Some(TagKind::Closing) => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(next);
                    }
                }
                _ => {}
            }
            pos = next;
        }

        Err(Error::Structural {
            position: open,
            reason: format!("<{name}> is never closed"),
        })
    }
}
