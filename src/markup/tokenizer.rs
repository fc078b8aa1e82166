//! Markup tokenizer.
//!
//! A single left-to-right scan splits raw text into tags, character
//! references and one literal per remaining character. Tag and reference
//! delimiters never nest, so the only state is "awaiting one terminator".

use memchr::{memchr, memchr2};

use super::entity::{Entity, Tag};
use crate::error::{Error, Result};

/// Tokenize raw markup into an entity sequence.
///
/// An unterminated `<` or `&` is a fatal [`Error::Parse`] carrying the byte
/// offset of the opening delimiter.
///
/// # Examples
///
/// ```
/// use phraselink::markup::{tokenize, Entity};
///
/// let entities = tokenize("<p>Hi &amp; bye</p>").unwrap();
/// assert_eq!(entities.len(), 10);
/// assert_eq!(entities[4], Entity::CharRef("amp".to_string()));
/// ```
pub fn tokenize(text: &str) -> Result<Vec<Entity>> {
    let bytes = text.as_bytes();
    let mut entities = Vec::with_capacity(text.len());
    let mut pos = 0;

    while pos < bytes.len() {
        let Some(rel) = memchr2(b'<', b'&', &bytes[pos..]) else {
            entities.extend(text[pos..].chars().map(Entity::Literal));
            break;
        };
        let start = pos + rel;
        entities.extend(text[pos..start].chars().map(Entity::Literal));

        let delimiter = bytes[start];
        let terminator = if delimiter == b'<' { b'>' } else { b';' };
        let end = memchr(terminator, &bytes[start + 1..])
            .map(|len| start + 1 + len)
            .ok_or(Error::Parse {
                offset: start,
                delimiter: delimiter as char,
            })?;

        let inner = &text[start + 1..end];
        if delimiter == b'<' {
            entities.push(Entity::Tag(Tag::new(inner)));
        } else {
            entities.push(Entity::CharRef(inner.to_string()));
        }
        pos = end + 1;
    }

    Ok(entities)
}

/// Render an entity sequence back to markup.
pub fn render(entities: &[Entity]) -> String {
    let mut out = String::with_capacity(entities.len() * 2);
    for entity in entities {
        entity.render_into(&mut out);
    }
    out
}
