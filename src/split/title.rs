//! Chapter title detection.

use crate::document::{Block, Document};
use crate::markup::{Entity, is_word_char};

fn is_title_letter(c: char) -> bool {
    c.is_uppercase() && is_word_char(c)
}

fn is_title_char(c: char) -> bool {
    is_title_letter(c) || c.is_whitespace() || c == '\''
}

/// Whether `block` is a chapter title: upper-case letters, whitespace and
/// apostrophes only, with at least one letter and no character references.
pub fn is_title_block(doc: &Document, block: Block) -> bool {
    let mut letters = 0;
    for entity in &doc.entities()[block.inner()] {
        match entity {
            Entity::Literal(c) if is_title_char(*c) => {
                if is_title_letter(*c) {
                    letters += 1;
                }
            }
            Entity::Literal(_) | Entity::CharRef(_) => return false,
            Entity::Tag(_) => {}
        }
    }
    letters > 0
}

/// Title text of a block with runs of whitespace collapsed.
pub fn block_title(doc: &Document, block: Block) -> String {
    doc.block_text(block)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_block(text: &str) -> (Document, Block) {
        let doc = Document::parse_book("BOOK", text).unwrap();
        let block = doc.paragraphs().next().unwrap().unwrap();
        (doc, block)
    }

    #[test]
    fn test_title_blocks() {
        for text in [
            "<p>LOOMINGS</p>",
            "<h2>THE CARPET BAG</h2>",
            "<p>AHAB'S <i>LEG</i></p>",
            "<p>\n  THE\n  CHAPEL </p>",
            "<p>ÉTUDE</p>",
        ] {
            let (doc, block) = first_block(text);
            assert!(is_title_block(&doc, block), "{text}");
        }
    }

    #[test]
    fn test_non_title_blocks() {
        for text in [
            "<p>Call me Ishmael.</p>",
            "<p>CHAPTER 1</p>",
            "<h2>THE CARPET-BAG</h2>",
            "<p>THE END&mdash;</p>",
            "<p>   </p>",
            "<p>''</p>",
            "<p></p>",
        ] {
            let (doc, block) = first_block(text);
            assert!(!is_title_block(&doc, block), "{text}");
        }
    }

    #[test]
    fn test_block_title_collapses_whitespace() {
        let (doc, block) = first_block("<p>\n  THE\n  <b>CHAPEL</b> </p>");
        assert!(is_title_block(&doc, block));
        assert_eq!(block_title(&doc, block), "THE CHAPEL");
    }
}
