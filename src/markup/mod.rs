//! Markup lexing: entity model and tokenizer.

mod entity;
mod tokenizer;

pub use entity::{Entity, Tag, TagKind, is_word_char};
pub use tokenizer::{render, tokenize};
