//! # phraselink
//!
//! Word-addressable markup documents and cross-reference link insertion for
//! plain HTML etexts.
//!
//! ## Features
//!
//! - Tokenize markup into tags, character references and single characters
//!   that render back byte for byte
//! - Address words by ordinal, with negative ordinals for chapter titles
//! - Wrap a word in a hyperlink without breaking tag balance, splitting the
//!   link when inline markup intrudes into the word
//! - Split a whole book into chapter files at its upper-case title paragraphs
//!
//! ## Quick Start
//!
//! ```
//! use phraselink::{Catalog, ChapterId, Document, LinkDirective, LinkOptions, Location};
//! use phraselink::link::AnchorInserter;
//!
//! let id = ChapterId::parse("MOBY_01_LOOMINGS").unwrap();
//! let mut doc = Document::parse_chapter(&id, "<h2>LOOMINGS</h2><p>Call me Ishmael.</p>").unwrap();
//!
//! let mut catalog = Catalog::new();
//! catalog.insert_document(id.clone(), &doc);
//!
//! let directive = LinkDirective::new(
//!     "Ishmael",
//!     Location::new(id.clone(), 2),
//!     Location::new(id.clone(), -1),
//! );
//! let options = LinkOptions::default();
//! AnchorInserter::new(&catalog, &options).apply(&mut doc, &directive).unwrap();
//! assert!(doc.render().contains(">Ishmael</a>."));
//! ```

pub mod document;
pub mod error;
pub mod link;
pub mod markup;
pub mod split;
pub(crate) mod util;

#[cfg(feature = "cli")]
pub mod batch;

pub use document::{ChapterId, Document};
pub use error::{Error, Result};
pub use link::{Catalog, LinkDirective, LinkOptions, Location};
pub use markup::Entity;
pub use split::{BookProfile, Chapter, ProfileSet};
pub use util::{decode_text, read_text};
