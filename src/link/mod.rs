//! Cross-reference links between phrase occurrences.
//!
//! This module contains:
//! - Link directives and their directive-file format
//! - The catalog of linkable chapters and their word ranges
//! - Anchor insertion around a single word, split around intruding markup
//! - Per-chapter link application with destination markers

mod anchor;
mod catalog;
mod directive;
mod plan;

pub use anchor::{
    AnchorInserter, LinkOptions, escape_attribute, file_href, insertion_points, mark_destination,
    marker_id,
};
pub use catalog::Catalog;
pub use directive::{LOCATION_DELIMITER, LinkDirective, Location, parse_directives};
pub use plan::{LinkReport, link_chapter};
