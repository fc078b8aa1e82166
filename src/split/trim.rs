//! Front and back matter removal.
//!
//! Both bounds are found by literal-text search, so a marker still matches
//! when inline markup splits it (`THE E<i>N</i>D`). The cut is made at the
//! opening tag of the block containing the match.

use crate::document::{Document, Origin};
use crate::error::{Error, Result};

fn block_start_of(doc: &Document, marker: &str) -> Result<usize> {
    let pos = doc
        .find_text(Origin::BeforeStart, marker)
        .ok_or_else(|| Error::MarkerNotFound {
            marker: marker.to_string(),
            document: doc.name().to_string(),
        })?;
    Ok(doc.enclosing_block(pos).map_or(pos, |block| block.open))
}

/// Drop everything before the block containing `marker`.
///
/// Returns the number of entities removed.
pub fn trim_front_matter(doc: &mut Document, marker: &str) -> Result<usize> {
    let start = block_start_of(doc, marker)?;
    if start > 0 {
        doc.remove_range(0..start);
    }
    log::debug!("{}: trimmed {start} entities of front matter", doc.name());
    Ok(start)
}

/// Drop the block containing `sentinel` and everything after it.
///
/// Returns the number of entities removed.
pub fn trim_back_matter(doc: &mut Document, sentinel: &str) -> Result<usize> {
    let start = block_start_of(doc, sentinel)?;
    let removed = doc.len() - start;
    doc.remove_range(start..doc.len());
    log::debug!("{}: trimmed {removed} entities of back matter", doc.name());
    Ok(removed)
}
