//! Linking a whole chapter.

use std::collections::BTreeSet;

use super::{AnchorInserter, Catalog, LinkDirective, LinkOptions, mark_destination};
use crate::document::Document;
use crate::error::Result;

/// What happened while linking one chapter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkReport {
    /// Destination markers inserted.
    pub markers: usize,
    /// Directives applied.
    pub applied: usize,
    /// Link fragments inserted across all applied directives.
    pub fragments: usize,
    /// Directives skipped because they no longer match the document.
    pub skipped: usize,
}

/// Mark incoming destinations and apply outgoing directives to `doc`.
///
/// `incoming` holds the ordinals of this chapter that other chapters link
/// to. Outgoing directives are applied in their canonical order. A directive
/// that no longer matches the document is logged and skipped; any other
/// error aborts the chapter.
pub fn link_chapter(
    doc: &mut Document,
    outgoing: &[LinkDirective],
    incoming: &BTreeSet<i64>,
    catalog: &Catalog,
    options: &LinkOptions,
) -> Result<LinkReport> {
    let mut report = LinkReport::default();

    for &ordinal in incoming {
        if mark_destination(doc, ordinal)? {
            report.markers += 1;
        }
    }

    let mut ordered = outgoing.to_vec();
    ordered.sort();

    let inserter = AnchorInserter::new(catalog, options);
    for directive in &ordered {
        match inserter.apply(doc, directive) {
            Ok(fragments) => {
                report.applied += 1;
                report.fragments += fragments;
            }
            Err(e) if e.is_directive_local() => {
                log::warn!("{}: skipping {:?}: {e}", doc.name(), directive.phrase());
                report.skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    log::debug!(
        "{}: {} markers, {} links ({} fragments), {} skipped",
        doc.name(),
        report.markers,
        report.applied,
        report.fragments,
        report.skipped
    );
    Ok(report)
}
