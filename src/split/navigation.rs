//! Previous/next link resolution across the chapters of a book.

use super::Chapter;
use super::template::{INDEX_STEM, NEXT_PLACEHOLDER, PREVIOUS_PLACEHOLDER};
use crate::link::file_href;
use crate::markup::{Entity, Tag};

/// Replace the navigation placeholders in every chapter with the file names
/// of its neighbours. The first and last chapters link back to the index.
///
/// Returns the number of hrefs rewritten.
pub fn resolve_navigation(chapters: &mut [Chapter], extension: &str) -> usize {
    let index = format!("{INDEX_STEM}.{extension}");
    let files: Vec<String> = chapters
        .iter()
        .map(|c| file_href(&c.id.file_name(extension)))
        .collect();

    let mut rewritten = 0;
    for (i, chapter) in chapters.iter_mut().enumerate() {
        let previous = i.checked_sub(1).map_or(index.as_str(), |p| files[p].as_str());
        let next = files.get(i + 1).map_or(index.as_str(), String::as_str);

        let doc = &mut chapter.document;
        let targets: Vec<(usize, String)> = doc
            .entities()
            .iter()
            .enumerate()
            .filter_map(|(pos, entity)| {
                let raw = entity.as_tag()?.raw();
                let target = if raw.contains(PREVIOUS_PLACEHOLDER) {
                    raw.replace(PREVIOUS_PLACEHOLDER, previous)
                } else if raw.contains(NEXT_PLACEHOLDER) {
                    raw.replace(NEXT_PLACEHOLDER, next)
                } else {
                    return None;
                };
                Some((pos, target))
            })
            .collect();

        for (pos, raw) in targets {
            doc.replace(pos, Entity::Tag(Tag::new(raw)));
            rewritten += 1;
        }
    }
    rewritten
}
