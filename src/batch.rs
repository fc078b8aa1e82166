//! Directory-level drivers for splitting and linking.
//!
//! Files are independent, so both drivers fan out over a rayon pool. A file
//! that fails is logged and recorded in the [`BatchReport`]; nothing is
//! written for it and the other files carry on.

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::document::{ChapterId, Document};
use crate::error::Result;
use crate::link::{Catalog, LinkDirective, LinkOptions, link_chapter, parse_directives};
use crate::split::{ProfileSet, split_book};
use crate::util::read_text;

/// Extension of directive files, next to the chapter they belong to.
pub const DIRECTIVE_EXTENSION: &str = "links";

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Files processed successfully.
    pub processed: usize,
    /// Files that failed, with the error message.
    pub failed: Vec<(PathBuf, String)>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    fn record(&mut self, path: PathBuf, outcome: Result<()>) {
        match outcome {
            Ok(()) => self.processed += 1,
            Err(e) => {
                log::error!("{}: {e}", path.display());
                self.failed.push((path, e.to_string()));
            }
        }
    }
}

/// Files under `dir` with the given extension, sorted by path.
pub fn discover(dir: &Path, extension: &str) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().is_some_and(|x| x == extension))
        .map(|e| e.path().to_path_buf())
        .collect();
    paths.sort();
    paths
}

fn book_id(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string()
}

fn split_one(path: &Path, profiles: &ProfileSet, out_dir: &Path) -> Result<()> {
    let book = book_id(path);
    let profile = profiles.get_or_default(&book);
    let document = Document::parse_book(book, &read_text(path)?)?;
    let chapters = split_book(document, &profile)?;
    for chapter in &chapters {
        let out = out_dir.join(chapter.file_name(&profile.extension));
        fs::write(out, chapter.document.render())?;
    }
    log::info!("{}: wrote {} chapters", path.display(), chapters.len());
    Ok(())
}

/// Split each whole-book file into chapter files under `out_dir`.
///
/// The book id is the file stem; its profile comes from `profiles`, or has
/// no trimming if the book is not listed.
pub fn split_files(
    inputs: &[PathBuf],
    profiles: &ProfileSet,
    out_dir: &Path,
) -> Result<BatchReport> {
    fs::create_dir_all(out_dir)?;
    let outcomes: Vec<(PathBuf, Result<()>)> = inputs
        .par_iter()
        .map(|path| (path.clone(), split_one(path, profiles, out_dir)))
        .collect();

    let mut report = BatchReport::default();
    for (path, outcome) in outcomes {
        report.record(path, outcome);
    }
    Ok(report)
}

/// A chapter file with its outgoing directives.
struct LoadedChapter {
    path: PathBuf,
    id: ChapterId,
    document: Document,
    directives: Vec<LinkDirective>,
}

fn load_chapter(path: &Path) -> Result<LoadedChapter> {
    let id = ChapterId::from_path(path)?;
    let document = Document::parse_chapter(&id, &read_text(path)?)?;
    let links = path.with_extension(DIRECTIVE_EXTENSION);
    let directives = if links.is_file() {
        parse_directives(&read_text(&links)?, &id)?
    } else {
        Vec::new()
    };
    Ok(LoadedChapter {
        path: path.to_path_buf(),
        id,
        document,
        directives,
    })
}

/// Ordinals of each chapter that some valid directive links to.
fn incoming_ordinals(
    chapters: &[LoadedChapter],
    catalog: &Catalog,
) -> HashMap<ChapterId, BTreeSet<i64>> {
    let mut incoming: HashMap<ChapterId, BTreeSet<i64>> = HashMap::new();
    for directive in chapters.iter().flat_map(|c| &c.directives) {
        let destination = directive.destination();
        if catalog.validate(destination).is_ok() {
            incoming
                .entry(destination.chapter.clone())
                .or_default()
                .insert(destination.ordinal);
        }
    }
    incoming
}

/// Link every chapter file in `dir` and write the results to `out_dir`.
///
/// All chapters are loaded first so that destinations can be validated
/// against the whole collection and marked in their target chapters.
pub fn link_directory(dir: &Path, out_dir: &Path, options: &LinkOptions) -> Result<BatchReport> {
    fs::create_dir_all(out_dir)?;
    let mut report = BatchReport::default();

    let loaded: Vec<(PathBuf, Result<LoadedChapter>)> = discover(dir, &options.extension)
        .into_par_iter()
        .map(|path| {
            let chapter = load_chapter(&path);
            (path, chapter)
        })
        .collect();
    let mut chapters = Vec::with_capacity(loaded.len());
    for (path, chapter) in loaded {
        match chapter {
            Ok(chapter) => chapters.push(chapter),
            Err(e) => report.record(path, Err(e)),
        }
    }

    let mut catalog = Catalog::new();
    for chapter in &chapters {
        catalog.insert_document(chapter.id.clone(), &chapter.document);
    }
    let incoming = incoming_ordinals(&chapters, &catalog);
    log::info!(
        "linking {} chapters, {} with incoming links",
        chapters.len(),
        incoming.len()
    );

    let empty = BTreeSet::new();
    let outcomes: Vec<(PathBuf, Result<()>)> = chapters
        .into_par_iter()
        .map(|mut chapter| {
            let marks = incoming.get(&chapter.id).unwrap_or(&empty);
            let outcome = link_chapter(
                &mut chapter.document,
                &chapter.directives,
                marks,
                &catalog,
                options,
            )
            .and_then(|_| {
                let out = out_dir.join(chapter.id.file_name(&options.extension));
                fs::write(out, chapter.document.render())?;
                Ok(())
            });
            (chapter.path, outcome)
        })
        .collect();

    for (path, outcome) in outcomes {
        report.record(path, outcome);
    }
    Ok(report)
}
