//! Link directives and their line-oriented serialization.
//!
//! A directive file holds the outgoing links of one chapter, one per line:
//!
//! ```text
//! phrase text<TAB>source ordinal<TAB>DEST_FILE.html#destination ordinal
//! ```
//!
//! Blank lines and lines starting with `#` are ignored.

use std::cmp::Ordering;
use std::fmt;
use std::path::Path;

use crate::document::ChapterId;
use crate::error::{Error, Result};

/// Separator between file name and ordinal in a location string.
pub const LOCATION_DELIMITER: char = '#';

/// A word position in a chapter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Location {
    pub chapter: ChapterId,
    pub ordinal: i64,
}

impl Location {
    pub fn new(chapter: ChapterId, ordinal: i64) -> Self {
        Self { chapter, ordinal }
    }

    /// Parse `FILE_NAME.ext#ordinal`.
    pub fn parse(s: &str) -> Result<Self> {
        let (file, ordinal) = s
            .rsplit_once(LOCATION_DELIMITER)
            .ok_or_else(|| Error::InvalidDirective(format!("location without ordinal: {s:?}")))?;
        let ordinal = ordinal
            .trim()
            .parse::<i64>()
            .map_err(|_| Error::InvalidDirective(format!("bad ordinal in location {s:?}")))?;
        let chapter = ChapterId::from_path(Path::new(file.trim()))?;
        Ok(Self { chapter, ordinal })
    }

    /// Format as `FILE_NAME.ext#ordinal`.
    pub fn to_file_string(&self, extension: &str) -> String {
        format!(
            "{}{LOCATION_DELIMITER}{}",
            self.chapter.file_name(extension),
            self.ordinal
        )
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{LOCATION_DELIMITER}{}", self.chapter, self.ordinal)
    }
}

/// An instruction to link one phrase occurrence to another occurrence.
///
/// Directives order by destination, then phrase, then source; applying a
/// sorted list makes overlapping insertions deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LinkDirective {
    phrase: String,
    source: Location,
    destination: Location,
}

impl LinkDirective {
    pub fn new(phrase: impl Into<String>, source: Location, destination: Location) -> Self {
        Self {
            phrase: phrase.into(),
            source,
            destination,
        }
    }

    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    pub fn source(&self) -> &Location {
        &self.source
    }

    pub fn destination(&self) -> &Location {
        &self.destination
    }

    /// The word the link is attached to.
    pub fn first_word(&self) -> &str {
        self.phrase.split_whitespace().next().unwrap_or_default()
    }

    /// Serialize as one directive-file line (without newline).
    pub fn to_line(&self, extension: &str) -> String {
        format!(
            "{}\t{}\t{}",
            self.phrase,
            self.source.ordinal,
            self.destination.to_file_string(extension)
        )
    }
}

impl Ord for LinkDirective {
    fn cmp(&self, other: &Self) -> Ordering {
        self.destination
            .cmp(&other.destination)
            .then_with(|| self.phrase.cmp(&other.phrase))
            .then_with(|| self.source.cmp(&other.source))
    }
}

impl PartialOrd for LinkDirective {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Parse the directive file of `source`.
pub fn parse_directives(text: &str, source: &ChapterId) -> Result<Vec<LinkDirective>> {
    let mut directives = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        let [phrase, ordinal, destination] = fields.as_slice() else {
            return Err(Error::InvalidDirective(format!(
                "line {}: expected 3 tab-separated fields, found {}",
                line_no + 1,
                fields.len()
            )));
        };
        if phrase.trim().is_empty() {
            return Err(Error::InvalidDirective(format!("line {}: empty phrase", line_no + 1)));
        }
        let ordinal = ordinal.trim().parse::<i64>().map_err(|_| {
            Error::InvalidDirective(format!("line {}: bad source ordinal {ordinal:?}", line_no + 1))
        })?;
        let destination = Location::parse(destination)?;
        directives.push(LinkDirective::new(
            *phrase,
            Location::new(source.clone(), ordinal),
            destination,
        ));
    }
    Ok(directives)
}
