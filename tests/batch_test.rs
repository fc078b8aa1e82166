//! Directory-level split and link runs.

#![cfg(feature = "cli")]

use std::fs;
use std::path::Path;

use phraselink::batch::{discover, link_directory, split_files};
use phraselink::{BookProfile, LinkOptions, ProfileSet};

const BOOK: &str = "<html><body>\n\
    <p>Front matter.</p>\n\
    <h2>LOOMINGS</h2>\n<p>Call me Ishmael.</p>\n\
    <h2>THE CARPET BAG</h2>\n<p>I stuffed a shirt.</p>\n\
    </body></html>";

fn write(dir: &Path, name: &str, text: &str) {
    fs::write(dir.join(name), text).unwrap();
}

#[test]
fn test_split_then_link() {
    let input = tempfile::tempdir().unwrap();
    let chapters = tempfile::tempdir().unwrap();
    let linked = tempfile::tempdir().unwrap();
    write(input.path(), "MOBY.html", BOOK);

    let mut profiles = ProfileSet::default();
    profiles.insert(BookProfile::new("MOBY").with_front_marker("LOOMINGS"));
    let report = split_files(&discover(input.path(), "html"), &profiles, chapters.path()).unwrap();
    assert!(report.is_success());
    assert_eq!(report.processed, 1);

    let files = discover(chapters.path(), "html");
    let names: Vec<_> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_str().unwrap())
        .collect();
    assert_eq!(names, ["MOBY_01_LOOMINGS.html", "MOBY_02_THE_CARPET_BAG.html"]);

    write(
        chapters.path(),
        "MOBY_02_THE_CARPET_BAG.links",
        "# phrase\tsource\tdestination\n\
         shirt\t3\tMOBY_01_LOOMINGS.html#2\n\
         \n\
         ghost\t0\tMOBY_01_LOOMINGS.html#40\n",
    );
    let report =
        link_directory(chapters.path(), linked.path(), &LinkOptions::default()).unwrap();
    assert!(report.is_success(), "{:?}", report.failed);
    assert_eq!(report.processed, 2);

    let first = fs::read_to_string(linked.path().join("MOBY_01_LOOMINGS.html")).unwrap();
    assert!(first.contains("<span id=\"w2\"></span>Ishmael"));
    assert!(!first.contains("id=\"w40\""));
    let second = fs::read_to_string(linked.path().join("MOBY_02_THE_CARPET_BAG.html")).unwrap();
    assert!(second.contains("href=\"MOBY_01_LOOMINGS.html#w2\" title=\"shirt\">shirt</a>"));
    assert!(!second.contains("title=\"ghost\""));
}

#[test]
fn test_link_failure_is_per_file() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "BOOK_01_ONE.html", "<h2>ONE</h2><p>alpha beta</p>");
    write(dir.path(), "BOOK_02_TWO.html", "<h2>TWO</h2><p>gamma</p>");
    write(dir.path(), "BOOK_02_TWO.links", "gamma\t9\tBOOK_01_ONE.html#0\n");

    let report = link_directory(dir.path(), dir.path(), &LinkOptions::default()).unwrap();
    assert_eq!(report.processed, 1);
    assert_eq!(report.failed.len(), 1);
    assert!(report.failed[0].0.ends_with("BOOK_02_TWO.html"));

    // The failed chapter is left as it was.
    let two = fs::read_to_string(dir.path().join("BOOK_02_TWO.html")).unwrap();
    assert_eq!(two, "<h2>TWO</h2><p>gamma</p>");
    let one = fs::read_to_string(dir.path().join("BOOK_01_ONE.html")).unwrap();
    assert!(one.contains("<span id=\"w0\"></span>alpha"));
}

#[test]
fn test_extreme_source_ordinal_fails_one_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    write(dir.path(), "BOOK_01_ONE.html", "<h2>ONE</h2><p>alpha beta</p>");
    write(dir.path(), "BOOK_02_TWO.html", "<h2>TWO</h2><p>gamma</p>");
    write(
        dir.path(),
        "BOOK_02_TWO.links",
        &format!("gamma\t{}\tBOOK_01_ONE.html#0\n", i64::MAX),
    );

    let report = link_directory(dir.path(), out.path(), &LinkOptions::default()).unwrap();
    assert_eq!(report.processed, 1);
    assert_eq!(report.failed.len(), 1);
    assert!(report.failed[0].0.ends_with("BOOK_02_TWO.html"));
    assert!(report.failed[0].1.contains("past the last word"));
    assert!(out.path().join("BOOK_01_ONE.html").is_file());
    assert!(!out.path().join("BOOK_02_TWO.html").exists());
}

#[test]
fn test_split_failure_is_per_file() {
    let input = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    write(input.path(), "GOOD.html", "<h2>ONE</h2><p>Text.</p>");
    write(input.path(), "BAD.html", "<h2>ONE</h2><p>Text.</p");

    let report = split_files(
        &discover(input.path(), "html"),
        &ProfileSet::default(),
        out.path(),
    )
    .unwrap();
    assert_eq!(report.processed, 1);
    assert_eq!(report.failed.len(), 1);
    assert!(out.path().join("GOOD_01_ONE.html").is_file());
    assert!(!out.path().join("BAD_01_ONE.html").exists());
}
