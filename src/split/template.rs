//! Header and footer markup wrapped around every chapter.
//!
//! The navigation bar carries placeholder hrefs for the previous and next
//! chapters; [`resolve_navigation`](super::resolve_navigation) fills them in
//! once every chapter of the book is known. Navigation link texts are
//! character references so they never count as words.

use crate::document::ChapterId;
use crate::link::escape_attribute;

/// Placeholder href of the previous-chapter link.
pub const PREVIOUS_PLACEHOLDER: &str = "{{previous}}";
/// Placeholder href of the next-chapter link.
pub const NEXT_PLACEHOLDER: &str = "{{next}}";
/// Stem of the book's table of contents file.
pub const INDEX_STEM: &str = "index";

fn nav_bar(extension: &str) -> String {
    format!(
        "<div class=\"nav\"><a href=\"{PREVIOUS_PLACEHOLDER}\">&larr;</a> \
         <a href=\"{INDEX_STEM}.{extension}\">&uarr;</a> \
         <a href=\"{NEXT_PLACEHOLDER}\">&rarr;</a></div>\n"
    )
}

/// Markup placed before a chapter body. The title heading supplies the
/// chapter's negative word ordinals.
pub fn chapter_header(id: &ChapterId, extension: &str) -> String {
    format!(
        "<html>\n<head>\n<meta charset=\"utf-8\"/>\n\
         <link rel=\"stylesheet\" type=\"text/css\" href=\"book.css\"/>\n\
         </head>\n<body>\n{}<h2 class=\"chapter\">{}</h2>\n",
        nav_bar(extension),
        escape_attribute(id.title())
    )
}

/// Markup placed after a chapter body.
pub fn chapter_footer(extension: &str) -> String {
    format!("\n{}</body>\n</html>\n", nav_bar(extension))
}
