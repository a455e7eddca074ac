use once_cell::sync::Lazy;
use regex::Regex;

use crate::editing::document::Document;
use crate::editing::span::Span;

/// Front-matter fence line, used as both bounds of the metadata block.
static METADATA_DELIMITER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^---[ \t]*$").unwrap());

/// Local-variables block markers.
static LOCAL_VARS_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^<!-- Local Variables: -->$").unwrap());
static LOCAL_VARS_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^<!-- End: -->$").unwrap());

/// Find a region bounded by the first match of `start_re` and the nearest
/// following match of `end_re` (or of `start_re` again when no distinct
/// end pattern is given). Both bounding matches are included in the span.
///
/// The scan always starts from the top of the document, regardless of the
/// cursor. Missing either bound means the region does not exist; that is
/// the normal negative result, not an error. Never mutates the document or
/// moves the caller-visible cursor.
pub fn find_region(doc: &Document, start_re: &Regex, end_re: Option<&Regex>) -> Option<Span> {
    let first = doc.search_forward(start_re, 0)?;
    let second = doc.search_forward(end_re.unwrap_or(start_re), first.end)?;
    Some(Span::new(first.start, second.end))
}

/// Text and span of the front-matter metadata block: a single fixed
/// delimiter line appearing twice, both lines included.
pub fn metadata_block(doc: &Document) -> Option<(String, Span)> {
    let span = find_region(doc, &METADATA_DELIMITER, None)?;
    Some((doc.slice(span).into_owned(), span))
}

/// Text and span of the local-variables block, bounded by two distinct
/// fixed marker lines.
pub fn local_variables_block(doc: &Document) -> Option<(String, Span)> {
    let span = find_region(doc, &LOCAL_VARS_START, Some(&LOCAL_VARS_END))?;
    Some((doc.slice(span).into_owned(), span))
}
