/*!
 * Locale-aware sorting of separator-delimited paragraph elements.
 *
 * Normalization and comparison are two explicit, composable pure functions
 * rather than environment-provided primitives, so ordering is reproducible
 * everywhere the engine runs: elements are decomposed to NFD, then
 * compared accent- and case-insensitively with deterministic tie-breaks.
 * The decomposition form is fixed; the locale the ordering is documented
 * against lives in the configuration crate.
 */

use std::cmp::Ordering;

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::editing::document::{Document, snap_to_char_boundary};
use crate::editing::span::Span;

/// Heading line introducing the related-entries paragraph.
pub static RELATED_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?im)^#{1,6} related entries[ \t]*$").unwrap());

/// A blank line separating paragraphs: the separating line may carry
/// trailing whitespace and still counts as blank.
static PARAGRAPH_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n[ \t]*\n").unwrap());

/// Separator between entries in a related-entries paragraph.
pub const ENTRY_SEPARATOR: &str = " \u{2022} ";

/// Decompose to canonical NFD so diacritics sort by their base letter
/// regardless of how the input was composed.
pub fn normalize(s: &str) -> String {
    s.nfd().collect()
}

/// Accent- and case-insensitive comparison for mixed-language text.
///
/// Primary: NFD with combining marks stripped, lowercased. Ties broken by
/// the case-folded NFD form (unaccented before accented), then raw bytes,
/// so equal-folding elements keep a stable, reproducible order.
pub fn compare(a: &str, b: &str) -> Ordering {
    fold(a)
        .cmp(&fold(b))
        .then_with(|| case_fold(a).cmp(&case_fold(b)))
        .then_with(|| a.cmp(b))
}

fn fold(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn case_fold(s: &str) -> String {
    s.nfd().flat_map(char::to_lowercase).collect()
}

/// Split on `separator`, normalize and trim each element, sort by
/// collation, rejoin with the same separator.
pub fn sort_elements(text: &str, separator: &str) -> String {
    let mut elements: Vec<String> = text
        .split(separator)
        .map(|e| normalize(e).trim().to_string())
        .collect();
    elements.sort_by(|a, b| compare(a, b));
    elements.join(separator)
}

/// Span of the paragraph containing `pos`: the text between blank lines
/// (or document bounds), with surrounding whitespace excluded.
pub fn paragraph_at(doc: &Document, pos: usize) -> Option<Span> {
    let text = doc.text();
    let pos = snap_to_char_boundary(&text, pos);

    // Backward to the blank line (or document start) before `pos`, then
    // past any leading whitespace.
    let mut start = PARAGRAPH_BREAK
        .find_iter(&text[..pos])
        .last()
        .map(|m| m.end())
        .unwrap_or(0);
    start += text[start..].len() - text[start..].trim_start().len();

    // Forward to the next blank line or document end, then back over
    // trailing whitespace.
    let mut end = PARAGRAPH_BREAK
        .find(&text[start..])
        .map(|m| start + m.start())
        .unwrap_or(text.len());
    end -= text[start..end].len() - text[start..end].trim_end().len();

    (start < end).then(|| Span::new(start, end))
}

/// Sort the separator-delimited elements of the span, replacing its text
/// in one delta. Returns true when the text changed.
fn sort_span(doc: &mut Document, span: Span, separator: &str) -> bool {
    let current = doc.slice(span).into_owned();
    let sorted = sort_elements(&current, separator);
    if sorted == current {
        return false;
    }
    doc.replace_span(span, &sorted);
    true
}

/// Sort the separator-delimited elements of the paragraph containing
/// `pos`, replacing the paragraph text in one delta. Returns true when the
/// paragraph changed.
pub fn sort_paragraph_elements(doc: &mut Document, pos: usize, separator: &str) -> bool {
    let Some(span) = paragraph_at(doc, pos) else {
        return false;
    };
    sort_span(doc, span, separator)
}

/// Sort the paragraph following the first heading matched by
/// `heading_re`. A missing heading is a no-op, not an error; returns true
/// only when a paragraph was found and changed.
pub fn sort_related_entries(doc: &mut Document, heading_re: &Regex, separator: &str) -> bool {
    let Some(heading) = doc.search_forward(heading_re, 0) else {
        return false;
    };
    let text = doc.text();
    let Some(offset) = text[heading.end..].find(|c: char| !c.is_whitespace()) else {
        return false;
    };
    let entries_start = heading.end + offset;
    let Some(mut span) = paragraph_at(doc, entries_start) else {
        return false;
    };
    // The heading line bounds the paragraph even when no blank line
    // follows it, so the first entry never fuses with the heading.
    span.start = span.start.max(entries_start);
    sort_span(doc, span, separator)
}
