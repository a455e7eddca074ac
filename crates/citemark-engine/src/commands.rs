//! User-facing editing commands.
//!
//! The components below this layer report absence as `Option` and never
//! fail; commands are where precondition violations become named,
//! user-facing errors. No command mutates the document on the error path,
//! and every successful command is a single-effect action.

use thiserror::Error;

use crate::editing::document::{DocKind, Document};
use crate::editing::pair;
use crate::markup::citation::{self, KeyOutcome};
use crate::markup::locator;
use crate::sorting;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("not inside a citation element")]
    NotInCitation,
    #[error("{0:?} documents do not support markup editing")]
    UnsupportedMarkup(DocKind),
}

fn ensure_markup(doc: &Document) -> Result<(), EditError> {
    if doc.kind().supports_markup() {
        Ok(())
    } else {
        Err(EditError::UnsupportedMarkup(doc.kind()))
    }
}

/// Insert an open/close element pair around the selection or at the
/// cursor. Markup-capable documents only.
pub fn insert_element(
    doc: &mut Document,
    open: &str,
    close: &str,
    self_closing: bool,
) -> Result<(), EditError> {
    ensure_markup(doc)?;
    pair::insert_pair(doc, open, close, self_closing);
    Ok(())
}

/// Insert a citation for `key`, or replace the key of the citation under
/// the cursor. See [`citation::insert_citation`] for the outcome contract.
pub fn insert_citation(
    doc: &mut Document,
    key: &str,
    short: bool,
    body_form: bool,
) -> Result<KeyOutcome, EditError> {
    ensure_markup(doc)?;
    Ok(citation::insert_citation(doc, key, short, body_form))
}

/// Insert or replace a locator on the citation under the cursor.
///
/// The user picks a locator by full name; resolution to the abbreviation
/// is a direct table lookup, falling back to the empty string for names
/// outside the closed selection list. With the cursor on an existing
/// abbreviation the token is replaced in place; otherwise
/// `", " + abbreviation + " "` goes after the locator list if present,
/// else after the key.
pub fn insert_locator(doc: &mut Document, full_name: &str) -> Result<(), EditError> {
    let m = citation::citation_at(doc, doc.cursor()).ok_or(EditError::NotInCitation)?;
    let abbr = locator::abbreviation_for(full_name).unwrap_or("");

    if let Some((_, span)) = locator::abbreviation_at(doc, doc.cursor()) {
        doc.replace_span(span, abbr);
        doc.set_cursor(span.start + abbr.len());
        return Ok(());
    }

    let at = m
        .locators
        .as_ref()
        .map(|(_, span)| span.end)
        .unwrap_or(m.key_span.end);
    let inserted = format!(", {abbr} ");
    doc.insert(at, &inserted);
    doc.set_cursor(at + inserted.len());
    Ok(())
}

/// Sort the paragraph following the related-entries heading. A missing
/// heading is a no-op; returns true when the paragraph changed.
pub fn sort_related_entries(doc: &mut Document, separator: &str) -> bool {
    sorting::sort_related_entries(doc, &sorting::RELATED_HEADING, separator)
}
