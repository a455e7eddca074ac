use once_cell::sync::Lazy;
use regex::Regex;

use crate::editing::document::Document;
use crate::editing::pair::insert_pair;
use crate::editing::span::Span;

/// Citation wire format, matched bit-for-bit:
/// `<Cite bibKey={"KEY[, LOCATORS]"}` followed by an optional literal
/// `" short"` and ` />`, or by `>body</Cite>`. `KEY` is a run of
/// non-comma, non-quote characters; `LOCATORS` follows a literal `", "`
/// and runs to the closing quote.
static CITE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r#"<Cite bibKey=\{"([^,"]+)(?:, ([^"]*))?"\}( short)?"#,
        r#"(?: ?/>|>(?:[^<]*</Cite>)?)"#,
    ))
    .unwrap()
});

/// Sub-fields of a citation that can be read and rewritten. A closed set:
/// there is no way to ask for a field the grammar doesn't have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Key,
    Locators,
}

/// A citation construct matched against the current document state.
///
/// Exists only as matched text: the spans address the buffer at the
/// version the match was computed from and are invalidated by any
/// mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct CitationMatch {
    /// Span of the whole construct, `</Cite>` included for the body form.
    pub full: Span,
    /// The bibliography key.
    pub key: String,
    pub key_span: Span,
    /// Free-text locator list, e.g. `"p. 12, chap. 3"`, absent when the
    /// key stands alone.
    pub locators: Option<(String, Span)>,
    /// Whether the construct carries the `short` flag.
    pub short: bool,
    /// Self-closing (`/>`) vs open/body/close form.
    pub self_closing: bool,
}

impl CitationMatch {
    /// Text and span of a sub-field, if present on this match.
    pub fn field(&self, field: Field) -> Option<(&str, Span)> {
        match field {
            Field::Key => Some((self.key.as_str(), self.key_span)),
            Field::Locators => self.locators.as_ref().map(|(text, span)| (text.as_str(), *span)),
        }
    }
}

/// Match the citation construct containing `pos`, if any.
///
/// Iterates matches over the whole buffer and returns the one whose full
/// span touches the position; absence is the normal negative result.
/// Spans are threaded out explicitly rather than left in any implicit
/// last-match state.
pub fn citation_at(doc: &Document, pos: usize) -> Option<CitationMatch> {
    let text = doc.text();
    for caps in CITE_RE.captures_iter(&text) {
        let whole = caps.get(0).unwrap();
        if whole.start() > pos {
            break;
        }
        if !Span::new(whole.start(), whole.end()).touches(pos) {
            continue;
        }

        let key = caps.get(1).unwrap();
        let locators = caps
            .get(2)
            .map(|m| (m.as_str().to_string(), Span::new(m.start(), m.end())));

        return Some(CitationMatch {
            full: Span::new(whole.start(), whole.end()),
            key: key.as_str().to_string(),
            key_span: Span::new(key.start(), key.end()),
            locators,
            short: caps.get(3).is_some(),
            self_closing: whole.as_str().ends_with("/>"),
        });
    }
    None
}

/// Shorthand for reading a sub-field of the citation at `pos`.
pub fn field_at(doc: &Document, pos: usize, field: Field) -> Option<(String, Span)> {
    let m = citation_at(doc, pos)?;
    m.field(field).map(|(text, span)| (text.to_string(), span))
}

/// Delete the exact span and insert `new_text` at its start, marking the
/// document modified.
///
/// The span must come from a match against the current document state in
/// the same operation; it is not re-validated here.
pub fn replace_field(doc: &mut Document, span: Span, new_text: &str) {
    doc.replace_span(span, new_text);
}

/// Outcome of [`insert_citation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The cursor was on an existing citation; only its key field was
    /// touched. `changed` is false when the chosen key equals the one
    /// already there. Refreshing any separately stored description after a
    /// key change is the caller's responsibility.
    Replaced { changed: bool },
    /// A new construct was inserted at the cursor.
    Inserted,
}

/// Insert a citation for `key`, or retarget the one under the cursor.
///
/// On an existing citation the key field alone is replaced; locators and
/// the closing form are preserved. Otherwise a fresh construct is built
/// and inserted through the element pair inserter: self-closing by
/// default, open/body/close when `body_form` is set.
pub fn insert_citation(doc: &mut Document, key: &str, short: bool, body_form: bool) -> KeyOutcome {
    if let Some(m) = citation_at(doc, doc.cursor()) {
        let changed = m.key != key;
        if changed {
            replace_field(doc, m.key_span, key);
        }
        return KeyOutcome::Replaced { changed };
    }

    let flag = if short { " short" } else { "" };
    let open = format!("<Cite bibKey={{\"{key}\"}}{flag}>");
    insert_pair(doc, &open, "</Cite>", !body_form);
    KeyOutcome::Inserted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::document::DocKind;
    use pretty_assertions::assert_eq;

    fn doc(text: &str) -> Document {
        Document::from_bytes(text.as_bytes(), DocKind::Mdx).unwrap()
    }

    #[test]
    fn match_self_closing_with_locators_and_short() {
        let text = r#"See <Cite bibKey={"kant1781, p. 12"} short /> for more."#;
        let d = doc(text);
        let m = citation_at(&d, 10).unwrap();

        assert_eq!(d.slice(m.full), r#"<Cite bibKey={"kant1781, p. 12"} short />"#);
        assert_eq!(m.key, "kant1781");
        assert_eq!(d.slice(m.key_span), "kant1781");
        let (locators, locator_span) = m.locators.clone().unwrap();
        assert_eq!(locators, "p. 12");
        assert_eq!(d.slice(locator_span), "p. 12");
        assert!(m.short);
        assert!(m.self_closing);
    }

    #[test]
    fn match_self_closing_without_locators() {
        let d = doc(r#"<Cite bibKey={"hume1739"} />"#);
        let m = citation_at(&d, 3).unwrap();
        assert_eq!(m.key, "hume1739");
        assert_eq!(m.locators, None);
        assert!(!m.short);
        assert!(m.self_closing);
    }

    #[test]
    fn match_body_form() {
        let d = doc(r#"<Cite bibKey={"kant1781"}>the first critique</Cite>"#);
        let m = citation_at(&d, 30).unwrap();
        assert!(!m.self_closing);
        assert_eq!(m.full, Span::new(0, d.len()));
    }

    #[test]
    fn cursor_off_construct_is_absent() {
        let text = r#"before <Cite bibKey={"kant1781"} /> after"#;
        let d = doc(text);
        assert_eq!(citation_at(&d, 2), None);
        assert_eq!(citation_at(&d, text.len()), None);
        assert!(citation_at(&d, 7).is_some());
        // Inclusive end: cursor immediately after the construct still counts
        assert!(citation_at(&d, 35).is_some());
    }

    #[test]
    fn match_picks_construct_under_cursor_among_several() {
        let text = r#"<Cite bibKey={"a1"} /> and <Cite bibKey={"b2"} />"#;
        let d = doc(text);
        assert_eq!(citation_at(&d, 1).unwrap().key, "a1");
        assert_eq!(citation_at(&d, 30).unwrap().key, "b2");
    }

    #[test]
    fn field_access_is_a_closed_set() {
        let d = doc(r#"<Cite bibKey={"kant1781, p. 12"} />"#);
        let (key, _) = field_at(&d, 5, Field::Key).unwrap();
        assert_eq!(key, "kant1781");
        let (locators, _) = field_at(&d, 5, Field::Locators).unwrap();
        assert_eq!(locators, "p. 12");

        let d = doc(r#"<Cite bibKey={"kant1781"} />"#);
        assert_eq!(field_at(&d, 5, Field::Locators), None);
    }

    #[test]
    fn replace_key_preserves_locators_and_form() {
        let mut d = doc(r#"<Cite bibKey={"kant1781, p. 12"} short />"#);
        let m = citation_at(&d, 5).unwrap();
        replace_field(&mut d, m.key_span, "hume1739");

        assert_eq!(d.text(), r#"<Cite bibKey={"hume1739, p. 12"} short />"#);
        let m = citation_at(&d, 5).unwrap();
        assert_eq!(m.key, "hume1739");
        assert_eq!(m.locators.unwrap().0, "p. 12");
        assert!(m.short);
        assert!(m.self_closing);
    }

    #[test]
    fn replace_field_marks_modified() {
        let mut d = doc(r#"<Cite bibKey={"kant1781"} />"#);
        let m = citation_at(&d, 5).unwrap();
        let before = d.version();
        replace_field(&mut d, m.key_span, "hume1739");
        assert_eq!(d.version(), before + 1);
    }

    #[test]
    fn insert_fresh_self_closing_citation() {
        let mut d = doc("See .");
        d.set_cursor(4);
        let outcome = insert_citation(&mut d, "kant1781", false, false);
        assert_eq!(outcome, KeyOutcome::Inserted);
        assert_eq!(d.text(), r#"See <Cite bibKey={"kant1781"} />."#);
    }

    #[test]
    fn insert_fresh_short_citation() {
        let mut d = doc("");
        let outcome = insert_citation(&mut d, "kant1781", true, false);
        assert_eq!(outcome, KeyOutcome::Inserted);
        assert_eq!(d.text(), r#"<Cite bibKey={"kant1781"} short />"#);
    }

    #[test]
    fn insert_fresh_body_form_citation() {
        let mut d = doc("");
        insert_citation(&mut d, "kant1781", false, true);
        assert_eq!(d.text(), r#"<Cite bibKey={"kant1781"}></Cite>"#);
        // Cursor between the pair, ready for the body
        assert_eq!(d.cursor(), r#"<Cite bibKey={"kant1781"}>"#.len());
    }

    #[test]
    fn insert_on_existing_citation_replaces_key_only() {
        let mut d = doc(r#"<Cite bibKey={"kant1781, p. 12"} short />"#);
        d.set_cursor(5);
        let outcome = insert_citation(&mut d, "hume1739", false, false);
        assert_eq!(outcome, KeyOutcome::Replaced { changed: true });
        assert_eq!(d.text(), r#"<Cite bibKey={"hume1739, p. 12"} short />"#);
    }

    #[test]
    fn insert_same_key_reports_unchanged_and_mutates_nothing() {
        let original = r#"<Cite bibKey={"kant1781"} />"#;
        let mut d = doc(original);
        d.set_cursor(5);
        let before = d.version();
        let outcome = insert_citation(&mut d, "kant1781", false, false);
        assert_eq!(outcome, KeyOutcome::Replaced { changed: false });
        assert_eq!(d.text(), original);
        assert_eq!(d.version(), before);
    }
}
