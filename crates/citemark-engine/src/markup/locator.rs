use crate::editing::document::{Document, snap_to_char_boundary};
use crate::editing::span::Span;

/// Closed catalogue of bibliographic locator names and abbreviations:
/// 16 unit kinds, singular and plural forms.
///
/// This is a published contract. Previously authored documents contain
/// these abbreviations verbatim, so the set must not drift. Users pick by
/// full name; text is matched by abbreviation. Every abbreviation is
/// unique so the reverse lookup is unambiguous.
pub const LOCATORS: &[(&str, &str)] = &[
    ("book", "bk."),
    ("books", "bks."),
    ("chapter", "chap."),
    ("chapters", "chaps."),
    ("column", "col."),
    ("columns", "cols."),
    ("figure", "fig."),
    ("figures", "figs."),
    ("folio", "fol."),
    ("folios", "fols."),
    ("line", "l."),
    ("lines", "ll."),
    ("note", "n."),
    ("notes", "nn."),
    ("number", "no."),
    ("numbers", "nos."),
    ("opus", "op."),
    ("opera", "opp."),
    ("page", "p."),
    ("pages", "pp."),
    ("paragraph", "para."),
    ("paragraphs", "paras."),
    ("part", "pt."),
    ("parts", "pts."),
    ("section", "sec."),
    ("sections", "secs."),
    ("sub verbo", "s.v."),
    ("sub verbis", "s.vv."),
    ("verse", "v."),
    ("verses", "vv."),
    ("volume", "vol."),
    ("volumes", "vols."),
];

/// Abbreviation for a user-facing full name.
pub fn abbreviation_for(full_name: &str) -> Option<&'static str> {
    LOCATORS
        .iter()
        .find(|(name, _)| *name == full_name)
        .map(|(_, abbr)| *abbr)
}

/// Full name for an abbreviation found in text.
pub fn full_name_for(abbr: &str) -> Option<&'static str> {
    LOCATORS
        .iter()
        .find(|(_, a)| *a == abbr)
        .map(|(name, _)| *name)
}

/// Characters that bound a locator token inside the quoted locator list.
/// Abbreviations are disjoint tokens separated by punctuation, so no
/// longest-match semantics are needed.
fn is_token_boundary(c: char) -> bool {
    c.is_whitespace() || matches!(c, ',' | '"' | '{' | '}' | '<' | '>' | '=')
}

/// The known abbreviation token at `pos`, if the position sits on one.
///
/// Expands from the position to the surrounding token boundaries and tests
/// the token against the catalogue.
pub fn abbreviation_at(doc: &Document, pos: usize) -> Option<(String, Span)> {
    let text = doc.text();
    let pos = snap_to_char_boundary(&text, pos);

    let start = text[..pos]
        .char_indices()
        .rev()
        .find(|(_, c)| is_token_boundary(*c))
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    let end = text[pos..]
        .char_indices()
        .find(|(_, c)| is_token_boundary(*c))
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len());

    let token = &text[start..end];
    full_name_for(token).map(|_| (token.to_string(), Span::new(start, end)))
}
