//! End-to-end editing flows across the public API.

use citemark_engine::markup::{citation, locator};
use citemark_engine::{DocKind, Document, Field, KeyOutcome, commands, sorting};
use pretty_assertions::assert_eq;

fn mdx(text: &str) -> Document {
    Document::from_bytes(text.as_bytes(), DocKind::Mdx).unwrap()
}

#[test]
fn retarget_citation_then_sort_related_entries() {
    let source = "\
---
title: Ethics
---

As argued in <Cite bibKey={\"kant1781, p. 12\"} short />, reason precedes
experience.

## Related entries

metaphysics \u{2022} \u{C1}lgebra \u{2022} aesthetics

<!-- Local Variables: -->
<!-- mode: mdx -->
<!-- End: -->
";
    let mut doc = mdx(source);

    // Front matter and local variables are both present
    let (front, _) = citemark_engine::markup::metadata_block(&doc).unwrap();
    assert_eq!(front, "---\ntitle: Ethics\n---");
    assert!(citemark_engine::markup::local_variables_block(&doc).is_some());

    // Put the cursor on the citation and retarget its key
    let cite_pos = doc.text().find("kant1781").unwrap();
    doc.set_cursor(cite_pos);
    let outcome = commands::insert_citation(&mut doc, "hume1739", false, false).unwrap();
    assert_eq!(outcome, KeyOutcome::Replaced { changed: true });
    assert!(doc.text().contains(r#"<Cite bibKey={"hume1739, p. 12"} short />"#));

    // Spans computed before the mutation are stale; re-query
    let m = citation::citation_at(&doc, doc.cursor()).unwrap();
    assert_eq!(m.key, "hume1739");
    assert_eq!(m.locators.as_ref().unwrap().0, "p. 12");

    // Sorting touches only the related-entries paragraph
    assert!(commands::sort_related_entries(&mut doc, " \u{2022} "));
    let text = doc.text();
    assert!(text.contains("aesthetics \u{2022} A\u{301}lgebra \u{2022} metaphysics"));
    assert!(text.contains("reason precedes"));
}

#[test]
fn key_replacement_preserves_locators_and_closing_form() {
    for source in [
        r#"<Cite bibKey={"kant1781, p. 12"} short />"#,
        r#"<Cite bibKey={"kant1781, p. 12"} />"#,
        r#"<Cite bibKey={"kant1781, p. 12"}>the critique</Cite>"#,
    ] {
        let mut doc = mdx(source);
        let m = citation::citation_at(&doc, 5).unwrap();
        let (before_locators, before_short, before_form) =
            (m.locators.clone(), m.short, m.self_closing);

        citation::replace_field(&mut doc, m.key_span, "hume1739");

        let m = citation::citation_at(&doc, 5).unwrap();
        assert_eq!(m.key, "hume1739");
        assert_eq!(
            m.locators.map(|(text, _)| text),
            before_locators.map(|(text, _)| text)
        );
        assert_eq!(m.short, before_short);
        assert_eq!(m.self_closing, before_form);
    }
}

#[test]
fn locator_round_trip_for_every_catalogue_entry() {
    for (full_name, abbr) in locator::LOCATORS {
        let mut doc = mdx(r#"<Cite bibKey={"kant1781"} />"#);
        doc.set_cursor(5);
        commands::insert_locator(&mut doc, full_name).unwrap();
        assert_eq!(
            doc.text(),
            format!(r#"<Cite bibKey={{"kant1781, {abbr} "}} />"#),
            "inserting {full_name}"
        );

        // Re-invoke with the cursor on the fresh abbreviation and pick a
        // different name: only that token is replaced
        let replacement = if *full_name == "page" { "chapter" } else { "page" };
        let replacement_abbr = locator::abbreviation_for(replacement).unwrap();
        let token_pos = doc.text().find(abbr).unwrap();
        doc.set_cursor(token_pos);
        commands::insert_locator(&mut doc, replacement).unwrap();
        assert_eq!(
            doc.text(),
            format!(r#"<Cite bibKey={{"kant1781, {replacement_abbr} "}} />"#),
            "replacing {abbr}"
        );
    }
}

#[test]
fn field_lookup_through_the_closed_enum() {
    let doc = mdx(r#"<Cite bibKey={"kant1781, p. 12"} />"#);
    let m = citation::citation_at(&doc, 3).unwrap();
    let (key, key_span) = m.field(Field::Key).unwrap();
    assert_eq!(key, "kant1781");
    assert_eq!(doc.slice(key_span), "kant1781");
    let (locators, _) = m.field(Field::Locators).unwrap();
    assert_eq!(locators, "p. 12");
}

#[test]
fn wrap_then_requery_spans() {
    let mut doc = mdx("emphasis matters");
    doc.select(citemark_engine::Span::new(0, 8));
    commands::insert_element(&mut doc, "<Em>", "</Em>", false).unwrap();
    assert_eq!(doc.text(), "<Em>emphasis</Em> matters");
    assert_eq!(doc.cursor(), 12);
}

#[test]
fn sorting_is_idempotent_across_invocations() {
    let mut doc = mdx("## Related entries\n\nb \u{2022} \u{C1} \u{2022} a\n");
    assert!(commands::sort_related_entries(&mut doc, " \u{2022} "));
    let once = doc.text();
    assert!(once.contains("a \u{2022} A\u{301} \u{2022} b"));

    // Second run finds nothing to change
    assert!(!commands::sort_related_entries(&mut doc, " \u{2022} "));
    assert_eq!(doc.text(), once);

    let span = sorting::paragraph_at(&doc, once.find("a \u{2022}").unwrap()).unwrap();
    assert_eq!(doc.slice(span), "a \u{2022} A\u{301} \u{2022} b");
}
