use crate::editing::document::Document;

/// Terminator spliced in when converting an opening tag to its
/// self-closing form.
const SELF_CLOSING_END: &str = " />";

/// Insert an open/close element pair.
///
/// - With an active selection, the selection is wrapped: `open` goes before
///   the selection start and `close` after its end in one delta, and the
///   cursor lands at the original selection end plus `open.len()`.
/// - With no selection and `self_closing`, the final character of `open`
///   (expected to be the closing angle bracket) is dropped and the
///   self-closing terminator appended; `close` is not inserted.
/// - With no selection otherwise, `open + close` is inserted and the cursor
///   left between the pair for immediate typing.
///
/// Whether the document kind allows markup editing is the calling command's
/// check, not this function's.
pub fn insert_pair(doc: &mut Document, open: &str, close: &str, self_closing: bool) {
    if let Some(sel) = doc.selection() {
        doc.wrap_span(sel, open, close);
        doc.set_cursor(sel.end + open.len());
        return;
    }

    let at = doc.cursor();
    if self_closing {
        let mut tag = String::from(open);
        tag.pop();
        tag.push_str(SELF_CLOSING_END);
        doc.insert(at, &tag);
        doc.set_cursor(at + tag.len());
    } else {
        let pair = format!("{open}{close}");
        doc.insert(at, &pair);
        doc.set_cursor(at + open.len());
    }
}
