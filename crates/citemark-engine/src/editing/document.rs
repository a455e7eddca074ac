use std::borrow::Cow;
use std::ops::Range;

use regex::Regex;
use xi_rope::{Delta, Rope, RopeInfo, delta::Builder};

use crate::editing::span::Span;

/// Kinds of document the engine can be asked to edit.
///
/// Markup commands (element pairs, citations, locators) only make sense in
/// markup-capable documents; the capability travels with the document so
/// callers can check it without knowing about file extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocKind {
    Markdown,
    Mdx,
    Plain,
}

impl DocKind {
    /// Map a file extension to a document kind. Unknown extensions are
    /// treated as plain text.
    pub fn from_extension(ext: &str) -> Self {
        match ext {
            "md" | "markdown" => DocKind::Markdown,
            "mdx" => DocKind::Mdx,
            _ => DocKind::Plain,
        }
    }

    /// Whether embedded markup constructs may be edited in this document.
    pub fn supports_markup(self) -> bool {
        matches!(self, DocKind::Markdown | DocKind::Mdx)
    }
}

/// A cursor-addressed text document.
///
/// The entire document lives in one `xi_rope::Rope` buffer (single source
/// of truth); every mutation compiles to exactly one delta and bumps the
/// version counter, so an operation either happened completely or not at
/// all. The selection is a byte range where `start == end` means a bare
/// cursor and `start < end` an active selection whose cursor is
/// `selection.end`.
///
/// Spans returned by queries address the buffer at the version they were
/// computed from; any mutation invalidates previously computed spans and
/// callers must re-query.
pub struct Document {
    /// xi-rope buffer containing the entire document as UTF-8 bytes.
    buffer: Rope,
    /// Current selection/cursor position as byte offsets in the buffer.
    selection: Range<usize>,
    /// Version counter incremented on each edit (doubles as the modified mark).
    version: u64,
    /// Document kind, carrying the markup capability.
    kind: DocKind,
}

impl Document {
    /// Create a new document from raw bytes, ensuring valid UTF-8.
    pub fn from_bytes(bytes: &[u8], kind: DocKind) -> anyhow::Result<Self> {
        let text = std::str::from_utf8(bytes)?;
        let buffer = Rope::from(text);
        let len = buffer.len();

        Ok(Self {
            buffer,
            selection: len..len, // Start with cursor at end
            version: 0,
            kind,
        })
    }

    pub fn kind(&self) -> DocKind {
        self.kind
    }

    /// Get the current version. Starts at 0; any value above the one a
    /// caller recorded means the document has been modified since.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Get the current text content.
    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    /// Get the buffer length in bytes.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.len() == 0
    }

    /// Slice the buffer to a cow string, clamping the span to the buffer
    /// bounds rather than panicking on stale offsets.
    pub fn slice(&self, span: Span) -> Cow<'_, str> {
        let len = self.buffer.len();
        let start = span.start.min(len);
        let end = span.end.min(len).max(start);
        self.buffer.slice_to_cow(start..end)
    }

    // ---- cursor and selection ----

    /// The cursor position. Coincides with the selection end while a
    /// selection is active.
    pub fn cursor(&self) -> usize {
        self.selection.end
    }

    /// Move the cursor, collapsing any active selection.
    pub fn set_cursor(&mut self, pos: usize) {
        let pos = pos.min(self.buffer.len());
        self.selection = pos..pos;
    }

    /// The active selection, if any. A collapsed range is a bare cursor,
    /// not a selection.
    pub fn selection(&self) -> Option<Span> {
        (self.selection.start != self.selection.end)
            .then(|| Span::new(self.selection.start, self.selection.end))
    }

    /// Activate a selection, clamped to the buffer bounds. The cursor moves
    /// to the selection end.
    pub fn select(&mut self, span: Span) {
        let len = self.buffer.len();
        let start = span.start.min(len);
        let end = span.end.min(len).max(start);
        self.selection = start..end;
    }

    pub fn clear_selection(&mut self) {
        let pos = self.selection.end;
        self.selection = pos..pos;
    }

    // ---- mutation (one delta per operation) ----

    /// Insert `text` at the given byte offset.
    pub fn insert(&mut self, at: usize, text: &str) {
        let at = at.min(self.buffer.len());
        let mut builder = Builder::new(self.buffer.len());
        builder.replace(at..at, Rope::from(text));
        self.apply(builder.build());
    }

    /// Delete the exact span and insert `text` at its start.
    pub fn replace_span(&mut self, span: Span, text: &str) {
        let mut builder = Builder::new(self.buffer.len());
        builder.replace(span.to_range(), Rope::from(text));
        self.apply(builder.build());
    }

    /// Delete the exact span.
    pub fn delete_span(&mut self, span: Span) {
        let mut builder = Builder::new(self.buffer.len());
        builder.delete(span.to_range());
        self.apply(builder.build());
    }

    /// Insert `open` before the span and `close` after it in a single
    /// delta, so the wrap cannot be observed half-done.
    pub fn wrap_span(&mut self, span: Span, open: &str, close: &str) {
        let mut builder = Builder::new(self.buffer.len());
        if span.is_empty() {
            let pair = format!("{open}{close}");
            builder.replace(span.start..span.start, Rope::from(pair.as_str()));
        } else {
            builder.replace(span.start..span.start, Rope::from(open));
            builder.replace(span.end..span.end, Rope::from(close));
        }
        self.apply(builder.build());
    }

    fn apply(&mut self, delta: Delta<RopeInfo>) {
        self.buffer = delta.apply(&self.buffer);
        self.version += 1;

        // Keep the selection inside the new buffer bounds; span-precise
        // cursor placement is the calling operation's job.
        let len = self.buffer.len();
        let start = self.selection.start.min(len);
        let end = self.selection.end.min(len).max(start);
        self.selection = start..end;
    }

    // ---- search primitives ----

    /// First match of `re` at or after `from`. Non-mutating; the cursor
    /// and selection are untouched.
    pub fn search_forward(&self, re: &Regex, from: usize) -> Option<Span> {
        let text = self.text();
        let from = from.min(text.len());
        re.find_at(&text, from).map(|m| Span::new(m.start(), m.end()))
    }

    /// Last match of `re` ending at or before `upto`. Non-mutating.
    pub fn search_backward(&self, re: &Regex, upto: usize) -> Option<Span> {
        let text = self.text();
        let upto = upto.min(text.len());
        re.find_iter(&text)
            .filter(|m| m.end() <= upto)
            .last()
            .map(|m| Span::new(m.start(), m.end()))
    }
}

/// Snap a byte position back to the nearest char boundary at or before it,
/// clamping to the text length. Cursor positions arrive from callers and
/// may sit mid-way through a multi-byte character.
pub(crate) fn snap_to_char_boundary(text: &str, pos: usize) -> usize {
    let mut pos = pos.min(text.len());
    while !text.is_char_boundary(pos) {
        pos -= 1;
    }
    pos
}
