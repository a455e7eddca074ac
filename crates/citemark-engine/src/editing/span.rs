/// A byte range `[start, end)` into the document buffer.
///
/// Queries return spans rather than copied text; slicing the buffer with a
/// span reproduces the exact source. A span is only valid against the
/// document version it was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns the length in bytes. Uses saturating subtraction for safety.
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span is empty (start >= end).
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Position hit-test, inclusive of the end offset: a cursor sitting
    /// immediately after a construct still counts as on it.
    #[must_use]
    pub fn touches(self, pos: usize) -> bool {
        self.start <= pos && pos <= self.end
    }

    #[must_use]
    pub fn to_range(self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

impl From<std::ops::Range<usize>> for Span {
    fn from(range: std::ops::Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}
