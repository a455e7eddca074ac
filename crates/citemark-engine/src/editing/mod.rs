/*!
 * # Editing Core Module
 *
 * The editing system follows a small set of principles:
 *
 * ### 1. Single Source of Truth: xi-rope Buffer
 * - The entire document is stored in a single **`xi_rope::Rope`** buffer
 * - Provides efficient insert/delete operations and **Delta** representation of edits
 * - **Lossless round-trip**: saving writes rope bytes verbatim with no formatting drift
 *
 * ### 2. One Delta Per Operation
 * - Every public mutating operation compiles to exactly one delta and applies it
 * - There is no partially-applied state: an operation either happened or it didn't
 * - The version counter is bumped once per applied delta and doubles as the
 *   "document modified" mark
 *
 * ### 3. Explicit Spans, No Implicit Match State
 * - Queries return `Span` values addressing the buffer by byte offset
 * - Search primitives take an explicit start position and return a span; there
 *   is no "last match" state carried between calls
 * - A span is valid only against the document version it was computed from;
 *   callers must re-query after any mutation
 *
 * ## Module Structure
 *
 * - **`document`**: Core `Document` type with xi-rope buffer, selection and search
 * - **`span`**: Byte-range addressing used by every query
 * - **`pair`**: Open/close element pair insertion around the selection or cursor
 */

pub mod document;
pub mod pair;
pub mod span;

// Public API re-exports
pub use document::{DocKind, Document};
pub use pair::insert_pair;
pub use span::Span;
