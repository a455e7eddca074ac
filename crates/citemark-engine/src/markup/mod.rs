/*!
 * Embedded markup constructs.
 *
 * Recognizes and rewrites the small fixed grammar embedded in otherwise
 * free-form Markdown/MDX text: citation elements with keys and locators,
 * and delimited metadata/local-variable regions. There is no AST; every
 * construct exists only as matched text, addressed by spans against the
 * current document version.
 */

pub mod citation;
pub mod locator;
pub mod region;

pub use citation::{CitationMatch, Field, KeyOutcome, citation_at};
pub use region::{find_region, local_variables_block, metadata_block};
