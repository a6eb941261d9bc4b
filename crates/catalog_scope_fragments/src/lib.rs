//! Explanation fragment store.
//!
//! Walks the store, reads a title out of each fragment and maps file names to
//! problem labels. Also hosts the document-to-fragment rewriter used to
//! prepare files before they enter the store.

pub mod error;
pub mod harvest;
pub mod rewrite;
pub mod title;
pub mod walker;

pub use error::HarvestError;
pub use harvest::{classify_file_name, harvest, Harvest};
pub use rewrite::{is_full_document, rewrite_document, RewriteOutcome};
pub use title::extract_title;
pub use walker::{collect_fragment_paths, normalize_path};
