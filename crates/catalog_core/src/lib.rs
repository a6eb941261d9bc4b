//! Problem catalog model and the reconciliation engine that keeps it in step
//! with harvested explanation fragments and a tabular link snapshot.

pub mod band;
pub mod error;
pub mod heal;
pub mod ids;
pub mod label;
pub mod matcher;
pub mod merge;
pub mod model;
pub mod ordering;
pub mod reconcile;
pub mod vocabulary;

pub use band::{band, label_for_number, Band, BANDS};
pub use error::{CatalogError, LabelError};
pub use heal::heal_gaps;
pub use ids::{escape_token, id_suffix, synthesize_id, FolderId};
pub use label::{parse_label, Category, Ordinal, ProblemLabel, PARSE_PRIORITY};
pub use matcher::{find_entry, ContainsMatch, MatchStrategy, MatchStrategyKind, WordBoundaryMatch};
pub use merge::{
    enrich_from_rows, merge_fragments, EnrichStats, FragmentEvidence, FragmentNaming, MergeStats,
    TabularRow,
};
pub use model::{CatalogDocument, Field, ProblemEntry, Subject};
pub use ordering::{category_rank, sort_entries};
pub use reconcile::{reconcile, ReconcileContext, ReconcileReport, DEFAULT_ID_PREFIX};
pub use vocabulary::Vocabulary;
