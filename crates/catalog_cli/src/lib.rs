pub mod config;
mod fragment_fix;
mod path_check;
mod reconcile_run;

pub use config::{resolve_catalog_config, CatalogConfig, CONFIG_FILE};
pub use fragment_fix::{fix_fragment_files, FixFragmentsInput, FixFragmentsOutput, FixedFile};
pub use path_check::{check_explanation_paths, CheckPathsInput, CheckPathsOutput};
pub use reconcile_run::{run_reconcile, ReconcileInput, ReconcileOutput};
