use std::path::{Path, PathBuf};

use catalog_cli::{check_explanation_paths, CheckPathsInput};
use clap::Parser;

#[derive(Parser, Debug, Clone)]
pub(crate) struct CheckPathsArgs {
    /// Catalog document (default from catalog.toml)
    #[arg(long, value_name = "PATH")]
    pub document: Option<PathBuf>,
    /// Output JSON instead of key=value lines
    #[arg(long)]
    pub json: bool,
}

pub(crate) fn run_check_paths(root: &Path, args: CheckPathsArgs) -> Result<(), String> {
    let out = check_explanation_paths(CheckPathsInput {
        root: root.to_path_buf(),
        document: args.document,
    })?;

    if args.json {
        super::print_json(&out)?;
    } else {
        println!("document={}", out.document.display());
        println!("checked={}", out.checked);
        println!("missing={}", out.missing.len());
        for path in &out.missing {
            println!("missing_path={}", path);
        }
    }

    if out.missing.is_empty() {
        Ok(())
    } else {
        Err(format!(
            "{} explanation path(s) do not exist",
            out.missing.len()
        ))
    }
}
