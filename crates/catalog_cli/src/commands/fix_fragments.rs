use std::path::PathBuf;

use catalog_cli::{fix_fragment_files, FixFragmentsInput};
use clap::Parser;

#[derive(Parser, Debug, Clone)]
pub(crate) struct FixFragmentsArgs {
    /// Markup files to rewrite in place
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,
    /// Report what would change without writing
    #[arg(long)]
    pub dry_run: bool,
    /// Output JSON instead of key=value lines
    #[arg(long)]
    pub json: bool,
}

pub(crate) fn run_fix_fragments(args: FixFragmentsArgs) -> Result<(), String> {
    let out = fix_fragment_files(FixFragmentsInput {
        files: args.files,
        dry_run: args.dry_run,
    })?;

    if args.json {
        super::print_json(&out)?;
    } else {
        for file in &out.files {
            println!(
                "file={} outcome={} written={}",
                file.path.display(),
                file.outcome,
                file.written
            );
        }
        println!("rewritten={}", out.rewritten);
        println!("failed={}", out.failed);
    }

    if out.failed > 0 {
        return Err(format!("{} file(s) could not be rewritten", out.failed));
    }
    Ok(())
}
