use std::path::{Path, PathBuf};

use catalog_cli::{run_reconcile, ReconcileInput};
use catalog_core::MatchStrategyKind;
use clap::Parser;

fn parse_strategy(raw: &str) -> Result<MatchStrategyKind, String> {
    MatchStrategyKind::parse(raw)
        .ok_or_else(|| format!("unknown match strategy '{}' (contains|word-boundary)", raw))
}

#[derive(Parser, Debug, Clone)]
pub(crate) struct ReconcileArgs {
    /// Catalog document (default from catalog.toml)
    #[arg(long, value_name = "PATH")]
    pub document: Option<PathBuf>,
    /// Fragment store directory (default from catalog.toml)
    #[arg(long, value_name = "DIR")]
    pub fragments: Option<PathBuf>,
    /// Link snapshot (.json or .toml); no enrichment without it
    #[arg(long, value_name = "PATH")]
    pub sheet: Option<PathBuf>,
    /// How a link row label is matched against entry titles: contains|word-boundary
    #[arg(long, value_name = "STRATEGY", value_parser = parse_strategy)]
    pub match_strategy: Option<MatchStrategyKind>,
    /// Compute the result without writing the document
    #[arg(long)]
    pub dry_run: bool,
    /// Output JSON instead of key=value lines
    #[arg(long)]
    pub json: bool,
}

pub(crate) fn run_reconcile_command(root: &Path, args: ReconcileArgs) -> Result<(), String> {
    let out = run_reconcile(ReconcileInput {
        root: root.to_path_buf(),
        document: args.document,
        fragments: args.fragments,
        sheet: args.sheet,
        match_strategy: args.match_strategy,
        dry_run: args.dry_run,
    })?;

    if args.json {
        return super::print_json(&out);
    }

    let report = &out.report;
    println!("document={}", out.document.display());
    println!("document_existed={}", out.document_existed);
    println!("match_strategy={}", out.match_strategy);
    println!("fragments_seen={}", report.fragments_seen);
    println!("fragments_skipped={}", out.fragments_skipped);
    println!("fragments_unreadable={}", out.fragments_unreadable);
    println!("fields_created={}", report.merge.fields_created);
    println!("entries_created={}", report.merge.entries_created);
    println!("paths_attached={}", report.merge.paths_attached);
    println!("placeholders_inserted={}", report.placeholders_inserted);
    println!("invalid_fields={}", report.invalid_fields);
    println!("rows_seen={}", report.rows_seen);
    println!("links_attached={}", report.enrich.links_attached);
    println!("skipped_explained={}", report.enrich.skipped_explained);
    println!("skipped_linked={}", report.enrich.skipped_linked);
    println!("rows_without_link={}", report.enrich.rows_without_link);
    println!("unmatched_rows={}", report.enrich.unmatched_rows);
    println!("unparseable_labels={}", report.enrich.unparseable_labels);
    println!("sha256_before={}", out.sha256_before);
    println!("sha256_after={}", out.sha256_after);
    println!("changed={}", out.changed);
    println!("written={}", out.written);
    Ok(())
}
