use std::fs;
use std::path::PathBuf;

use catalog_scope_fragments::{rewrite_document, RewriteOutcome};
use catalog_snapshot::write_atomic;
use serde::Serialize;
use tracing::warn;

#[derive(Debug, Clone, Default)]
pub struct FixFragmentsInput {
    pub files: Vec<PathBuf>,
    pub dry_run: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct FixedFile {
    pub path: PathBuf,
    /// `container`, `body`, `not_a_document`, `no_content`, `missing` or
    /// `unreadable`.
    pub outcome: &'static str,
    pub written: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct FixFragmentsOutput {
    pub files: Vec<FixedFile>,
    pub rewritten: usize,
    /// Files with no extractable content or that could not be read.
    pub failed: usize,
    pub dry_run: bool,
}

/// Replace full markup documents with their explanation fragment, in place.
pub fn fix_fragment_files(input: FixFragmentsInput) -> Result<FixFragmentsOutput, String> {
    let mut files = Vec::with_capacity(input.files.len());
    let mut rewritten = 0;
    let mut failed = 0;

    for path in input.files {
        if !path.is_file() {
            warn!(path = %path.display(), "not found; skipping");
            files.push(FixedFile {
                path,
                outcome: "missing",
                written: false,
            });
            continue;
        }
        let markup = match fs::read_to_string(&path) {
            Ok(markup) => markup,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "unreadable; skipping");
                failed += 1;
                files.push(FixedFile {
                    path,
                    outcome: "unreadable",
                    written: false,
                });
                continue;
            }
        };
        let outcome = rewrite_document(&markup);
        let mut written = false;
        match outcome.fragment() {
            Some(fragment) => {
                rewritten += 1;
                if !input.dry_run {
                    write_atomic(&path, fragment.as_bytes()).map_err(|err| err.to_string())?;
                    written = true;
                }
            }
            None if outcome == RewriteOutcome::NoContent => {
                warn!(path = %path.display(), "could not extract content");
                failed += 1;
            }
            None => {}
        }
        files.push(FixedFile {
            path,
            outcome: outcome.as_str(),
            written,
        });
    }

    Ok(FixFragmentsOutput {
        files,
        rewritten,
        failed,
        dry_run: input.dry_run,
    })
}
