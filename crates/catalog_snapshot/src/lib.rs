use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use catalog_core::CatalogDocument;
use serde_json::Value;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error("io error: {0}")]
    Io(String),
    #[error("json error: {0}")]
    Json(String),
    #[error("canonical json error: {0}")]
    Canonical(String),
}

#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    pub document: CatalogDocument,
    /// Canonical hash of `document` as loaded.
    pub sha256: String,
    /// False when the file was missing and `document` is a fresh skeleton.
    pub existed: bool,
}

/// Read the catalog at `path`. A missing file yields a skeleton document.
pub fn load_catalog(
    path: &Path,
    material_name: &str,
    subject_name: &str,
) -> Result<LoadedCatalog, SnapshotError> {
    let (document, existed) = match fs::read(path) {
        Ok(bytes) => {
            let document: CatalogDocument = serde_json::from_slice(&bytes)
                .map_err(|err| SnapshotError::Json(format!("{}: {}", path.display(), err)))?;
            (document, true)
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            info!(path = %path.display(), "catalog not found; starting from skeleton");
            (CatalogDocument::skeleton(material_name, subject_name), false)
        }
        Err(err) => {
            return Err(SnapshotError::Io(format!("read {}: {}", path.display(), err)));
        }
    };
    let sha256 = document_sha256(&document)?;
    Ok(LoadedCatalog {
        document,
        sha256,
        existed,
    })
}

/// SHA-256 over the canonical JSON form of the document.
pub fn document_sha256(document: &CatalogDocument) -> Result<String, SnapshotError> {
    let value = serde_json::to_value(document).map_err(|err| SnapshotError::Json(err.to_string()))?;
    Ok(sha256_hex(&canonical_json_bytes(&value)?))
}

/// Compact JSON of a `Value`. `serde_json::Map` is a `BTreeMap` in this
/// workspace, so object keys come out sorted at every level.
pub fn canonical_json_bytes(value: &Value) -> Result<Vec<u8>, SnapshotError> {
    serde_json::to_vec(value).map_err(|err| SnapshotError::Canonical(err.to_string()))
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// The on-disk form: two-space indented JSON, raw UTF-8, trailing newline.
pub fn render_document(document: &CatalogDocument) -> Result<Vec<u8>, SnapshotError> {
    let mut bytes =
        serde_json::to_vec_pretty(document).map_err(|err| SnapshotError::Json(err.to_string()))?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Write the whole document, or nothing.
pub fn save_catalog(path: &Path, document: &CatalogDocument) -> Result<(), SnapshotError> {
    let bytes = render_document(document)?;
    write_atomic(path, &bytes)?;
    debug!(path = %path.display(), bytes = bytes.len(), "wrote catalog");
    Ok(())
}

/// Write `bytes` to a sibling temp file, sync it, then rename it over `path`.
/// On failure the temp file is removed and `path` is untouched.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), SnapshotError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|err| SnapshotError::Io(format!("create {}: {}", parent.display(), err)))?;
    }

    let tmp_path = temp_path_for(path);
    let result = write_and_sync(&tmp_path, bytes).and_then(|()| {
        fs::rename(&tmp_path, path).map_err(|err| {
            SnapshotError::Io(format!("rename to {}: {}", path.display(), err))
        })
    });
    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}

fn write_and_sync(path: &Path, bytes: &[u8]) -> Result<(), SnapshotError> {
    let io = |err: std::io::Error| SnapshotError::Io(format!("write {}: {}", path.display(), err));
    let mut file = fs::File::create(path).map_err(io)?;
    file.write_all(bytes).map_err(io)?;
    file.sync_all().map_err(io)?;
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "out".to_string());
    path.with_file_name(format!(".{}.tmp", name))
}
