//! # Sidecar Files
//!
//! A sidecar carries the signature record for one document. Its path is a
//! pure function of the document's path: same directory, same base name,
//! extension replaced with `.sig`. Lookup never scans file contents, so
//! "is this document signed" is a single `exists` check.
//!
//! The sidecar is the only persisted state in the crate. Its lifetime is
//! tied to the document it signs: re-signing overwrites it, and
//! [`clean_orphaned_sidecars`] removes sidecars whose document is gone.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::SIDECAR_EXTENSION;
use crate::signer::engine::SignError;
use crate::signer::record::SignatureRecord;

/// The sidecar path for a document path.
///
/// Pure string manipulation; neither path needs to exist.
pub fn sidecar_path(document_path: &Path) -> PathBuf {
    document_path.with_extension(SIDECAR_EXTENSION)
}

/// Locate the sidecar for a document, if one exists on disk.
///
/// Returns `None` for never-signed documents. Callers use this to
/// distinguish "unsigned" from "signed but failing verification" before
/// invoking [`verify`](crate::signer::verify).
pub fn find_sidecar(document_path: &Path) -> Option<PathBuf> {
    let candidate = sidecar_path(document_path);
    candidate.is_file().then_some(candidate)
}

/// Write a record to a sidecar path, replacing any previous sidecar.
pub(crate) fn write_record(path: &Path, record: &SignatureRecord) -> Result<(), SignError> {
    let json = record.to_json()?;
    fs::write(path, json)?;
    tracing::debug!(path = %path.display(), "sidecar written");
    Ok(())
}

/// Read and parse a sidecar file.
pub(crate) fn read_record(path: &Path) -> Result<SignatureRecord, SignError> {
    let json = fs::read_to_string(path)?;
    Ok(SignatureRecord::from_json(&json)?)
}

/// Delete sidecars in `dir` whose matching document no longer exists.
///
/// A sidecar is orphaned when no sibling file shares its base name (the
/// document's own extension is unknown at cleanup time, so any non-sidecar
/// sibling with the same stem counts as the document). Returns the paths
/// that were removed. Non-recursive.
pub fn clean_orphaned_sidecars(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut sidecars = Vec::new();
    let mut document_stems = Vec::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let is_sidecar = path
            .extension()
            .is_some_and(|ext| ext == SIDECAR_EXTENSION);
        if is_sidecar {
            sidecars.push(path);
        } else if let Some(stem) = path.file_stem() {
            document_stems.push(stem.to_os_string());
        }
    }

    let mut removed = Vec::new();
    for sidecar in sidecars {
        let orphaned = sidecar
            .file_stem()
            .map(|stem| !document_stems.iter().any(|s| s == stem))
            .unwrap_or(false);
        if orphaned {
            fs::remove_file(&sidecar)?;
            tracing::info!(path = %sidecar.display(), "removed orphaned sidecar");
            removed.push(sidecar);
        }
    }

    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sidecar_path_replaces_extension() {
        assert_eq!(
            sidecar_path(Path::new("/tmp/docs/report.pdf")),
            PathBuf::from("/tmp/docs/report.sig")
        );
        // Extension-less documents gain the sidecar extension.
        assert_eq!(
            sidecar_path(Path::new("/tmp/docs/README")),
            PathBuf::from("/tmp/docs/README.sig")
        );
    }

    #[test]
    fn find_sidecar_distinguishes_signed_from_unsigned() {
        let dir = tempfile::tempdir().unwrap();
        let document = dir.path().join("contract.pdf");
        fs::write(&document, b"document body").unwrap();

        assert!(find_sidecar(&document).is_none());

        fs::write(dir.path().join("contract.sig"), b"{}").unwrap();
        assert_eq!(
            find_sidecar(&document),
            Some(dir.path().join("contract.sig"))
        );
    }

    #[test]
    fn cleanup_removes_only_orphans() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("kept.pdf"), b"doc").unwrap();
        fs::write(dir.path().join("kept.sig"), b"{}").unwrap();
        fs::write(dir.path().join("orphan.sig"), b"{}").unwrap();

        let removed = clean_orphaned_sidecars(dir.path()).unwrap();
        assert_eq!(removed, vec![dir.path().join("orphan.sig")]);
        assert!(dir.path().join("kept.sig").is_file());
        assert!(!dir.path().join("orphan.sig").exists());
    }

    #[test]
    fn cleanup_of_clean_directory_is_a_noop() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.pdf"), b"doc").unwrap();
        fs::write(dir.path().join("a.sig"), b"{}").unwrap();
        assert!(clean_orphaned_sidecars(dir.path()).unwrap().is_empty());
    }
}
