//! # Signing and Verification Engine
//!
//! The operations the rest of the world calls:
//!
//! - [`sign_bytes`] builds a signed record from in-memory document bytes
//!   (pure, no filesystem).
//! - [`sign`] reads a document from disk, derives the signing key from a
//!   mnemonic, and writes the sidecar next to the document.
//! - [`verify_record`] / [`verify`] / [`verify_file`] check a document
//!   against a record, a sidecar path, or a discovered sidecar.
//!
//! Verification checks run in a fixed order and stop at the first failure:
//!
//! 1. Document hash. Catches any post-signature modification of the
//!    document, regardless of what else the sidecar claims.
//! 2. Payload signature under the embedded public key.
//! 3. Consistency of the embedded key with the recorded signer address.
//!
//! Each failure maps to one [`InvalidReason`]. A sidecar that cannot be
//! read or parsed at all yields [`Verdict::Error`] instead; "unreadable"
//! and "tampered" are different answers.

use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::address::{encode, NetworkPrefix};
use crate::config::SIGNING_ALGORITHM;
use crate::crypto::hash::sha256_array;
use crate::crypto::keys::{verify_signature, DocKeypair, KeyError};
use crate::did::KeyUri;
use crate::signer::record::{SignaturePayload, SignatureRecord};
use crate::signer::sidecar;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors produced by the signing path.
///
/// Verification does not use this type: a failed check is a [`Verdict`],
/// not an error.
#[derive(Debug, Error)]
pub enum SignError {
    /// Mnemonic or derivation path problems, before any signing runs.
    #[error(transparent)]
    Key(#[from] KeyError),

    /// The document bytes are empty, or the document file could not be
    /// read.
    #[error("document is empty or unreadable: {0}")]
    DocumentUnreadable(String),

    /// Sidecar write failure, surfaced verbatim. Retrying is the caller's
    /// decision.
    #[error("sidecar I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The record could not be serialized.
    #[error("record serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Verdict
// ---------------------------------------------------------------------------

/// Why a present, well-formed sidecar failed verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    /// The document hash no longer matches the signed hash.
    DocumentModified,
    /// The signature does not verify under the embedded public key.
    SignatureMismatch,
    /// The embedded public key does not encode to the recorded address.
    AddressInconsistent,
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            InvalidReason::DocumentModified => "document modified after signing",
            InvalidReason::SignatureMismatch => "signature does not match signer key",
            InvalidReason::AddressInconsistent => "signer address inconsistent with embedded key",
        };
        write!(f, "{message}")
    }
}

impl Serialize for InvalidReason {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// Who signed, extracted from a record that verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignerInfo {
    /// The signer's address on the identity network.
    pub address: String,
    /// Signature scheme name, always `"Sr25519"` in this build.
    pub algorithm: String,
    /// Sign-time timestamp from the payload, milliseconds since epoch.
    pub timestamp_millis: i64,
}

/// The outcome of verifying one document against one sidecar.
///
/// Produced fresh on every call, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Verdict {
    /// Hash, signature, and address all check out.
    Valid {
        /// Details of the verified signer.
        signer: SignerInfo,
    },
    /// The sidecar parsed but a check failed.
    Invalid {
        /// Which check failed.
        reason: InvalidReason,
    },
    /// The sidecar (or document) could not be read or parsed.
    Error {
        /// Human-readable description.
        message: String,
    },
}

impl Verdict {
    /// True for [`Verdict::Valid`].
    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid { .. })
    }
}

// ---------------------------------------------------------------------------
// Signing
// ---------------------------------------------------------------------------

/// Build a signed record for in-memory document bytes.
///
/// Pure except for reading the clock: hashes the document, assembles the
/// payload (address and key URI derived from the keypair), and signs the
/// payload bytes. No filesystem access; the caller decides where the
/// record goes.
pub fn sign_bytes(
    document: &[u8],
    file_name: &str,
    keypair: &DocKeypair,
    signer_name: &str,
    group_id: i64,
) -> Result<SignatureRecord, SignError> {
    if document.is_empty() {
        return Err(SignError::DocumentUnreadable("document is empty".into()));
    }

    let public_key = keypair.public_key_bytes();
    let address = encode(&public_key, NetworkPrefix::identity())
        .expect("a keypair public key is always 32 bytes");

    let payload = SignaturePayload {
        document_file_name: file_name.to_string(),
        document_hash: sha256_array(document),
        signer_address: address.text().to_string(),
        signer_key_uri: KeyUri::for_address(&address),
        signer_name: signer_name.to_string(),
        group_id,
        timestamp_millis: chrono::Utc::now().timestamp_millis(),
    };

    let signature = keypair.sign(&payload.signing_bytes()?);

    Ok(SignatureRecord {
        payload,
        signature,
        public_key,
    })
}

/// Sign a document on disk and persist the sidecar next to it.
///
/// Reads the document ([`SignError::DocumentUnreadable`] on failure or
/// empty content), derives the signing key from the mnemonic along the
/// fixed path, and writes the record to the document's sidecar path,
/// replacing any previous sidecar. Re-signing a modified document is the
/// supported way back to a valid state.
pub fn sign(
    document_path: &Path,
    seed_phrase: &str,
    signer_name: &str,
    group_id: i64,
) -> Result<SignatureRecord, SignError> {
    let document = fs::read(document_path).map_err(|e| {
        SignError::DocumentUnreadable(format!("{}: {e}", document_path.display()))
    })?;
    let file_name = document_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            SignError::DocumentUnreadable(format!(
                "{}: path has no file name",
                document_path.display()
            ))
        })?;

    let keypair = DocKeypair::from_mnemonic_default(seed_phrase)?;
    let record = sign_bytes(&document, file_name, &keypair, signer_name, group_id)?;

    let sidecar_path = sidecar::sidecar_path(document_path);
    sidecar::write_record(&sidecar_path, &record)?;

    tracing::info!(
        document = %document_path.display(),
        sidecar = %sidecar_path.display(),
        signer = %record.payload.signer_address,
        "document signed"
    );
    Ok(record)
}

// ---------------------------------------------------------------------------
// Verification
// ---------------------------------------------------------------------------

/// Verify document bytes against an already-parsed record.
pub fn verify_record(document: &[u8], record: &SignatureRecord) -> Verdict {
    // Hash first: a modified document is invalid no matter what else the
    // record claims.
    if sha256_array(document) != record.payload.document_hash {
        return Verdict::Invalid {
            reason: InvalidReason::DocumentModified,
        };
    }

    let signing_bytes = match record.payload.signing_bytes() {
        Ok(bytes) => bytes,
        Err(e) => {
            return Verdict::Error {
                message: format!("could not reconstruct signed payload: {e}"),
            }
        }
    };
    if !verify_signature(&record.public_key, &signing_bytes, &record.signature) {
        return Verdict::Invalid {
            reason: InvalidReason::SignatureMismatch,
        };
    }

    // The embedded key must be the one the recorded address names.
    match encode(&record.public_key, NetworkPrefix::identity()) {
        Ok(address) if address.text() == record.payload.signer_address => {}
        _ => {
            return Verdict::Invalid {
                reason: InvalidReason::AddressInconsistent,
            }
        }
    }

    Verdict::Valid {
        signer: SignerInfo {
            address: record.payload.signer_address.clone(),
            algorithm: SIGNING_ALGORITHM.to_string(),
            timestamp_millis: record.payload.timestamp_millis,
        },
    }
}

/// Verify document bytes against the sidecar at `sidecar_path`.
///
/// An unreadable or unparseable sidecar is [`Verdict::Error`], not a
/// verification failure.
pub fn verify(document: &[u8], sidecar_path: &Path) -> Verdict {
    let record = match sidecar::read_record(sidecar_path) {
        Ok(record) => record,
        Err(e) => {
            tracing::debug!(sidecar = %sidecar_path.display(), error = %e, "sidecar unreadable");
            return Verdict::Error {
                message: format!("corrupt or unreadable signature file: {e}"),
            };
        }
    };
    verify_record(document, &record)
}

/// Locate a document's sidecar and verify the document against it.
///
/// The three-state view in one call: no sidecar yields [`Verdict::Error`]
/// ("never signed"), a failing check yields [`Verdict::Invalid`], and
/// everything passing yields [`Verdict::Valid`].
pub fn verify_file(document_path: &Path) -> Verdict {
    let Some(sidecar_path) = sidecar::find_sidecar(document_path) else {
        return Verdict::Error {
            message: format!("no signature found for {}", document_path.display()),
        };
    };
    let document = match fs::read(document_path) {
        Ok(bytes) => bytes,
        Err(e) => {
            return Verdict::Error {
                message: format!("could not read {}: {e}", document_path.display()),
            }
        }
    };
    verify(&document, &sidecar_path)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
