//! # Document Signer
//!
//! Binds a document's content to a signer's identity at a point in time,
//! in a way a third party can verify later without trusting the signer's
//! tooling.
//!
//! The engine never touches the document itself. Signing hashes the bytes,
//! wraps the hash in a [`SignaturePayload`] together with the signer's
//! address, key URI, display name, group id, and a timestamp, signs the
//! payload, and writes the resulting [`SignatureRecord`] to a *sidecar*
//! file next to the document (same base name, `.sig` extension).
//! Verification reads the sidecar back and checks, in order: document
//! hash, payload signature, and the consistency of the embedded public key
//! with the recorded signer address.
//!
//! ## Document states
//!
//! A (document, sidecar) pair is in exactly one of three states:
//!
//! - **Unsigned**: no sidecar exists.
//! - **Signed-Valid**: sidecar present, hash and signature check out.
//! - **Signed-Invalid**: sidecar present, hash or signature check fails.
//!
//! [`sign`] moves any state to Signed-Valid for the current document
//! bytes (re-signing replaces the sidecar, never appends). Any external
//! mutation of the document moves Signed-Valid to Signed-Invalid, detected
//! lazily at the next [`verify`] call; nothing watches the filesystem.
//!
//! A failed verification is a [`Verdict`], not an error: tampered
//! documents are expected input here.

pub mod engine;
pub mod record;
pub mod sidecar;

pub use engine::{
    sign, sign_bytes, verify, verify_file, verify_record, InvalidReason, SignError, SignerInfo,
    Verdict,
};
pub use record::{SignaturePayload, SignatureRecord};
pub use sidecar::{clean_orphaned_sidecars, find_sidecar, sidecar_path};
