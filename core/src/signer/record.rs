//! # Signature Records
//!
//! The data that gets signed and the record that gets persisted.
//!
//! [`SignaturePayload`] is the signed surface: every field below is covered
//! by the signature, so none of them can change after signing without the
//! verification failing. The byte representation that the signature covers
//! is the payload's compact JSON in declared field order (see
//! [`SignaturePayload::signing_bytes`]); an independent implementation can
//! reproduce it from this file alone.
//!
//! [`SignatureRecord`] is the sidecar file format: the payload plus the
//! signature bytes and the signer's public key, serialized as JSON. Byte
//! arrays are hex-encoded strings so the sidecar stays human-inspectable.

use serde::{Deserialize, Serialize};

use crate::config::{PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH};
use crate::did::KeyUri;

/// Hex-string serde for fixed-size byte arrays.
mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer, const N: usize>(
        bytes: &[u8; N],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>, const N: usize>(
        deserializer: D,
    ) -> Result<[u8; N], D::Error> {
        let text = String::deserialize(deserializer)?;
        let bytes = hex::decode(&text).map_err(serde::de::Error::custom)?;
        bytes
            .try_into()
            .map_err(|v: Vec<u8>| {
                serde::de::Error::custom(format!("expected {N} bytes, got {}", v.len()))
            })
    }
}

/// The signed surface of a document signature.
///
/// Immutable once built; created only at sign time. `group_id` is an
/// opaque caller-defined value carried through verbatim, never
/// interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignaturePayload {
    /// File name of the signed document (base name, no directory).
    pub document_file_name: String,

    /// SHA-256 of the document bytes exactly as they were at sign time.
    #[serde(with = "hex_bytes")]
    pub document_hash: [u8; 32],

    /// The signer's address on the identity network.
    pub signer_address: String,

    /// DID key URI naming the signing key.
    pub signer_key_uri: KeyUri,

    /// Human-readable signer display name, caller-supplied.
    pub signer_name: String,

    /// Opaque caller-defined group id, pass-through metadata.
    pub group_id: i64,

    /// Milliseconds since the Unix epoch, UTC, taken at sign time.
    pub timestamp_millis: i64,
}

impl SignaturePayload {
    /// The exact bytes the signature covers: compact JSON of this payload
    /// in declared field order.
    ///
    /// Deterministic for a given payload. Field order is part of the wire
    /// format; reordering the struct fields is a breaking change.
    pub fn signing_bytes(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}

/// The persisted sidecar record: payload, signature, and public key.
///
/// Written once by [`sign`](crate::signer::sign), read back (never
/// mutated) by [`verify`](crate::signer::verify), and deleted only by
/// explicit cleanup of orphaned sidecars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureRecord {
    /// The signed payload.
    pub payload: SignaturePayload,

    /// 64-byte Sr25519 signature over [`SignaturePayload::signing_bytes`].
    #[serde(with = "hex_bytes")]
    pub signature: [u8; SIGNATURE_LENGTH],

    /// The signer's 32-byte public key, embedded so verification needs no
    /// external key lookup.
    #[serde(with = "hex_bytes")]
    pub public_key: [u8; PUBLIC_KEY_LENGTH],
}

impl SignatureRecord {
    /// Serialize to the pretty-printed JSON stored in sidecar files.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Parse a record from sidecar JSON.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
