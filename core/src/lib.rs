// Copyright (c) 2026 Veridoc Contributors. MIT License.
// See LICENSE for details.

//! # Veridoc — Core Library
//!
//! Detached document signing for people who need to prove, months later,
//! that a file has not changed since somebody put their name on it.
//!
//! The crate has two independent subsystems and a thin identity layer
//! between them:
//!
//! - **address** — an SS58-style codec mapping (network, 32-byte public key)
//!   pairs to checksummed base-58 address strings and back. Tamper and typo
//!   detection via a blake2b checksum; network identity baked into the
//!   checksum domain.
//! - **crypto** — Sr25519 key material: mnemonic parsing, hard derivation
//!   along a fixed path, signing and verification via `schnorrkel`.
//! - **did** — stable `did:veridoc:<address>` key identifiers. Plain
//!   strings, never resolved over a network.
//! - **signer** — the document signing engine. Hashes a document, binds the
//!   hash to a signer identity and timestamp in a signed payload, persists
//!   the result as a JSON sidecar next to the document, and verifies
//!   documents against previously written sidecars.
//!
//! Everything is synchronous. Hashing, base-58, and signature math are
//! CPU-bound; the only I/O in the crate is the single sidecar read or write
//! per operation. Callers that want async wrap these calls in whatever
//! executor they already have.
//!
//! ## Design Rules
//!
//! 1. Every failure reachable from untrusted input is a typed error, not a
//!    panic.
//! 2. A failed verification is a result, not an error. Tampered documents
//!    are an expected input to this library.
//! 3. Wire formats (address text, sidecar JSON) are reproducible byte for
//!    byte from the documentation in [`config`].

pub mod address;
pub mod config;
pub mod crypto;
pub mod did;
pub mod signer;

pub use address::{convert, decode, encode, validate, Address, AddressCheck, NetworkPrefix};
pub use crypto::keys::DocKeypair;
pub use did::KeyUri;
pub use signer::{sign, verify, verify_file, SignatureRecord, SignerInfo, Verdict};
