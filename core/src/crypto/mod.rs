//! # Cryptographic Primitives
//!
//! Every hash and every signature in Veridoc flows through this module.
//! The choices are deliberately boring and well-audited:
//!
//! - **SHA-256** for document content hashes. The rest of the world can
//!   recompute a SHA-256 with whatever tooling it has lying around, and a
//!   detached signature format lives or dies by independent verifiability.
//! - **blake2b** for address checksums and derivation chain codes, where
//!   the established address format already fixed the hash for us.
//! - **Sr25519** (`schnorrkel`) for signatures: Schnorr over Ristretto25519
//!   with hierarchical hard derivation, so a leaked signing key never walks
//!   back to the mnemonic it came from.
//!
//! Everything here is a thin, typed wrapper around audited implementations.

pub mod hash;
pub mod keys;

pub use hash::{blake2b_256, blake2b_512_multi, sha256, sha256_array};
pub use keys::{verify_signature, DerivationPath, DocKeypair, KeyError};
