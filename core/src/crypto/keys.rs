//! # Sr25519 Key Material
//!
//! Signing keys for document signatures, derived from BIP-39 mnemonics via
//! hierarchical hard derivation.
//!
//! The pipeline from phrase to signing key:
//!
//! ```text
//! mnemonic phrase
//!     -> BIP-39 PBKDF2 seed (64 bytes, empty passphrase)
//!     -> first 32 bytes as Sr25519 mini secret
//!     -> expand (Ed25519 mode)
//!     -> hard junction "did"
//!     -> hard junction 0
//!     -> signing keypair
//! ```
//!
//! Only **hard** junctions (`//component`) are supported. A hard junction
//! cannot be inverted: compromise of the derived document-signing key tells
//! an attacker nothing about the mnemonic's other uses. Soft junctions
//! (`/component`) would not give that guarantee, so paths containing them
//! are rejected outright rather than silently accepted.
//!
//! Chain codes follow the Substrate convention so that a phrase-plus-path
//! pair derives the same key here as in the wider Sr25519 ecosystem:
//! numeric components encode as a little-endian u64, string components as
//! compact-length-prefixed UTF-8; either is zero-padded to 32 bytes or
//! blake2b-256 hashed when longer.

use bip39::{Language, Mnemonic};
use rand::RngCore;
use schnorrkel::derive::ChainCode;
use schnorrkel::{signing_context, ExpansionMode, Keypair, MiniSecretKey, PublicKey, Signature};
use std::fmt;
use thiserror::Error;

use crate::config::{DEFAULT_DERIVATION_PATH, SIGNING_CONTEXT};
use crate::crypto::hash::blake2b_256;

/// Errors that can occur while building or using key material.
#[derive(Debug, Error)]
pub enum KeyError {
    /// The seed phrase failed BIP-39 validation (bad word, bad checksum,
    /// unsupported word count).
    #[error("invalid seed phrase: {0}")]
    InvalidSeed(String),

    /// The derivation path string could not be parsed, or contained a soft
    /// junction.
    #[error("invalid derivation path: {0}")]
    InvalidPath(String),

    /// The public key bytes do not decode to a valid Ristretto point.
    #[error("invalid public key bytes")]
    InvalidPublicKey,
}

// ---------------------------------------------------------------------------
// Derivation Paths
// ---------------------------------------------------------------------------

/// One hard derivation step, reduced to its 32-byte chain code.
#[derive(Clone, PartialEq, Eq)]
pub struct Junction {
    chain_code: [u8; 32],
}

impl Junction {
    /// Build a junction from one `//`-separated path component.
    ///
    /// Components that parse as an unsigned integer are encoded as a
    /// little-endian u64; all others as their UTF-8 bytes behind a compact
    /// length prefix. Encodings longer than 32 bytes are compressed with
    /// blake2b-256; shorter ones are zero-padded on the right.
    fn from_component(component: &str) -> Self {
        let encoded = match component.parse::<u64>() {
            Ok(index) => index.to_le_bytes().to_vec(),
            Err(_) => {
                let bytes = component.as_bytes();
                let mut buf = compact_length_prefix(bytes.len());
                buf.extend_from_slice(bytes);
                buf
            }
        };

        let mut chain_code = [0u8; 32];
        if encoded.len() > 32 {
            chain_code = blake2b_256(&encoded);
        } else {
            chain_code[..encoded.len()].copy_from_slice(&encoded);
        }
        Self { chain_code }
    }

    fn chain_code(&self) -> ChainCode {
        ChainCode(self.chain_code)
    }

    #[cfg(test)]
    fn raw_chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }
}

impl fmt::Debug for Junction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Junction({})", hex::encode(self.chain_code))
    }
}

/// SCALE compact length prefix. Path components are short, so only the
/// single-byte (len < 64) and two-byte (len < 16384) modes are reachable.
fn compact_length_prefix(len: usize) -> Vec<u8> {
    if len < 64 {
        vec![(len as u8) << 2]
    } else {
        let packed = ((len as u16) << 2) | 0b01;
        packed.to_le_bytes().to_vec()
    }
}

/// A parsed derivation path: zero or more hard junctions, applied in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivationPath {
    junctions: Vec<Junction>,
}

impl DerivationPath {
    /// Parse a path string of the form `//component//component...`.
    ///
    /// The empty string is the empty path (no derivation). A component runs
    /// until the next `/`. Soft junctions (single `/`) and empty components
    /// are rejected.
    ///
    /// # Example
    ///
    /// ```
    /// use veridoc::crypto::DerivationPath;
    ///
    /// let path = DerivationPath::parse("//did//0").unwrap();
    /// assert_eq!(path.len(), 2);
    /// assert!(DerivationPath::parse("/soft").is_err());
    /// ```
    pub fn parse(path: &str) -> Result<Self, KeyError> {
        let mut junctions = Vec::new();
        let mut rest = path;

        while !rest.is_empty() {
            let Some(after) = rest.strip_prefix("//") else {
                if rest.starts_with('/') {
                    return Err(KeyError::InvalidPath(format!(
                        "soft junction in {path:?}: only hard junctions (//) are supported"
                    )));
                }
                return Err(KeyError::InvalidPath(format!(
                    "expected '//' at {rest:?} in {path:?}"
                )));
            };

            let component_end = after.find('/').unwrap_or(after.len());
            let component = &after[..component_end];
            if component.is_empty() {
                return Err(KeyError::InvalidPath(format!("empty junction in {path:?}")));
            }

            junctions.push(Junction::from_component(component));
            rest = &after[component_end..];
        }

        Ok(Self { junctions })
    }

    /// Number of junctions in the path.
    pub fn len(&self) -> usize {
        self.junctions.len()
    }

    /// True when the path derives nothing.
    pub fn is_empty(&self) -> bool {
        self.junctions.is_empty()
    }

    fn iter(&self) -> impl Iterator<Item = &Junction> {
        self.junctions.iter()
    }
}

// ---------------------------------------------------------------------------
// DocKeypair
// ---------------------------------------------------------------------------

/// An Sr25519 keypair used to sign document hashes.
///
/// Wraps `schnorrkel::Keypair`. The type deliberately does not implement
/// `Serialize`, `Clone` is allowed but the secret half never appears in
/// `Debug` output, and there is no accessor for the raw secret bytes:
/// signing keys are derived fresh from the mnemonic at each signing
/// session, not persisted.
///
/// # Examples
///
/// ```
/// use veridoc::crypto::keys::DocKeypair;
///
/// let phrase = DocKeypair::generate_mnemonic(12);
/// let keypair = DocKeypair::from_mnemonic_default(&phrase).unwrap();
/// let sig = keypair.sign(b"document hash goes here");
/// assert!(keypair.verify(b"document hash goes here", &sig));
/// ```
pub struct DocKeypair {
    keypair: Keypair,
}

impl DocKeypair {
    /// Derive a keypair from a mnemonic phrase and a derivation path.
    ///
    /// The phrase must be a valid English BIP-39 mnemonic. The 64-byte
    /// BIP-39 seed is computed with an empty passphrase; its first 32 bytes
    /// become the mini secret, which is expanded and then hard-derived once
    /// per path junction.
    pub fn from_mnemonic(phrase: &str, path: &str) -> Result<Self, KeyError> {
        let mnemonic = Mnemonic::parse_in_normalized(Language::English, phrase)
            .map_err(|e| KeyError::InvalidSeed(e.to_string()))?;
        let seed = mnemonic.to_seed("");

        let mut mini = MiniSecretKey::from_bytes(&seed[..32])
            .map_err(|e| KeyError::InvalidSeed(e.to_string()))?;

        for junction in DerivationPath::parse(path)?.iter() {
            let secret = mini.expand(ExpansionMode::Ed25519);
            let (derived, _chain_code) =
                secret.hard_derive_mini_secret_key(Some(junction.chain_code()), b"");
            mini = derived;
        }

        Ok(Self {
            keypair: mini.expand_to_keypair(ExpansionMode::Ed25519),
        })
    }

    /// Derive a keypair using the fixed document-signing path
    /// ([`DEFAULT_DERIVATION_PATH`]).
    pub fn from_mnemonic_default(phrase: &str) -> Result<Self, KeyError> {
        Self::from_mnemonic(phrase, DEFAULT_DERIVATION_PATH)
    }

    /// Construct a keypair directly from a 32-byte mini secret.
    ///
    /// Test and tooling entry point; production signing always goes through
    /// [`from_mnemonic`](Self::from_mnemonic).
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        let mini = MiniSecretKey::from_bytes(seed)
            .expect("any 32 bytes form a valid mini secret");
        Self {
            keypair: mini.expand_to_keypair(ExpansionMode::Ed25519),
        }
    }

    /// Generate a fresh random mnemonic phrase.
    ///
    /// `word_count` may be 12, 18, or 24; anything else falls back to 24
    /// (strongest). Entropy comes from the OS CSPRNG.
    pub fn generate_mnemonic(word_count: u32) -> String {
        let entropy_len = match word_count {
            12 => 16,
            18 => 24,
            _ => 32,
        };
        let mut entropy = vec![0u8; entropy_len];
        rand::rngs::OsRng.fill_bytes(&mut entropy);
        let mnemonic = Mnemonic::from_entropy(&entropy)
            .expect("entropy of 16/24/32 bytes always forms a valid mnemonic");
        mnemonic.to_string()
    }

    /// The 32-byte public key (compressed Ristretto point).
    pub fn public_key_bytes(&self) -> [u8; 32] {
        self.keypair.public.to_bytes()
    }

    /// Sign a message under the fixed signing context.
    ///
    /// Sr25519 signing is randomized: two signatures over the same message
    /// differ byte for byte but both verify.
    pub fn sign(&self, message: &[u8]) -> [u8; 64] {
        let context = signing_context(SIGNING_CONTEXT);
        self.keypair.sign(context.bytes(message)).to_bytes()
    }

    /// Verify a signature against this keypair's public key.
    pub fn verify(&self, message: &[u8], signature: &[u8; 64]) -> bool {
        verify_signature(&self.public_key_bytes(), message, signature)
    }
}

impl fmt::Debug for DocKeypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The secret half stays out of logs, debug output included.
        write!(f, "DocKeypair(pub={})", hex::encode(self.public_key_bytes()))
    }
}

/// Verify an Sr25519 signature from raw byte components.
///
/// Returns `false` for anything that fails: undecodable public key,
/// malformed signature bytes, or an honest mismatch. Callers that need to
/// distinguish those cases validate the inputs separately first.
pub fn verify_signature(public_key: &[u8; 32], message: &[u8], signature: &[u8; 64]) -> bool {
    let Ok(public) = PublicKey::from_bytes(public_key) else {
        return false;
    };
    let Ok(sig) = Signature::from_bytes(signature) else {
        return false;
    };
    let context = signing_context(SIGNING_CONTEXT);
    public.verify(context.bytes(message), &sig).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Standard well-known development phrase; valid BIP-39 English.
    const TEST_MNEMONIC: &str =
        "bottom drive obey lake curtain smoke basket hold race lonely fit walk";

    #[test]
    fn junction_string_chain_code() {
        let junction = Junction::from_component("did");
        let mut expected = [0u8; 32];
        // compact(3) = 3 << 2 = 0x0c, then the UTF-8 bytes, zero-padded.
        expected[0] = 0x0c;
        expected[1..4].copy_from_slice(b"did");
        assert_eq!(junction.raw_chain_code(), &expected);
    }

    #[test]
    fn junction_numeric_chain_code() {
        let junction = Junction::from_component("42");
        let mut expected = [0u8; 32];
        expected[..8].copy_from_slice(&42u64.to_le_bytes());
        assert_eq!(junction.raw_chain_code(), &expected);

        // Index 0 encodes as all zeros.
        let zero = Junction::from_component("0");
        assert_eq!(zero.raw_chain_code(), &[0u8; 32]);
    }

    #[test]
    fn junction_numeric_differs_from_string() {
        // "0" the index and "zero" the label must not collide.
        assert_ne!(
            Junction::from_component("0"),
            Junction::from_component("zero")
        );
    }

    #[test]
    fn junction_long_component_is_hashed() {
        let long = "a".repeat(64);
        let junction = Junction::from_component(&long);
        let mut encoded = compact_length_prefix(64);
        encoded.extend_from_slice(long.as_bytes());
        assert_eq!(junction.raw_chain_code(), &blake2b_256(&encoded));
    }

    #[test]
    fn parse_default_path() {
        let path = DerivationPath::parse("//did//0").unwrap();
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn parse_empty_path() {
        let path = DerivationPath::parse("").unwrap();
        assert!(path.is_empty());
    }

    #[test]
    fn soft_junction_rejected() {
        let err = DerivationPath::parse("/soft").unwrap_err();
        assert!(matches!(err, KeyError::InvalidPath(_)));

        // Mixed hard-then-soft is rejected too.
        assert!(DerivationPath::parse("//did/0").is_err());
    }

    #[test]
    fn malformed_paths_rejected() {
        assert!(DerivationPath::parse("did").is_err());
        assert!(DerivationPath::parse("//").is_err());
        assert!(DerivationPath::parse("//did//").is_err());
        assert!(DerivationPath::parse("////0").is_err());
    }

    #[test]
    fn derivation_is_deterministic() {
        let a = DocKeypair::from_mnemonic(TEST_MNEMONIC, "//did//0").unwrap();
        let b = DocKeypair::from_mnemonic(TEST_MNEMONIC, "//did//0").unwrap();
        assert_eq!(a.public_key_bytes(), b.public_key_bytes());
    }

    #[test]
    fn default_path_matches_explicit() {
        let explicit = DocKeypair::from_mnemonic(TEST_MNEMONIC, "//did//0").unwrap();
        let default = DocKeypair::from_mnemonic_default(TEST_MNEMONIC).unwrap();
        assert_eq!(explicit.public_key_bytes(), default.public_key_bytes());
    }

    #[test]
    fn different_paths_different_keys() {
        let root = DocKeypair::from_mnemonic(TEST_MNEMONIC, "").unwrap();
        let did0 = DocKeypair::from_mnemonic(TEST_MNEMONIC, "//did//0").unwrap();
        let did1 = DocKeypair::from_mnemonic(TEST_MNEMONIC, "//did//1").unwrap();
        assert_ne!(root.public_key_bytes(), did0.public_key_bytes());
        assert_ne!(did0.public_key_bytes(), did1.public_key_bytes());
    }

    #[test]
    fn invalid_mnemonic_rejected() {
        let err = DocKeypair::from_mnemonic_default("definitely not a mnemonic").unwrap_err();
        assert!(matches!(err, KeyError::InvalidSeed(_)));

        // Right words, broken checksum (last word swapped).
        let broken =
            "bottom drive obey lake curtain smoke basket hold race lonely fit abandon";
        assert!(DocKeypair::from_mnemonic_default(broken).is_err());
    }

    #[test]
    fn sign_verify_roundtrip() {
        let keypair = DocKeypair::from_mnemonic_default(TEST_MNEMONIC).unwrap();
        let message = b"the payload bytes";
        let sig = keypair.sign(message);
        assert!(keypair.verify(message, &sig));
    }

    #[test]
    fn wrong_message_fails_verification() {
        let keypair = DocKeypair::from_mnemonic_default(TEST_MNEMONIC).unwrap();
        let sig = keypair.sign(b"original");
        assert!(!keypair.verify(b"tampered", &sig));
    }

    #[test]
    fn wrong_key_fails_verification() {
        let signer = DocKeypair::from_mnemonic_default(TEST_MNEMONIC).unwrap();
        let other = DocKeypair::from_seed(&[7u8; 32]);
        let sig = signer.sign(b"message");
        assert!(!other.verify(b"message", &sig));
    }

    #[test]
    fn garbage_signature_bytes_fail_closed() {
        let keypair = DocKeypair::from_mnemonic_default(TEST_MNEMONIC).unwrap();
        assert!(!verify_signature(
            &keypair.public_key_bytes(),
            b"message",
            &[0u8; 64]
        ));
    }

    #[test]
    fn generated_mnemonics_have_requested_length() {
        for (words, expected) in [(12u32, 12usize), (18, 18), (24, 24), (99, 24)] {
            let phrase = DocKeypair::generate_mnemonic(words);
            assert_eq!(phrase.split_whitespace().count(), expected);
            // And they derive.
            assert!(DocKeypair::from_mnemonic_default(&phrase).is_ok());
        }
    }

    #[test]
    fn debug_does_not_leak_secret() {
        let keypair = DocKeypair::from_seed(&[1u8; 32]);
        let debug = format!("{keypair:?}");
        assert!(debug.starts_with("DocKeypair(pub="));
        assert!(!debug.contains("secret"));
    }
}
