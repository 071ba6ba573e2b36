//! # Protocol Configuration & Constants
//!
//! Every magic number in Veridoc lives here. The address format and the
//! sidecar schema are wire formats: a third party must be able to reproduce
//! them byte for byte from this file and the module docs alone, so changing
//! any of these values is a breaking change to every address and every
//! signature record already in the wild.

// ---------------------------------------------------------------------------
// Address Format
// ---------------------------------------------------------------------------

/// ASCII tag prepended to the checksum preimage of every address.
///
/// The checksum is computed as `blake2b-512(CHECKSUM_PREIMAGE_TAG ++ prefix
/// ++ public_key)`, truncated to [`CHECKSUM_LENGTH`] bytes. The tag keeps
/// address checksums out of the image of any other blake2b use in the
/// ecosystem.
pub const CHECKSUM_PREIMAGE_TAG: &[u8] = b"SS58PRE";

/// Number of checksum bytes appended before base-58 encoding.
///
/// Two bytes is the established convention for 32-byte account keys; one
/// flipped character in an address has a 1-in-65536 chance of slipping past.
pub const CHECKSUM_LENGTH: usize = 2;

/// Public key length in bytes. Ristretto compressed points are 32 bytes.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Sr25519 signature length. Always 64 bytes.
pub const SIGNATURE_LENGTH: usize = 64;

/// Highest network prefix value that still fits in a single prefix byte.
/// Values in `64..16384` use the packed two-byte form.
pub const SINGLE_BYTE_PREFIX_LIMIT: u16 = 64;

// ---------------------------------------------------------------------------
// Signing
// ---------------------------------------------------------------------------

/// Name of the signature scheme, as reported in verification results.
pub const SIGNING_ALGORITHM: &str = "Sr25519";

/// Schnorrkel signing context.
///
/// `"substrate"` rather than anything project-specific: signatures produced
/// here verify under the same context the wider Sr25519 ecosystem uses, and
/// theirs verify here.
pub const SIGNING_CONTEXT: &[u8] = b"substrate";

/// Derivation path applied to the mnemonic-derived master key when the
/// caller does not supply one. Two hard junctions: the `did` namespace and
/// key index 0.
pub const DEFAULT_DERIVATION_PATH: &str = "//did//0";

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// DID method used in signer key URIs: `did:veridoc:<address>`.
pub const DID_METHOD: &str = "veridoc";

/// Name of the registry entry signer addresses are encoded under.
pub const IDENTITY_NETWORK: &str = "veridoc";

// ---------------------------------------------------------------------------
// Sidecar Files
// ---------------------------------------------------------------------------

/// File extension of signature sidecar files.
///
/// A sidecar lives next to the document it signs, with the same base name:
/// `report.pdf` is signed by `report.sig`. Lookup is a pure string
/// operation; no directory scan ever inspects file contents.
pub const SIDECAR_EXTENSION: &str = "sig";
