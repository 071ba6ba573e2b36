//! # Address Encoding and Decoding
//!
//! The codec itself: (network, 32-byte public key) to checksummed base-58
//! text and back.
//!
//! ## Wire format
//!
//! ```text
//! base58( prefix_bytes ++ public_key[32] ++ checksum[2] )
//!
//! prefix_bytes:  value < 64      -> [value]
//!                value < 16384   -> packed two-byte form, first byte in 64..128
//! checksum:      blake2b-512("SS58PRE" ++ prefix_bytes ++ public_key)[..2]
//! ```
//!
//! The two-byte prefix packs the 14-bit value as: first byte carries bits
//! 2..8 of the lower byte (marked with `0b0100_0000`), second byte carries
//! the upper byte in its low six bits and bits 0..2 of the lower byte in
//! its high two bits. First bytes in `128..256` are reserved and rejected.
//!
//! Decoding validates in order: base-58 shape, prefix/length shape,
//! registry membership, checksum. Each stage has its own error variant so
//! callers can tell a typo from an unknown network from tampering.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::address::network::NetworkPrefix;
use crate::config::{
    CHECKSUM_LENGTH, CHECKSUM_PREIMAGE_TAG, PUBLIC_KEY_LENGTH, SINGLE_BYTE_PREFIX_LIMIT,
};
use crate::crypto::hash::blake2b_512_multi;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors produced by the address codec.
#[derive(Debug, Error)]
pub enum AddressError {
    /// The public key handed to [`encode`] is not exactly 32 bytes.
    #[error("invalid public key: expected {expected} bytes, got {got}")]
    InvalidInput {
        /// Required key length.
        expected: usize,
        /// Length actually supplied.
        got: usize,
    },

    /// The address text is not base-58, or decodes to an impossible shape.
    #[error("malformed address: {0}")]
    MalformedAddress(String),

    /// The prefix decodes cleanly but matches no registered network.
    #[error("unknown network prefix value: {0}")]
    UnknownNetwork(u16),

    /// The trailing checksum does not match a recomputation over the
    /// decoded prefix and key. Typo or tampering.
    #[error("address checksum mismatch")]
    ChecksumMismatch,
}

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// A decoded (or freshly encoded) address.
///
/// Immutable once constructed. `text` is always the canonical base-58
/// encoding of the other fields; no constructor lets an address exist
/// whose checksum disagrees with its own prefix and key.
///
/// # Examples
///
/// ```
/// use veridoc::address::{encode, decode, NetworkPrefix};
///
/// let key = [7u8; 32];
/// let network = NetworkPrefix::by_name("substrate").unwrap();
/// let address = encode(&key, network).unwrap();
/// let back = decode(address.text()).unwrap();
/// assert_eq!(back.public_key(), &key);
/// assert_eq!(back.network(), network);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Address {
    network: NetworkPrefix,
    public_key: [u8; PUBLIC_KEY_LENGTH],
    checksum: [u8; CHECKSUM_LENGTH],
    text: String,
}

impl Address {
    /// The network this address belongs to.
    pub fn network(&self) -> NetworkPrefix {
        self.network
    }

    /// The 32-byte public key the address encodes.
    pub fn public_key(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.public_key
    }

    /// The checksum bytes embedded in the address.
    pub fn checksum(&self) -> &[u8; CHECKSUM_LENGTH] {
        &self.checksum
    }

    /// The canonical base-58 text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consume the address, returning the text.
    pub fn into_text(self) -> String {
        self.text
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({} on {})", self.text, self.network.name())
    }
}

impl Serialize for Address {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        decode(&text).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Prefix byte packing
// ---------------------------------------------------------------------------

/// Encode a registered prefix value to its leading byte(s).
fn prefix_bytes(value: u16) -> Vec<u8> {
    if value < SINGLE_BYTE_PREFIX_LIMIT {
        vec![value as u8]
    } else {
        let first = (((value & 0b0000_0000_1111_1100) >> 2) as u8) | 0b0100_0000;
        let second = ((value >> 8) as u8) | (((value & 0b0000_0000_0000_0011) as u8) << 6);
        vec![first, second]
    }
}

/// Parse the leading prefix byte(s) of a decoded address buffer.
///
/// Returns `(consumed_bytes, prefix_value)`.
fn parse_prefix(data: &[u8]) -> Result<(usize, u16), AddressError> {
    match data.first().copied() {
        None => Err(AddressError::MalformedAddress("empty address".into())),
        Some(first @ 0..=63) => Ok((1, first as u16)),
        Some(first @ 64..=127) => {
            let second = *data.get(1).ok_or_else(|| {
                AddressError::MalformedAddress("truncated two-byte prefix".into())
            })?;
            let lower = (((first & 0b0011_1111) as u16) << 2) | ((second >> 6) as u16);
            let upper = (second & 0b0011_1111) as u16;
            Ok((2, lower | (upper << 8)))
        }
        Some(first) => Err(AddressError::MalformedAddress(format!(
            "reserved prefix byte 0x{first:02x}"
        ))),
    }
}

/// Checksum over the tagged preimage, truncated to the configured length.
fn checksum_of(prefix: &[u8], public_key: &[u8]) -> [u8; CHECKSUM_LENGTH] {
    let digest = blake2b_512_multi(&[CHECKSUM_PREIMAGE_TAG, prefix, public_key]);
    let mut checksum = [0u8; CHECKSUM_LENGTH];
    checksum.copy_from_slice(&digest[..CHECKSUM_LENGTH]);
    checksum
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Encode a 32-byte public key as an address on the given network.
///
/// The only failure is a key that is not exactly 32 bytes
/// ([`AddressError::InvalidInput`]).
pub fn encode(public_key: &[u8], network: NetworkPrefix) -> Result<Address, AddressError> {
    if public_key.len() != PUBLIC_KEY_LENGTH {
        return Err(AddressError::InvalidInput {
            expected: PUBLIC_KEY_LENGTH,
            got: public_key.len(),
        });
    }

    let prefix = prefix_bytes(network.value());
    let checksum = checksum_of(&prefix, public_key);

    let mut buffer = Vec::with_capacity(prefix.len() + PUBLIC_KEY_LENGTH + CHECKSUM_LENGTH);
    buffer.extend_from_slice(&prefix);
    buffer.extend_from_slice(public_key);
    buffer.extend_from_slice(&checksum);

    let mut key = [0u8; PUBLIC_KEY_LENGTH];
    key.copy_from_slice(public_key);

    Ok(Address {
        network,
        public_key: key,
        checksum,
        text: bs58::encode(&buffer).into_string(),
    })
}

/// Decode and validate an address string.
///
/// Validation order: base-58 decoding and length shape
/// ([`AddressError::MalformedAddress`]), registry membership
/// ([`AddressError::UnknownNetwork`]), then byte-for-byte checksum
/// comparison ([`AddressError::ChecksumMismatch`]).
pub fn decode(text: &str) -> Result<Address, AddressError> {
    let bytes = bs58::decode(text)
        .into_vec()
        .map_err(|e| AddressError::MalformedAddress(e.to_string()))?;

    let (prefix_len, value) = parse_prefix(&bytes)?;

    let expected_len = prefix_len + PUBLIC_KEY_LENGTH + CHECKSUM_LENGTH;
    if bytes.len() != expected_len {
        return Err(AddressError::MalformedAddress(format!(
            "expected {expected_len} bytes, got {}",
            bytes.len()
        )));
    }

    let network =
        NetworkPrefix::by_value(value).ok_or(AddressError::UnknownNetwork(value))?;

    let (body, stored_checksum) = bytes.split_at(prefix_len + PUBLIC_KEY_LENGTH);
    let (prefix, key_bytes) = body.split_at(prefix_len);

    let computed = checksum_of(prefix, key_bytes);
    if stored_checksum != computed {
        return Err(AddressError::ChecksumMismatch);
    }

    let mut public_key = [0u8; PUBLIC_KEY_LENGTH];
    public_key.copy_from_slice(key_bytes);

    Ok(Address {
        network,
        public_key,
        checksum: computed,
        // Re-encode rather than echo the input so `text` is canonical by
        // construction.
        text: bs58::encode(&bytes).into_string(),
    })
}

/// Granular validation result for caller-facing address checks.
///
/// Exists so a caller can distinguish "not an address at all" from
/// "well-formed but tampered or mistyped" without matching on errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AddressCheck {
    /// Base-58 decoding, length shape, and network resolution all passed.
    pub is_valid_format: bool,
    /// The embedded checksum matches a recomputation. Only meaningful when
    /// the format is valid.
    pub is_valid_checksum: bool,
    /// Both of the above.
    pub is_valid: bool,
}

/// Validate an address string without failing hard.
///
/// An unknown network counts as a format failure: the text is not an
/// address of any network this build knows about.
pub fn validate(text: &str) -> AddressCheck {
    match decode(text) {
        Ok(_) => AddressCheck {
            is_valid_format: true,
            is_valid_checksum: true,
            is_valid: true,
        },
        Err(AddressError::ChecksumMismatch) => AddressCheck {
            is_valid_format: true,
            is_valid_checksum: false,
            is_valid: false,
        },
        Err(_) => AddressCheck {
            is_valid_format: false,
            is_valid_checksum: false,
            is_valid: false,
        },
    }
}

/// Re-encode an address under a different network.
///
/// Decodes the input (propagating its errors verbatim) and encodes the
/// recovered public key under `target`. The re-encode step cannot fail:
/// the decoded key already satisfies the length precondition.
pub fn convert(text: &str, target: NetworkPrefix) -> Result<Address, AddressError> {
    let address = decode(text)?;
    encode(address.public_key(), target)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
