//! # Address Codec
//!
//! Checksummed, network-aware textual addresses for 32-byte public keys.
//!
//! An address is the base-58 encoding of `prefix ++ public_key ++ checksum`,
//! where the prefix identifies a network from the process-wide registry and
//! the checksum is a truncated blake2b digest over a tagged preimage (see
//! [`crate::config`]). The network prefix sits inside the checksum domain,
//! so the same key produces visibly and verifiably different addresses on
//! different networks.
//!
//! The codec owns no mutable state. The registry in [`network`] is
//! initialized once and read-only afterwards; every other operation is a
//! pure function over its inputs.

pub mod codec;
pub mod network;

pub use codec::{convert, decode, encode, validate, Address, AddressCheck, AddressError};
pub use network::NetworkPrefix;
