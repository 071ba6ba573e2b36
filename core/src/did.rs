//! # DID Key URIs
//!
//! Signature records identify the signing key with a DID-style URI:
//!
//! ```text
//! did:veridoc:<address>
//! ```
//!
//! The URI is a stable string identifier, nothing more. This crate never
//! resolves it against a network or registry; it exists so that a record
//! names its key in a form other identity tooling already understands.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::address::{decode, Address};
use crate::config::DID_METHOD;

/// Errors that can occur while parsing a key URI.
#[derive(Debug, Error)]
pub enum KeyUriError {
    /// The string does not match `did:<method>:<identifier>`.
    #[error("invalid key URI format: {0}")]
    InvalidFormat(String),

    /// The method is not `veridoc`.
    #[error("unsupported DID method: expected '{DID_METHOD}', got '{0}'")]
    UnsupportedMethod(String),

    /// The identifier part is not a valid address.
    #[error("invalid address in key URI: {0}")]
    InvalidAddress(String),
}

/// A `did:veridoc:<address>` key identifier.
///
/// # Examples
///
/// ```
/// use veridoc::address::{encode, NetworkPrefix};
/// use veridoc::did::KeyUri;
///
/// let address = encode(&[5u8; 32], NetworkPrefix::identity()).unwrap();
/// let uri = KeyUri::for_address(&address);
/// assert!(uri.as_str().starts_with("did:veridoc:"));
/// assert_eq!(KeyUri::parse(uri.as_str()).unwrap(), uri);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyUri(String);

impl KeyUri {
    /// Build the key URI for an address.
    pub fn for_address(address: &Address) -> Self {
        Self(format!("did:{}:{}", DID_METHOD, address.text()))
    }

    /// Parse and validate a key URI string.
    ///
    /// Validates the three-part shape, the method, and that the identifier
    /// decodes as an address (checksum included).
    pub fn parse(uri: &str) -> Result<Self, KeyUriError> {
        let parts: Vec<&str> = uri.splitn(3, ':').collect();
        if parts.len() != 3 {
            return Err(KeyUriError::InvalidFormat(
                "expected 'did:<method>:<address>'".into(),
            ));
        }
        if parts[0] != "did" {
            return Err(KeyUriError::InvalidFormat(format!(
                "expected 'did' scheme, got '{}'",
                parts[0]
            )));
        }
        if parts[1] != DID_METHOD {
            return Err(KeyUriError::UnsupportedMethod(parts[1].to_string()));
        }
        decode(parts[2]).map_err(|e| KeyUriError::InvalidAddress(e.to_string()))?;
        Ok(Self(uri.to_string()))
    }

    /// The full URI string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The address part of the URI.
    pub fn address_text(&self) -> &str {
        self.0.rsplit(':').next().expect("constructed with two colons")
    }
}

impl fmt::Display for KeyUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::{encode, NetworkPrefix};

    fn some_address() -> Address {
        encode(&[0x42u8; 32], NetworkPrefix::identity()).unwrap()
    }

    #[test]
    fn uri_format() {
        let address = some_address();
        let uri = KeyUri::for_address(&address);
        assert_eq!(uri.as_str(), format!("did:veridoc:{}", address.text()));
        assert_eq!(uri.address_text(), address.text());
    }

    #[test]
    fn parse_roundtrip() {
        let uri = KeyUri::for_address(&some_address());
        assert_eq!(KeyUri::parse(uri.as_str()).unwrap(), uri);
    }

    #[test]
    fn wrong_scheme_rejected() {
        let err = KeyUri::parse("urn:veridoc:whatever").unwrap_err();
        assert!(matches!(err, KeyUriError::InvalidFormat(_)));
        assert!(KeyUri::parse("no-colons-here").is_err());
    }

    #[test]
    fn wrong_method_rejected() {
        let address = some_address();
        let err = KeyUri::parse(&format!("did:ethr:{}", address.text())).unwrap_err();
        assert!(matches!(err, KeyUriError::UnsupportedMethod(_)));
    }

    #[test]
    fn invalid_address_rejected() {
        let err = KeyUri::parse("did:veridoc:not-an-address").unwrap_err();
        assert!(matches!(err, KeyUriError::InvalidAddress(_)));
    }

    #[test]
    fn serde_is_transparent() {
        let uri = KeyUri::for_address(&some_address());
        let json = serde_json::to_string(&uri).unwrap();
        assert_eq!(json, format!("\"{}\"", uri.as_str()));
        let back: KeyUri = serde_json::from_str(&json).unwrap();
        assert_eq!(back, uri);
    }
}
