//! # Network Prefix Registry
//!
//! Every address carries a network prefix: a 14-bit value that selects
//! which network the encoded key belongs to. The registry below is the
//! process-wide source of truth for the prefixes this build understands.
//! It is initialized lazily on first use and never mutated afterwards;
//! numeric values are unique within it (asserted at initialization).
//!
//! Values below 64 encode as a single leading byte; values in `64..16384`
//! use the packed two-byte form handled by [`super::codec`].

use once_cell::sync::Lazy;
use std::fmt;

use crate::config::{IDENTITY_NETWORK, SINGLE_BYTE_PREFIX_LIMIT};

/// A registry entry: the name and numeric prefix value of one network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NetworkPrefix {
    name: &'static str,
    value: u16,
}

/// All networks this build can encode for or decode from.
///
/// The numeric values follow the shared SS58 registry so that addresses
/// interoperate with the wider ecosystem's tooling.
static REGISTRY: Lazy<Vec<NetworkPrefix>> = Lazy::new(|| {
    let entries = vec![
        NetworkPrefix { name: "polkadot", value: 0 },
        NetworkPrefix { name: "kusama", value: 2 },
        NetworkPrefix { name: IDENTITY_NETWORK, value: 38 },
        NetworkPrefix { name: "substrate", value: 42 },
        NetworkPrefix { name: "aventus", value: 65 },
    ];

    // Registry invariant: numeric values are unique.
    for (i, a) in entries.iter().enumerate() {
        for b in &entries[..i] {
            assert_ne!(a.value, b.value, "duplicate network prefix value {}", a.value);
            assert_ne!(a.name, b.name, "duplicate network name {}", a.name);
        }
    }
    entries
});

impl NetworkPrefix {
    /// Human-readable network name, e.g. `"substrate"`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Numeric prefix value (14 bits).
    pub fn value(&self) -> u16 {
        self.value
    }

    /// Number of prefix bytes this network occupies in an encoded address.
    pub fn prefix_len(&self) -> usize {
        if self.value < SINGLE_BYTE_PREFIX_LIMIT {
            1
        } else {
            2
        }
    }

    /// Look up a network by name (case-sensitive).
    pub fn by_name(name: &str) -> Option<NetworkPrefix> {
        REGISTRY.iter().copied().find(|n| n.name == name)
    }

    /// Look up a network by its numeric prefix value.
    pub fn by_value(value: u16) -> Option<NetworkPrefix> {
        REGISTRY.iter().copied().find(|n| n.value == value)
    }

    /// The fixed network signer addresses are encoded under.
    pub fn identity() -> NetworkPrefix {
        Self::by_name(IDENTITY_NETWORK)
            .expect("identity network is always registered")
    }

    /// All registered networks, in registry order.
    pub fn all() -> &'static [NetworkPrefix] {
        REGISTRY.as_slice()
    }
}

impl fmt::Display for NetworkPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_values_are_unique() {
        let all = NetworkPrefix::all();
        for (i, a) in all.iter().enumerate() {
            for b in &all[..i] {
                assert_ne!(a.value(), b.value());
            }
        }
    }

    #[test]
    fn lookup_by_name_and_value_agree() {
        for network in NetworkPrefix::all() {
            assert_eq!(NetworkPrefix::by_name(network.name()), Some(*network));
            assert_eq!(NetworkPrefix::by_value(network.value()), Some(*network));
        }
    }

    #[test]
    fn unknown_lookups_return_none() {
        assert!(NetworkPrefix::by_name("no-such-network").is_none());
        assert!(NetworkPrefix::by_value(63).is_none());
    }

    #[test]
    fn identity_network_is_registered() {
        let identity = NetworkPrefix::identity();
        assert_eq!(identity.name(), IDENTITY_NETWORK);
        assert_eq!(identity.prefix_len(), 1);
    }

    #[test]
    fn prefix_len_switches_at_64() {
        assert_eq!(NetworkPrefix::by_value(42).unwrap().prefix_len(), 1);
        assert_eq!(NetworkPrefix::by_value(65).unwrap().prefix_len(), 2);
    }
}
