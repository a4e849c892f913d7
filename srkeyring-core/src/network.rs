//! Network address policies and the registry that names them.

use core::fmt;
use core::ops::Range;
use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// Length of the BLAKE2b-512 digest the checksum is sliced from.
const DIGEST_LEN: usize = 64;

/// Address and presentation policy of one network.
///
/// The name doubles as the signing context, so two networks with the same
/// version byte still produce incompatible signatures.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Network {
    name: String,
    version: u8,
    hex_prefix: String,
    checksum: Range<usize>,
}

impl Network {
    /// Substrate generic network name.
    pub const SUBSTRATE: &'static str = "substrate";
    /// Polkadot relay chain name.
    pub const POLKADOT: &'static str = "polkadot";
    /// Kusama relay chain name.
    pub const KUSAMA: &'static str = "kusama";

    /// Create a network policy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidChecksumRange`] if the checksum range is empty
    /// or reaches past the 64-byte digest.
    pub fn new(
        name: impl Into<String>,
        version: u8,
        hex_prefix: impl Into<String>,
        checksum: Range<usize>,
    ) -> Result<Self> {
        if checksum.start >= checksum.end || checksum.end > DIGEST_LEN {
            return Err(Error::InvalidChecksumRange {
                start: checksum.start,
                end: checksum.end,
            });
        }
        Ok(Self {
            name: name.into(),
            version,
            hex_prefix: hex_prefix.into(),
            checksum,
        })
    }

    fn standard(name: &str, version: u8) -> Self {
        Self {
            name: name.into(),
            version,
            hex_prefix: "0x".into(),
            checksum: 0..2,
        }
    }

    /// The generic Substrate network (version 42).
    pub fn substrate() -> Self {
        Self::standard(Self::SUBSTRATE, 42)
    }

    /// The Polkadot relay chain (version 0).
    pub fn polkadot() -> Self {
        Self::standard(Self::POLKADOT, 0)
    }

    /// The Kusama relay chain (version 2).
    pub fn kusama() -> Self {
        Self::standard(Self::KUSAMA, 2)
    }

    /// Network name, also used as the signing context.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// SS58 version byte.
    #[inline]
    #[must_use]
    pub const fn version(&self) -> u8 {
        self.version
    }

    /// Textual prefix of hex presentations, e.g. `0x`.
    #[inline]
    #[must_use]
    pub fn hex_prefix(&self) -> &str {
        &self.hex_prefix
    }

    /// Digest bytes kept as the SS58 checksum.
    #[inline]
    #[must_use]
    pub fn checksum_range(&self) -> Range<usize> {
        self.checksum.clone()
    }

    /// Number of checksum bytes in an SS58 address.
    #[inline]
    #[must_use]
    pub fn checksum_len(&self) -> usize {
        self.checksum.end - self.checksum.start
    }
}

impl Default for Network {
    fn default() -> Self {
        Self::substrate()
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Immutable set of known networks keyed by name.
///
/// Built once, then only read:
///
/// ```
/// use srkeyring_core::{Network, NetworkRegistry};
///
/// let registry = NetworkRegistry::default()
///     .with(Network::new("devnet", 7, "0x", 0..2).unwrap());
/// assert_eq!(registry.get("devnet").unwrap().version(), 7);
/// assert!(registry.get("nowhere").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkRegistry {
    networks: BTreeMap<String, Network>,
}

impl NetworkRegistry {
    /// Create a registry with no networks.
    pub fn empty() -> Self {
        Self {
            networks: BTreeMap::new(),
        }
    }

    /// Add a network, replacing any previous entry with the same name.
    pub fn with(mut self, network: Network) -> Self {
        self.networks.insert(network.name.clone(), network);
        self
    }

    /// Look up a network by name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNetwork`] if nothing is registered under `name`.
    pub fn get(&self, name: &str) -> Result<&Network> {
        self.networks
            .get(name)
            .ok_or_else(|| Error::UnknownNetwork(name.into()))
    }

    /// Whether a network is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.networks.contains_key(name)
    }

    /// Registered networks in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Network> {
        self.networks.values()
    }
}

impl Default for NetworkRegistry {
    /// Substrate, Polkadot and Kusama.
    fn default() -> Self {
        Self::empty()
            .with(Network::substrate())
            .with(Network::polkadot())
            .with(Network::kusama())
    }
}
