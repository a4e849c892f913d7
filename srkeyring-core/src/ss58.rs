//! SS58 address encoding.
//!
//! An address is `base58(version ‖ address ‖ checksum)` where the checksum is
//! a slice of `BLAKE2b-512("SS58PRE" ‖ preimage)`. Decoding is strict: the
//! version byte, the length and every checksum byte must match.

use crate::error::{Error, Result};
use crate::hash::blake2_512;
use crate::network::Network;

/// Domain separator hashed in front of every checksum preimage.
const SS58_PREFIX: &[u8] = b"SS58PRE";

/// Raw address length.
pub const ADDRESS_LEN: usize = 32;

/// What the checksum digest covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Ss58Checksum {
    /// Version byte and address.
    #[default]
    Standard,
    /// Address only.
    AccountId,
}

fn checksum(address: &[u8; ADDRESS_LEN], network: &Network, kind: Ss58Checksum) -> [u8; 64] {
    let mut preimage = Vec::with_capacity(SS58_PREFIX.len() + 1 + ADDRESS_LEN);
    preimage.extend_from_slice(SS58_PREFIX);
    if kind == Ss58Checksum::Standard {
        preimage.push(network.version());
    }
    preimage.extend_from_slice(address);
    blake2_512(&preimage)
}

/// Encode a 32-byte address for `network`.
pub fn encode(address: &[u8; ADDRESS_LEN], network: &Network, kind: Ss58Checksum) -> String {
    let digest = checksum(address, network, kind);

    let mut data = Vec::with_capacity(1 + ADDRESS_LEN + network.checksum_len());
    data.push(network.version());
    data.extend_from_slice(address);
    data.extend_from_slice(&digest[network.checksum_range()]);

    bs58::encode(data).into_string()
}

/// Decode an SS58 address and check it belongs to `network`.
///
/// # Errors
///
/// - [`Error::InvalidBase58`] if the text is not base58.
/// - [`Error::Ss58TooShort`] if version, address and checksum do not fit.
/// - [`Error::Ss58Version`] if the version byte differs from the network's.
/// - [`Error::Ss58Checksum`] if the trailing bytes are not the checksum.
pub fn decode(text: &str, network: &Network, kind: Ss58Checksum) -> Result<[u8; ADDRESS_LEN]> {
    let data = bs58::decode(text).into_vec()?;

    let min_len = 1 + ADDRESS_LEN + network.checksum_len();
    if data.len() < min_len {
        return Err(Error::Ss58TooShort {
            expected: min_len,
            actual: data.len(),
        });
    }

    if data[0] != network.version() {
        return Err(Error::Ss58Version {
            expected: network.version(),
            actual: data[0],
        });
    }

    let mut address = [0u8; ADDRESS_LEN];
    address.copy_from_slice(&data[1..=ADDRESS_LEN]);

    let digest = checksum(&address, network, kind);
    if data[1 + ADDRESS_LEN..] != digest[network.checksum_range()] {
        return Err(Error::Ss58Checksum);
    }

    Ok(address)
}
