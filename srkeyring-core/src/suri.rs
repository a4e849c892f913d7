//! Secret URI parsing.
//!
//! A secret URI has the shape `<phrase><path>///<password>`:
//!
//! - `phrase` is a hex seed, an SS58 address or a BIP39 mnemonic,
//! - `path` is zero or more `/soft` or `//hard` junctions,
//! - `///password` is optional and always last.
//!
//! ```
//! use srkeyring_core::{Network, SecretUri};
//!
//! let uri = SecretUri::parse("0x7202a4eba69bb283e8e9a3f5f6f0fc64bb02e6d20fb4b6bde13caec148f2cca7//joe/1///pass", &Network::substrate()).unwrap();
//! assert_eq!(uri.path(), "//joe/1");
//! assert_eq!(uri.password(), "pass");
//! ```

use core::fmt;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;
use zeroize::Zeroizing;

use crate::encoding::decode_hex;
use crate::error::{Error, Result};
use crate::junction::DerivationPath;
use crate::network::Network;
use crate::ss58::{self, Ss58Checksum};

/// Length of a mini secret key.
pub const SEED_LEN: usize = 32;

static SURI_RE: LazyLock<core::result::Result<Regex, regex::Error>> = LazyLock::new(|| {
    Regex::new(r"^(?P<phrase>[\d\w ]+)?(?P<path>(//?[^/]+)*)(///(?P<password>.*))?$")
});

/// How a secret URI phrase was interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhraseType {
    /// Hex-encoded 32-byte seed (or 64-byte secret whose head is used).
    SecretHex,
    /// SS58 address, public material only.
    Ss58Public,
    /// BIP39 mnemonic.
    Mnemonic,
    /// Raw public key bytes supplied without a URI.
    RawPublic,
}

impl PhraseType {
    /// Check if this phrase type carries private material.
    #[inline]
    #[must_use]
    pub const fn is_private(self) -> bool {
        matches!(self, Self::SecretHex | Self::Mnemonic)
    }
}

impl fmt::Display for PhraseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::SecretHex => "secret hex",
            Self::Ss58Public => "ss58 public",
            Self::Mnemonic => "mnemonic",
            Self::RawPublic => "raw public",
        };
        f.write_str(name)
    }
}

/// Result of classifying a phrase.
pub enum Phrase {
    /// 32-byte seed decoded from hex.
    SecretHex(Zeroizing<[u8; SEED_LEN]>),
    /// Public key decoded from an SS58 address.
    Ss58Public([u8; ss58::ADDRESS_LEN]),
    /// Anything else; must be a valid mnemonic.
    Mnemonic,
}

impl Phrase {
    /// The phrase type tag.
    pub const fn phrase_type(&self) -> PhraseType {
        match self {
            Self::SecretHex(_) => PhraseType::SecretHex,
            Self::Ss58Public(_) => PhraseType::Ss58Public,
            Self::Mnemonic => PhraseType::Mnemonic,
        }
    }
}

impl fmt::Debug for Phrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SecretHex(_) => f.write_str("SecretHex([REDACTED])"),
            Self::Ss58Public(public) => {
                f.debug_tuple("Ss58Public").field(&hex::encode(public)).finish()
            }
            Self::Mnemonic => f.write_str("Mnemonic"),
        }
    }
}

/// Decode a hex secret into a 32-byte seed.
///
/// Returns `Ok(None)` when the text is not hex at all. A 64-byte secret is
/// accepted and only its first 32 bytes are kept; the rest is ignored.
///
/// # Errors
///
/// Returns [`Error::InvalidSecretLength`] for hex of any other length.
pub fn seed_from_hex(phrase: &str, prefix: &str) -> Result<Option<Zeroizing<[u8; SEED_LEN]>>> {
    let Ok(bytes) = decode_hex(phrase, prefix) else {
        return Ok(None);
    };
    let bytes = Zeroizing::new(bytes);
    match bytes.len() {
        SEED_LEN | 64 => {
            let mut seed = Zeroizing::new([0u8; SEED_LEN]);
            seed.copy_from_slice(&bytes[..SEED_LEN]);
            Ok(Some(seed))
        }
        n => Err(Error::InvalidSecretLength(n)),
    }
}

/// A parsed secret URI bound to a network.
#[derive(Clone)]
pub struct SecretUri {
    phrase: Zeroizing<String>,
    path: String,
    password: Zeroizing<String>,
    network: Network,
}

impl SecretUri {
    /// Parse a secret URI.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidUri`] if the text does not follow the grammar.
    /// - [`Error::EmptyPhrase`] if there is no phrase.
    pub fn parse(suri: &str, network: &Network) -> Result<Self> {
        let re = SURI_RE.as_ref().map_err(Error::from)?;
        let caps = re.captures(suri).ok_or(Error::InvalidUri)?;

        let phrase = caps.name("phrase").map_or("", |m| m.as_str());
        if phrase.is_empty() {
            return Err(Error::EmptyPhrase);
        }

        Ok(Self {
            phrase: Zeroizing::new(phrase.into()),
            path: caps.name("path").map_or("", |m| m.as_str()).into(),
            password: Zeroizing::new(caps.name("password").map_or("", |m| m.as_str()).into()),
            network: network.clone(),
        })
    }

    /// The seed phrase, hex secret or SS58 address.
    ///
    /// **Security Warning**: this may reconstruct every key of the URI.
    #[inline]
    #[must_use]
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    /// Raw, unsplit derivation path.
    #[inline]
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Mnemonic password, empty when absent.
    #[inline]
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Network the URI is interpreted against.
    #[inline]
    #[must_use]
    pub const fn network(&self) -> &Network {
        &self.network
    }

    /// Split the path into junctions.
    pub fn derivation_path(&self) -> Result<DerivationPath> {
        DerivationPath::parse(&self.path)
    }

    /// Classify the phrase: hex seed first, then SS58 address, else mnemonic.
    ///
    /// A mnemonic result is not validated here; that happens when the seed
    /// is computed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSecretLength`] if the phrase is hex of the
    /// wrong length. There is no fallback to the later rules in that case.
    pub fn classify(&self) -> Result<Phrase> {
        let phrase = if let Some(seed) = seed_from_hex(&self.phrase, self.network.hex_prefix())? {
            Phrase::SecretHex(seed)
        } else if let Ok(public) = ss58::decode(&self.phrase, &self.network, Ss58Checksum::Standard)
        {
            Phrase::Ss58Public(public)
        } else {
            Phrase::Mnemonic
        };
        debug!(
            network = %self.network,
            phrase_type = %phrase.phrase_type(),
            "classified secret phrase"
        );
        Ok(phrase)
    }
}

impl fmt::Debug for SecretUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretUri")
            .field("phrase", &"[REDACTED]")
            .field("path", &self.path)
            .field("password", &"[REDACTED]")
            .field("network", &self.network.name())
            .finish()
    }
}
