//! Error types for sr25519 keyring operations.

use core::fmt;

use srkeyring_core::ErrorKind;

/// Errors that can occur during keyring operations.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// URI, path or address error.
    Core(srkeyring_core::Error),
    /// Phrase is not a valid mnemonic.
    Mnemonic(bip39::Error),
    /// Invalid word count for mnemonic.
    InvalidWordCount(usize),
    /// Signer rejected key, signature or proof bytes.
    Signature(schnorrkel::SignatureError),
    /// Hard junction applied to a public key.
    HardDerivationFromPublic,
    /// Keyring holds no secret key.
    NoSecretKey,
    /// Seed cannot be recovered for this keyring.
    SeedUnavailable,
    /// Keyring was not built from a mnemonic.
    NotMnemonic,
}

impl Error {
    /// Returns the broad classification of this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Core(e) => e.kind(),
            Self::Mnemonic(_) => ErrorKind::UnsupportedPhrase,
            Self::InvalidWordCount(_) => ErrorKind::Format,
            Self::Signature(_) => ErrorKind::Decoding,
            Self::HardDerivationFromPublic
            | Self::NoSecretKey
            | Self::SeedUnavailable
            | Self::NotMnemonic => ErrorKind::UnavailableData,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Core(e) => write!(f, "{e}"),
            Self::Mnemonic(e) => write!(f, "unsupported phrase: {e}"),
            Self::InvalidWordCount(n) => {
                write!(f, "invalid word count {n}, must be 12, 15, 18, 21, or 24")
            }
            Self::Signature(e) => write!(f, "signature error: {e}"),
            Self::HardDerivationFromPublic => {
                write!(f, "hard derivation requires a secret key")
            }
            Self::NoSecretKey => write!(f, "private key not available"),
            Self::SeedUnavailable => write!(f, "seed not available"),
            Self::NotMnemonic => write!(f, "mnemonic not available"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Core(e) => Some(e),
            Self::Mnemonic(e) => Some(e),
            Self::InvalidWordCount(_)
            | Self::Signature(_)
            | Self::HardDerivationFromPublic
            | Self::NoSecretKey
            | Self::SeedUnavailable
            | Self::NotMnemonic => None,
        }
    }
}

impl From<srkeyring_core::Error> for Error {
    fn from(err: srkeyring_core::Error) -> Self {
        Self::Core(err)
    }
}

impl From<bip39::Error> for Error {
    fn from(err: bip39::Error) -> Self {
        Self::Mnemonic(err)
    }
}

impl From<schnorrkel::SignatureError> for Error {
    fn from(err: schnorrkel::SignatureError) -> Self {
        Self::Signature(err)
    }
}

/// Result type alias for this crate.
pub type Result<T> = core::result::Result<T, Error>;
