//! Error types for secret URI, path and address handling.

use core::fmt;

/// Broad classification shared by every error in the workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Input does not follow the expected grammar.
    Format,
    /// Bytes or text could not be decoded into the expected shape.
    Decoding,
    /// Phrase is neither hex, SS58 nor a valid mnemonic.
    UnsupportedPhrase,
    /// Requested data cannot be produced from the available key material.
    UnavailableData,
    /// Network name is not registered.
    UnknownNetwork,
    /// Internal invariant was violated.
    Assertion,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Format => "format",
            Self::Decoding => "decoding",
            Self::UnsupportedPhrase => "unsupported phrase",
            Self::UnavailableData => "unavailable data",
            Self::UnknownNetwork => "unknown network",
            Self::Assertion => "assertion",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while parsing URIs, junctions and addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Secret URI does not match the `<phrase><path>///<password>` grammar.
    InvalidUri,
    /// Secret URI has no phrase component.
    EmptyPhrase,
    /// Junction text is not a single non-empty segment.
    InvalidJunction(String),
    /// Derivation path is not a sequence of `/soft` and `//hard` segments.
    InvalidPath(String),
    /// Hex text could not be decoded.
    InvalidHex,
    /// Hex secret decoded to a length other than 32 or 64 bytes.
    InvalidSecretLength(usize),
    /// Text is not valid base58.
    InvalidBase58,
    /// Decoded SS58 payload is shorter than version, address and checksum.
    Ss58TooShort {
        /// Minimum number of bytes required.
        expected: usize,
        /// Number of bytes decoded.
        actual: usize,
    },
    /// SS58 version byte does not belong to the expected network.
    Ss58Version {
        /// Version byte of the network.
        expected: u8,
        /// Version byte found in the address.
        actual: u8,
    },
    /// SS58 checksum does not match the address.
    Ss58Checksum,
    /// Checksum byte range is empty or exceeds the 64-byte digest.
    InvalidChecksumRange {
        /// First checksum byte.
        start: usize,
        /// One past the last checksum byte.
        end: usize,
    },
    /// No network registered under this name.
    UnknownNetwork(String),
    /// Value needs more than 8 bytes in compact form.
    CompactOverflow(u64),
    /// A built-in pattern failed to compile.
    Pattern(String),
}

impl Error {
    /// Returns the broad classification of this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidUri
            | Self::EmptyPhrase
            | Self::InvalidJunction(_)
            | Self::InvalidPath(_)
            | Self::InvalidChecksumRange { .. } => ErrorKind::Format,
            Self::InvalidHex
            | Self::InvalidSecretLength(_)
            | Self::InvalidBase58
            | Self::Ss58TooShort { .. }
            | Self::Ss58Version { .. }
            | Self::Ss58Checksum => ErrorKind::Decoding,
            Self::UnknownNetwork(_) => ErrorKind::UnknownNetwork,
            Self::CompactOverflow(_) | Self::Pattern(_) => ErrorKind::Assertion,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidUri => write!(f, "invalid secret URI format"),
            Self::EmptyPhrase => write!(f, "secret URI phrase is empty"),
            Self::InvalidJunction(text) => write!(f, "invalid junction \"{text}\""),
            Self::InvalidPath(text) => write!(f, "invalid derivation path \"{text}\""),
            Self::InvalidHex => write!(f, "invalid hex encoding"),
            Self::InvalidSecretLength(n) => {
                write!(f, "invalid secret length {n}, must be 32 or 64 bytes")
            }
            Self::InvalidBase58 => write!(f, "invalid base58 encoding"),
            Self::Ss58TooShort { expected, actual } => {
                write!(f, "SS58 payload too short: expected at least {expected} bytes, got {actual}")
            }
            Self::Ss58Version { expected, actual } => {
                write!(f, "SS58 version mismatch: expected {expected}, got {actual}")
            }
            Self::Ss58Checksum => write!(f, "SS58 checksum mismatch"),
            Self::InvalidChecksumRange { start, end } => {
                write!(f, "invalid checksum range {start}..{end}")
            }
            Self::UnknownNetwork(name) => write!(f, "unknown network \"{name}\""),
            Self::CompactOverflow(v) => write!(f, "value {v} overflows compact encoding"),
            Self::Pattern(msg) => write!(f, "pattern error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<hex::FromHexError> for Error {
    fn from(_: hex::FromHexError) -> Self {
        Self::InvalidHex
    }
}

impl From<&regex::Error> for Error {
    fn from(err: &regex::Error) -> Self {
        Self::Pattern(err.to_string())
    }
}

impl From<bs58::decode::Error> for Error {
    fn from(_: bs58::decode::Error) -> Self {
        Self::InvalidBase58
    }
}

/// Result type alias for this crate.
pub type Result<T> = core::result::Result<T, Error>;
