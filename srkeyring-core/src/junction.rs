//! Derivation junctions and paths.
//!
//! A path such as `//polkadot//0/account` is a sequence of junctions. A
//! segment written with two slashes is hard, one slash is soft. Each
//! junction carries a 32-byte chain code built from its text:
//!
//! - decimal `u64` text becomes its 8-byte little-endian encoding,
//! - anything else becomes `compact(len) ‖ utf8`,
//! - the result is zero-padded to 32 bytes, or hashed with BLAKE2b-256 when
//!   longer.

use core::fmt;
use core::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::compact;
use crate::error::{Error, Result};
use crate::hash::blake2_256;

/// Length of a junction chain code.
pub const CHAIN_CODE_LEN: usize = 32;

static SEGMENT_RE: LazyLock<core::result::Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"/(/?[^/]+)"));

static PATH_RE: LazyLock<core::result::Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^(//?[^/]+)*$"));

/// One step of a derivation path.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Junction {
    /// Segment text without the slashes.
    path: String,
    /// 32-byte chain code fed to the derivation operator.
    chain_code: [u8; CHAIN_CODE_LEN],
    /// Whether this step needs the secret key.
    hard: bool,
}

impl Junction {
    /// Parse a path segment, i.e. the text after the first slash of a
    /// `/x` or `//x` token. A single leading `/` marks the junction as hard.
    ///
    /// Use [`FromStr`] to read the `//x` / `/x` form written by `Display`.
    ///
    /// # Errors
    ///
    /// Returns an error only if the segment length cannot be compact-encoded.
    pub fn parse(segment: &str) -> Result<Self> {
        let (hard, text) = match segment.strip_prefix('/') {
            Some(rest) => (true, rest),
            None => (false, segment),
        };
        Ok(Self {
            path: text.into(),
            chain_code: chain_code(text)?,
            hard,
        })
    }

    /// Build a hard junction from raw text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidJunction`] if `text` is empty or contains `/`.
    pub fn hard(text: &str) -> Result<Self> {
        Self::from_text(text, true)
    }

    /// Build a soft junction from raw text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidJunction`] if `text` is empty or contains `/`.
    pub fn soft(text: &str) -> Result<Self> {
        Self::from_text(text, false)
    }

    fn from_text(text: &str, hard: bool) -> Result<Self> {
        if text.is_empty() || text.contains('/') {
            return Err(Error::InvalidJunction(text.into()));
        }
        Ok(Self {
            path: text.into(),
            chain_code: chain_code(text)?,
            hard,
        })
    }

    /// Segment text without the slashes.
    #[inline]
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The 32-byte chain code.
    #[inline]
    #[must_use]
    pub const fn chain_code(&self) -> &[u8; CHAIN_CODE_LEN] {
        &self.chain_code
    }

    /// Check if this is a hard junction.
    #[inline]
    #[must_use]
    pub const fn is_hard(&self) -> bool {
        self.hard
    }

    /// Check if this is a soft junction.
    #[inline]
    #[must_use]
    pub const fn is_soft(&self) -> bool {
        !self.hard
    }
}

fn chain_code(text: &str) -> Result<[u8; CHAIN_CODE_LEN]> {
    let source = match text.parse::<u64>() {
        Ok(n) => n.to_le_bytes().to_vec(),
        Err(_) => {
            let mut bytes = compact::encode(text.len() as u64)?;
            bytes.extend_from_slice(text.as_bytes());
            bytes
        }
    };

    if source.len() > CHAIN_CODE_LEN {
        return Ok(blake2_256(&source));
    }
    let mut code = [0u8; CHAIN_CODE_LEN];
    code[..source.len()].copy_from_slice(&source);
    Ok(code)
}

impl fmt::Display for Junction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hard {
            write!(f, "//{}", self.path)
        } else {
            write!(f, "/{}", self.path)
        }
    }
}

impl FromStr for Junction {
    type Err = Error;

    /// Read `//text` as hard and `/text` as soft.
    fn from_str(s: &str) -> Result<Self> {
        if let Some(text) = s.strip_prefix("//") {
            Self::hard(text)
        } else if let Some(text) = s.strip_prefix('/') {
            Self::soft(text)
        } else {
            Err(Error::InvalidJunction(s.into()))
        }
    }
}

/// An ordered list of junctions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct DerivationPath {
    junctions: Vec<Junction>,
}

impl DerivationPath {
    /// Create a path from junctions.
    pub fn new(junctions: Vec<Junction>) -> Self {
        Self { junctions }
    }

    /// Parse a raw path like `//joe/account/1`.
    ///
    /// Every `/segment` or `//segment` token becomes one junction, in order.
    /// The empty string is the empty path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if the text is anything other than a
    /// run of such tokens.
    pub fn parse(path: &str) -> Result<Self> {
        if !PATH_RE.as_ref().map_err(Error::from)?.is_match(path) {
            return Err(Error::InvalidPath(path.into()));
        }
        let segments = SEGMENT_RE.as_ref().map_err(Error::from)?;
        segments
            .captures_iter(path)
            .filter_map(|caps| caps.get(1))
            .map(|segment| Junction::parse(segment.as_str()))
            .collect::<Result<Vec<_>>>()
            .map(Self::new)
    }

    /// Junctions in application order.
    #[inline]
    pub fn junctions(&self) -> &[Junction] {
        &self.junctions
    }

    /// Number of junctions.
    #[inline]
    pub fn len(&self) -> usize {
        self.junctions.len()
    }

    /// Check if the path has no junctions.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.junctions.is_empty()
    }

    /// Check if the path is non-empty and every junction is hard.
    pub fn is_fully_hard(&self) -> bool {
        !self.is_empty() && self.junctions.iter().all(Junction::is_hard)
    }

    /// Return a new path with `junction` appended.
    pub fn child(&self, junction: Junction) -> Self {
        let mut junctions = self.junctions.clone();
        junctions.push(junction);
        Self { junctions }
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for junction in &self.junctions {
            write!(f, "{junction}")?;
        }
        Ok(())
    }
}

impl FromStr for DerivationPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl<'a> IntoIterator for &'a DerivationPath {
    type Item = &'a Junction;
    type IntoIter = core::slice::Iter<'a, Junction>;

    fn into_iter(self) -> Self::IntoIter {
        self.junctions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    mod junction_tests {
        use super::*;

        fn padded(prefix: &[u8]) -> [u8; 32] {
            let mut code = [0u8; 32];
            code[..prefix.len()].copy_from_slice(prefix);
            code
        }

        #[test]
        fn test_text_chain_codes() {
            assert_eq!(
                Junction::parse("joe").unwrap().chain_code(),
                &padded(&[12, b'j', b'o', b'e'])
            );
            assert_eq!(
                Junction::parse("polkadot").unwrap().chain_code(),
                &padded(&[32, 112, 111, 108, 107, 97, 100, 111, 116])
            );
            assert_eq!(
                Junction::parse("account").unwrap().chain_code(),
                &padded(&[28, 97, 99, 99, 111, 117, 110, 116])
            );
        }

        #[test]
        fn test_numeric_chain_codes() {
            assert_eq!(Junction::parse("0").unwrap().chain_code(), &[0u8; 32]);
            assert_eq!(Junction::parse("1").unwrap().chain_code(), &padded(&[1]));
            assert_eq!(
                Junction::parse("42").unwrap().chain_code(),
                &padded(&42u64.to_le_bytes())
            );
            assert_eq!(
                Junction::parse("18446744073709551615").unwrap().chain_code(),
                &padded(&[0xff; 8])
            );
        }

        #[test]
        fn test_numeric_overflow_is_text() {
            // one past u64::MAX falls back to the text encoding
            let junction = Junction::parse("18446744073709551616").unwrap();
            let mut expected = vec![20 << 2];
            expected.extend_from_slice(b"18446744073709551616");
            assert_eq!(junction.chain_code(), &padded(&expected));
        }

        #[test]
        fn test_long_text_is_hashed() {
            let text = "Each derived keypair is coupled with a path ( which means it belongs \
                        to a certain network), which prevent it to be used in another network";
            let junction = Junction::parse(text).unwrap();
            assert_eq!(
                junction.chain_code(),
                &[
                    142, 20, 254, 131, 131, 103, 80, 71, 19, 166, 248, 34, 30, 67, 213, 27, 12,
                    164, 204, 139, 70, 110, 249, 1, 153, 252, 82, 23, 14, 230, 91, 114
                ]
            );
        }

        #[test]
        fn test_hash_boundary() {
            // 31 chars + 1 prefix byte fit exactly, 32 chars spill into hashing
            let fits = "a".repeat(31);
            let mut expected = vec![31 << 2];
            expected.extend_from_slice(fits.as_bytes());
            assert_eq!(Junction::parse(&fits).unwrap().chain_code()[..], expected[..]);

            let spills = "a".repeat(32);
            let mut source = vec![32 << 2];
            source.extend_from_slice(spills.as_bytes());
            assert_eq!(
                Junction::parse(&spills).unwrap().chain_code(),
                &blake2_256(&source)
            );
        }

        #[test]
        fn test_hard_marker() {
            let hard = Junction::parse("/joe").unwrap();
            let soft = Junction::parse("joe").unwrap();
            assert!(hard.is_hard());
            assert!(soft.is_soft());
            assert_eq!(hard.path(), "joe");
            assert_eq!(hard.chain_code(), soft.chain_code());
            assert_eq!(hard.to_string(), "//joe");
            assert_eq!(soft.to_string(), "/joe");
            assert_eq!(Junction::hard("joe").unwrap(), hard);
            assert_eq!(Junction::soft("joe").unwrap(), soft);
        }

        #[test]
        fn test_only_one_slash_stripped() {
            let junction = Junction::parse("//joe").unwrap();
            assert!(junction.is_hard());
            assert_eq!(junction.path(), "/joe");
        }

        #[test]
        fn test_from_str() {
            let hard: Junction = "//7".parse().unwrap();
            assert!(hard.is_hard());
            assert_eq!(hard.chain_code(), &hex!(
                "0700000000000000000000000000000000000000000000000000000000000000"
            ));

            let soft: Junction = "/7".parse().unwrap();
            assert!(soft.is_soft());
            assert_eq!(soft.chain_code(), hard.chain_code());
        }

        #[test]
        fn test_display_parses_back() {
            for junction in [
                Junction::soft("joe").unwrap(),
                Junction::hard("joe").unwrap(),
                Junction::soft("42").unwrap(),
                Junction::hard("polkadot").unwrap(),
            ] {
                let back: Junction = junction.to_string().parse().unwrap();
                assert_eq!(back, junction);
            }
        }

        #[test]
        fn test_rejects_malformed_text() {
            for text in ["", "x", "/", "//", "///x", "/a/b", "//a//b"] {
                assert!(
                    matches!(text.parse::<Junction>(), Err(Error::InvalidJunction(_))),
                    "{text:?}"
                );
            }
            assert!(matches!(Junction::soft("/x"), Err(Error::InvalidJunction(_))));
            assert!(matches!(Junction::hard("a/b"), Err(Error::InvalidJunction(_))));
            assert!(matches!(Junction::hard(""), Err(Error::InvalidJunction(_))));
        }
    }

    mod path_tests {
        use super::*;

        fn shape(path: &DerivationPath) -> Vec<(&str, bool)> {
            path.junctions()
                .iter()
                .map(|j| (j.path(), j.is_hard()))
                .collect()
        }

        #[test]
        fn test_all_hard() {
            let path = DerivationPath::parse("//joe//polkadot//0").unwrap();
            assert_eq!(
                shape(&path),
                [("joe", true), ("polkadot", true), ("0", true)]
            );
            assert!(path.is_fully_hard());
        }

        #[test]
        fn test_all_soft() {
            let path = DerivationPath::parse("/joe/polkadot/0").unwrap();
            assert_eq!(
                shape(&path),
                [("joe", false), ("polkadot", false), ("0", false)]
            );
            assert!(!path.is_fully_hard());
        }

        #[test]
        fn test_mixed() {
            let path = DerivationPath::parse("//joe/account/1").unwrap();
            assert_eq!(
                shape(&path),
                [("joe", true), ("account", false), ("1", false)]
            );
            assert!(!path.is_fully_hard());
        }

        #[test]
        fn test_empty() {
            let path = DerivationPath::parse("").unwrap();
            assert!(path.is_empty());
            assert_eq!(path.len(), 0);
            assert!(!path.is_fully_hard());
            assert_eq!(path, DerivationPath::default());
        }

        #[test]
        fn test_rejects_stray_text() {
            for text in ["joe/x", "garbage", "/", "//", "joe//x/", "//x/", "///x"] {
                let err = DerivationPath::parse(text).unwrap_err();
                assert_eq!(err, Error::InvalidPath(text.into()));
                assert_eq!(err.kind(), crate::ErrorKind::Format);
            }
        }

        #[test]
        fn test_display_round_trip() {
            let text = "//joe/account//1/x";
            let path: DerivationPath = text.parse().unwrap();
            assert_eq!(path.to_string(), text);
            assert_eq!(path.len(), 4);
        }

        #[test]
        fn test_child() {
            let base = DerivationPath::parse("//website").unwrap();
            let child = base.child(Junction::soft("payment").unwrap());
            assert_eq!(child.to_string(), "//website/payment");
            assert_eq!(base.len(), 1);
            assert_eq!((&child).into_iter().count(), 2);
        }
    }
}
