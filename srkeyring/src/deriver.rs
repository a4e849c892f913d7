//! Hierarchical derivation over sr25519 key material.
//!
//! Junctions are applied left to right. Hard junctions need the secret key
//! and go through an intermediate mini secret key; soft junctions work on
//! either half of the pair. A walk that starts from a secret key and uses
//! only hard junctions yields the last mini secret key as a reusable seed.

use core::fmt;

use schnorrkel::derive::{ChainCode, Derivation};
use schnorrkel::{ExpansionMode, MiniSecretKey, PublicKey, SecretKey};
use srkeyring_core::{DerivationPath, Junction};
use tracing::trace;
use zeroize::Zeroizing;

use crate::error::{Error, Result};

/// Key material a walk starts from or produces.
#[derive(Clone)]
pub enum KeyMaterial {
    /// Expanded secret key; allows hard and soft junctions.
    Secret(SecretKey),
    /// Public key; allows soft junctions only.
    Public(PublicKey),
}

impl KeyMaterial {
    /// Expand a 32-byte mini secret key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Signature`] if the seed has the wrong length.
    pub fn from_seed(seed: &[u8]) -> Result<Self> {
        let mini = MiniSecretKey::from_bytes(seed)?;
        Ok(Self::from_mini_secret(&mini))
    }

    /// Expand a mini secret key the way Substrate does.
    pub fn from_mini_secret(mini: &MiniSecretKey) -> Self {
        Self::Secret(mini.expand(ExpansionMode::Ed25519))
    }

    /// Wrap raw public key bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Signature`] if the bytes are not a valid point.
    pub fn from_public(public: &[u8]) -> Result<Self> {
        Ok(Self::Public(PublicKey::from_bytes(public)?))
    }

    /// Public half of the material.
    pub fn public(&self) -> PublicKey {
        match self {
            Self::Secret(secret) => secret.to_public(),
            Self::Public(public) => *public,
        }
    }

    /// Check if the material includes the secret key.
    #[inline]
    pub const fn is_secret(&self) -> bool {
        matches!(self, Self::Secret(_))
    }

    fn derive(self, junction: &Junction) -> Result<(Self, Option<MiniSecretKey>)> {
        let chain_code = ChainCode(*junction.chain_code());
        match (self, junction.is_hard()) {
            (Self::Secret(secret), true) => {
                let (mini, _) = secret.hard_derive_mini_secret_key(Some(chain_code), b"");
                Ok((Self::from_mini_secret(&mini), Some(mini)))
            }
            (Self::Secret(secret), false) => {
                Ok((Self::Secret(secret.derived_key_simple(chain_code, b"").0), None))
            }
            (Self::Public(_), true) => Err(Error::HardDerivationFromPublic),
            (Self::Public(public), false) => {
                Ok((Self::Public(public.derived_key_simple(chain_code, b"").0), None))
            }
        }
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Secret(_) => f.write_str("Secret([REDACTED])"),
            Self::Public(public) => f
                .debug_tuple("Public")
                .field(&hex::encode(public.to_bytes()))
                .finish(),
        }
    }
}

/// Outcome of a derivation walk.
pub struct Derived {
    /// Key material after the last junction.
    pub material: KeyMaterial,
    /// Last mini secret key, present only for non-empty all-hard walks from
    /// a secret key.
    pub seed: Option<Zeroizing<[u8; 32]>>,
}

impl fmt::Debug for Derived {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Derived")
            .field("material", &self.material)
            .field("has_seed", &self.seed.is_some())
            .finish()
    }
}

/// Apply every junction of `path` to `initial`.
///
/// # Errors
///
/// Returns [`Error::HardDerivationFromPublic`] if a hard junction meets
/// public-only material. Nothing of a failed walk is returned.
pub fn derive(initial: KeyMaterial, path: &DerivationPath) -> Result<Derived> {
    let private = initial.is_secret();
    let mut material = initial;
    let mut all_hard = true;
    let mut last_mini = None;

    for (index, junction) in path.junctions().iter().enumerate() {
        trace!(index, hard = junction.is_hard(), "applying junction");
        let (next, mini) = material.derive(junction)?;
        material = next;
        all_hard &= junction.is_hard();
        if mini.is_some() {
            last_mini = mini;
        }
    }

    let seed = if private && all_hard && !path.is_empty() {
        last_mini.map(|mini| Zeroizing::new(mini.to_bytes()))
    } else {
        None
    };

    Ok(Derived { material, seed })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mnemonic::mini_secret_from_mnemonic;
    use hex_literal::hex;

    const TEST_MNEMONIC: &str =
        "zebra extra skill occur rose muscle reveal robust cigar tilt jungle coral";

    fn mnemonic_root() -> KeyMaterial {
        KeyMaterial::from_mini_secret(&mini_secret_from_mnemonic(TEST_MNEMONIC, "").unwrap())
    }

    fn walk(initial: KeyMaterial, path: &str) -> Result<Derived> {
        derive(initial, &DerivationPath::parse(path).unwrap())
    }

    #[test]
    fn test_empty_path() {
        let derived = walk(mnemonic_root(), "").unwrap();
        assert!(derived.material.is_secret());
        assert!(derived.seed.is_none());
        assert_eq!(
            derived.material.public().to_bytes(),
            hex!("38c9aaacbf915cdd41e91eb13d3921af7d478e8c9dea39d469805b0ad9c8ff75")
        );
    }

    #[test]
    fn test_all_hard_yields_seed() {
        let derived = walk(mnemonic_root(), "//john//account//1").unwrap();
        assert_eq!(
            derived.material.public().to_bytes(),
            hex!("cac784bf6c8d59058e0833e43a7c967236ca617efc3a52fc261ea3ae5caa1b74")
        );
        assert_eq!(
            *derived.seed.unwrap(),
            hex!("aeb2086a38710871b7774cd2401e38741d64ad9b9209806173971224f50497cb")
        );
    }

    #[test]
    fn test_all_soft_has_no_seed() {
        let derived = walk(mnemonic_root(), "/john/account/1").unwrap();
        assert!(derived.material.is_secret());
        assert!(derived.seed.is_none());
        assert_eq!(
            derived.material.public().to_bytes(),
            hex!("74ed93d6a98589a7fdfca305fda9223c8f6ab180efc353bb3e5c590ecc1eba4e")
        );
    }

    #[test]
    fn test_soft_tail_drops_seed() {
        let derived = walk(mnemonic_root(), "//john//ecommerce/1").unwrap();
        assert!(derived.seed.is_none());
        assert_eq!(
            derived.material.public().to_bytes(),
            hex!("aebb1535c604b3570761e651ec71520541214d62d26d4c591cbc3d056b400329")
        );
    }

    #[test]
    fn test_secret_hex_root() {
        let root = KeyMaterial::from_seed(&hex!(
            "7202a4eba69bb283e8e9a3f5f6f0fc64bb02e6d20fb4b6bde13caec148f2cca7"
        ))
        .unwrap();
        let derived = walk(root, "//john//account//1").unwrap();
        assert_eq!(
            *derived.seed.unwrap(),
            hex!("fb41ee7a829d945f313d5920a6a198dd2a3c5a29ca5a420cae300a0645bad4ae")
        );
        assert_eq!(
            derived.material.public().to_bytes(),
            hex!("d4d72d70331d1697670496a9b9768a905bb2841bf73011731cb22d9d3f063e66")
        );
    }

    #[test]
    fn test_public_soft_walk() {
        let root = KeyMaterial::from_public(&hex!(
            "88c7b487cea1e01392d62e70bfac6e321a1c7a276d57d92ede5062ed90e38079"
        ))
        .unwrap();
        let derived = walk(root, "/william/merchant/4").unwrap();
        assert!(!derived.material.is_secret());
        assert!(derived.seed.is_none());
        assert_eq!(
            derived.material.public().to_bytes(),
            hex!("44d3daa4329577491e40ee1aa7993f361ce400481229e2ced48eda95ab14095a")
        );
    }

    #[test]
    fn test_public_hard_fails() {
        let root = KeyMaterial::from_public(&hex!(
            "88c7b487cea1e01392d62e70bfac6e321a1c7a276d57d92ede5062ed90e38079"
        ))
        .unwrap();
        assert!(matches!(
            walk(root.clone(), "//john"),
            Err(Error::HardDerivationFromPublic)
        ));
        assert!(matches!(
            walk(root, "/john//account/3"),
            Err(Error::HardDerivationFromPublic)
        ));
    }

    #[test]
    fn test_soft_matches_public_soft() {
        let root = KeyMaterial::from_seed(&hex!(
            "7202a4eba69bb283e8e9a3f5f6f0fc64bb02e6d20fb4b6bde13caec148f2cca7"
        ))
        .unwrap();
        let public_root = KeyMaterial::Public(root.public());

        let from_secret = walk(root, "/william/merchant/4").unwrap();
        let from_public = walk(public_root, "/william/merchant/4").unwrap();
        assert_eq!(from_secret.material.public(), from_public.material.public());
        assert_eq!(
            from_public.material.public().to_bytes(),
            hex!("06fb0d716d993000a966ffa43d14c1fa489ae22473a597e0206a6e70f885ae22")
        );
    }

    #[test]
    fn test_debug_redacts_secret() {
        let debug = format!("{:?}", walk(mnemonic_root(), "//a").unwrap());
        assert!(debug.contains("REDACTED"));
        assert!(debug.contains("has_seed: true"));
    }
}
