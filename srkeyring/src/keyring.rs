//! sr25519 keyring resolved from a secret URI.

use core::fmt;

use merlin::Transcript;
use schnorrkel::vrf::{VRFPreOut, VRFProof};
use schnorrkel::{Keypair, PublicKey, Signature, signing_context};
use srkeyring_core::encoding::{decode_hex_array, encode_hex};
use srkeyring_core::ss58::{self, Ss58Checksum};
use srkeyring_core::suri::seed_from_hex;
use srkeyring_core::{DerivationPath, Network, Phrase, PhraseType, SecretUri};
use tracing::debug;
use zeroize::Zeroizing;

use crate::deriver::{self, Derived, KeyMaterial};
use crate::error::{Error, Result};
use crate::mnemonic::mini_secret_from_mnemonic;

/// Length of a public key.
pub const PUBLIC_KEY_LEN: usize = 32;
/// Length of a signature.
pub const SIGNATURE_LEN: usize = 64;
/// Length of a VRF output.
pub const VRF_OUTPUT_LEN: usize = 32;
/// Length of a VRF proof.
pub const VRF_PROOF_LEN: usize = 64;

/// An sr25519 key pair (or public key) derived from a secret URI.
///
/// The keyring is immutable. It remembers how its phrase was interpreted so
/// the seed can be recovered later when the path allows it.
///
/// # Example
///
/// ```
/// use srkeyring::{KeyRing, Network};
///
/// let keyring = KeyRing::from_uri(
///     "zebra extra skill occur rose muscle reveal robust cigar tilt jungle coral//john//account//1",
///     &Network::substrate(),
/// )
/// .unwrap();
/// assert!(keyring.has_seed());
/// assert_eq!(keyring.ss58_address(), "5GeaoJxfADGYHQAZpiwuYJb4EDpoi21fumSU2be6JJ4r5pT5");
/// ```
#[derive(Clone)]
pub struct KeyRing {
    keypair: Option<Keypair>,
    public: PublicKey,
    uri: Option<SecretUri>,
    phrase_type: PhraseType,
    network: Network,
    path: DerivationPath,
    seed: Option<Zeroizing<[u8; 32]>>,
}

impl KeyRing {
    /// Resolve a secret URI into a keyring.
    ///
    /// # Errors
    ///
    /// - format errors for a malformed URI or empty phrase,
    /// - decoding errors for hex of the wrong length or an invalid key,
    /// - [`Error::Mnemonic`] if the phrase is not hex, SS58 or a mnemonic,
    /// - [`Error::HardDerivationFromPublic`] for a hard junction on an address.
    pub fn from_uri(suri: &str, network: &Network) -> Result<Self> {
        let uri = SecretUri::parse(suri, network)?;
        let path = uri.derivation_path()?;
        let phrase = uri.classify()?;
        let phrase_type = phrase.phrase_type();

        let initial = match phrase {
            Phrase::SecretHex(seed) => KeyMaterial::from_seed(&seed[..])?,
            Phrase::Ss58Public(public) => KeyMaterial::from_public(&public)?,
            Phrase::Mnemonic => {
                let mini = mini_secret_from_mnemonic(uri.phrase(), uri.password())?;
                KeyMaterial::from_mini_secret(&mini)
            }
        };

        let Derived { material, seed } = deriver::derive(initial, &path)?;
        debug!(
            network = %network,
            phrase_type = %phrase_type,
            junctions = path.len(),
            has_seed = seed.is_some(),
            "resolved secret uri"
        );

        Ok(Self::from_parts(material, Some(uri), phrase_type, network, path, seed))
    }

    /// Create a public-only keyring from raw public key bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Signature`] if the bytes are not a valid public key.
    pub fn from_public(public: &[u8; PUBLIC_KEY_LEN], network: &Network) -> Result<Self> {
        let material = KeyMaterial::from_public(public)?;
        Ok(Self::from_parts(
            material,
            None,
            PhraseType::RawPublic,
            network,
            DerivationPath::default(),
            None,
        ))
    }

    /// Create a public-only keyring from hex text, with or without the
    /// network's hex prefix.
    ///
    /// # Errors
    ///
    /// Returns a decoding error unless the text is hex of a valid 32-byte
    /// public key.
    pub fn from_public_hex(text: &str, network: &Network) -> Result<Self> {
        let public = decode_hex_array::<PUBLIC_KEY_LEN>(text, network.hex_prefix())?;
        Self::from_public(&public, network)
    }

    /// Create a keyring from a freshly generated mnemonic.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidWordCount`] unless `word_count` is 12, 15, 18,
    /// 21 or 24.
    #[cfg(feature = "rand")]
    pub fn generate(word_count: usize, network: &Network) -> Result<Self> {
        let phrase = crate::mnemonic::generate(word_count)?;
        Self::from_uri(&phrase, network)
    }

    fn from_parts(
        material: KeyMaterial,
        uri: Option<SecretUri>,
        phrase_type: PhraseType,
        network: &Network,
        path: DerivationPath,
        seed: Option<Zeroizing<[u8; 32]>>,
    ) -> Self {
        let (keypair, public) = match material {
            KeyMaterial::Secret(secret) => {
                let keypair = secret.to_keypair();
                let public = keypair.public;
                (Some(keypair), public)
            }
            KeyMaterial::Public(public) => (None, public),
        };
        Self {
            keypair,
            public,
            uri,
            phrase_type,
            network: network.clone(),
            path,
            seed,
        }
    }

    /// Network this keyring presents addresses and signs for.
    #[inline]
    #[must_use]
    pub const fn network(&self) -> &Network {
        &self.network
    }

    /// How the phrase was interpreted.
    #[inline]
    #[must_use]
    pub const fn phrase_type(&self) -> PhraseType {
        self.phrase_type
    }

    /// Derivation path applied to the phrase.
    #[inline]
    #[must_use]
    pub const fn path(&self) -> &DerivationPath {
        &self.path
    }

    /// Check if the keyring can sign.
    #[inline]
    #[must_use]
    pub const fn has_secret(&self) -> bool {
        self.keypair.is_some()
    }

    /// Check if the walk produced a seed.
    ///
    /// A seed may still be recoverable through [`KeyRing::seed`] when the
    /// path is empty.
    #[inline]
    #[must_use]
    pub const fn has_seed(&self) -> bool {
        self.seed.is_some()
    }

    /// Public key bytes.
    #[inline]
    #[must_use]
    pub fn public(&self) -> [u8; PUBLIC_KEY_LEN] {
        self.public.to_bytes()
    }

    /// Public key.
    #[inline]
    #[must_use]
    pub const fn public_key(&self) -> &PublicKey {
        &self.public
    }

    /// Public key in the network's hex presentation.
    pub fn public_hex(&self) -> String {
        encode_hex(&self.public(), self.network.hex_prefix())
    }

    /// SS58 address with the standard checksum.
    pub fn ss58_address(&self) -> String {
        self.ss58_address_with(Ss58Checksum::Standard)
    }

    /// SS58 address with the given checksum kind.
    pub fn ss58_address_with(&self, kind: Ss58Checksum) -> String {
        ss58::encode(&self.public(), &self.network, kind)
    }

    /// 32-byte secret scalar.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSecretKey`] for public-only keyrings.
    pub fn secret(&self) -> Result<Zeroizing<[u8; 32]>> {
        let keypair = self.keypair()?;
        let bytes = Zeroizing::new(keypair.secret.to_bytes());
        let mut secret = Zeroizing::new([0u8; 32]);
        secret.copy_from_slice(&bytes[..32]);
        Ok(secret)
    }

    /// Secret scalar in the network's hex presentation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSecretKey`] for public-only keyrings.
    pub fn secret_hex(&self) -> Result<Zeroizing<String>> {
        let secret = self.secret()?;
        Ok(Zeroizing::new(encode_hex(&secret[..], self.network.hex_prefix())))
    }

    /// 32-byte seed the keyring can be rebuilt from.
    ///
    /// Comes from the last hard junction of an all-hard path, or from the
    /// phrase itself when there is no path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SeedUnavailable`] for public-only keyrings and for
    /// paths that contain a soft junction.
    pub fn seed(&self) -> Result<Zeroizing<[u8; 32]>> {
        if let Some(seed) = &self.seed {
            return Ok(seed.clone());
        }
        if !self.path.is_empty() {
            return Err(Error::SeedUnavailable);
        }
        let uri = self.uri.as_ref().ok_or(Error::SeedUnavailable)?;

        match self.phrase_type {
            PhraseType::SecretHex => {
                seed_from_hex(uri.phrase(), self.network.hex_prefix())?.ok_or(Error::SeedUnavailable)
            }
            PhraseType::Mnemonic => {
                let mini = mini_secret_from_mnemonic(uri.phrase(), uri.password())?;
                Ok(Zeroizing::new(mini.to_bytes()))
            }
            PhraseType::Ss58Public | PhraseType::RawPublic => Err(Error::SeedUnavailable),
        }
    }

    /// Seed in the network's hex presentation.
    ///
    /// # Errors
    ///
    /// See [`KeyRing::seed`].
    pub fn seed_hex(&self) -> Result<Zeroizing<String>> {
        let seed = self.seed()?;
        Ok(Zeroizing::new(encode_hex(&seed[..], self.network.hex_prefix())))
    }

    /// The mnemonic phrase this keyring was built from.
    ///
    /// **Security Warning**: together with the password and path this
    /// reconstructs the key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotMnemonic`] for keyrings built from anything else.
    pub fn mnemonic(&self) -> Result<&str> {
        match (&self.uri, self.phrase_type) {
            (Some(uri), PhraseType::Mnemonic) => Ok(uri.phrase()),
            _ => Err(Error::NotMnemonic),
        }
    }

    /// Transcript for `message` bound to this network's signing context.
    pub fn signing_context(&self, message: &[u8]) -> Transcript {
        signing_context(self.network.name().as_bytes()).bytes(message)
    }

    /// Sign a transcript.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSecretKey`] for public-only keyrings.
    pub fn sign(&self, transcript: Transcript) -> Result<[u8; SIGNATURE_LEN]> {
        let keypair = self.keypair()?;
        Ok(keypair.sign(transcript).to_bytes())
    }

    /// Verify a signature over a transcript.
    ///
    /// A signature made for another message, key or network yields `false`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Signature`] if the bytes are not an sr25519 signature.
    pub fn verify(&self, transcript: Transcript, signature: &[u8; SIGNATURE_LEN]) -> Result<bool> {
        let signature = Signature::from_bytes(signature)?;
        Ok(self.public.verify(transcript, &signature).is_ok())
    }

    /// Produce a VRF output and proof for a transcript.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSecretKey`] for public-only keyrings.
    pub fn vrf_sign(
        &self,
        transcript: Transcript,
    ) -> Result<([u8; VRF_OUTPUT_LEN], [u8; VRF_PROOF_LEN])> {
        let keypair = self.keypair()?;
        let (inout, proof, _) = keypair.vrf_sign(transcript);
        Ok((inout.to_preout().to_bytes(), proof.to_bytes()))
    }

    /// Verify a VRF output and proof.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Signature`] if output or proof bytes are malformed.
    pub fn vrf_verify(
        &self,
        transcript: Transcript,
        output: &[u8; VRF_OUTPUT_LEN],
        proof: &[u8; VRF_PROOF_LEN],
    ) -> Result<bool> {
        let output = VRFPreOut::from_bytes(output)?;
        let proof = VRFProof::from_bytes(proof)?;
        Ok(self.public.vrf_verify(transcript, &output, &proof).is_ok())
    }

    fn keypair(&self) -> Result<&Keypair> {
        self.keypair.as_ref().ok_or(Error::NoSecretKey)
    }
}

impl fmt::Debug for KeyRing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyRing")
            .field("public", &self.public_hex())
            .field("network", &self.network.name())
            .field("phrase_type", &self.phrase_type)
            .field("path", &self.path.to_string())
            .field("has_secret", &self.has_secret())
            .field("has_seed", &self.has_seed())
            .finish()
    }
}
