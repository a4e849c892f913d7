//! BIP39 mnemonics and Substrate seed derivation.
//!
//! Substrate does not use the BIP39 seed. The PBKDF2 password is the
//! mnemonic *entropy* rather than the phrase, the salt is
//! `"mnemonic" ‖ password`, and the first 32 bytes of the 64-byte output
//! form the mini secret key.

use bip39::Mnemonic;
use pbkdf2::pbkdf2_hmac;
use schnorrkel::MiniSecretKey;
use sha2::Sha512;
use zeroize::Zeroizing;

use crate::error::{Error, Result};

/// Number of PBKDF2 rounds for seed derivation.
const PBKDF2_ROUNDS: u32 = 2048;

/// Salt prefix prepended to the password.
const SALT_PREFIX: &str = "mnemonic";

/// Word counts accepted for generated mnemonics.
pub const WORD_COUNTS: [usize; 5] = [12, 15, 18, 21, 24];

/// Recover the entropy encoded by a mnemonic.
///
/// # Errors
///
/// Returns [`Error::Mnemonic`] if the phrase is not a valid English mnemonic.
pub fn entropy_from_mnemonic(phrase: &str) -> Result<Zeroizing<Vec<u8>>> {
    let mnemonic: Mnemonic = phrase.parse()?;
    Ok(Zeroizing::new(mnemonic.to_entropy()))
}

/// Encode entropy (16, 20, 24, 28 or 32 bytes) as a mnemonic.
///
/// # Errors
///
/// Returns [`Error::Mnemonic`] if the entropy length is invalid.
pub fn mnemonic_from_entropy(entropy: &[u8]) -> Result<Zeroizing<String>> {
    let mnemonic = Mnemonic::from_entropy(entropy)?;
    Ok(Zeroizing::new(mnemonic.to_string()))
}

/// Derive the 64-byte seed for a mnemonic and password.
///
/// # Errors
///
/// Returns [`Error::Mnemonic`] if the phrase is not a valid mnemonic.
pub fn seed_from_mnemonic(phrase: &str, password: &str) -> Result<Zeroizing<[u8; 64]>> {
    let entropy = entropy_from_mnemonic(phrase)?;
    let salt = Zeroizing::new(format!("{SALT_PREFIX}{password}"));

    let mut seed = Zeroizing::new([0u8; 64]);
    pbkdf2_hmac::<Sha512>(&entropy, salt.as_bytes(), PBKDF2_ROUNDS, &mut seed[..]);
    Ok(seed)
}

/// Derive the mini secret key for a mnemonic and password.
///
/// # Errors
///
/// Returns [`Error::Mnemonic`] if the phrase is not a valid mnemonic.
pub fn mini_secret_from_mnemonic(phrase: &str, password: &str) -> Result<MiniSecretKey> {
    let seed = seed_from_mnemonic(phrase, password)?;
    Ok(MiniSecretKey::from_bytes(&seed[..32])?)
}

/// Generate a random mnemonic.
///
/// # Errors
///
/// Returns [`Error::InvalidWordCount`] unless `word_count` is one of
/// [`WORD_COUNTS`].
#[cfg(feature = "rand")]
pub fn generate(word_count: usize) -> Result<Zeroizing<String>> {
    check_word_count(word_count)?;
    let mnemonic = Mnemonic::generate(word_count)?;
    Ok(Zeroizing::new(mnemonic.to_string()))
}

/// Count the words in a phrase.
#[inline]
pub fn word_count(phrase: &str) -> usize {
    phrase.split_whitespace().count()
}

/// Check that a word count is supported.
///
/// # Errors
///
/// Returns [`Error::InvalidWordCount`] otherwise.
pub fn check_word_count(word_count: usize) -> Result<()> {
    if WORD_COUNTS.contains(&word_count) {
        Ok(())
    } else {
        Err(Error::InvalidWordCount(word_count))
    }
}
