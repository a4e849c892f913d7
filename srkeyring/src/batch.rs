//! Batch verification of sr25519 signatures.

use merlin::Transcript;
use schnorrkel::{PublicKey, Signature, verify_batch};
use tracing::debug;

use crate::error::Result;
use crate::keyring::{KeyRing, SIGNATURE_LEN};

/// Accumulates signatures and checks them in one pass.
///
/// [`BatchVerifier::verify`] consumes the verifier, so a batch can only be
/// checked once. The batch passes or fails as a whole.
#[derive(Default)]
pub struct BatchVerifier {
    transcripts: Vec<Transcript>,
    signatures: Vec<Signature>,
    public_keys: Vec<PublicKey>,
}

impl BatchVerifier {
    /// Create an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a signature over `transcript` by the owner of `keyring`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Signature`] if the bytes are not an sr25519
    /// signature. The batch is unchanged in that case.
    pub fn add(
        &mut self,
        transcript: Transcript,
        signature: &[u8; SIGNATURE_LEN],
        keyring: &KeyRing,
    ) -> Result<()> {
        let signature = Signature::from_bytes(signature)?;
        self.transcripts.push(transcript);
        self.signatures.push(signature);
        self.public_keys.push(*keyring.public_key());
        Ok(())
    }

    /// Number of signatures in the batch.
    #[inline]
    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    /// Check if the batch is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }

    /// Verify every signature in the batch.
    pub fn verify(self) -> bool {
        let count = self.len();
        let valid =
            verify_batch(self.transcripts, &self.signatures, &self.public_keys, false).is_ok();
        debug!(count, valid, "verified signature batch");
        valid
    }
}
