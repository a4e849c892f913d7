//! # srkeyring - sr25519 Keyring with Substrate Derivation
//!
//! Resolves secret URIs into sr25519 keys the same way `subkey` does and
//! presents them as hex and SS58.
//!
//! # Features
//!
//! - `rand`: Enable random mnemonic generation for [`KeyRing::generate`]
//!
//! # Usage
//!
//! ```
//! use srkeyring::{KeyRing, NetworkRegistry};
//!
//! let registry = NetworkRegistry::default();
//! let network = registry.get("substrate").unwrap();
//!
//! let keyring = KeyRing::from_uri(
//!     "zebra extra skill occur rose muscle reveal robust cigar tilt jungle coral",
//!     network,
//! )
//! .unwrap();
//! assert_eq!(keyring.ss58_address(), "5DMASqMppiJJZtcSTibW9n6zMyZy71cxSrumEVwcxeFapGZs");
//!
//! let signature = keyring.sign(keyring.signing_context(b"hello")).unwrap();
//! assert!(keyring.verify(keyring.signing_context(b"hello"), &signature).unwrap());
//! ```

#![warn(
    missing_docs,
    rust_2018_idioms,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::doc_markdown,
    clippy::missing_const_for_fn,
    clippy::missing_fields_in_debug,
    clippy::large_enum_variant
)]
#![forbid(unsafe_code)]

pub mod batch;
pub mod deriver;
mod error;
pub mod keyring;
pub mod mnemonic;

pub use batch::BatchVerifier;
pub use deriver::{Derived, KeyMaterial};
pub use error::{Error, Result};
pub use keyring::KeyRing;
pub use merlin::Transcript;
pub use srkeyring_core::{
    DerivationPath, ErrorKind, Junction, Network, NetworkRegistry, PhraseType, SecretUri,
    Ss58Checksum,
};
