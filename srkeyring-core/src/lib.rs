//! # srkeyring-core - Substrate Key Derivation Primitives
//!
//! Signer-independent building blocks for Substrate-style keys:
//!
//! - secret URI parsing and phrase classification ([`SecretUri`])
//! - junction and path parsing with chain-code construction ([`Junction`])
//! - SCALE compact-length encoding ([`compact`])
//! - SS58 address encoding and strict decoding ([`ss58`])
//! - explicit network configuration ([`NetworkRegistry`])
//!
//! Key material and signatures live in the `srkeyring` crate.

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
    clippy::cast_possible_truncation,
    clippy::unreadable_literal,
    clippy::missing_fields_in_debug
)]
#![forbid(unsafe_code)]

pub mod compact;
pub mod encoding;
pub mod error;
pub mod hash;
pub mod junction;
pub mod network;
pub mod ss58;
pub mod suri;

pub use error::{Error, ErrorKind, Result};
pub use junction::{DerivationPath, Junction};
pub use network::{Network, NetworkRegistry};
pub use ss58::Ss58Checksum;
pub use suri::{Phrase, PhraseType, SecretUri};
