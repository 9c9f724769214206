//! aes-roundtrip - AES-256-CBC encrypt/decrypt round-trip harness
//!
//! This library derives an AES key and IV from a passphrase and fixed salt,
//! then checks that every input survives an encrypt/decrypt round trip
//! byte for byte. The block cipher itself comes from RustCrypto's `aes` and
//! `cbc` crates.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Run configuration (passphrase, salt, inputs, KDF parameters)
//! - `crypto`: Key derivation, cipher contexts, and zero-on-drop buffers
//! - `harness`: Input file loading and the round-trip driver
//! - `display`: Report formatting
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust,ignore
//! use aes_roundtrip::{config::HarnessConfig, harness};
//!
//! let config = HarnessConfig::default().with_passphrase("hunter2")?;
//! let records = harness::run(&config)?;
//! assert!(records.iter().all(|r| r.matched));
//! ```

pub mod config;
pub mod crypto;
pub mod display;
pub mod error;
pub mod harness;

pub use error::{HarnessError, HarnessResult};
