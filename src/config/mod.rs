//! Configuration module for aes-roundtrip
//!
//! Run settings are built once from the command line and passed explicitly
//! into the driver; there is no config file and no environment lookup.

pub mod settings;

pub use settings::HarnessConfig;
