//! Harness settings
//!
//! Everything the round-trip run needs is collected into one explicit
//! [`HarnessConfig`] at startup and handed to the driver. Defaults reproduce
//! the stock sample run: the built-in passphrase, the fixed salt, and five
//! sample strings.

use serde::Serialize;

use crate::crypto::key_derivation::{salt_from_words, KeyDerivationParams, Salt};
use crate::crypto::SecureBytes;
use crate::error::{HarnessError, HarnessResult};

/// Passphrase used when `-k` is not given
pub const DEFAULT_PASSPHRASE: &str = "go bears lmao";

/// Salt words; laid out little-endian they form the 8-byte salt
pub const DEFAULT_SALT_WORDS: [u32; 2] = [12345, 54321];

/// Sample inputs used when no `-f` file is given
pub const DEFAULT_INPUTS: [&str; 5] = [
    "a",
    "abcd",
    "this is a test",
    "this is a bigger test",
    "\nWho are you?\nI am the 'Doctor'.\n'Doctor' who?\nPrecisely!",
];

/// The default salt bytes
pub fn default_salt() -> Salt {
    salt_from_words(DEFAULT_SALT_WORDS)
}

/// Configuration for one harness run
#[derive(Debug, Clone, Serialize)]
pub struct HarnessConfig {
    /// Passphrase fed to key derivation
    #[serde(skip)]
    pub passphrase: SecureBytes,

    /// 8-byte salt fed to key derivation
    pub salt: Salt,

    /// Inputs to round-trip, without terminators
    #[serde(skip)]
    pub inputs: Vec<Vec<u8>>,

    /// Key derivation parameters
    pub kdf: KeyDerivationParams,

    /// Accelerate toggle; accepted for compatibility, has no effect
    pub accelerate: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            passphrase: SecureBytes::from(DEFAULT_PASSPHRASE),
            salt: default_salt(),
            inputs: DEFAULT_INPUTS
                .iter()
                .map(|s| s.as_bytes().to_vec())
                .collect(),
            kdf: KeyDerivationParams::default(),
            accelerate: false,
        }
    }
}

impl HarnessConfig {
    /// Replace the passphrase
    pub fn with_passphrase(mut self, passphrase: impl Into<SecureBytes>) -> HarnessResult<Self> {
        let passphrase = passphrase.into();
        if passphrase.is_empty() {
            return Err(HarnessError::InvalidInput(
                "passphrase must not be empty".to_string(),
            ));
        }
        self.passphrase = passphrase;
        Ok(self)
    }

    /// Replace the sample inputs
    pub fn with_inputs(mut self, inputs: Vec<Vec<u8>>) -> Self {
        self.inputs = inputs;
        self
    }

    /// Replace the key derivation parameters
    pub fn with_kdf(mut self, kdf: KeyDerivationParams) -> Self {
        self.kdf = kdf;
        self
    }

    /// Set the accelerate toggle
    pub fn with_accelerate(mut self, accelerate: bool) -> Self {
        self.accelerate = accelerate;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::KdfDigest;

    #[test]
    fn test_default_config() {
        let config = HarnessConfig::default();
        assert_eq!(config.passphrase.as_bytes(), b"go bears lmao");
        assert_eq!(config.salt, [0x39, 0x30, 0x00, 0x00, 0x31, 0xd4, 0x00, 0x00]);
        assert_eq!(config.inputs.len(), 5);
        assert_eq!(config.inputs[1], b"abcd");
        assert!(config.inputs[4].contains(&b'\n'));
        assert!(!config.accelerate);
    }

    #[test]
    fn test_with_passphrase() {
        let config = HarnessConfig::default().with_passphrase("hunter2").unwrap();
        assert_eq!(config.passphrase.as_bytes(), b"hunter2");
    }

    #[test]
    fn test_empty_passphrase_rejected() {
        let result = HarnessConfig::default().with_passphrase("");
        assert!(matches!(result, Err(HarnessError::InvalidInput(_))));
    }

    #[test]
    fn test_builder_overrides() {
        let config = HarnessConfig::default()
            .with_inputs(vec![b"only".to_vec()])
            .with_kdf(KeyDerivationParams::with_values(1, KdfDigest::Sha256))
            .with_accelerate(true);
        assert_eq!(config.inputs, vec![b"only".to_vec()]);
        assert_eq!(config.kdf.rounds, 1);
        assert_eq!(config.kdf.digest, KdfDigest::Sha256);
        assert!(config.accelerate);
    }

    #[test]
    fn test_serialized_config_hides_passphrase() {
        let json = serde_json::to_string(&HarnessConfig::default()).unwrap();
        assert!(!json.contains("go bears"));
        assert!(json.contains("\"rounds\":5"));
    }
}
