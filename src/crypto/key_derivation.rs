//! Key and IV derivation from a passphrase
//!
//! Implements OpenSSL's `EVP_BytesToKey` salted key stretching. Keys derived
//! here match OpenSSL's for the same passphrase, salt, digest and round count.

use serde::Serialize;
use sha1::Sha1;
use sha2::{Digest, Sha256};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::{HarnessError, HarnessResult};

/// AES-256 key width in bytes
pub const KEY_LEN: usize = 32;

/// CBC initialization vector width in bytes (one AES block)
pub const IV_LEN: usize = 16;

/// Salt width in bytes
pub const SALT_LEN: usize = 8;

/// Fixed 8-byte salt mixed into every derivation
pub type Salt = [u8; SALT_LEN];

/// Build a salt from two 32-bit words laid out little-endian
pub fn salt_from_words(words: [u32; 2]) -> Salt {
    let mut salt = [0u8; SALT_LEN];
    salt[..4].copy_from_slice(&words[0].to_le_bytes());
    salt[4..].copy_from_slice(&words[1].to_le_bytes());
    salt
}

/// Digest used for each hashing pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum KdfDigest {
    /// SHA-1 (default, OpenSSL-compatible with the classic helper)
    #[default]
    Sha1,
    /// SHA-256
    Sha256,
}

impl fmt::Display for KdfDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sha1 => write!(f, "sha1"),
            Self::Sha256 => write!(f, "sha256"),
        }
    }
}

/// Parameters for key derivation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KeyDerivationParams {
    /// Hash passes per output block (default: 5)
    pub rounds: u32,
    /// Digest function (default: SHA-1)
    pub digest: KdfDigest,
}

impl Default for KeyDerivationParams {
    fn default() -> Self {
        Self {
            rounds: 5,
            digest: KdfDigest::Sha1,
        }
    }
}

impl KeyDerivationParams {
    /// Create params with specific values
    pub fn with_values(rounds: u32, digest: KdfDigest) -> Self {
        Self { rounds, digest }
    }
}

/// Key and IV derived from a passphrase
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DerivedKeyMaterial {
    key: [u8; KEY_LEN],
    iv: [u8; IV_LEN],
}

impl DerivedKeyMaterial {
    /// Get the key bytes
    pub fn key(&self) -> &[u8; KEY_LEN] {
        &self.key
    }

    /// Get the IV bytes
    pub fn iv(&self) -> &[u8; IV_LEN] {
        &self.iv
    }
}

impl fmt::Debug for DerivedKeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedKeyMaterial")
            .field("key", &"[REDACTED]")
            .field("iv", &"[REDACTED]")
            .finish()
    }
}

/// `EVP_BytesToKey` over an arbitrary digest
///
/// Each output block is `H^rounds(previous_block || passphrase || salt)`;
/// blocks are concatenated until `key_len + iv_len` bytes are available.
/// Returns the key bytes followed by the IV bytes.
pub fn bytes_to_key<D: Digest>(
    passphrase: &[u8],
    salt: &[u8],
    rounds: u32,
    key_len: usize,
    iv_len: usize,
) -> HarnessResult<Zeroizing<Vec<u8>>> {
    if passphrase.is_empty() {
        return Err(HarnessError::InvalidInput(
            "passphrase must not be empty".to_string(),
        ));
    }
    if rounds == 0 {
        return Err(HarnessError::InvalidInput(
            "key derivation rounds must be at least 1".to_string(),
        ));
    }
    if key_len == 0 || iv_len == 0 {
        return Err(HarnessError::InvalidInput(format!(
            "key and IV widths must be positive (key: {}, iv: {})",
            key_len, iv_len
        )));
    }

    let needed = key_len + iv_len;
    let mut output = Zeroizing::new(Vec::with_capacity(needed + <D as Digest>::output_size()));
    let mut previous: Zeroizing<Vec<u8>> = Zeroizing::new(Vec::new());

    while output.len() < needed {
        let mut hasher = D::new();
        hasher.update(previous.as_slice());
        hasher.update(passphrase);
        hasher.update(salt);
        let mut block = Zeroizing::new(hasher.finalize().to_vec());

        for _ in 1..rounds {
            block = Zeroizing::new(D::digest(block.as_slice()).to_vec());
        }

        output.extend_from_slice(&block);
        previous = block;
    }

    output.truncate(needed);
    Ok(output)
}

/// Derive an AES-256 key and CBC IV from a passphrase and salt
pub fn derive_key_material(
    passphrase: &[u8],
    salt: &Salt,
    params: &KeyDerivationParams,
) -> HarnessResult<DerivedKeyMaterial> {
    tracing::debug!(
        digest = %params.digest,
        rounds = params.rounds,
        passphrase_len = passphrase.len(),
        "deriving key material"
    );

    let bytes = match params.digest {
        KdfDigest::Sha1 => bytes_to_key::<Sha1>(passphrase, salt, params.rounds, KEY_LEN, IV_LEN)?,
        KdfDigest::Sha256 => {
            bytes_to_key::<Sha256>(passphrase, salt, params.rounds, KEY_LEN, IV_LEN)?
        }
    };

    let mut key = [0u8; KEY_LEN];
    let mut iv = [0u8; IV_LEN];
    key.copy_from_slice(&bytes[..KEY_LEN]);
    iv.copy_from_slice(&bytes[KEY_LEN..KEY_LEN + IV_LEN]);

    Ok(DerivedKeyMaterial { key, iv })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_salt() -> Salt {
        salt_from_words([12345, 54321])
    }

    #[test]
    fn test_salt_layout() {
        assert_eq!(
            default_salt(),
            [0x39, 0x30, 0x00, 0x00, 0x31, 0xd4, 0x00, 0x00]
        );
    }

    #[test]
    fn test_derive_key_material() {
        let params = KeyDerivationParams::default();
        let material = derive_key_material(b"go bears lmao", &default_salt(), &params).unwrap();
        assert_eq!(material.key().len(), KEY_LEN);
        assert_eq!(material.iv().len(), IV_LEN);
    }

    #[test]
    fn test_same_passphrase_same_material() {
        let params = KeyDerivationParams::default();
        let m1 = derive_key_material(b"go bears lmao", &default_salt(), &params).unwrap();
        let m2 = derive_key_material(b"go bears lmao", &default_salt(), &params).unwrap();
        assert_eq!(m1.key(), m2.key());
        assert_eq!(m1.iv(), m2.iv());
    }

    #[test]
    fn test_different_passphrase_different_key() {
        let params = KeyDerivationParams::default();
        let m1 = derive_key_material(b"passphrase1", &default_salt(), &params).unwrap();
        let m2 = derive_key_material(b"passphrase2", &default_salt(), &params).unwrap();
        assert_ne!(m1.key(), m2.key());
    }

    #[test]
    fn test_different_salt_different_key() {
        let params = KeyDerivationParams::default();
        let m1 = derive_key_material(b"same", &salt_from_words([1, 2]), &params).unwrap();
        let m2 = derive_key_material(b"same", &salt_from_words([2, 1]), &params).unwrap();
        assert_ne!(m1.key(), m2.key());
    }

    #[test]
    fn test_digest_and_rounds_change_output() {
        let salt = default_salt();
        let base = derive_key_material(b"pw", &salt, &KeyDerivationParams::default()).unwrap();
        let sha256 = derive_key_material(
            b"pw",
            &salt,
            &KeyDerivationParams::with_values(5, KdfDigest::Sha256),
        )
        .unwrap();
        let one_round = derive_key_material(
            b"pw",
            &salt,
            &KeyDerivationParams::with_values(1, KdfDigest::Sha1),
        )
        .unwrap();
        assert_ne!(base.key(), sha256.key());
        assert_ne!(base.key(), one_round.key());
    }

    #[test]
    fn test_single_round_matches_openssl_construction() {
        let salt = default_salt();
        let out = bytes_to_key::<Sha1>(b"go bears lmao", &salt, 1, KEY_LEN, IV_LEN).unwrap();

        let mut first = Sha1::new();
        first.update(b"go bears lmao");
        first.update(salt);
        let d1 = first.finalize();

        let mut second = Sha1::new();
        second.update(d1);
        second.update(b"go bears lmao");
        second.update(salt);
        let d2 = second.finalize();

        assert_eq!(&out[..20], d1.as_slice());
        assert_eq!(&out[20..40], d2.as_slice());
        assert_eq!(out.len(), KEY_LEN + IV_LEN);
    }

    #[test]
    fn test_multiple_rounds_rehash_block() {
        let salt = default_salt();
        let out = bytes_to_key::<Sha256>(b"pw", &salt, 2, 16, 16).unwrap();

        let mut hasher = Sha256::new();
        hasher.update(b"pw");
        hasher.update(salt);
        let d1 = Sha256::digest(hasher.finalize());

        assert_eq!(&out[..], d1.as_slice());
    }

    #[test]
    fn test_empty_passphrase_rejected() {
        let result = derive_key_material(b"", &default_salt(), &KeyDerivationParams::default());
        assert!(matches!(result, Err(HarnessError::InvalidInput(_))));
    }

    #[test]
    fn test_zero_rounds_rejected() {
        let params = KeyDerivationParams::with_values(0, KdfDigest::Sha1);
        let result = derive_key_material(b"pw", &default_salt(), &params);
        assert!(matches!(result, Err(HarnessError::InvalidInput(_))));
    }

    #[test]
    fn test_zero_width_rejected() {
        let result = bytes_to_key::<Sha1>(b"pw", &default_salt(), 1, 0, IV_LEN);
        assert!(matches!(result, Err(HarnessError::InvalidInput(_))));
        let result = bytes_to_key::<Sha1>(b"pw", &default_salt(), 1, KEY_LEN, 0);
        assert!(matches!(result, Err(HarnessError::InvalidInput(_))));
    }

    #[test]
    fn test_debug_redacts_material() {
        let material =
            derive_key_material(b"pw", &default_salt(), &KeyDerivationParams::default()).unwrap();
        let debug = format!("{:?}", material);
        assert!(debug.contains("REDACTED"));
    }
}
