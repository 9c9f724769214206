//! AES-256-CBC encryption/decryption
//!
//! Each context holds a key and the IV it starts every call from. Calls are
//! self-contained: no chaining state carries over from one call to the next.
//! Plaintext is PKCS#7 padded, so ciphertext is always a non-empty multiple
//! of the block size.

use aes::Aes256;
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{HarnessError, HarnessResult};

use super::key_derivation::{DerivedKeyMaterial, IV_LEN, KEY_LEN};

/// AES block size in bytes
pub const BLOCK_SIZE: usize = 16;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Encryption half of a cipher session
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct EncryptContext {
    key: [u8; KEY_LEN],
    iv: [u8; IV_LEN],
}

/// Decryption half of a cipher session
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DecryptContext {
    key: [u8; KEY_LEN],
    iv: [u8; IV_LEN],
}

/// Create an encryption context from a key and IV
pub fn init_encrypt(key: &[u8; KEY_LEN], iv: &[u8; IV_LEN]) -> EncryptContext {
    EncryptContext {
        key: *key,
        iv: *iv,
    }
}

/// Create a decryption context from a key and IV
pub fn init_decrypt(key: &[u8; KEY_LEN], iv: &[u8; IV_LEN]) -> DecryptContext {
    DecryptContext {
        key: *key,
        iv: *iv,
    }
}

impl EncryptContext {
    /// Encrypt plaintext, returning padded ciphertext
    pub fn encrypt(&self, plaintext: &[u8]) -> Vec<u8> {
        Aes256CbcEnc::new(&self.key.into(), &self.iv.into())
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext)
    }
}

impl DecryptContext {
    /// Decrypt ciphertext and strip its padding
    pub fn decrypt(&self, ciphertext: &[u8]) -> HarnessResult<Vec<u8>> {
        if ciphertext.is_empty() {
            return Err(HarnessError::CorruptCiphertext(
                "ciphertext is empty".to_string(),
            ));
        }
        if ciphertext.len() % BLOCK_SIZE != 0 {
            return Err(HarnessError::CorruptCiphertext(format!(
                "length {} is not a multiple of the {}-byte block size",
                ciphertext.len(),
                BLOCK_SIZE
            )));
        }

        Aes256CbcDec::new(&self.key.into(), &self.iv.into())
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map_err(|_| HarnessError::CorruptCiphertext("invalid padding".to_string()))
    }
}

impl fmt::Debug for EncryptContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncryptContext").finish_non_exhaustive()
    }
}

impl fmt::Debug for DecryptContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecryptContext").finish_non_exhaustive()
    }
}

/// Matched encrypt/decrypt contexts built from one derivation
#[derive(Debug, Clone)]
pub struct CipherPair {
    pub encrypt: EncryptContext,
    pub decrypt: DecryptContext,
}

impl CipherPair {
    /// Build both directions from the same key material
    pub fn from_material(material: &DerivedKeyMaterial) -> Self {
        Self {
            encrypt: init_encrypt(material.key(), material.iv()),
            decrypt: init_decrypt(material.key(), material.iv()),
        }
    }
}
