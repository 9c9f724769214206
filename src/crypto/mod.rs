//! Cryptographic functions for aes-roundtrip
//!
//! Provides AES-256-CBC encryption with `EVP_BytesToKey` key derivation,
//! plus zero-on-drop buffers for the passphrase.

pub mod cipher;
pub mod key_derivation;
pub mod secure_memory;

pub use cipher::{init_decrypt, init_encrypt, CipherPair, DecryptContext, EncryptContext, BLOCK_SIZE};
pub use key_derivation::{
    derive_key_material, salt_from_words, DerivedKeyMaterial, KdfDigest, KeyDerivationParams, Salt,
};
pub use secure_memory::SecureBytes;
