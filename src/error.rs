//! Custom error types for aes-roundtrip
//!
//! This module defines the error hierarchy for the harness using thiserror
//! for ergonomic error definitions. Every variant is terminal for the process;
//! a round trip that merely produces different bytes is not an error.

use thiserror::Error;

/// The main error type for aes-roundtrip operations
#[derive(Error, Debug)]
pub enum HarnessError {
    /// Bad or unknown command-line flag
    #[error("Usage error: {0}")]
    Usage(String),

    /// Input file could not be opened, read, or parsed
    #[error("File error: {0}")]
    File(String),

    /// Empty passphrase or malformed derivation parameters
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Decryption failed its length or padding check
    #[error("Corrupt ciphertext: {0}")]
    CorruptCiphertext(String),
}

impl HarnessError {
    /// Create a "bad filename" error for an input path
    pub fn bad_filename(path: impl std::fmt::Display, reason: impl std::fmt::Display) -> Self {
        Self::File(format!("bad filename: {}: {}", path, reason))
    }

    /// Check if this is a usage error
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Usage(_))
    }

    /// Check if this is a file error
    pub fn is_file(&self) -> bool {
        matches!(self, Self::File(_))
    }

    /// Check if this is an invalid input error
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    /// Check if this is a corrupt ciphertext error
    pub fn is_corrupt_ciphertext(&self) -> bool {
        matches!(self, Self::CorruptCiphertext(_))
    }

    /// Process exit status for this error
    pub fn exit_code(&self) -> u8 {
        1
    }
}

impl From<std::io::Error> for HarnessError {
    fn from(err: std::io::Error) -> Self {
        Self::File(err.to_string())
    }
}

/// Result type alias for aes-roundtrip operations
pub type HarnessResult<T> = Result<T, HarnessError>;
