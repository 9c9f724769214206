//! Round-trip driver
//!
//! Pushes every input through encrypt then decrypt and compares the result
//! with the original bytes, NUL terminator included.

use serde::{Serialize, Serializer};

use crate::config::HarnessConfig;
use crate::crypto::{derive_key_material, CipherPair};
use crate::error::HarnessResult;

/// Outcome of one input's round trip
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundTripRecord {
    /// Original input, without terminator
    #[serde(serialize_with = "lossy_text")]
    pub input: Vec<u8>,
    /// Decrypted bytes, terminator removed when present
    #[serde(serialize_with = "lossy_text")]
    pub decrypted: Vec<u8>,
    /// Ciphertext produced for the input
    #[serde(serialize_with = "base64_bytes")]
    pub ciphertext: Vec<u8>,
    /// Whether the decrypted bytes matched the original exactly
    pub matched: bool,
}

impl RoundTripRecord {
    /// Input rendered as text
    pub fn input_text(&self) -> String {
        String::from_utf8_lossy(&self.input).into_owned()
    }

    /// Decrypted output rendered as text
    pub fn decrypted_text(&self) -> String {
        String::from_utf8_lossy(&self.decrypted).into_owned()
    }
}

/// Pass/fail totals for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RoundTripSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
}

impl RoundTripSummary {
    /// Tally a set of records
    pub fn from_records(records: &[RoundTripRecord]) -> Self {
        let passed = records.iter().filter(|r| r.matched).count();
        Self {
            total: records.len(),
            passed,
            failed: records.len() - passed,
        }
    }

    /// Check if every record matched
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

fn lossy_text<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&String::from_utf8_lossy(bytes))
}

fn base64_bytes<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    use base64::{engine::general_purpose::STANDARD, Engine};
    serializer.serialize_str(&STANDARD.encode(bytes))
}

/// Round-trip a single input through the cipher pair
pub fn round_trip(pair: &CipherPair, input: &[u8]) -> HarnessResult<RoundTripRecord> {
    // Carry the terminator through the cipher so the output is valid text
    let mut plaintext = Vec::with_capacity(input.len() + 1);
    plaintext.extend_from_slice(input);
    plaintext.push(0);

    let ciphertext = pair.encrypt.encrypt(&plaintext);
    let mut decrypted = pair.decrypt.decrypt(&ciphertext)?;

    let matched = decrypted == plaintext;
    if decrypted.last() == Some(&0) {
        decrypted.pop();
    }

    tracing::debug!(
        plaintext_len = plaintext.len(),
        ciphertext_len = ciphertext.len(),
        matched,
        "round trip complete"
    );

    Ok(RoundTripRecord {
        input: input.to_vec(),
        decrypted,
        ciphertext,
        matched,
    })
}

/// Round-trip every input with an already initialized cipher pair
pub fn run_inputs<I, B>(pair: &CipherPair, inputs: I) -> HarnessResult<Vec<RoundTripRecord>>
where
    I: IntoIterator<Item = B>,
    B: AsRef<[u8]>,
{
    let mut records = Vec::new();

    for (index, input) in inputs.into_iter().enumerate() {
        let record = round_trip(pair, input.as_ref())?;
        if !record.matched {
            tracing::warn!(index, input = %record.input_text(), "round trip mismatch");
        }
        records.push(record);
    }

    Ok(records)
}

/// Derive the cipher pair from the config and round-trip all its inputs
pub fn run(config: &HarnessConfig) -> HarnessResult<Vec<RoundTripRecord>> {
    if config.accelerate {
        tracing::debug!("accelerate requested; no fast path is available, continuing normally");
    }

    let material = derive_key_material(&config.passphrase, &config.salt, &config.kdf)?;
    let pair = CipherPair::from_material(&material);

    let records = run_inputs(&pair, &config.inputs)?;
    let summary = RoundTripSummary::from_records(&records);
    if summary.all_passed() {
        tracing::info!(total = summary.total, "all round trips matched");
    } else {
        tracing::warn!(
            total = summary.total,
            passed = summary.passed,
            failed = summary.failed,
            "some round trips did not match"
        );
    }

    Ok(records)
}
