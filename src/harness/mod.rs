//! Round-trip harness
//!
//! Loads inputs and drives each one through encrypt and decrypt.

pub mod driver;
pub mod input;

pub use driver::{round_trip, run, run_inputs, RoundTripRecord, RoundTripSummary};
pub use input::{load_record, parse_record};
