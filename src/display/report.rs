//! Report formatting for round-trip results
//!
//! Renders driver records as the classic OK/FAIL lines, an aligned table, or
//! JSON.

use serde::Serialize;

use crate::config::HarnessConfig;
use crate::harness::{RoundTripRecord, RoundTripSummary};

/// Output format for the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ReportFormat {
    /// One OK/FAIL line per input
    #[default]
    Text,
    /// Aligned table with a summary line
    Table,
    /// Pretty-printed JSON
    Json,
}

/// Format a single record as an OK/FAIL line
pub fn format_record_line(record: &RoundTripRecord) -> String {
    if record.matched {
        format!("OK: enc/dec ok for \"{}\"", record.decrypted_text())
    } else {
        format!("FAIL: enc/dec failed for \"{}\"", record.input_text())
    }
}

/// Format all records as OK/FAIL lines
pub fn format_text(records: &[RoundTripRecord]) -> String {
    let mut output = String::new();
    for record in records {
        output.push_str(&format_record_line(record));
        output.push('\n');
    }
    output
}

/// Escape line breaks and tabs so multi-line inputs stay on one table row
fn single_line(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

/// Format records as an aligned table
pub fn format_table(records: &[RoundTripRecord]) -> String {
    if records.is_empty() {
        return "No inputs.".to_string();
    }

    let rows: Vec<(usize, &str, usize, usize, String)> = records
        .iter()
        .enumerate()
        .map(|(i, r)| {
            (
                i + 1,
                if r.matched { "OK" } else { "FAIL" },
                r.input.len(),
                r.ciphertext.len(),
                single_line(&r.input_text()),
            )
        })
        .collect();

    let input_width = rows.iter().map(|r| r.4.len()).max().unwrap_or(5).max(5);

    let mut output = String::new();
    output.push_str(&format!(
        "{:>3}  {:<6}  {:>6}  {:>6}  {}\n",
        "#", "Status", "Bytes", "Cipher", "Input"
    ));
    output.push_str(&format!(
        "{:->3}  {:-<6}  {:->6}  {:->6}  {:-<input_width$}\n",
        "",
        "",
        "",
        "",
        "",
        input_width = input_width,
    ));

    for (index, status, bytes, cipher, input) in &rows {
        output.push_str(&format!(
            "{:>3}  {:<6}  {:>6}  {:>6}  {}\n",
            index, status, bytes, cipher, input
        ));
    }

    let summary = RoundTripSummary::from_records(records);
    output.push_str(&format!(
        "\n{} inputs: {} passed, {} failed\n",
        summary.total, summary.passed, summary.failed
    ));

    output
}

#[derive(Serialize)]
struct JsonReport<'a> {
    config: &'a HarnessConfig,
    records: &'a [RoundTripRecord],
    summary: RoundTripSummary,
}

/// Format records and run settings as pretty JSON
pub fn format_json(
    config: &HarnessConfig,
    records: &[RoundTripRecord],
) -> Result<String, serde_json::Error> {
    let report = JsonReport {
        config,
        records,
        summary: RoundTripSummary::from_records(records),
    };
    serde_json::to_string_pretty(&report)
}
