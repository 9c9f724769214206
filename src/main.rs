use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{error::ErrorKind, CommandFactory, Parser};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use aes_roundtrip::config::HarnessConfig;
use aes_roundtrip::crypto::{KdfDigest, KeyDerivationParams};
use aes_roundtrip::display::{format_json, format_table, format_text, ReportFormat};
use aes_roundtrip::harness::{self, load_record};
use aes_roundtrip::HarnessError;

#[derive(Parser)]
#[command(
    name = "aes-roundtrip",
    author = "Kaylee Beyene",
    version,
    about = "AES-256-CBC encrypt/decrypt round-trip harness",
    long_about = "Derives an AES-256 key and IV from a passphrase and fixed salt, \
                  encrypts each sample input, decrypts it again, and reports \
                  whether the result matches the original byte for byte.",
    disable_help_flag = true,
    args_override_self = true
)]
struct Cli {
    /// Display this message
    #[arg(short = 'h')]
    help: bool,

    /// Accelerate (accepted, currently has no effect)
    #[arg(short = 'a')]
    accelerate: bool,

    /// Set key data (passphrase)
    #[arg(short = 'k', value_name = "DATA")]
    keydata: Option<OsString>,

    /// Provide input file
    #[arg(short = 'f', value_name = "FILE")]
    file: Option<PathBuf>,

    /// Digest used for key derivation
    #[arg(long, value_enum, default_value_t = KdfDigest::Sha1)]
    digest: KdfDigest,

    /// Hash rounds per key derivation block
    #[arg(long, default_value_t = 5)]
    rounds: u32,

    /// Report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn usage() -> String {
    Cli::command().render_help().to_string()
}

fn main() -> ExitCode {
    match try_main() {
        Ok(code) => code,
        Err(err) => {
            if let Some(harness_err) = err.downcast_ref::<HarnessError>() {
                eprintln!("{}", harness_err);
                if harness_err.is_usage() {
                    eprint!("{}", usage());
                }
                return ExitCode::from(harness_err.exit_code());
            }
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn try_main() -> Result<ExitCode> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if err.kind() == ErrorKind::DisplayVersion => {
            print!("{}", err);
            return Ok(ExitCode::SUCCESS);
        }
        Err(err) => {
            let message = err.to_string();
            let first_line = message.lines().next().unwrap_or_default();
            let reason = first_line.strip_prefix("error: ").unwrap_or(first_line);
            return Err(HarnessError::Usage(reason.to_string()).into());
        }
    };

    if cli.help {
        eprint!("{}", usage());
        return Ok(ExitCode::from(1));
    }

    init_logging(&cli.log_level)?;

    let config = build_config(&cli)?;
    let records = harness::run(&config)?;

    let report = match cli.format {
        ReportFormat::Text => format_text(&records),
        ReportFormat::Table => format_table(&records),
        ReportFormat::Json => {
            let mut json =
                format_json(&config, &records).context("Failed to serialize report")?;
            json.push('\n');
            json
        }
    };
    print!("{}", report);

    Ok(ExitCode::SUCCESS)
}

/// Assemble the run configuration from parsed flags
fn build_config(cli: &Cli) -> Result<HarnessConfig, HarnessError> {
    let mut config = HarnessConfig::default()
        .with_kdf(KeyDerivationParams::with_values(cli.rounds, cli.digest))
        .with_accelerate(cli.accelerate);

    if let Some(ref keydata) = cli.keydata {
        config = config.with_passphrase(keydata.as_encoded_bytes())?;
    }

    if let Some(ref path) = cli.file {
        let record = load_record(path)?;
        config = config.with_inputs(vec![record]);
    }

    Ok(config)
}

/// Initialise tracing; logs go to stderr so the report stays clean on stdout
fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level)
        .with_context(|| format!("Invalid log level: {}", level))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false),
        )
        .init();

    Ok(())
}
