//! Command line interface.
//!
//! Global flags override the loaded configuration; each subcommand maps onto
//! one operation of the random value service or the range evaluator.

pub mod handlers;
pub mod output;

use clap::{Args, Parser, Subcommand};

use crate::config::{AppConfig, ProviderBackend};
use crate::service::ALPHANUMERIC;

pub use handlers::execute;
pub use output::{Output, render, render_error};

/// True-random numbers with a secure local fallback.
#[derive(Parser, Debug)]
#[command(name = "truerand", version, about, long_about = None)]
pub struct Cli {
    /// API key for the structured remote endpoint
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Network timeout in seconds, also the time budget for unique draws
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Report sourcing, quota and timeout failures instead of degrading
    #[arg(long, global = true)]
    pub fail_on_error: bool,

    /// Never contact the remote provider
    #[arg(long, global = true)]
    pub offline: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Operation to run
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Apply global flags on top of the loaded configuration.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(api_key) = &self.api_key {
            config.provider.api_key.clone_from(api_key);
        }
        if let Some(timeout) = self.timeout {
            config.provider.timeout_secs = timeout;
        }
        if self.offline {
            config.provider.backend = ProviderBackend::Offline;
        }
        if self.verbose {
            config.observability.log_level = "debug".to_string();
        }
    }
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate random strings
    String(StringArgs),
    /// Generate random integers
    Integers(IntegerArgs),
    /// Generate random bytes, printed as hex
    Bytes(BytesArgs),
    /// Show the remaining remote quota
    Quota(QuotaArgs),
    /// Pick random elements from a JSON array or object
    Choice(ChoiceArgs),
    /// Evaluate a range expression such as "1-10, ~5-8, >=7:odd"
    Range(RangeArgs),
}

/// Arguments of `truerand string`.
#[derive(Args, Debug)]
pub struct StringArgs {
    /// Characters per string
    #[arg(short, long, default_value_t = 10)]
    pub length: usize,

    /// Number of strings
    #[arg(short, long, default_value_t = 1)]
    pub count: usize,

    /// Alphabet to draw from
    #[arg(long, default_value = ALPHANUMERIC)]
    pub valid_characters: String,

    /// No character repeats within a string
    #[arg(short, long)]
    pub unique: bool,
}

/// Arguments of `truerand integers`.
#[derive(Args, Debug)]
pub struct IntegerArgs {
    /// Number of integers
    #[arg(short, long, default_value_t = 1)]
    pub count: usize,

    /// Smallest value
    #[arg(long, default_value_t = 1, allow_hyphen_values = true)]
    pub min: i64,

    /// Largest value
    #[arg(long, default_value_t = 100, allow_hyphen_values = true)]
    pub max: i64,

    /// No value repeats
    #[arg(short, long)]
    pub unique: bool,
}

/// Arguments of `truerand bytes`.
#[derive(Args, Debug)]
pub struct BytesArgs {
    /// Number of bytes
    #[arg(short, long, default_value_t = 16)]
    pub count: usize,
}

/// Arguments of `truerand quota`.
#[derive(Args, Debug)]
pub struct QuotaArgs {
    /// Check whether the quota covers this many bytes
    pub bytes: Option<u64>,
}

/// Arguments of `truerand choice`.
#[derive(Args, Debug)]
pub struct ChoiceArgs {
    /// JSON array, or object whose values are drawn
    pub choices: String,

    /// Number of picks
    #[arg(short, long, default_value_t = 1)]
    pub count: usize,

    /// No element is picked twice
    #[arg(short, long)]
    pub unique: bool,
}

/// Arguments of `truerand range`.
#[derive(Args, Debug)]
pub struct RangeArgs {
    /// Range expression
    #[arg(allow_hyphen_values = true)]
    pub expression: String,
}
