//! # truerand
//!
//! True-random numbers sourced from a remote provider, degrading to a local
//! cryptographically-secure generator, plus a small numeric range-expression
//! language.
//!
//! - **Random value service**: bytes, bounded integers (optionally unique),
//!   choices and strings, sourced through three tiers
//! - **Range expressions**: `"1-10, ~5-8, >=7:odd"` evaluates to `[1, 3, 7, 9]`
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                             truerand                             │
//! ├──────────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌─────────────┐  ┌─────────────┐  ┌────────────┐ │
//! │  │    CLI    │  │   Service   │  │  Provider   │  │   Domain   │ │
//! │  │  (clap)   │→ │    Layer    │→ │   Layer     │  │   Models   │ │
//! │  └───────────┘  └─────────────┘  └─────────────┘  └────────────┘ │
//! └──────────────────────────────────────────────────────────────────┘
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod provider;
pub mod service;

use tracing::debug;

use crate::cli::Cli;
use crate::config::{AppConfig, ObservabilityConfig};
use crate::error::AppError;
use crate::provider::create_provider;
use crate::service::RandomService;

/// Run one command line invocation and return its rendered output.
///
/// This function:
/// 1. Loads configuration from files and environment
/// 2. Applies command line overrides
/// 3. Initializes logging
/// 4. Creates the provider backend and the random service
/// 5. Executes the subcommand and renders the result
///
/// # Errors
///
/// Returns an error if:
/// - Configuration cannot be loaded or is invalid
/// - The provider backend fails to initialize
/// - The operation fails
pub fn run(cli: &Cli) -> anyhow::Result<String> {
    let mut config = AppConfig::load().map_err(AppError::from)?;
    cli.apply(&mut config);
    config.validate().map_err(AppError::from)?;

    init_logging(&config.observability);

    debug!(
        version = env!("CARGO_PKG_VERSION"),
        backend = %config.provider.backend,
        "Starting truerand"
    );

    let provider = create_provider(&config.provider)?;
    let service = RandomService::new(provider, &config.provider, &config.limits);
    let options = service.options().fail_on_error(cli.fail_on_error);

    let output = cli::execute(&cli.command, &service, &options, &config.limits)?;
    Ok(cli::render(&output, cli.json)?)
}

/// Initialize logging based on configuration.
///
/// Logs go to stderr so stdout carries only results. Calling this more than
/// once keeps the first subscriber.
pub fn init_logging(config: &ObservabilityConfig) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    let _ = if config.log_format == "json" {
        subscriber
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        subscriber
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };
}
