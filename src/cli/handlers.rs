//! Subcommand handlers.

use serde_json::Value;
use tracing::{debug, warn};

use crate::cli::output::{Output, QuotaReport};
use crate::cli::{
    BytesArgs, ChoiceArgs, Command, IntegerArgs, QuotaArgs, RangeArgs, StringArgs,
};
use crate::config::LimitsConfig;
use crate::domain::{FetchOptions, RandomRequest};
use crate::error::{AppError, Result};
use crate::service::{RandomService, RangeExpression};

/// Run a subcommand.
///
/// # Errors
///
/// Returns the service error of the operation.
pub fn execute(
    command: &Command,
    service: &RandomService,
    options: &FetchOptions,
    limits: &LimitsConfig,
) -> Result<Output> {
    debug!(?command, backend = service.backend_name(), "Executing command");

    match command {
        Command::String(args) => random_strings(service, args, options),
        Command::Integers(args) => random_integers(service, args, options),
        Command::Bytes(args) => random_bytes(service, args, options),
        Command::Quota(args) => quota(service, args, options),
        Command::Choice(args) => random_choice(service, args, options),
        Command::Range(args) => range(args, limits),
    }
}

fn random_strings(
    service: &RandomService,
    args: &StringArgs,
    options: &FetchOptions,
) -> Result<Output> {
    let options = options.clone().unique(args.unique);

    let mut values = Vec::with_capacity(args.count);
    for _ in 0..args.count {
        match service.random_string(args.length, &args.valid_characters, &options)? {
            Some(value) => values.push(value),
            None => warn!(length = args.length, "No random string generated"),
        }
    }
    Ok(Output::Strings(values))
}

fn random_integers(
    service: &RandomService,
    args: &IntegerArgs,
    options: &FetchOptions,
) -> Result<Output> {
    let request = RandomRequest::new(
        args.count,
        args.min,
        args.max,
        options.clone().unique(args.unique),
    );

    let sequence = service.fetch_random_integers(&request)?;
    match &sequence {
        Some(sequence) => {
            debug!(source = %sequence.source, count = sequence.len(), "Integers generated");
        }
        None => {
            warn!(count = args.count, min = args.min, max = args.max, "No integers generated");
        }
    }
    Ok(Output::Integers(sequence))
}

fn random_bytes(
    service: &RandomService,
    args: &BytesArgs,
    options: &FetchOptions,
) -> Result<Output> {
    let bytes = service.fetch_random_bytes(args.count, options)?;
    Ok(Output::Bytes(hex::encode(bytes)))
}

fn quota(service: &RandomService, args: &QuotaArgs, options: &FetchOptions) -> Result<Output> {
    let quota = service.remote_quota(options)?;
    let sufficient = args
        .bytes
        .map(|bytes| service.check_remote_quota(bytes, options))
        .transpose()?;

    Ok(Output::Quota(QuotaReport { quota, sufficient }))
}

fn random_choice(
    service: &RandomService,
    args: &ChoiceArgs,
    options: &FetchOptions,
) -> Result<Output> {
    let choices: Value = serde_json::from_str(&args.choices)
        .map_err(|e| AppError::InvalidArgument(format!("choices must be valid JSON: {e}")))?;

    let options = options.clone().unique(args.unique);
    let picked = service.random_choice_json(&choices, args.count, &options)?;
    Ok(Output::Choices(picked))
}

fn range(args: &RangeArgs, limits: &LimitsConfig) -> Result<Output> {
    let expression = RangeExpression::parse(&args.expression, limits.upper_bound)?;
    Ok(Output::Range(expression.evaluate()))
}
