//! truerand command line entry point.

use std::process::ExitCode;

use clap::Parser;
use truerand::cli::{Cli, render_error};
use truerand::error::AppError;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match truerand::run(&cli) {
        Ok(text) => {
            if !text.is_empty() {
                println!("{text}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", render_error(&err, cli.json));
            let code = err
                .downcast_ref::<AppError>()
                .map_or(1, |app| app.error_code().exit_code());
            ExitCode::from(code)
        }
    }
}
