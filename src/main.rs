//! shallow-clone
//!
//! Fetch the newest revision of a single repository into `<root>/<name>` and
//! report how it went through the exit status.
//!

mod cli;
mod commands;
mod config;
mod errors;
mod git_utils;
mod logging;
mod models;
mod utils;
mod validation;

use std::process::ExitCode;

use clap::Parser;
use cli::Cli;
use commands::clone::run_clone;
use config::{load_clone_config, resolve_options};
use errors::InputError;
use git_utils::GitCli;
use logging::{LogSettings, init_logging};
use models::{CloneOutcome, CloneRequest};
use tracing::error;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            // --help and --version land here too
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    // Nothing may touch the disk before the URL is known to be present.
    let Some(url) = cli.source_url() else {
        eprintln!("{}", InputError::MissingUrl);
        return ExitCode::FAILURE;
    };

    if let Err(err) = init_logging(&LogSettings::from_env()) {
        eprintln!("Invalid configuration: {:#}", err);
        return ExitCode::FAILURE;
    }

    let options = match load_clone_config(cli.config.as_deref())
        .and_then(|config| resolve_options(&cli, config))
    {
        Ok(options) => options,
        Err(err) => {
            eprintln!("Invalid configuration: {:#}", err);
            return ExitCode::FAILURE;
        }
    };

    let request = match CloneRequest::new(url, &options.root) {
        Ok(request) => request,
        Err(err) => {
            eprintln!("Invalid repo URL: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let backend = GitCli::new(options.git_program.clone());

    match run_clone(&backend, &request, &options).await {
        Ok(outcome) => print_outcome(&outcome, cli.json),
        Err(err) => {
            error!(kind = ?err.kind(), url = request.source_url(), "clone failed: {}", err);
            eprintln!("Clone failed: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn print_outcome(outcome: &CloneOutcome, json: bool) -> ExitCode {
    if !json {
        println!("{}", outcome.summary());
        return ExitCode::SUCCESS;
    }

    match serde_json::to_string(outcome) {
        Ok(line) => {
            println!("{}", line);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Failed to encode result as JSON: {}", err);
            ExitCode::FAILURE
        }
    }
}
