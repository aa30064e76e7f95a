//! edu - session and tenant tooling for the school platform
//!
//! # Examples
//!
//! ```bash
//! # Store a token issued by the identity provider
//! edu login --token <token> --ttl-secs 3600
//!
//! # Who am I, and which tenant does this host belong to?
//! edu whoami --pretty
//! edu resolve --host acme.school.example
//!
//! # Everything a page needs before rendering
//! edu bootstrap --host acme.school.example --pretty
//! ```

use edu_cli::{Cli, CliResult, build_session, execute, logger};
use edu_config::Config;

use std::process::ExitCode;

use clap::Parser;
use log::info;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> CliResult<String> {
    let config = Config::load()?;
    config.validate()?;

    logger::initialize(
        config.logging.level,
        config.log_file_path()?,
        config.logging.colored,
    )?;

    info!("Starting edu v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let session = build_session(&config, &cli)?;
    let value = execute(&session, &cli.command, &config).await?;

    let output = if cli.pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    Ok(output)
}
