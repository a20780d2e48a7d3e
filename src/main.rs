// Allow panic/unwrap/expect in tests (denied globally via Cargo.toml lints)
#![cfg_attr(
    test,
    allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic_in_result_fn,
        clippy::unwrap_in_result,
        clippy::arithmetic_side_effects,
        clippy::indexing_slicing
    )
)]

use clap::Parser;
use color_eyre::eyre::{eyre, Result};
use kcic_cms::cli::{build_actions, run, Args};
use kcic_cms::logging::{init_logging, LOG_FILENAME};
use kcic_cms::load_config;
use std::process::ExitCode;
use tracing::{debug, info};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    // Parse CLI arguments first so the config path and log flags are known.
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    let log_config = args.log_config(&config).map_err(|e| eyre!(e))?;
    let log_file = log_config.log_dir.join(LOG_FILENAME);
    if let Err(e) = init_logging(log_config) {
        eprintln!();
        eprintln!("Error: Failed to initialize logging: {e}");
        eprintln!("Logs: {}", log_file.display());
        eprintln!();
        return Err(e);
    }
    debug!(?config, "Loaded configuration");

    let actions = build_actions(&args, &config).await?;
    info!(command = ?args.command, policy = %actions.reorder_policy(), "Running command");

    let result = run(&actions, args.command).await;
    println!("{}", result.to_json());

    Ok(if result.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
