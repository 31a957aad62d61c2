use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use survey_responder::cli::Cli;
use survey_responder::config::Config;
use survey_responder::utils::error::{AppError, report_error};

fn init_tracing(debug: bool) {
    let default_filter = if debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    // Ensure configuration exists and load it
    let mut config = match &cli.config {
        Some(config_path) => Config::load_custom(config_path)?,
        None => {
            Config::ensure_config_exists()?;
            Config::load()?
        }
    };

    cli.apply_overrides(&mut config);
    config.validate()?;

    cli.command.execute(config).await
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    if let Err(err) = run(cli).await {
        match err.downcast_ref::<AppError>() {
            Some(app_err) => report_error(app_err),
            None => report_error(&AppError::Unexpected(format!("{:#}", err))),
        }
        std::process::exit(1);
    }
}
