use std::path::PathBuf;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use sevlog::config::LoggerConfig;
use sevlog::{log_error, log_information, log_verbose, log_warning, LogService};

fn main() -> Result<()> {
    // Diagnostics about the logger itself go to stderr, controlled by RUST_LOG
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sevlog=warn"));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => LoggerConfig::load_from(&PathBuf::from(path))?,
        None => LoggerConfig::load()?,
    };
    config.ensure_log_dir()?;
    tracing::debug!("Logging to {}", config.log_dir.display());

    let mut service = LogService::create(config);

    log_error!(service, "disk failure: {}", 42);
    log_warning!(service, "low disk space on {}", "/var");
    log_information!(service, "started with pid {}", std::process::id());
    log_verbose!(service, "tick");

    service.run_self_test(true);
    println!(
        "[SYSTEM]: Logger status: {}",
        if service.status() { "healthy" } else { "unhealthy" }
    );

    service.destroy();
    Ok(())
}
