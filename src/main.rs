use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use chrono::Local;
use codeia_scrap::{info_time, process::process_site, Config, Result};
use tracing::error;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();
    init_tracing(&config.log_file)?;

    let start_time = Local::now();
    if let Err(e) = process_site(&config).await {
        error!("Fatal error: {e}");
        return Err(e);
    }
    info_time!(start_time, "Full program time");

    Ok(())
}

/// Logs to stdout and appends a plain-text copy to `log_file`.
fn init_tracing(log_file: &Path) -> Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(log_file)?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(fmt::layer())
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .init();

    Ok(())
}
