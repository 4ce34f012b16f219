mod app;
mod error;
mod input;
mod paths;
mod terminal;
mod view;

use std::fs::{self, File};
use std::sync::Arc;

use log::{LevelFilter, info};
use signup_lib::{Config, FormController, SignupClient};
use simplelog::{Config as LogConfig, WriteLogger};

use crate::error::AppError;

#[tokio::main]
async fn main() {
    init_logging();

    if let Err(e) = run().await {
        log::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    let config = Config::from_env()?;
    info!("Creating users at {}", config.api_url);

    let client = SignupClient::from_config(&config)?;
    let controller = FormController::new(Arc::new(client), &config);

    app::run(controller).await
}

/// Writes debug logs to `latest.log` in the cache directory.
fn init_logging() {
    paths::rotate_logs();

    let Some(path) = paths::log_file() else { return };
    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }

    match File::create(&path) {
        Ok(file) => {
            let _ = WriteLogger::init(LevelFilter::Debug, LogConfig::default(), file);
        }
        Err(e) => eprintln!("Cannot create log file {}: {}", path.display(), e),
    }
}
