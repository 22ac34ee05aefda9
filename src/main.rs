//! File Storage - Entry Point
//!
//! Filesystem-backed namespace, directory and file storage.

use log::{error, info};
use std::sync::Arc;

use file_storage::app::Service;
use file_storage::config::Settings;
use file_storage::utils::logging::{GlobalLogger, setup_logging, setup_stderr_logging};

#[tokio::main]
async fn main() {
    // The log file lives in LOG_DIR, so failures before it exists log to stderr
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            setup_stderr_logging();
            error!("error of configuring the app: {}", e);
            std::process::exit(1);
        }
    };

    match setup_logging(&settings.log_dir) {
        Ok(path) => info!("Logging to {}", path.display()),
        Err(e) => {
            setup_stderr_logging();
            error!("error of creating the main-log-file: {}", e);
            std::process::exit(1);
        }
    }

    let service = match Service::new(settings, Arc::new(GlobalLogger)) {
        Ok(service) => service,
        Err(e) => {
            error!("error of configuring the app: {}", e);
            log::logger().flush();
            std::process::exit(1);
        }
    };

    if let Err(e) = service.run().await {
        error!("the app stopped with an error: {}", e);
        log::logger().flush();
        std::process::exit(1);
    }
}
