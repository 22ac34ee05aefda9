//! Process lifecycle
//!
//! Wires settings and the storage together and keeps the process alive
//! until it is asked to stop.

use log::{Log, info};
use std::sync::Arc;

use crate::config::Settings;
use crate::error::AppError;
use crate::storage::Storage;

pub struct Service {
    settings: Settings,
    storage: Storage,
}

impl Service {
    /// Prepares the storage root and builds the storage on top of it.
    pub fn new(settings: Settings, log: Arc<dyn Log>) -> Result<Self, AppError> {
        info!("main application's configuring begun");

        std::fs::create_dir_all(&settings.storage_path)?;
        info!("Storage root directory: {}", settings.storage_path.display());

        let storage = Storage::new(log, settings.storage_path.clone());

        Ok(Self { settings, storage })
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Runs until Ctrl-C.
    pub async fn run(&self) -> Result<(), AppError> {
        info!(
            "Starting file storage on {} (root {})",
            self.settings.socket,
            self.storage.base().display()
        );

        tokio::signal::ctrl_c().await?;

        info!("the app was FULLY STOPPED");
        log::logger().flush();
        Ok(())
    }
}
