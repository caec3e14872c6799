use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::config::AppConfig;
use crate::core::ancestry_gen::{
    write_catalog_files, Catalog, DataSource, FileSource, HttpSource, RollerState,
};

use super::events::{AppEvent, Notification, NotificationLevel};

/// Handle to the loaded roller state and background work.
///
/// Created once at startup, then passed by ref to views that need backend
/// access.
pub struct Services {
    pub state: Arc<RollerState>,
    /// Where catalog exports are written.
    pub export_dir: PathBuf,
    pub event_tx: mpsc::UnboundedSender<AppEvent>,
}

/// Pick the document source from config: HTTP when a base URL is set,
/// the data directory otherwise.
pub fn build_source(config: &AppConfig) -> Result<Arc<dyn DataSource>, Box<dyn std::error::Error>> {
    match config.data.base_url.as_deref() {
        Some(base_url) => Ok(Arc::new(HttpSource::new(base_url)?)),
        None => Ok(Arc::new(FileSource::new(config.data_dir()))),
    }
}

impl Services {
    /// Load all tables from config.
    ///
    /// Failures here are fatal; the TUI cannot roll without features and locations.
    pub async fn init(
        config: &AppConfig,
        event_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let source = build_source(config)?;
        log::info!("Using {}", source.describe());

        let state = RollerState::load(source, config.data.paths.clone())
            .await?
            .with_heritage(config.generation.heritage.clone());

        Ok(Self::new(Arc::new(state), config.data_dir(), event_tx))
    }

    pub fn new(
        state: Arc<RollerState>,
        export_dir: PathBuf,
        event_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        Self {
            state,
            export_dir,
            event_tx,
        }
    }

    /// Build (or fetch the cached) catalog in the background.
    pub fn request_catalog(&self) {
        let state = Arc::clone(&self.state);
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let event = match state.catalog().await {
                Ok(catalog) => AppEvent::CatalogReady(catalog.clone()),
                Err(e) => {
                    log::error!("Catalog build failed: {}", e);
                    AppEvent::CatalogFailed(e.to_string())
                }
            };
            let _ = tx.send(event);
        });
    }

    /// Write the catalog and template into the export directory.
    pub fn export_catalog(&self, catalog: Catalog) {
        let dir = self.export_dir.clone();
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let event = match write_catalog_files(&dir, &catalog).await {
                Ok(paths) => AppEvent::ExportDone(paths),
                Err(e) => {
                    log::error!("Catalog export to {} failed: {}", dir.display(), e);
                    AppEvent::Notification(Notification::new(
                        format!("Export failed: {e}"),
                        NotificationLevel::Error,
                    ))
                }
            };
            let _ = tx.send(event);
        });
    }
}
