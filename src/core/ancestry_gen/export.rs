//! Catalog export: the sorted catalog and the location template as pretty JSON.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::instrument;

use super::types::Catalog;

pub const CATALOG_FILE: &str = "ancestries.json";
pub const TEMPLATE_FILE: &str = "location-template.json";

/// Sorted catalog as pretty JSON.
pub fn catalog_json(catalog: &Catalog) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&catalog.sorted())
}

/// `{ "Random": [...] }` template built from the sorted catalog.
pub fn template_json(catalog: &Catalog) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&catalog.sorted().location_template())
}

/// Write both documents into `dir`, returning the written paths.
#[instrument(skip_all, fields(dir = %dir.display()))]
pub async fn write_catalog_files(dir: &Path, catalog: &Catalog) -> std::io::Result<Vec<PathBuf>> {
    let catalog_text = catalog_json(catalog)?;
    let template_text = template_json(catalog)?;

    fs::create_dir_all(dir).await?;

    let catalog_path = dir.join(CATALOG_FILE);
    let template_path = dir.join(TEMPLATE_FILE);
    fs::write(&catalog_path, catalog_text).await?;
    fs::write(&template_path, template_text).await?;

    log::info!("Exported catalog to {}", dir.display());
    Ok(vec![catalog_path, template_path])
}
