//! Loaded tables and the lazily built catalog.
//!
//! Tables are loaded once and never mutated afterwards. The merged catalog is
//! only needed for the catalog view, so it is built on first request and
//! cached.

use std::sync::Arc;

use rand::Rng;
use tokio::sync::OnceCell;
use tracing::instrument;

use super::errors::{AncestryGenError, Result};
use super::generator::{AncestryGenerator, GeneratedResult};
use super::heritage::HeritageRules;
use super::merger::load_catalog;
use super::source::{fetch_json, DataSource, DocumentPaths};
use super::types::{Catalog, FeatureTable, LocationTable};

/// Application state for the roller.
pub struct RollerState {
    source: Arc<dyn DataSource>,
    paths: DocumentPaths,
    features: FeatureTable,
    locations: LocationTable,
    /// Archetype table used for rolls. Empty when `archetypes.json` is absent.
    archetypes: Catalog,
    heritage: HeritageRules,
    catalog: OnceCell<Catalog>,
}

impl RollerState {
    /// Assemble state from already loaded tables.
    pub fn new(
        source: Arc<dyn DataSource>,
        paths: DocumentPaths,
        features: FeatureTable,
        locations: LocationTable,
        archetypes: Catalog,
    ) -> Self {
        Self {
            source,
            paths,
            features,
            locations,
            archetypes,
            heritage: HeritageRules::default(),
            catalog: OnceCell::new(),
        }
    }

    pub fn with_heritage(mut self, heritage: HeritageRules) -> Self {
        self.heritage = heritage;
        self
    }

    /// Load features, locations and archetypes concurrently.
    ///
    /// Features and locations are required. A missing or broken archetype
    /// table only disables archetypes.
    #[instrument(skip_all)]
    pub async fn load(source: Arc<dyn DataSource>, paths: DocumentPaths) -> Result<Self> {
        log::info!("Loading ancestry tables from {}", source.describe());

        let (features, locations, archetypes) = tokio::join!(
            fetch_json::<FeatureTable>(source.as_ref(), &paths.features),
            fetch_json::<LocationTable>(source.as_ref(), &paths.locations),
            fetch_json::<Catalog>(source.as_ref(), &paths.archetypes),
        );

        let features = features.map_err(|e| AncestryGenError::load_failed("features", e))?;
        let locations = locations.map_err(|e| AncestryGenError::load_failed("locations", e))?;
        let archetypes = archetypes.unwrap_or_else(|e| {
            log::warn!("Archetype table unavailable, rolling without archetypes: {}", e);
            Catalog::default()
        });

        log::info!(
            "Loaded {} locations, {} features, {} archetype entries",
            locations.len(),
            features.features.len(),
            archetypes.len()
        );

        Ok(Self::new(source, paths, features, locations, archetypes))
    }

    pub fn generator(&self) -> AncestryGenerator<'_> {
        AncestryGenerator::new(&self.locations, &self.features, &self.archetypes)
            .with_heritage(self.heritage.clone())
    }

    /// Roll once for `location`.
    pub fn generate<R>(&self, location: &str, rng: &mut R) -> Result<GeneratedResult>
    where
        R: Rng + ?Sized,
    {
        self.generator().generate(location, rng)
    }

    /// Roll once, mapping recoverable failures to `None`.
    pub fn try_generate<R>(&self, location: &str, rng: &mut R) -> Result<Option<GeneratedResult>>
    where
        R: Rng + ?Sized,
    {
        match self.generate(location, rng) {
            Ok(result) => Ok(Some(result)),
            Err(e) if e.is_recoverable() => {
                log::warn!("Nothing to roll: {}", e);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Location names in document order.
    pub fn location_names(&self) -> Vec<String> {
        self.locations.names().map(str::to_string).collect()
    }

    /// The location rolled at startup.
    pub fn first_location(&self) -> Option<&str> {
        self.locations.first()
    }

    pub fn paths(&self) -> &DocumentPaths {
        &self.paths
    }

    pub fn describe_source(&self) -> String {
        self.source.describe()
    }

    /// The merged catalog, built on first call.
    ///
    /// A failed build is not cached, so a later call tries again.
    pub async fn catalog(&self) -> Result<&Catalog> {
        self.catalog
            .get_or_try_init(|| load_catalog(self.source.as_ref(), &self.paths))
            .await
    }

    pub fn catalog_if_built(&self) -> Option<&Catalog> {
        self.catalog.get()
    }
}
