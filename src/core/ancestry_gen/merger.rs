//! Catalog building from homebrew and core race documents.
//!
//! # Merge Order
//!
//! Documents are merged in a fixed order: homebrew documents in index order,
//! then the core races document. The merge runs in two passes over that order:
//!
//! ```text
//! Pass 1: race lists      homebrew[0] .. homebrew[n], core
//! Pass 2: subrace lists   homebrew[0] .. homebrew[n], core
//! ```
//!
//! Every ancestry is therefore known before any archetype looks up its parent,
//! whichever document declares it. Ancestries are deduplicated by name and
//! archetypes by name across the whole catalog; the first occurrence wins.
//!
//! # Failure Handling
//!
//! The blocklist, the homebrew index and the core races document are required.
//! A homebrew document that cannot be fetched or parsed is logged and skipped.

use std::collections::HashMap;

use indexmap::IndexMap;
use tracing::instrument;

use super::errors::{AncestryGenError, Result};
use super::source::{fetch_json, DataSource, DocumentPaths};
use super::types::{
    AncestryRecord, Blocklist, Catalog, HomebrewIndex, RaceEntry, SourceDocument, SubraceEntry,
};

// ============================================================================
// Merge Statistics
// ============================================================================

/// Counters for one merge pass over one document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub added: usize,
    pub duplicates: usize,
    pub blocked: usize,
    pub unsourced: usize,
    pub orphaned: usize,
}

// ============================================================================
// SourceMerger
// ============================================================================

/// Accumulates ancestries and archetypes across documents.
pub struct SourceMerger<'a> {
    blocklist: &'a Blocklist,
    ancestries: IndexMap<String, AncestryRecord>,
    /// Archetype name to parent ancestry name, global across all ancestries.
    archetypes: HashMap<String, String>,
}

impl<'a> SourceMerger<'a> {
    pub fn new(blocklist: &'a Blocklist) -> Self {
        Self {
            blocklist,
            ancestries: IndexMap::new(),
            archetypes: HashMap::new(),
        }
    }

    /// Merge the race list of one document.
    pub fn merge_ancestries(&mut self, doc: &SourceDocument) -> MergeStats {
        let mut stats = MergeStats::default();
        let doc_source = doc.source_abbreviation();
        let display_source = doc.display_abbreviation();

        for race in &doc.race {
            let Some(source) = race.source.as_deref().or(doc_source) else {
                stats.unsourced += 1;
                continue;
            };

            if self.blocklist.blocks_ancestry(source, &race.name) {
                log::debug!("Blocked ancestry '{}' from {}", race.name, source);
                stats.blocked += 1;
                continue;
            }

            if self.ancestries.contains_key(&race.name) {
                stats.duplicates += 1;
                continue;
            }

            self.ancestries
                .insert(race.name.clone(), record_for(race, display_source));
            stats.added += 1;
        }

        stats
    }

    /// Merge the subrace list of one document into already-known ancestries.
    pub fn merge_archetypes(&mut self, doc: &SourceDocument) -> MergeStats {
        let mut stats = MergeStats::default();
        let doc_source = doc.source_abbreviation();

        for subrace in &doc.subrace {
            let SubraceEntry {
                name: Some(name),
                race_name: Some(race_name),
                ..
            } = subrace
            else {
                stats.orphaned += 1;
                continue;
            };

            let Some(source) = subrace.source.as_deref().or(doc_source) else {
                stats.unsourced += 1;
                continue;
            };

            let Some(parent) = self.ancestries.get_mut(race_name) else {
                stats.orphaned += 1;
                continue;
            };

            if self.archetypes.contains_key(name) {
                stats.duplicates += 1;
                continue;
            }

            if self.blocklist.blocks_archetype(source, name) {
                log::debug!("Blocked archetype '{}' from {}", name, source);
                stats.blocked += 1;
                continue;
            }

            self.archetypes.insert(name.clone(), race_name.clone());
            if !parent.archetypes.contains(name) {
                parent.archetypes.push(name.clone());
            }
            stats.added += 1;
        }

        stats
    }

    /// Merge both lists of a single document, races first.
    pub fn process_document(&mut self, doc: &SourceDocument) -> (MergeStats, MergeStats) {
        let races = self.merge_ancestries(doc);
        let subraces = self.merge_archetypes(doc);
        (races, subraces)
    }

    /// Parent ancestry of a registered archetype.
    pub fn parent_of(&self, archetype: &str) -> Option<&str> {
        self.archetypes.get(archetype).map(String::as_str)
    }

    pub fn finish(self) -> Catalog {
        Catalog::new(self.ancestries.into_values().collect())
    }
}

fn record_for(race: &RaceEntry, display_source: Option<&str>) -> AncestryRecord {
    let source = race
        .source
        .clone()
        .or_else(|| display_source.map(str::to_string));
    AncestryRecord::new(race.name.clone(), source)
}

// ============================================================================
// Catalog Building
// ============================================================================

/// Merge homebrew documents (in order) and the core document into a catalog.
pub fn build_catalog(
    blocklist: &Blocklist,
    homebrew: &[SourceDocument],
    core: &SourceDocument,
) -> Catalog {
    let mut merger = SourceMerger::new(blocklist);
    let ordered = || homebrew.iter().chain(std::iter::once(core));

    for doc in ordered() {
        let stats = merger.merge_ancestries(doc);
        log::debug!("Ancestry pass: {:?}", stats);
    }
    for doc in ordered() {
        let stats = merger.merge_archetypes(doc);
        log::debug!("Archetype pass: {:?}", stats);
    }

    let catalog = merger.finish();
    log::info!(
        "Built catalog with {} ancestries from {} homebrew documents",
        catalog.len(),
        homebrew.len()
    );
    catalog
}

/// Fetch every input document from `source` and build the catalog.
///
/// # Errors
///
/// - `AncestryGenError::Source` when the blocklist, the homebrew index or the
///   core races document cannot be fetched or parsed
#[instrument(skip_all, fields(source = %source.describe()))]
pub async fn load_catalog(source: &dyn DataSource, paths: &DocumentPaths) -> Result<Catalog> {
    log::info!("Starting ancestry loading from {}", source.describe());

    let blocklist: Blocklist = fetch_json(source, &paths.blocklist)
        .await
        .map_err(|e| AncestryGenError::load_failed("blocklist", e))?;
    log::debug!("Loaded blocklist with {} rules", blocklist.len());

    let index: HomebrewIndex = fetch_json(source, &paths.homebrew_index)
        .await
        .map_err(|e| AncestryGenError::load_failed("homebrew index", e))?;
    log::debug!("Homebrew files to import: {:?}", index.to_import);

    let mut homebrew = Vec::with_capacity(index.to_import.len());
    for file in &index.to_import {
        let path = paths.homebrew_file(file);
        match fetch_json::<SourceDocument>(source, &path).await {
            Ok(doc) => homebrew.push(doc),
            Err(e) => {
                log::warn!("Skipping homebrew file {}: {}", file, e);
            }
        }
    }

    let core: SourceDocument = fetch_json(source, &paths.races)
        .await
        .map_err(|e| AncestryGenError::load_failed("core races", e))?;

    Ok(build_catalog(&blocklist, &homebrew, &core))
}
