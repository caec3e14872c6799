//! Ancestry Roller
//!
//! Rolls a random ancestry (optionally with an archetype) and a handful of
//! physical traits for a location, and merges homebrew and core race
//! documents into a browsable catalog.
//!
//! # Architecture
//!
//! ```text
//!   DataSource (file / HTTP / memory)
//!        |
//!        v
//!   +-------------+   tables   +------------------+
//!   | RollerState |----------->| AncestryGenerator|
//!   +-------------+            +------------------+
//!        |                       |     |       |
//!        | on demand             v     v       v
//!        v                  picker resolver features
//!   SourceMerger + Blocklist
//!        |
//!        v
//!     Catalog --> LocationTemplate
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use crate::core::ancestry_gen::{DocumentPaths, FileSource, RollerState};
//!
//! let state = RollerState::load(Arc::new(FileSource::new("assets")), DocumentPaths::default()).await?;
//! let result = state.generate("Quaymire", &mut rand::thread_rng())?;
//! println!("{} ({})", result.display_name, result.height);
//! ```
//!
//! # Module Structure
//!
//! - [`picker`]: weighted selection shared by every table
//! - [`features`]: distinct feature pairs and verb trimming
//! - [`merger`]: two-pass homebrew/core merge into a [`Catalog`]
//! - [`resolver`]: archetype resolution for a rolled entry
//! - [`heritage`]: mixed heritage rolls
//! - [`generator`]: roll orchestration and the debug trace
//! - [`export`]: catalog and location template JSON
//! - [`state`]: loaded tables and the cached catalog
//! - [`source`]: document transport
//! - [`types`]: data models and input normalization

pub mod errors;
pub mod export;
pub mod features;
pub mod generator;
pub mod heritage;
pub mod merger;
pub mod picker;
pub mod resolver;
pub mod source;
pub mod state;
pub mod types;

pub use errors::{AncestryGenError, Result, SourceError, SourceResult};
pub use export::{catalog_json, template_json, write_catalog_files, CATALOG_FILE, TEMPLATE_FILE};
pub use features::{pick_two_distinct_features, trim_shared_verb, MAX_DISTINCT_ATTEMPTS};
pub use generator::{
    compose_display_name, indefinite_article, AncestryGenerator, GeneratedResult, GenerationTrace,
};
pub use heritage::{roll_heritage, HeritageKind, HeritageRoll, HeritageRules};
pub use merger::{build_catalog, load_catalog, MergeStats, SourceMerger};
pub use picker::{pick, pick_traced, CandidateWeight, PickTrace, Weighted};
pub use resolver::{resolve_archetype, ArchetypeCandidate, ArchetypeTrace};
pub use source::{fetch_json, DataSource, DocumentPaths, FileSource, HttpSource, MemorySource};
pub use state::RollerState;
pub use types::{
    AncestryRecord, Blocklist, BlocklistEntry, Catalog, DocumentMeta, FeatureTable,
    HomebrewIndex, LocationEntry, LocationTable, LocationTemplate, MetaSource, RaceEntry,
    SourceDocument, SubraceEntry, TemplateEntry, WeightedEntry,
};
