//! Test Fixtures
//!
//! Small in-memory tables and a [`RollerState`] backed by a [`MemorySource`]
//! that also carries the catalog documents.

use std::sync::Arc;

use serde_json::json;

use crate::core::ancestry_gen::{
    Catalog, DocumentPaths, FeatureTable, LocationEntry, LocationTable, MemorySource,
    RollerState, WeightedEntry,
};

// =============================================================================
// Table Fixtures
// =============================================================================

/// Build a weighted table from `(name, weight)` pairs.
pub fn weighted(entries: &[(&str, f64)]) -> Vec<WeightedEntry> {
    entries
        .iter()
        .map(|(name, weight)| WeightedEntry::new(*name, *weight))
        .collect()
}

/// A feature table with one value per descriptor and three features.
pub fn feature_table() -> FeatureTable {
    FeatureTable {
        height: weighted(&[("short", 1.0), ("tall", 1.0)]),
        build: weighted(&[("of average build", 2.0), ("wiry", 1.0)]),
        skintone: weighted(&[("pale", 1.0), ("dark", 1.0)]),
        features: weighted(&[
            ("have freckles", 1.0),
            ("have deep frown lines", 1.0),
            ("are very attractive", 1.0),
        ]),
    }
}

/// Two locations, `Quaymire` first.
pub fn location_table() -> LocationTable {
    let mut table = LocationTable::default();
    table.insert(
        "Quaymire",
        vec![
            LocationEntry::new("Human", 3.0).with_source("PHB"),
            LocationEntry::new("Elf", 1.0).with_source("PHB"),
        ],
    );
    table.insert(
        "Anvilfort",
        vec![
            LocationEntry::new("Dwarf", 4.0).with_source("PHB"),
            LocationEntry::new("Gnome", 1.0),
        ],
    );
    table
}

/// Archetype table used for rolls.
pub fn archetype_catalog() -> Catalog {
    serde_json::from_value(json!({
        "ancestries": [
            { "name": "Elf", "source": "PHB", "archetypes": ["Drow", "Wood Elf"] },
            { "name": "Dwarf", "source": "PHB", "archetypes": ["Hill Dwarf"] },
            { "name": "Human", "source": "PHB", "archetypes": [] }
        ]
    }))
    .expect("archetype fixture parses")
}

/// Documents the catalog build reads, with one homebrew file.
pub fn catalog_source() -> MemorySource {
    MemorySource::new()
        .with_json(
            "homebrew/content-blocklist.json",
            &json!({ "blocklist": [{ "source": "XYZ", "category": "race", "displayName": "*" }] }),
        )
        .with_json("homebrew/index.json", &json!({ "toImport": ["kobolds.json"] }))
        .with_json(
            "homebrew/kobolds.json",
            &json!({
                "_meta": { "sources": [{ "json": "Kobolds", "abbreviation": "KOB" }] },
                "race": [{ "name": "Kobold" }],
                "subrace": [{ "name": "Winged Kobold", "raceName": "Kobold" }]
            }),
        )
        .with_json(
            "data/races.json",
            &json!({
                "race": [
                    { "name": "Elf", "source": "PHB" },
                    { "name": "Dwarf", "source": "PHB" },
                    { "name": "Lizardfolk", "source": "XYZ" }
                ],
                "subrace": [
                    { "name": "Drow", "raceName": "Elf", "source": "PHB" },
                    { "name": "Hill Dwarf", "raceName": "Dwarf", "source": "PHB" }
                ]
            }),
        )
}

// =============================================================================
// State Fixtures
// =============================================================================

/// A loaded roller state that needs no I/O to roll.
pub fn roller_state() -> RollerState {
    RollerState::new(
        Arc::new(catalog_source()),
        DocumentPaths::default(),
        feature_table(),
        location_table(),
        archetype_catalog(),
    )
}
