//! Property-based tests for catalog merging
//!
//! Tests invariants:
//! - Every ancestry name and archetype name appears once
//! - Re-merging an already merged document changes nothing
//! - A `*` block on a source removes all of its ancestries

use std::collections::HashSet;

use proptest::prelude::*;

use crate::core::ancestry_gen::{
    build_catalog, Blocklist, BlocklistEntry, RaceEntry, SourceDocument, SubraceEntry,
};

// ============================================================================
// Strategies for generating test inputs
// ============================================================================

fn arb_source() -> impl Strategy<Value = String> {
    prop_oneof![Just("PHB"), Just("VGM"), Just("XYZ")].prop_map(str::to_string)
}

fn arb_race() -> impl Strategy<Value = RaceEntry> {
    ("[A-E]", prop::option::of(arb_source()))
        .prop_map(|(name, source)| RaceEntry { name, source })
}

fn arb_subrace() -> impl Strategy<Value = SubraceEntry> {
    (
        prop::option::of("[a-h]"),
        prop::option::of("[A-F]"),
        prop::option::of(arb_source()),
    )
        .prop_map(|(name, race_name, source)| SubraceEntry {
            name,
            race_name,
            source,
        })
}

fn arb_document() -> impl Strategy<Value = SourceDocument> {
    (
        prop::collection::vec(arb_race(), 0..8),
        prop::collection::vec(arb_subrace(), 0..12),
    )
        .prop_map(|(race, subrace)| SourceDocument {
            meta: None,
            race,
            subrace,
        })
}

fn xyz_blocked() -> Blocklist {
    Blocklist::new(vec![BlocklistEntry::new("XYZ", "race", "*")])
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: Names are unique across the whole catalog
    #[test]
    fn prop_names_are_unique(
        homebrew in prop::collection::vec(arb_document(), 0..3),
        core in arb_document()
    ) {
        let catalog = build_catalog(&Blocklist::default(), &homebrew, &core);

        let mut ancestries = HashSet::new();
        let mut archetypes = HashSet::new();
        for record in &catalog.ancestries {
            prop_assert!(ancestries.insert(record.name.clone()), "duplicate ancestry {}", record.name);
            for archetype in &record.archetypes {
                prop_assert!(archetypes.insert(archetype.clone()), "duplicate archetype {}", archetype);
            }
        }
    }

    /// Property: Merging a document a second time adds nothing
    #[test]
    fn prop_merge_is_idempotent(doc in arb_document(), core in arb_document()) {
        let blocklist = xyz_blocked();
        let once = build_catalog(&blocklist, &[doc.clone()], &core);
        let twice = build_catalog(&blocklist, &[doc.clone(), doc], &core);
        prop_assert_eq!(once, twice);
    }

    /// Property: A whole-source block leaves no ancestry from that source
    #[test]
    fn prop_whole_source_block_is_total(
        homebrew in prop::collection::vec(arb_document(), 0..3),
        core in arb_document()
    ) {
        let catalog = build_catalog(&xyz_blocked(), &homebrew, &core);
        prop_assert!(catalog
            .ancestries
            .iter()
            .all(|a| a.source.as_deref() != Some("XYZ")));
    }
}
