//! Property-based tests for distinct feature pairs
//!
//! Tests invariants:
//! - The two picked features come from different entries
//! - Trimming never touches the second feature unless the first shares a verb
//! - Trimming never makes a feature longer

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::core::ancestry_gen::{pick_two_distinct_features, trim_shared_verb, WeightedEntry};

// ============================================================================
// Strategies for generating test inputs
// ============================================================================

/// A feature clause that never contains the letter `a`, so no shared verb
fn arb_verbless() -> impl Strategy<Value = String> {
    "[b-z ]{0,24}"
}

/// Feature table with at least two distinct names, all with real weight
fn arb_features() -> impl Strategy<Value = Vec<WeightedEntry>> {
    prop::collection::btree_set("(have|are|wear) [a-z]{2,10}", 2..12).prop_flat_map(|names| {
        let len = names.len();
        (Just(names), prop::collection::vec(1.0f64..3.0, len))
    })
    .prop_map(|(names, weights)| {
        names
            .into_iter()
            .zip(weights)
            .map(|(name, weight)| WeightedEntry::new(name, weight))
            .collect()
    })
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: The pair never repeats a feature
    #[test]
    fn prop_features_are_distinct(features in arb_features(), seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let (first, second) = pick_two_distinct_features(&features, &mut rng).unwrap();

        prop_assert!(features.iter().any(|f| f.name == first));
        let raw_second = features
            .iter()
            .find(|f| f.name != first && trim_shared_verb(&first, &f.name) == second);
        prop_assert!(raw_second.is_some(), "second '{}' not derived from a different entry", second);
    }

    /// Property: No shared verb, no change
    #[test]
    fn prop_trim_without_shared_verb_is_identity(first in arb_verbless(), second in ".{0,30}") {
        prop_assert_eq!(trim_shared_verb(&first, &second), second);
    }

    /// Property: Trimming never grows the feature
    #[test]
    fn prop_trim_never_grows(first in ".{0,30}", second in ".{0,30}") {
        prop_assert!(trim_shared_verb(&first, &second).len() <= second.len());
    }

    /// Property: A shared leading verb is dropped
    #[test]
    fn prop_shared_have_is_dropped(rest in "[b-z]{1,12}") {
        let second = format!("have {rest}");
        prop_assert_eq!(trim_shared_verb("have freckles", &second), rest);
    }
}
