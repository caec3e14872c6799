//! Property-based tests for weighted selection
//!
//! Tests invariants:
//! - Closure: the picked entry is one of the inputs
//! - All-zero weights yield the first entry
//! - Determinism for a fixed seed

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::core::ancestry_gen::{pick, pick_traced, AncestryGenError, WeightedEntry};

// ============================================================================
// Strategies for generating test inputs
// ============================================================================

/// Generate a non-empty table with non-negative weights
fn arb_table() -> impl Strategy<Value = Vec<WeightedEntry>> {
    prop::collection::vec(("[A-Za-z ]{1,12}", 0.0f64..100.0), 1..20).prop_map(|rows| {
        rows.into_iter()
            .map(|(name, weight)| WeightedEntry::new(name, weight))
            .collect()
    })
}

/// Generate a non-empty table whose weights are all zero
fn arb_zero_table() -> impl Strategy<Value = Vec<WeightedEntry>> {
    prop::collection::vec("[A-Za-z]{1,8}", 1..10).prop_map(|names| {
        names
            .into_iter()
            .map(|name| WeightedEntry::new(name, 0.0))
            .collect()
    })
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: The result is always an element of the input list
    #[test]
    fn prop_pick_is_member(table in arb_table(), seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let picked = pick(&table, &mut rng).unwrap();
        prop_assert!(table.iter().any(|e| std::ptr::eq(e, picked)));
    }

    /// Property: With every weight at zero the first entry wins
    #[test]
    fn prop_all_zero_picks_first(table in arb_zero_table(), seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let picked = pick(&table, &mut rng).unwrap();
        prop_assert!(std::ptr::eq(picked, &table[0]));
    }

    /// Property: The trace reports the sum of weights and a threshold below it
    #[test]
    fn prop_trace_is_consistent(table in arb_table(), seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let (picked, trace) = pick_traced(&table, &mut rng).unwrap();

        let sum: f64 = table.iter().map(|e| e.weight).sum();
        prop_assert!((trace.total - sum).abs() < 1e-9);
        prop_assert!(trace.threshold >= 0.0 && trace.threshold <= trace.total);
        prop_assert_eq!(trace.chosen(), picked.name.as_str());
        prop_assert_eq!(trace.candidates.len(), table.len());
    }

    /// Property: Same seed gives the same pick
    #[test]
    fn prop_deterministic_with_same_seed(table in arb_table(), seed in any::<u64>()) {
        let a = pick(&table, &mut StdRng::seed_from_u64(seed)).unwrap();
        let b = pick(&table, &mut StdRng::seed_from_u64(seed)).unwrap();
        prop_assert!(std::ptr::eq(a, b));
    }

    /// Property: An empty list is always an error
    #[test]
    fn prop_empty_is_error(seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let empty: Vec<WeightedEntry> = Vec::new();
        prop_assert!(matches!(pick(&empty, &mut rng), Err(AncestryGenError::EmptyInput)));
    }
}
