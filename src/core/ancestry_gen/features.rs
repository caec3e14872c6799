//! Distinct feature pairs.
//!
//! Features are clauses that start with a verb ("have freckles", "are very
//! attractive"). Two are shown together, so the second loses a verb already
//! carried by the first: "have freckles and deep frown lines".

use std::collections::HashSet;

use rand::Rng;

use super::errors::{AncestryGenError, Result};
use super::picker::pick;
use super::types::WeightedEntry;

/// Upper bound on redraws while looking for a second, different feature.
pub const MAX_DISTINCT_ATTEMPTS: usize = 64;

/// Table name reported in errors.
const FEATURES_TABLE: &str = "features";

/// Draw two features with different names, second one grammar-trimmed.
///
/// Fails with [`AncestryGenError::InsufficientDistinctValues`] when the table
/// has fewer than two distinct names, or when no distinct value turns up within
/// [`MAX_DISTINCT_ATTEMPTS`] redraws (possible only when the remaining names
/// carry next to no weight).
pub fn pick_two_distinct_features<R>(
    features: &[WeightedEntry],
    rng: &mut R,
) -> Result<(String, String)>
where
    R: Rng + ?Sized,
{
    if features.is_empty() {
        return Err(AncestryGenError::EmptyInput);
    }

    let distinct = features
        .iter()
        .map(|f| f.name.as_str())
        .collect::<HashSet<_>>()
        .len();
    if distinct < 2 {
        return Err(AncestryGenError::insufficient_distinct(FEATURES_TABLE, distinct));
    }

    let first = pick(features, rng)?.name.clone();

    for _ in 0..MAX_DISTINCT_ATTEMPTS {
        let candidate = pick(features, rng)?;
        if candidate.name != first {
            let second = trim_shared_verb(&first, &candidate.name);
            return Ok((first, second));
        }
    }

    log::warn!(
        "No distinct feature after {} draws (first was '{}')",
        MAX_DISTINCT_ATTEMPTS,
        first
    );
    Err(AncestryGenError::insufficient_distinct(FEATURES_TABLE, distinct))
}

/// Drop the leading verb of `second` when `first` already uses it.
///
/// Both checks run independently and only remove the first occurrence.
pub fn trim_shared_verb(first: &str, second: &str) -> String {
    let mut second = second.to_string();
    if first.contains("have") {
        second = second.replacen("have ", "", 1);
    }
    if first.contains("are") {
        second = second.replacen("are ", "", 1);
    }
    second
}
