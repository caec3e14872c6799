//! Weighted random selection.
//!
//! One algorithm serves every table: sum the weights, draw a threshold in
//! `[0, total)`, and walk the entries until the running sum reaches it.
//!
//! - An empty list is an error ([`AncestryGenError::EmptyInput`]).
//! - When every weight is zero the threshold is zero and the first entry wins.
//! - If rounding leaves the walk without a winner, the last entry is returned.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::errors::{AncestryGenError, Result};

/// Anything that can sit in a weighted roll table.
pub trait Weighted {
    fn name(&self) -> &str;
    fn weight(&self) -> f64;
}

impl<T: Weighted + ?Sized> Weighted for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn weight(&self) -> f64 {
        (**self).weight()
    }
}

/// A candidate as it appeared during a pick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateWeight {
    pub name: String,
    pub weight: f64,
}

/// Record of a single weighted pick, kept for the debug panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickTrace {
    pub candidates: Vec<CandidateWeight>,
    pub total: f64,
    pub threshold: f64,
    pub chosen_index: usize,
}

impl PickTrace {
    /// Name of the winning candidate.
    pub fn chosen(&self) -> &str {
        &self.candidates[self.chosen_index].name
    }
}

/// Pick one entry with probability proportional to its weight.
pub fn pick<'a, T, R>(entries: &'a [T], rng: &mut R) -> Result<&'a T>
where
    T: Weighted,
    R: Rng + ?Sized,
{
    let (index, _, _) = pick_index(entries, rng)?;
    Ok(&entries[index])
}

/// Like [`pick`], also returning the trace of the draw.
pub fn pick_traced<'a, T, R>(entries: &'a [T], rng: &mut R) -> Result<(&'a T, PickTrace)>
where
    T: Weighted,
    R: Rng + ?Sized,
{
    let (index, total, threshold) = pick_index(entries, rng)?;
    let trace = PickTrace {
        candidates: entries
            .iter()
            .map(|e| CandidateWeight {
                name: e.name().to_string(),
                weight: e.weight(),
            })
            .collect(),
        total,
        threshold,
        chosen_index: index,
    };
    Ok((&entries[index], trace))
}

fn pick_index<T, R>(entries: &[T], rng: &mut R) -> Result<(usize, f64, f64)>
where
    T: Weighted,
    R: Rng + ?Sized,
{
    if entries.is_empty() {
        return Err(AncestryGenError::EmptyInput);
    }

    let total: f64 = entries.iter().map(Weighted::weight).sum();
    let threshold = rng.gen::<f64>() * total;

    let mut running = 0.0;
    for (index, entry) in entries.iter().enumerate() {
        running += entry.weight();
        if running >= threshold {
            return Ok((index, total, threshold));
        }
    }

    Ok((entries.len() - 1, total, threshold))
}
