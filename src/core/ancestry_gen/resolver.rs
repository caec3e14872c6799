//! Archetype resolution.
//!
//! Resolves a rolled location entry against the archetype catalog:
//!
//! 1. No source on the entry: every catalog record with that name contributes.
//! 2. With a source: only the record matching name and source contributes.
//! 3. A sourced entry carrying its own non-empty archetype weights uses those
//!    instead of the catalog pool.
//!
//! Catalog candidates all weigh 1; duplicates across sources are kept, so an
//! archetype offered by two books is twice as likely.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::errors::Result;
use super::picker::{pick, Weighted};
use super::types::{Catalog, LocationEntry};

/// One archetype in the resolution pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeCandidate {
    pub name: String,
    pub weight: f64,
    /// Source of the catalog record (or location entry) that offered it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Weighted for ArchetypeCandidate {
    fn name(&self) -> &str {
        &self.name
    }

    fn weight(&self) -> f64 {
        self.weight
    }
}

/// How an archetype was (or was not) chosen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeTrace {
    pub ancestry: String,
    pub requested_source: Option<String>,
    pub candidates: Vec<ArchetypeCandidate>,
    pub selected: Option<String>,
    /// Distinct contributing sources, in pool order.
    pub sources: Vec<String>,
    pub used_local_table: bool,
}

impl ArchetypeTrace {
    pub fn has_candidates(&self) -> bool {
        !self.candidates.is_empty()
    }

    /// Candidate names for display, in pool order.
    pub fn candidate_names(&self) -> Vec<&str> {
        self.candidates.iter().map(|c| c.name.as_str()).collect()
    }
}

/// Pick an archetype for `chosen`.
///
/// An empty pool is not an error; the trace simply has no selection.
pub fn resolve_archetype<R>(
    chosen: &LocationEntry,
    catalog: &Catalog,
    rng: &mut R,
) -> Result<ArchetypeTrace>
where
    R: Rng + ?Sized,
{
    let local = match (&chosen.source, &chosen.archetypes) {
        (Some(source), Some(local)) if !local.is_empty() => Some(
            local
                .iter()
                .map(|a| ArchetypeCandidate {
                    name: a.name.clone(),
                    weight: a.weight,
                    source: a.source.clone().or_else(|| Some(source.clone())),
                })
                .collect::<Vec<_>>(),
        ),
        _ => None,
    };
    let used_local_table = local.is_some();

    let candidates = match local {
        Some(candidates) => candidates,
        None => catalog_pool(chosen, catalog),
    };

    let selected = if candidates.is_empty() {
        log::debug!("No archetypes for '{}'", chosen.name);
        None
    } else {
        Some(pick(&candidates, rng)?.name.clone())
    };

    let mut sources: Vec<String> = Vec::new();
    for source in candidates.iter().filter_map(|c| c.source.as_ref()) {
        if !sources.contains(source) {
            sources.push(source.clone());
        }
    }

    Ok(ArchetypeTrace {
        ancestry: chosen.name.clone(),
        requested_source: chosen.source.clone(),
        candidates,
        selected,
        sources,
        used_local_table,
    })
}

fn catalog_pool(chosen: &LocationEntry, catalog: &Catalog) -> Vec<ArchetypeCandidate> {
    let records: Vec<_> = match chosen.source.as_deref() {
        Some(source) => catalog.find(&chosen.name, source).into_iter().collect(),
        None => catalog.find_by_name(&chosen.name).collect(),
    };

    records
        .into_iter()
        .flat_map(|record| {
            record.archetypes.iter().map(move |name| ArchetypeCandidate {
                name: name.clone(),
                weight: 1.0,
                source: record.source.clone(),
            })
        })
        .collect()
}
