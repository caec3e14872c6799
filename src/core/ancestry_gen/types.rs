//! Ancestry data models.
//!
//! Every loosely-shaped JSON list is normalized here, at the loading boundary,
//! so the picker and resolver only ever see [`WeightedEntry`] values.
//!
//! # Architecture
//!
//! ```text
//! FeatureTable                 LocationTable
//!   +-- height: [WeightedEntry]  +-- "Quaymire" -> [LocationEntry]
//!   +-- build:  [WeightedEntry]  |     +-- archetypes: [WeightedEntry]
//!   +-- skintone, features       +-- ...
//!
//! SourceDocument --(SourceMerger + Blocklist)--> Catalog --> LocationTemplate
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::picker::Weighted;

fn default_weight() -> f64 {
    1.0
}

// ============================================================================
// Weighted Entries
// ============================================================================

/// A named value with a selection weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawWeightedEntry")]
pub struct WeightedEntry {
    pub name: String,
    pub weight: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl WeightedEntry {
    /// Create an entry with the given weight and no source.
    pub fn new(name: impl Into<String>, weight: f64) -> Self {
        Self {
            name: name.into(),
            weight,
            source: None,
        }
    }

    /// Set the source abbreviation.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// Shapes accepted for a weighted entry in input documents.
///
/// Archetype sublists are sometimes bare strings, older tables use
/// `[name, weight]` pairs, and everything else is a record.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawWeightedEntry {
    Named(String),
    Pair(String, f64),
    Record {
        name: String,
        #[serde(default = "default_weight")]
        weight: f64,
        #[serde(default)]
        source: Option<String>,
    },
}

impl From<RawWeightedEntry> for WeightedEntry {
    fn from(raw: RawWeightedEntry) -> Self {
        match raw {
            RawWeightedEntry::Named(name) => Self::new(name, default_weight()),
            RawWeightedEntry::Pair(name, weight) => Self::new(name, weight),
            RawWeightedEntry::Record {
                name,
                weight,
                source,
            } => Self {
                name,
                weight,
                source,
            },
        }
    }
}

impl Weighted for WeightedEntry {
    fn name(&self) -> &str {
        &self.name
    }

    fn weight(&self) -> f64 {
        self.weight
    }
}

// ============================================================================
// Feature Table
// ============================================================================

/// Independent physical descriptor tables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeatureTable {
    #[serde(default)]
    pub height: Vec<WeightedEntry>,

    /// Build descriptors ("of average build", "wiry").
    #[serde(rename = "weight", default)]
    pub build: Vec<WeightedEntry>,

    #[serde(default)]
    pub skintone: Vec<WeightedEntry>,

    /// Distinctive features, each a clause starting with a verb ("have freckles").
    #[serde(default)]
    pub features: Vec<WeightedEntry>,
}

// ============================================================================
// Location Table
// ============================================================================

/// One row of a location's ancestry roll table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationEntry {
    pub name: String,

    #[serde(default = "default_weight")]
    pub weight: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Display-only roll number carried over from location templates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roll: Option<u32>,

    /// Local archetype weights that replace the catalog pool for sourced entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archetypes: Option<Vec<WeightedEntry>>,

    /// Marks a modifier ancestry ("Sea-touched") that can blend with another.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub descriptor: bool,
}

impl LocationEntry {
    pub fn new(name: impl Into<String>, weight: f64) -> Self {
        Self {
            name: name.into(),
            weight,
            source: None,
            roll: None,
            archetypes: None,
            descriptor: false,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_archetypes(mut self, archetypes: Vec<WeightedEntry>) -> Self {
        self.archetypes = Some(archetypes);
        self
    }

    pub fn as_descriptor(mut self) -> Self {
        self.descriptor = true;
        self
    }
}

impl Weighted for LocationEntry {
    fn name(&self) -> &str {
        &self.name
    }

    fn weight(&self) -> f64 {
        self.weight
    }
}

/// Location name to ancestry roll table, in document order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationTable(pub IndexMap<String, Vec<LocationEntry>>);

impl LocationTable {
    pub fn get(&self, location: &str) -> Option<&[LocationEntry]> {
        self.0.get(location).map(Vec::as_slice)
    }

    /// Location names in document order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// The first location in document order, rolled at startup.
    pub fn first(&self) -> Option<&str> {
        self.0.keys().next().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn insert(&mut self, location: impl Into<String>, entries: Vec<LocationEntry>) {
        self.0.insert(location.into(), entries);
    }
}

// ============================================================================
// Catalog
// ============================================================================

/// A merged ancestry and its archetype names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AncestryRecord {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(default)]
    pub archetypes: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl AncestryRecord {
    pub fn new(name: impl Into<String>, source: Option<String>) -> Self {
        Self {
            name: name.into(),
            source,
            archetypes: Vec::new(),
            weight: None,
        }
    }

    pub fn with_archetypes<I, S>(mut self, archetypes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.archetypes = archetypes.into_iter().map(Into::into).collect();
        self
    }
}

impl Weighted for AncestryRecord {
    fn name(&self) -> &str {
        &self.name
    }

    fn weight(&self) -> f64 {
        self.weight.unwrap_or_else(default_weight)
    }
}

/// The deduplicated set of known ancestries, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub ancestries: Vec<AncestryRecord>,
}

impl Catalog {
    pub fn new(ancestries: Vec<AncestryRecord>) -> Self {
        Self { ancestries }
    }

    /// Every record with the given name, across all sources.
    pub fn find_by_name<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a AncestryRecord> {
        self.ancestries.iter().filter(move |a| a.name == name)
    }

    /// The record matching both name and source.
    pub fn find(&self, name: &str, source: &str) -> Option<&AncestryRecord> {
        self.ancestries
            .iter()
            .find(|a| a.name == name && a.source.as_deref() == Some(source))
    }

    pub fn len(&self) -> usize {
        self.ancestries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ancestries.is_empty()
    }

    /// Display copy: sorted by name then source, archetypes sorted.
    pub fn sorted(&self) -> Catalog {
        let mut ancestries = self.ancestries.clone();
        ancestries.sort_by(|a, b| {
            a.name.cmp(&b.name).then_with(|| {
                a.source
                    .as_deref()
                    .unwrap_or("")
                    .cmp(b.source.as_deref().unwrap_or(""))
            })
        });
        for ancestry in &mut ancestries {
            ancestry.archetypes.sort();
        }
        Catalog { ancestries }
    }

    /// Build a `"Random"` location fragment listing every ancestry once.
    pub fn location_template(&self) -> LocationTemplate {
        let entries = self
            .ancestries
            .iter()
            .map(|a| TemplateEntry {
                name: a.name.clone(),
                source: a.source.clone(),
                roll: 1,
                weight: 1,
            })
            .collect();

        let mut template = IndexMap::new();
        template.insert(LocationTemplate::LOCATION.to_string(), entries);
        LocationTemplate(template)
    }
}

/// A location table fragment generated from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationTemplate(pub IndexMap<String, Vec<TemplateEntry>>);

impl LocationTemplate {
    pub const LOCATION: &'static str = "Random";

    pub fn entries(&self) -> &[TemplateEntry] {
        self.0
            .get(Self::LOCATION)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateEntry {
    pub name: String,
    pub source: Option<String>,
    pub roll: u32,
    pub weight: u32,
}

// ============================================================================
// Blocklist
// ============================================================================

/// Wildcard for blocklist categories and display names.
pub const WILDCARD: &str = "*";

/// Category name used for both races and subraces.
pub const RACE_CATEGORY: &str = "race";

/// A single content block rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlocklistEntry {
    pub source: String,
    pub category: String,
    #[serde(default = "wildcard")]
    pub display_name: String,
}

fn wildcard() -> String {
    WILDCARD.to_string()
}

impl BlocklistEntry {
    pub fn new(
        source: impl Into<String>,
        category: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            category: category.into(),
            display_name: display_name.into(),
        }
    }

    /// Any `*` or race-category rule blocks every ancestry of its source,
    /// whatever its display name.
    fn blocks_whole_source(&self, source: &str) -> bool {
        self.source == source && (self.category == WILDCARD || self.category == RACE_CATEGORY)
    }

    /// Blocks `name` in the race category of its source.
    fn blocks_race_name(&self, source: &str, name: &str) -> bool {
        self.source == source
            && self.category == RACE_CATEGORY
            && (self.display_name == name || self.display_name == WILDCARD)
    }
}

/// The blocklist document, used as a read-only predicate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Blocklist {
    #[serde(default)]
    pub blocklist: Vec<BlocklistEntry>,
}

impl Blocklist {
    pub fn new(entries: Vec<BlocklistEntry>) -> Self {
        Self { blocklist: entries }
    }

    /// Whether an ancestry named `name` from `source` is excluded.
    pub fn blocks_ancestry(&self, source: &str, name: &str) -> bool {
        self.blocklist
            .iter()
            .any(|e| e.blocks_whole_source(source) || e.blocks_race_name(source, name))
    }

    /// Whether an archetype named `name` from `source` is excluded.
    pub fn blocks_archetype(&self, source: &str, name: &str) -> bool {
        self.blocklist.iter().any(|e| e.blocks_race_name(source, name))
    }

    pub fn len(&self) -> usize {
        self.blocklist.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocklist.is_empty()
    }
}

// ============================================================================
// Source Documents
// ============================================================================

/// Homebrew index listing documents to import, in merge order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomebrewIndex {
    #[serde(default)]
    pub to_import: Vec<String>,
}

/// A homebrew or core races document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceDocument {
    #[serde(rename = "_meta", default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<DocumentMeta>,

    #[serde(default)]
    pub race: Vec<RaceEntry>,

    #[serde(default)]
    pub subrace: Vec<SubraceEntry>,
}

impl SourceDocument {
    /// Source abbreviation used for blocklist matching.
    pub fn source_abbreviation(&self) -> Option<&str> {
        self.first_source().and_then(|s| s.json.as_deref())
    }

    /// Abbreviation stored on catalog records.
    pub fn display_abbreviation(&self) -> Option<&str> {
        self.first_source().and_then(|s| s.abbreviation.as_deref())
    }

    fn first_source(&self) -> Option<&MetaSource> {
        self.meta.as_ref().and_then(|m| m.sources.first())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentMeta {
    #[serde(default)]
    pub sources: Vec<MetaSource>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetaSource {
    #[serde(default)]
    pub json: Option<String>,
    #[serde(default)]
    pub abbreviation: Option<String>,
}

/// A race entry; unrelated fields in the document are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaceEntry {
    pub name: String,
    #[serde(default)]
    pub source: Option<String>,
}

/// A subrace entry. Core data contains unnamed subraces, so both names are optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubraceEntry {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub race_name: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}
