//! Roll orchestration.
//!
//! One roll, in order:
//!
//! 1. weighted-pick an ancestry entry from the location's table
//! 2. optional mixed heritage
//! 3. resolve an archetype against the catalog
//! 4. height, build and skin tone
//! 5. two distinct features
//!
//! The result carries a [`GenerationTrace`] of every random decision; its
//! `Display` impl is the "Rolled Details" debug text.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::errors::{AncestryGenError, Result};
use super::features::pick_two_distinct_features;
use super::heritage::{roll_heritage, HeritageRoll, HeritageRules};
use super::picker::{pick, pick_traced, PickTrace};
use super::resolver::{resolve_archetype, ArchetypeTrace};
use super::types::{Catalog, FeatureTable, LocationEntry, LocationTable};

const VOWELS: &str = "aeiouAEIOU";

/// `"an"` before a vowel, `"a"` otherwise.
pub fn indefinite_article(word: &str) -> &'static str {
    match word.chars().next() {
        Some(c) if VOWELS.contains(c) => "an",
        _ => "a",
    }
}

/// `"an Elf (Drow)"`, `"a Human"`.
pub fn compose_display_name(ancestry: &str, archetype: Option<&str>) -> String {
    let article = indefinite_article(ancestry);
    match archetype {
        Some(archetype) => format!("{article} {ancestry} ({archetype})"),
        None => format!("{article} {ancestry}"),
    }
}

// ============================================================================
// Results
// ============================================================================

/// Everything shown for one roll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedResult {
    pub display_name: String,
    pub height: String,
    pub build: String,
    pub skintone: String,
    pub features: [String; 2],
    pub trace: GenerationTrace,
}

/// Every random decision behind a [`GeneratedResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationTrace {
    pub location: String,
    /// The rolled location entry as it appears in the table.
    pub ancestry: LocationEntry,
    pub ancestry_pick: PickTrace,
    pub heritage: HeritageRoll,
    pub archetype: ArchetypeTrace,
    pub height: String,
    pub build: String,
    pub skintone: String,
    pub features: [String; 2],
}

impl fmt::Display for GenerationTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Rolled Details:")?;
        writeln!(f, "------------------")?;
        writeln!(f, "Location: {}", self.location)?;
        writeln!(f)?;

        writeln!(f, "Ancestry Data:")?;
        writeln!(f, "  Name: {}", self.ancestry.name)?;
        match self.ancestry.roll {
            Some(roll) => writeln!(f, "  Roll: {roll}")?,
            None => writeln!(f, "  Roll: -")?,
        }
        writeln!(
            f,
            "  Weight: {} of {}",
            self.ancestry.weight, self.ancestry_pick.total
        )?;
        writeln!(
            f,
            "  Source: {}",
            self.ancestry.source.as_deref().unwrap_or("Unknown")
        )?;
        if self.heritage.is_mixed() {
            writeln!(f, "  Heritage: {}", self.heritage.label)?;
        }

        match &self.archetype.selected {
            Some(selected) => {
                writeln!(
                    f,
                    "  Available Archetypes: {}",
                    self.archetype.candidate_names().join(", ")
                )?;
                writeln!(f, "  Selected Archetype: {selected}")?;
                if !self.archetype.sources.is_empty() {
                    writeln!(f, "  Archetype Sources: {}", self.archetype.sources.join(", "))?;
                }
            }
            None => writeln!(f, "  No archetypes available for this ancestry")?,
        }
        writeln!(f)?;

        writeln!(f, "Randomized Traits:")?;
        writeln!(f, "  Height: {}", self.height)?;
        writeln!(f, "  Build: {}", self.build)?;
        writeln!(f, "  Skin tone: {}", self.skintone)?;
        writeln!(f, "  Features:")?;
        writeln!(f, "    - {}", self.features[0])?;
        write!(f, "    - {}", self.features[1])
    }
}

// ============================================================================
// Generator
// ============================================================================

/// Rolls ancestries against loaded tables.
#[derive(Debug, Clone)]
pub struct AncestryGenerator<'a> {
    locations: &'a LocationTable,
    features: &'a FeatureTable,
    archetypes: &'a Catalog,
    heritage: HeritageRules,
}

impl<'a> AncestryGenerator<'a> {
    pub fn new(
        locations: &'a LocationTable,
        features: &'a FeatureTable,
        archetypes: &'a Catalog,
    ) -> Self {
        Self {
            locations,
            features,
            archetypes,
            heritage: HeritageRules::default(),
        }
    }

    pub fn with_heritage(mut self, heritage: HeritageRules) -> Self {
        self.heritage = heritage;
        self
    }

    /// Roll one ancestry for `location`.
    ///
    /// Fails with [`AncestryGenError::UnknownLocation`] when the location has
    /// no table; callers treat that as a no-op.
    pub fn generate<R>(&self, location: &str, rng: &mut R) -> Result<GeneratedResult>
    where
        R: Rng + ?Sized,
    {
        let entries = self
            .locations
            .get(location)
            .ok_or_else(|| AncestryGenError::unknown_location(location))?;

        let (chosen, ancestry_pick) = pick_traced(entries, rng)?;
        let heritage = roll_heritage(entries, chosen, &self.heritage, rng)?;
        let archetype = resolve_archetype(chosen, self.archetypes, rng)?;

        let height = pick(&self.features.height, rng)?.name.clone();
        let build = pick(&self.features.build, rng)?.name.clone();
        let skintone = pick(&self.features.skintone, rng)?.name.clone();
        let (first, second) = pick_two_distinct_features(&self.features.features, rng)?;
        let features = [first, second];

        let display_name = compose_display_name(&heritage.label, archetype.selected.as_deref());
        log::debug!("Rolled {} in {}", display_name, location);

        Ok(GeneratedResult {
            display_name,
            height: height.clone(),
            build: build.clone(),
            skintone: skintone.clone(),
            features: features.clone(),
            trace: GenerationTrace {
                location: location.to_string(),
                ancestry: chosen.clone(),
                ancestry_pick,
                heritage,
                archetype,
                height,
                build,
                skintone,
                features,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ancestry_gen::types::{AncestryRecord, WeightedEntry};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rstest::rstest;

    fn features() -> FeatureTable {
        FeatureTable {
            height: vec![WeightedEntry::new("tall", 1.0)],
            build: vec![WeightedEntry::new("wiry", 1.0)],
            skintone: vec![WeightedEntry::new("dark", 1.0)],
            features: vec![
                WeightedEntry::new("have freckles", 1.0),
                WeightedEntry::new("have big ears", 1.0),
            ],
        }
    }

    fn locations() -> LocationTable {
        let mut table = LocationTable::default();
        table.insert(
            "Quaymire",
            vec![LocationEntry::new("Elf", 1.0).with_source("PHB")],
        );
        table.insert("Anvilfort", vec![LocationEntry::new("Dwarf", 1.0)]);
        table
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            AncestryRecord::new("Elf", Some("PHB".into())).with_archetypes(["Drow", "Wood Elf"])
        ])
    }

    #[rstest]
    #[case("Elf", "an")]
    #[case("orc", "an")]
    #[case("Human", "a")]
    #[case("half Orc / Elf", "a")]
    #[case("", "a")]
    fn test_indefinite_article(#[case] word: &str, #[case] expected: &str) {
        assert_eq!(indefinite_article(word), expected);
    }

    #[test]
    fn test_compose_display_name() {
        assert_eq!(compose_display_name("Elf", Some("Drow")), "an Elf (Drow)");
        assert_eq!(compose_display_name("Dwarf", None), "a Dwarf");
        // The article follows the rendered label, not the race underneath.
        assert_eq!(compose_display_name("Orc", None), "an Orc");
        assert_eq!(compose_display_name("half Orc / Elf", None), "a half Orc / Elf");
    }

    #[test]
    fn test_generate_full_roll() {
        let (locations, features, catalog) = (locations(), features(), catalog());
        let generator = AncestryGenerator::new(&locations, &features, &catalog);
        let mut rng = StdRng::seed_from_u64(42);

        let result = generator.generate("Quaymire", &mut rng).unwrap();
        assert!(
            result.display_name == "an Elf (Drow)" || result.display_name == "an Elf (Wood Elf)",
            "got {}",
            result.display_name
        );
        assert_eq!(result.height, "tall");
        assert_eq!(result.build, "wiry");
        assert_eq!(result.skintone, "dark");
        assert_ne!(result.features[0], result.features[1]);
        // The second feature loses its "have".
        assert!(!result.features[1].starts_with("have "));
    }

    #[test]
    fn test_unknown_location_is_recoverable_error() {
        let (locations, features, catalog) = (locations(), features(), catalog());
        let generator = AncestryGenerator::new(&locations, &features, &catalog);
        let mut rng = StdRng::seed_from_u64(42);

        let err = generator.generate("Coast", &mut rng).unwrap_err();
        assert!(matches!(err, AncestryGenError::UnknownLocation { .. }));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_trace_renders_rolled_details() {
        let (locations, features, catalog) = (locations(), features(), catalog());
        let generator = AncestryGenerator::new(&locations, &features, &catalog);
        let mut rng = StdRng::seed_from_u64(1);

        let text = generator.generate("Quaymire", &mut rng).unwrap().trace.to_string();
        assert!(text.starts_with("Rolled Details:"));
        assert!(text.contains("Location: Quaymire"));
        assert!(text.contains("Source: PHB"));
        assert!(text.contains("Available Archetypes: Drow, Wood Elf"));
        assert!(text.contains("Skin tone: dark"));

        let text = generator.generate("Anvilfort", &mut rng).unwrap().trace.to_string();
        assert!(text.contains("No archetypes available for this ancestry"));
        assert!(text.contains("Source: Unknown"));
    }

    #[test]
    fn test_empty_trait_table_fails() {
        let (locations, catalog) = (locations(), catalog());
        let features = FeatureTable::default();
        let generator = AncestryGenerator::new(&locations, &features, &catalog);
        let mut rng = StdRng::seed_from_u64(1);

        assert!(matches!(
            generator.generate("Anvilfort", &mut rng),
            Err(AncestryGenError::EmptyInput)
        ));
    }

    #[test]
    fn test_heritage_label_drives_article() {
        let mut locations = LocationTable::default();
        locations.insert(
            "Docks",
            vec![
                LocationEntry::new("Elf", 1.0),
                LocationEntry::new("Orc", 0.0),
            ],
        );
        let (features, catalog) = (features(), Catalog::default());
        let generator = AncestryGenerator::new(&locations, &features, &catalog).with_heritage(
            HeritageRules {
                enabled: true,
                half_heritage_chance: 1.0,
                descriptor_blend_chance: 0.0,
            },
        );
        let mut rng = StdRng::seed_from_u64(6);

        let result = generator.generate("Docks", &mut rng).unwrap();
        assert_eq!(result.display_name, "a half Orc / Elf");
        assert!(result.trace.to_string().contains("Heritage: half Orc / Elf"));
    }
}
