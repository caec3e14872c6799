//! Mixed heritage rolls.
//!
//! Location tables can mark an entry as a descriptor ("Sea-touched",
//! "Shadow-born"). With heritage rolls enabled:
//!
//! - a descriptor ancestry may blend with another: `"Sea-touched Elf"`
//! - any other ancestry may become half-heritage: `"half Orc / Human"`
//!
//! The partner is always a different, non-descriptor entry from the same
//! location table. It is drawn by weight from the eligible entries only, so
//! the draw always terminates. No eligible partner means no blend.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::errors::Result;
use super::picker::pick;
use super::types::LocationEntry;

/// Chances for mixed heritage. Off unless enabled in config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeritageRules {
    pub enabled: bool,
    /// Chance that a plain ancestry becomes half-heritage.
    pub half_heritage_chance: f64,
    /// Chance that a descriptor ancestry blends with a partner.
    pub descriptor_blend_chance: f64,
}

impl Default for HeritageRules {
    fn default() -> Self {
        Self {
            enabled: false,
            half_heritage_chance: 0.10,
            descriptor_blend_chance: 0.40,
        }
    }
}

impl HeritageRules {
    /// Default chances, switched on.
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeritageKind {
    Pure,
    Blended,
    Half,
}

/// Outcome of a heritage roll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeritageRoll {
    pub kind: HeritageKind,
    /// Ancestry text used in the display name.
    pub label: String,
    pub partner: Option<String>,
}

impl HeritageRoll {
    fn pure(chosen: &LocationEntry) -> Self {
        Self {
            kind: HeritageKind::Pure,
            label: chosen.name.clone(),
            partner: None,
        }
    }

    pub fn is_mixed(&self) -> bool {
        self.kind != HeritageKind::Pure
    }
}

/// Roll mixed heritage for `chosen`, drawing partners from `entries`.
pub fn roll_heritage<R>(
    entries: &[LocationEntry],
    chosen: &LocationEntry,
    rules: &HeritageRules,
    rng: &mut R,
) -> Result<HeritageRoll>
where
    R: Rng + ?Sized,
{
    if !rules.enabled {
        return Ok(HeritageRoll::pure(chosen));
    }

    let (chance, kind) = if chosen.descriptor {
        (rules.descriptor_blend_chance, HeritageKind::Blended)
    } else {
        (rules.half_heritage_chance, HeritageKind::Half)
    };

    // gen_bool panics outside [0, 1], NaN included.
    let chance = if chance.is_nan() { 0.0 } else { chance.clamp(0.0, 1.0) };
    if !rng.gen_bool(chance) {
        return Ok(HeritageRoll::pure(chosen));
    }

    let partners: Vec<&LocationEntry> = entries
        .iter()
        .filter(|e| e.name != chosen.name && !e.descriptor)
        .collect();
    if partners.is_empty() {
        log::debug!("No heritage partner for '{}'", chosen.name);
        return Ok(HeritageRoll::pure(chosen));
    }

    let partner = pick(&partners, rng)?.name.clone();
    let label = match kind {
        HeritageKind::Blended => format!("{} {}", chosen.name, partner),
        _ => format!("half {} / {}", partner, chosen.name),
    };

    Ok(HeritageRoll {
        kind,
        label,
        partner: Some(partner),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn table() -> Vec<LocationEntry> {
        vec![
            LocationEntry::new("Human", 5.0),
            LocationEntry::new("Orc", 1.0),
            LocationEntry::new("Sea-touched", 1.0).as_descriptor(),
            LocationEntry::new("Shadow-born", 1.0).as_descriptor(),
        ]
    }

    fn always() -> HeritageRules {
        HeritageRules {
            enabled: true,
            half_heritage_chance: 1.0,
            descriptor_blend_chance: 1.0,
        }
    }

    #[test]
    fn test_disabled_by_default() {
        let entries = table();
        let mut rng = StdRng::seed_from_u64(1);
        for entry in &entries {
            let roll = roll_heritage(&entries, entry, &HeritageRules::default(), &mut rng).unwrap();
            assert_eq!(roll.kind, HeritageKind::Pure);
            assert_eq!(roll.label, entry.name);
        }
    }

    #[test]
    fn test_half_heritage_partner_is_distinct_plain_entry() {
        let entries = table();
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..100 {
            let roll = roll_heritage(&entries, &entries[0], &always(), &mut rng).unwrap();
            assert_eq!(roll.kind, HeritageKind::Half);
            assert_eq!(roll.partner.as_deref(), Some("Orc"));
            assert_eq!(roll.label, "half Orc / Human");
        }
    }

    #[test]
    fn test_descriptor_blends_with_plain_entry() {
        let entries = table();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let roll = roll_heritage(&entries, &entries[2], &always(), &mut rng).unwrap();
            assert_eq!(roll.kind, HeritageKind::Blended);
            let partner = roll.partner.unwrap();
            assert!(partner == "Human" || partner == "Orc");
            assert_eq!(roll.label, format!("Sea-touched {partner}"));
        }
    }

    #[test]
    fn test_no_partner_stays_pure() {
        let entries = vec![
            LocationEntry::new("Human", 1.0),
            LocationEntry::new("Sea-touched", 1.0).as_descriptor(),
        ];
        let mut rng = StdRng::seed_from_u64(3);
        let roll = roll_heritage(&entries, &entries[0], &always(), &mut rng).unwrap();
        assert!(!roll.is_mixed());
        assert_eq!(roll.label, "Human");
    }

    #[test]
    fn test_out_of_range_chances_are_clamped() {
        let entries = table();
        let rules = HeritageRules {
            enabled: true,
            half_heritage_chance: -2.0,
            descriptor_blend_chance: 7.5,
        };
        let mut rng = StdRng::seed_from_u64(5);
        assert!(!roll_heritage(&entries, &entries[1], &rules, &mut rng).unwrap().is_mixed());
        assert!(roll_heritage(&entries, &entries[3], &rules, &mut rng).unwrap().is_mixed());
    }

    #[test]
    fn test_rules_from_toml() {
        let rules: HeritageRules = toml::from_str("enabled = true\nhalf_heritage_chance = 0.25").unwrap();
        assert!(rules.enabled);
        assert_eq!(rules.half_heritage_chance, 0.25);
        assert_eq!(rules.descriptor_blend_chance, 0.40);
    }
}
