//! Game balance and tuning
//!
//! Everything a designer might want to tweak without touching the simulation:
//! collection bounds, level quotas, spawn cadence, weighted spawn tables, drop
//! chances and the contact-damage policy. Loaded from JSON; any field left out
//! of the file keeps its default.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::enemy::Archetype;
use crate::sim::rng::ROLL_MAX;

/// Errors raised while loading a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// How body contact between an enemy and the player is throttled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ContactDamage {
    /// Damage is attempted on every tick of overlap (only invincibility gates it)
    EveryTick,
    /// Each enemy waits `ticks` after landing a contact hit before trying again
    Cooldown { ticks: u32 },
}

impl Default for ContactDamage {
    fn default() -> Self {
        ContactDamage::Cooldown { ticks: 30 }
    }
}

/// Maximum number of live entities per collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Capacities {
    pub bullets: usize,
    pub enemies: usize,
    pub boss_bullets: usize,
    pub enemy_bullets: usize,
    pub power_ups: usize,
    pub knives: usize,
}

impl Default for Capacities {
    fn default() -> Self {
        Self {
            bullets: 100,
            enemies: 50,
            boss_bullets: 50,
            enemy_bullets: 30,
            power_ups: 10,
            knives: 50,
        }
    }
}

/// One row of a cumulative spawn table: rolls strictly below `below` pick `archetype`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnEntry {
    pub below: i32,
    pub archetype: Archetype,
}

/// Weighted archetype selection for one level
///
/// Rows are checked in order against a roll in `0..=100`; the first row whose
/// `below` exceeds the roll wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnTable {
    pub entries: Vec<SpawnEntry>,
}

impl SpawnTable {
    pub fn new(entries: &[(i32, Archetype)]) -> Self {
        Self {
            entries: entries
                .iter()
                .map(|&(below, archetype)| SpawnEntry { below, archetype })
                .collect(),
        }
    }

    /// Pick the archetype for a roll
    pub fn select(&self, roll: i32) -> Option<Archetype> {
        self.entries
            .iter()
            .find(|entry| roll < entry.below)
            .map(|entry| entry.archetype)
    }

    fn validate(&self, level: usize) -> Result<(), TuningError> {
        let Some(last) = self.entries.last() else {
            return Err(TuningError::Invalid(format!(
                "spawn table for level {level} is empty"
            )));
        };
        if last.below <= ROLL_MAX {
            return Err(TuningError::Invalid(format!(
                "spawn table for level {level} does not cover roll {ROLL_MAX}"
            )));
        }
        for pair in self.entries.windows(2) {
            if pair[1].below <= pair[0].below {
                return Err(TuningError::Invalid(format!(
                    "spawn table for level {level} thresholds must be strictly ascending"
                )));
            }
        }
        if self
            .entries
            .iter()
            .any(|entry| entry.archetype == Archetype::Boss)
        {
            return Err(TuningError::Invalid(format!(
                "spawn table for level {level} lists the boss; the boss only spawns on the final level"
            )));
        }
        Ok(())
    }
}

/// Complete balance sheet for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub capacities: Capacities,
    /// Final level; it spawns the boss and nothing else
    pub max_level: u32,
    /// Kills needed to clear level 1
    pub first_level_quota: u32,
    /// Kills needed to clear the levels between the first and the boss level
    pub later_level_quota: u32,
    pub boss_level_quota: u32,
    /// Enemy spawn interval is `base - level * per_level`, floored at `min`
    pub spawn_interval_base: u32,
    pub spawn_interval_per_level: u32,
    pub spawn_interval_min: u32,
    /// Spawn tables indexed by `level - 1`; later levels reuse the last table
    pub spawn_tables: Vec<SpawnTable>,
    /// Ticks before a timed power-up drop may happen
    pub power_up_interval: u32,
    /// Percent chance per eligible tick of a timed drop
    pub power_up_chance: i32,
    /// Percent chance of a drop when an enemy dies to a bullet
    pub ranged_drop_chance: i32,
    /// Percent chance of a drop when an enemy dies to a knife
    pub melee_drop_chance: i32,
    /// Length of the pause between levels
    pub level_complete_ticks: u32,
    /// The pause can be skipped by a confirm press once more than this many ticks have passed
    pub level_skip_after_ticks: u32,
    pub contact_damage: ContactDamage,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            capacities: Capacities::default(),
            max_level: 3,
            first_level_quota: 10,
            later_level_quota: 15,
            boss_level_quota: 1,
            spawn_interval_base: 70,
            spawn_interval_per_level: 10,
            spawn_interval_min: 30,
            spawn_tables: vec![
                SpawnTable::new(&[
                    (70, Archetype::Basic { tier: 1 }),
                    (85, Archetype::Runner),
                    (101, Archetype::Shooter),
                ]),
                SpawnTable::new(&[
                    (40, Archetype::Basic { tier: 2 }),
                    (60, Archetype::Runner),
                    (75, Archetype::Shooter),
                    (85, Archetype::Tank),
                    (92, Archetype::Elite),
                    (101, Archetype::Basic { tier: 3 }),
                ]),
            ],
            power_up_interval: 450,
            power_up_chance: 15,
            ranged_drop_chance: 10,
            melee_drop_chance: 15,
            level_complete_ticks: 180,
            level_skip_after_ticks: 60,
            contact_damage: ContactDamage::default(),
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from a JSON string
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file on disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Check invariants the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.max_level == 0 {
            return Err(TuningError::Invalid("max_level must be at least 1".into()));
        }
        let caps = &self.capacities;
        if [
            caps.bullets,
            caps.enemies,
            caps.boss_bullets,
            caps.enemy_bullets,
            caps.power_ups,
            caps.knives,
        ]
        .contains(&0)
        {
            return Err(TuningError::Invalid("capacities must be non-zero".into()));
        }
        if self.max_level > 1 && self.spawn_tables.is_empty() {
            return Err(TuningError::Invalid(
                "at least one spawn table is required for non-boss levels".into(),
            ));
        }
        for (index, table) in self.spawn_tables.iter().enumerate() {
            table.validate(index + 1)?;
        }
        if self.first_level_quota == 0 || self.later_level_quota == 0 {
            return Err(TuningError::Invalid("level quotas must be non-zero".into()));
        }
        if self.spawn_interval_min == 0 {
            return Err(TuningError::Invalid(
                "spawn_interval_min must be at least 1 tick".into(),
            ));
        }
        Ok(())
    }

    /// Ticks between enemy spawns on `level`
    pub fn spawn_interval(&self, level: u32) -> u32 {
        self.spawn_interval_base
            .saturating_sub(level.saturating_mul(self.spawn_interval_per_level))
            .max(self.spawn_interval_min)
    }

    /// Spawn table for a non-boss level
    pub fn spawn_table(&self, level: u32) -> Option<&SpawnTable> {
        let index = (level.max(1) - 1) as usize;
        self.spawn_tables
            .get(index)
            .or_else(|| self.spawn_tables.last())
    }

    /// Kill quota for `level`
    pub fn quota_for(&self, level: u32) -> u32 {
        if level >= self.max_level {
            self.boss_level_quota
        } else if level <= 1 {
            self.first_level_quota
        } else {
            self.later_level_quota
        }
    }

    pub fn is_boss_level(&self, level: u32) -> bool {
        level >= self.max_level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        Tuning::default().validate().unwrap();
    }

    #[test]
    fn test_spawn_interval_decreases_with_floor() {
        let tuning = Tuning::default();
        assert_eq!(tuning.spawn_interval(1), 60);
        assert_eq!(tuning.spawn_interval(2), 50);
        assert_eq!(tuning.spawn_interval(5), 30);
        assert_eq!(tuning.spawn_interval(50), 30);
    }

    #[test]
    fn test_quotas() {
        let tuning = Tuning::default();
        assert_eq!(tuning.quota_for(1), 10);
        assert_eq!(tuning.quota_for(2), 15);
        assert_eq!(tuning.quota_for(3), 1);
        assert!(tuning.is_boss_level(3));
        assert!(!tuning.is_boss_level(2));
    }

    #[test]
    fn test_level_one_table_boundaries() {
        let tuning = Tuning::default();
        let table = tuning.spawn_table(1).unwrap();
        assert_eq!(table.select(0), Some(Archetype::Basic { tier: 1 }));
        assert_eq!(table.select(69), Some(Archetype::Basic { tier: 1 }));
        assert_eq!(table.select(70), Some(Archetype::Runner));
        assert_eq!(table.select(84), Some(Archetype::Runner));
        assert_eq!(table.select(85), Some(Archetype::Shooter));
        assert_eq!(table.select(100), Some(Archetype::Shooter));
    }

    #[test]
    fn test_level_two_table_boundaries() {
        let tuning = Tuning::default();
        let table = tuning.spawn_table(2).unwrap();
        assert_eq!(table.select(39), Some(Archetype::Basic { tier: 2 }));
        assert_eq!(table.select(40), Some(Archetype::Runner));
        assert_eq!(table.select(60), Some(Archetype::Shooter));
        assert_eq!(table.select(75), Some(Archetype::Tank));
        assert_eq!(table.select(85), Some(Archetype::Elite));
        assert_eq!(table.select(91), Some(Archetype::Elite));
        assert_eq!(table.select(92), Some(Archetype::Basic { tier: 3 }));
        assert_eq!(table.select(100), Some(Archetype::Basic { tier: 3 }));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(
            r#"{ "first_level_quota": 3, "contact_damage": { "mode": "every_tick" } }"#,
        )
        .unwrap();
        assert_eq!(tuning.first_level_quota, 3);
        assert_eq!(tuning.contact_damage, ContactDamage::EveryTick);
        assert_eq!(tuning.capacities.bullets, 100);
        assert_eq!(tuning.spawn_tables.len(), 2);
    }

    #[test]
    fn test_round_trip_through_json() {
        let json = serde_json::to_string(&Tuning::default()).unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), Tuning::default());
    }

    #[test]
    fn test_rejects_uncovered_table() {
        let err = Tuning::from_json(
            r#"{ "spawn_tables": [ { "entries": [ { "below": 50, "archetype": { "kind": "runner" } } ] } ] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));
    }

    #[test]
    fn test_rejects_boss_in_table() {
        let mut tuning = Tuning::default();
        tuning.spawn_tables[0].entries[0].archetype = Archetype::Boss;
        assert!(matches!(tuning.validate(), Err(TuningError::Invalid(_))));
    }

    #[test]
    fn test_rejects_zero_capacity() {
        let mut tuning = Tuning::default();
        tuning.capacities.knives = 0;
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(TuningError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            Tuning::load("/definitely/not/here/tuning.json"),
            Err(TuningError::Io(_))
        ));
    }
}
