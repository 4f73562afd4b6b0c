//! # Generation Module
//!
//! Procedural dungeon schema generation.
//!
//! This module holds the pieces every generator shares: the difficulty tier
//! table, the generation configuration, and the [`Sampler`] capability that
//! supplies all randomness. Generators never reach for a global random source;
//! callers hand one in, seeded or not, which keeps test runs reproducible.

pub mod dungeon;
pub mod schema;

pub use dungeon::*;
pub use schema::*;

use crate::{config, CarnageError, CarnageResult, Monster, MonsterCatalog};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Named difficulty level controlling dungeon size and room-count range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DifficultyTier {
    Easy,
    Medium,
    Hard,
    Nightmare,
}

impl DifficultyTier {
    /// Every tier, in ascending difficulty.
    pub const ALL: [DifficultyTier; 4] = [
        DifficultyTier::Easy,
        DifficultyTier::Medium,
        DifficultyTier::Hard,
        DifficultyTier::Nightmare,
    ];

    /// Display name, as stored alongside persisted difficulty records.
    pub fn name(self) -> &'static str {
        match self {
            DifficultyTier::Easy => "Easy",
            DifficultyTier::Medium => "Medium",
            DifficultyTier::Hard => "Hard",
            DifficultyTier::Nightmare => "Nightmare",
        }
    }

    /// Built-in level count and room range for this tier.
    pub fn default_config(self) -> TierConfig {
        match self {
            DifficultyTier::Easy => TierConfig::new(25, RoomRange::new(5, 10)),
            DifficultyTier::Medium => TierConfig::new(50, RoomRange::new(5, 10)),
            DifficultyTier::Hard => TierConfig::new(100, RoomRange::new(5, 10)),
            DifficultyTier::Nightmare => TierConfig::new(150, RoomRange::new(10, 20)),
        }
    }
}

impl fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DifficultyTier {
    type Err = CarnageError;

    /// Parses a tier name, ignoring case and surrounding whitespace.
    ///
    /// # Examples
    ///
    /// ```
    /// use carnage::DifficultyTier;
    ///
    /// assert_eq!("nightmare".parse::<DifficultyTier>().unwrap(), DifficultyTier::Nightmare);
    /// assert!("Legendary".parse::<DifficultyTier>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        DifficultyTier::ALL
            .into_iter()
            .find(|tier| tier.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CarnageError::UnknownTier(s.to_string()))
    }
}

/// Inclusive range of rooms per level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomRange {
    pub min: u32,
    pub max: u32,
}

impl RoomRange {
    /// Creates a range. Bounds are checked by [`TierTable::validate`].
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Whether `count` lies within the range, both ends included.
    pub fn contains(&self, count: u32) -> bool {
        self.min <= count && count <= self.max
    }
}

impl fmt::Display for RoomRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// Size parameters resolved for a single tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierConfig {
    /// Number of levels in the dungeon
    pub level_count: u32,
    /// Rooms drawn per level
    pub room_range: RoomRange,
}

impl TierConfig {
    pub const fn new(level_count: u32, room_range: RoomRange) -> Self {
        Self {
            level_count,
            room_range,
        }
    }

    /// Checks the bounds of this configuration on behalf of `tier`.
    pub fn validate(&self, tier: DifficultyTier) -> CarnageResult<()> {
        if self.level_count == 0 {
            return Err(CarnageError::InvalidTierConfig(format!(
                "{tier} must have at least one level"
            )));
        }
        if self.level_count > config::MAX_LEVELS {
            return Err(CarnageError::InvalidTierConfig(format!(
                "{tier} requests {} levels, limit is {}",
                self.level_count,
                config::MAX_LEVELS
            )));
        }
        if self.room_range.min > self.room_range.max {
            return Err(CarnageError::InvalidRange {
                tier: tier.to_string(),
                min: self.room_range.min,
                max: self.room_range.max,
            });
        }
        if self.room_range.min == 0 {
            return Err(CarnageError::InvalidTierConfig(format!(
                "{tier} levels must contain at least one room"
            )));
        }
        if self.room_range.max > config::MAX_ROOMS_PER_LEVEL {
            return Err(CarnageError::InvalidTierConfig(format!(
                "{tier} allows {} rooms per level, limit is {}",
                self.room_range.max,
                config::MAX_ROOMS_PER_LEVEL
            )));
        }
        Ok(())
    }
}

/// One row of the tier table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierEntry {
    pub tier: DifficultyTier,
    pub level_count: u32,
    pub room_range: RoomRange,
}

impl TierEntry {
    pub fn config(&self) -> TierConfig {
        TierConfig::new(self.level_count, self.room_range)
    }
}

/// Enumerated tier → (level count, room range) table.
///
/// Adding or tuning a tier is a single entry change. Resolution fails with
/// [`CarnageError::UnknownTier`] for tiers the table does not carry.
///
/// # Examples
///
/// ```
/// use carnage::{DifficultyTier, TierTable};
///
/// let table = TierTable::default();
/// let easy = table.resolve(DifficultyTier::Easy).unwrap();
/// assert_eq!(easy.level_count, 25);
/// assert_eq!((easy.room_range.min, easy.room_range.max), (5, 10));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TierTable {
    entries: Vec<TierEntry>,
}

impl TierTable {
    /// Builds a table from explicit rows without validating them.
    pub fn from_entries(entries: Vec<TierEntry>) -> Self {
        Self { entries }
    }

    /// Resolves the size parameters of `tier`.
    pub fn resolve(&self, tier: DifficultyTier) -> CarnageResult<TierConfig> {
        self.entries
            .iter()
            .find(|entry| entry.tier == tier)
            .map(TierEntry::config)
            .ok_or_else(|| CarnageError::UnknownTier(tier.to_string()))
    }

    /// Rows in table order.
    pub fn entries(&self) -> &[TierEntry] {
        &self.entries
    }

    /// Replaces the row for `entry.tier`, appending it when absent.
    pub fn set(&mut self, entry: TierEntry) {
        match self.entries.iter_mut().find(|row| row.tier == entry.tier) {
            Some(row) => *row = entry,
            None => self.entries.push(entry),
        }
    }

    /// Checks every row and rejects duplicate tiers.
    pub fn validate(&self) -> CarnageResult<()> {
        for (i, entry) in self.entries.iter().enumerate() {
            if self.entries[..i].iter().any(|row| row.tier == entry.tier) {
                return Err(CarnageError::InvalidTierConfig(format!(
                    "{} appears more than once",
                    entry.tier
                )));
            }
            entry.config().validate(entry.tier)?;
        }
        Ok(())
    }
}

impl Default for TierTable {
    fn default() -> Self {
        Self::from_entries(
            DifficultyTier::ALL
                .into_iter()
                .map(|tier| {
                    let config = tier.default_config();
                    TierEntry {
                        tier,
                        level_count: config.level_count,
                        room_range: config.room_range,
                    }
                })
                .collect(),
        )
    }
}

/// Configuration for schema generation and seeding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Fixed seed for reproducible output; fresh entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
    /// Version stamped on seed records
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    /// Per-tier overrides layered over the built-in table
    #[serde(default)]
    pub tiers: Vec<TierEntry>,
}

fn default_schema_version() -> u32 {
    config::DEFAULT_SCHEMA_VERSION
}

impl GenerationConfig {
    /// Creates a default configuration with a fixed seed.
    pub fn new(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Parses a configuration from JSON and validates its tier table.
    pub fn from_json_str(json: &str) -> CarnageResult<Self> {
        let config: GenerationConfig = serde_json::from_str(json)?;
        config.tier_table()?;
        Ok(config)
    }

    /// Loads a configuration file from disk.
    ///
    /// Invalid room ranges surface here rather than during generation.
    pub fn load(path: impl AsRef<Path>) -> CarnageResult<Self> {
        let path = path.as_ref();
        log::debug!("Loading generation config from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// The built-in tier table with this configuration's overrides applied.
    pub fn tier_table(&self) -> CarnageResult<TierTable> {
        for (i, entry) in self.tiers.iter().enumerate() {
            if self.tiers[..i].iter().any(|row| row.tier == entry.tier) {
                return Err(CarnageError::InvalidTierConfig(format!(
                    "{} is overridden more than once",
                    entry.tier
                )));
            }
        }

        let mut table = TierTable::default();
        for entry in &self.tiers {
            table.set(*entry);
        }
        table.validate()?;
        Ok(table)
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            seed: None,
            schema_version: config::DEFAULT_SCHEMA_VERSION,
            tiers: Vec::new(),
        }
    }
}

/// Source of every random draw made during generation.
///
/// Any [`rand::Rng`] is a sampler. Tests can supply scripted implementations
/// to pin draws to range boundaries.
pub trait Sampler {
    /// Uniform integer in `min..=max`. Callers guarantee `min <= max`.
    fn range_inclusive(&mut self, min: u32, max: u32) -> u32;

    /// Uniform index in `0..len`. Callers guarantee `len > 0`.
    fn index(&mut self, len: usize) -> usize;
}

impl<R: Rng> Sampler for R {
    fn range_inclusive(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        self.gen_range(min..=max)
    }

    fn index(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        self.gen_range(0..len)
    }
}

/// Trait for procedural generators.
///
/// Generators are pure: the output depends only on the tier, the catalog
/// snapshot and the draws taken from the sampler.
pub trait Generator<T> {
    /// Generates content for `tier`, drawing from `catalog`.
    fn generate(
        &self,
        tier: DifficultyTier,
        catalog: &MonsterCatalog,
        sampler: &mut dyn Sampler,
    ) -> CarnageResult<T>;

    /// Validates that generated content meets the tier's invariants.
    fn validate(
        &self,
        content: &T,
        tier: DifficultyTier,
        catalog: &MonsterCatalog,
    ) -> CarnageResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Generates a dungeon schema from the built-in tier table.
///
/// The monster slice is copied into a catalog snapshot first, so an empty
/// slice fails with [`CarnageError::EmptyCatalog`] before any draw is made.
///
/// # Examples
///
/// ```
/// use carnage::{generate, DifficultyTier, Monster};
/// use carnage::generation::utils;
///
/// let monsters = vec![Monster::new("m1", false), Monster::new("m2", true)];
/// let mut rng = utils::create_rng(Some(42));
/// let schema = generate(DifficultyTier::Easy, &monsters, &mut rng).unwrap();
/// assert_eq!(schema.level_count(), 25);
/// ```
pub fn generate(
    tier: DifficultyTier,
    monsters: &[Monster],
    sampler: &mut dyn Sampler,
) -> CarnageResult<DungeonSchema> {
    let catalog = MonsterCatalog::snapshot(monsters)?;
    DungeonSchemaGenerator::default().generate(tier, &catalog, sampler)
}

/// Like [`generate`], resolving the tier from its name first.
pub fn generate_by_name(
    tier: &str,
    monsters: &[Monster],
    sampler: &mut dyn Sampler,
) -> CarnageResult<DungeonSchema> {
    let tier: DifficultyTier = tier.parse()?;
    generate(tier, monsters, sampler)
}

/// Utility functions for generation.
pub mod utils {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Creates a random number generator, seeded when a seed is given.
    pub fn create_rng(seed: Option<u64>) -> StdRng {
        match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
