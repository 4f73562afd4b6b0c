//! # Dungeon Schema Seeding
//!
//! Produces the dungeon schema records stored at database-seed time: one per
//! difficulty tier, each pairing a freshly generated schema with its tier
//! reference and a version number.
//!
//! Seeding is all-or-nothing. If any tier fails to generate, no records are
//! returned, so the persistence layer never stores a partial set.

use crate::{
    config, CarnageResult, DifficultyTier, DungeonSchema, DungeonSchemaGenerator, Generator,
    GenerationConfig, MonsterCatalog, Sampler, TierConfig,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A seed row for the dungeon schema table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DungeonSchemaRecord {
    /// Difficulty the schema belongs to
    pub dungeon_difficulty: DifficultyTier,
    pub name: String,
    pub description: String,
    pub schema: DungeonSchema,
    pub version: u32,
}

impl DungeonSchemaRecord {
    /// Wraps a generated schema with the metadata derived from its tier.
    pub fn new(
        tier: DifficultyTier,
        tier_config: &TierConfig,
        schema: DungeonSchema,
        version: u32,
    ) -> Self {
        Self {
            dungeon_difficulty: tier,
            name: format!("{tier} dungeon schema"),
            description: format!(
                "Max dungeon levels {}. Rooms can vary between {}.",
                tier_config.level_count, tier_config.room_range
            ),
            schema,
            version,
        }
    }
}

/// Builds seed records for a set of tiers.
#[derive(Debug, Clone)]
pub struct DungeonSchemaSeed {
    generator: DungeonSchemaGenerator,
    version: u32,
    tiers: Vec<DifficultyTier>,
}

impl DungeonSchemaSeed {
    /// Seeds every tier from the built-in table at the default version.
    pub fn new() -> Self {
        Self {
            generator: DungeonSchemaGenerator::default(),
            version: config::DEFAULT_SCHEMA_VERSION,
            tiers: DifficultyTier::ALL.to_vec(),
        }
    }

    /// Seeds every tier using the configuration's tier table and version.
    pub fn from_config(config: &GenerationConfig) -> CarnageResult<Self> {
        Ok(Self {
            generator: DungeonSchemaGenerator::new(config.tier_table()?)?,
            version: config.schema_version,
            tiers: DifficultyTier::ALL.to_vec(),
        })
    }

    /// Restricts seeding to the given tiers, in the given order.
    pub fn with_tiers(mut self, tiers: Vec<DifficultyTier>) -> Self {
        self.tiers = tiers;
        self
    }

    pub fn generator(&self) -> &DungeonSchemaGenerator {
        &self.generator
    }

    /// Generates one record per configured tier.
    pub fn build(
        &self,
        catalog: &MonsterCatalog,
        sampler: &mut dyn Sampler,
    ) -> CarnageResult<Vec<DungeonSchemaRecord>> {
        let records = self
            .tiers
            .iter()
            .map(|&tier| self.build_record(tier, catalog, sampler))
            .collect::<CarnageResult<Vec<_>>>()?;

        log::info!(
            "Seeded {} dungeon schema records (version {})",
            records.len(),
            self.version
        );
        Ok(records)
    }

    fn build_record(
        &self,
        tier: DifficultyTier,
        catalog: &MonsterCatalog,
        sampler: &mut dyn Sampler,
    ) -> CarnageResult<DungeonSchemaRecord> {
        let tier_config = self.generator.tiers().resolve(tier)?;
        let schema = self.generator.generate(tier, catalog, sampler)?;
        log::info!(
            "Seeded {} dungeon schema: {} levels, {} rooms",
            tier,
            schema.level_count(),
            schema.total_rooms()
        );
        Ok(DungeonSchemaRecord::new(
            tier,
            &tier_config,
            schema,
            self.version,
        ))
    }
}

impl Default for DungeonSchemaSeed {
    fn default() -> Self {
        Self::new()
    }
}

/// Writes seed records as a JSON array.
pub fn write_records(
    path: impl AsRef<Path>,
    records: &[DungeonSchemaRecord],
    pretty: bool,
) -> CarnageResult<()> {
    let path = path.as_ref();
    let json = records_to_json(records, pretty)?;
    std::fs::write(path, json)?;
    log::info!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

/// Reads seed records previously written by [`write_records`].
pub fn read_records(path: impl AsRef<Path>) -> CarnageResult<Vec<DungeonSchemaRecord>> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

pub fn records_to_json(records: &[DungeonSchemaRecord], pretty: bool) -> CarnageResult<String> {
    let json = if pretty {
        serde_json::to_string_pretty(records)?
    } else {
        serde_json::to_string(records)?
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::utils;
    use crate::{CarnageError, Monster, RoomRange, TierEntry};

    fn catalog() -> MonsterCatalog {
        MonsterCatalog::new(vec![
            Monster::new("rat", false),
            Monster::new("dragon", true),
        ])
        .unwrap()
    }

    #[test]
    fn test_record_metadata() {
        let seed = DungeonSchemaSeed::new();
        let mut rng = utils::create_rng(Some(42));
        let records = seed.build(&catalog(), &mut rng).unwrap();

        assert_eq!(records.len(), 4);
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "Easy dungeon schema",
                "Medium dungeon schema",
                "Hard dungeon schema",
                "Nightmare dungeon schema"
            ]
        );
        assert_eq!(
            records[0].description,
            "Max dungeon levels 25. Rooms can vary between 5-10."
        );
        assert_eq!(
            records[3].description,
            "Max dungeon levels 150. Rooms can vary between 10-20."
        );
        assert!(records.iter().all(|r| r.version == 1));
        assert_eq!(records[2].schema.level_count(), 100);
    }

    #[test]
    fn test_config_drives_version_and_tiers() {
        let config = GenerationConfig {
            seed: Some(1),
            schema_version: 3,
            tiers: vec![TierEntry {
                tier: DifficultyTier::Easy,
                level_count: 2,
                room_range: RoomRange::new(1, 2),
            }],
        };
        let seed = DungeonSchemaSeed::from_config(&config)
            .unwrap()
            .with_tiers(vec![DifficultyTier::Easy]);
        let mut rng = utils::create_rng(config.seed);
        let records = seed.build(&catalog(), &mut rng).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].version, 3);
        assert_eq!(records[0].schema.level_count(), 2);
        assert_eq!(
            records[0].description,
            "Max dungeon levels 2. Rooms can vary between 1-2."
        );
    }

    #[test]
    fn test_invalid_config_rejected_before_seeding() {
        let config = GenerationConfig {
            tiers: vec![TierEntry {
                tier: DifficultyTier::Nightmare,
                level_count: 150,
                room_range: RoomRange::new(20, 10),
            }],
            ..GenerationConfig::default()
        };
        assert!(matches!(
            DungeonSchemaSeed::from_config(&config),
            Err(CarnageError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_records_json_shape() {
        let seed = DungeonSchemaSeed::new().with_tiers(vec![DifficultyTier::Easy]);
        let mut rng = utils::create_rng(Some(5));
        let records = seed.build(&catalog(), &mut rng).unwrap();

        let json = records_to_json(&records, false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["dungeon_difficulty"], "Easy");
        assert_eq!(value[0]["version"], 1);
        assert!(value[0]["schema"]["levels"]["24"]["next"].is_null());
    }
}
