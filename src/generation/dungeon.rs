//! # Dungeon Schema Generation
//!
//! Builds a dungeon schema as a doubly-linked chain of levels.
//!
//! The generator works in three steps:
//! 1. Resolve the tier's level count and room range from the tier table
//! 2. For every level, link it to its neighbours and draw a room count
//! 3. For every room, draw a monster (with replacement) and flag the last room
//!
//! Room counts are drawn independently per level and monsters independently
//! per room. The level graph never branches, so every level has at most one
//! next and one previous level.

use crate::{
    CarnageError, CarnageResult, DifficultyTier, DungeonSchema, Generator, MonsterCatalog,
    RoomRange, Sampler, SchemaLevel, SchemaRoom, TierTable,
};
use std::collections::BTreeMap;

/// Generator for multi-level dungeon schemas.
#[derive(Debug, Clone)]
pub struct DungeonSchemaGenerator {
    /// Tier size parameters, validated on construction
    tiers: TierTable,
    /// Whether to re-check invariants before returning a schema
    pub validate_output: bool,
}

impl DungeonSchemaGenerator {
    /// Creates a generator over a custom tier table.
    ///
    /// Invalid tables are rejected here so generation itself never sees an
    /// inverted room range.
    ///
    /// # Examples
    ///
    /// ```
    /// use carnage::{DifficultyTier, DungeonSchemaGenerator, RoomRange, TierEntry, TierTable};
    ///
    /// let mut table = TierTable::default();
    /// table.set(TierEntry {
    ///     tier: DifficultyTier::Easy,
    ///     level_count: 3,
    ///     room_range: RoomRange::new(10, 2),
    /// });
    /// assert!(DungeonSchemaGenerator::new(table).is_err());
    /// ```
    pub fn new(tiers: TierTable) -> CarnageResult<Self> {
        tiers.validate()?;
        Ok(Self {
            tiers,
            validate_output: true,
        })
    }

    pub fn tiers(&self) -> &TierTable {
        &self.tiers
    }

    /// Builds a single level at `index` of a `level_count`-level dungeon.
    fn build_level(
        &self,
        index: u32,
        level_count: u32,
        room_range: RoomRange,
        catalog: &MonsterCatalog,
        sampler: &mut dyn Sampler,
    ) -> SchemaLevel {
        let next = (index + 1 < level_count).then(|| index + 1);
        let previous = index.checked_sub(1);
        let room_count = sampler.range_inclusive(room_range.min, room_range.max);

        SchemaLevel {
            next,
            previous,
            rooms: self.build_rooms(room_count, catalog, sampler),
        }
    }

    fn build_rooms(
        &self,
        room_count: u32,
        catalog: &MonsterCatalog,
        sampler: &mut dyn Sampler,
    ) -> BTreeMap<u32, SchemaRoom> {
        (0..room_count)
            .map(|index| {
                let monster = catalog.pick(sampler);
                let room = SchemaRoom {
                    monster: monster.id.clone(),
                    is_boss: monster.is_boss,
                    last_room: index == room_count - 1,
                };
                (index, room)
            })
            .collect()
    }
}

impl Generator<DungeonSchema> for DungeonSchemaGenerator {
    fn generate(
        &self,
        tier: DifficultyTier,
        catalog: &MonsterCatalog,
        sampler: &mut dyn Sampler,
    ) -> CarnageResult<DungeonSchema> {
        if catalog.is_empty() {
            return Err(CarnageError::EmptyCatalog);
        }
        let config = self.tiers.resolve(tier)?;

        let levels = (0..config.level_count)
            .map(|index| {
                let level = self.build_level(
                    index,
                    config.level_count,
                    config.room_range,
                    catalog,
                    sampler,
                );
                (index, level)
            })
            .collect();
        let schema = DungeonSchema { levels };

        log::debug!(
            "{} generated {} schema: {} levels, {} rooms, {} boss rooms",
            self.generator_type(),
            tier,
            schema.level_count(),
            schema.total_rooms(),
            schema.boss_rooms()
        );

        if self.validate_output {
            self.validate(&schema, tier, catalog)?;
        }

        Ok(schema)
    }

    fn validate(
        &self,
        schema: &DungeonSchema,
        tier: DifficultyTier,
        catalog: &MonsterCatalog,
    ) -> CarnageResult<()> {
        let config = self.tiers.resolve(tier)?;
        schema.validate(&config, catalog)
    }

    fn generator_type(&self) -> &'static str {
        "DungeonSchemaGenerator"
    }
}

impl Default for DungeonSchemaGenerator {
    fn default() -> Self {
        Self {
            tiers: TierTable::default(),
            validate_output: true,
        }
    }
}
