//! # Dungeon Schema Document
//!
//! The generated artifact: an ordered chain of levels, each with an ordered
//! set of rooms. Level and room maps are keyed by contiguous 0-based indices
//! and serialize with string keys (`"0"`, `"1"`, ...), which is the shape the
//! persistence layer stores in its JSON column.

use crate::{CarnageError, CarnageResult, Monster, MonsterCatalog, TierConfig};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// A complete dungeon layout.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DungeonSchema {
    pub levels: BTreeMap<u32, SchemaLevel>,
}

/// One stage of the dungeon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaLevel {
    /// Following level, `None` on the last level
    pub next: Option<u32>,
    /// Preceding level, `None` on the first level
    pub previous: Option<u32>,
    pub rooms: BTreeMap<u32, SchemaRoom>,
}

/// A single encounter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaRoom {
    /// Identifier of the monster placed in this room
    pub monster: String,
    /// Copied from the monster's boss flag
    pub is_boss: bool,
    /// True only for the highest-indexed room of the level
    pub last_room: bool,
}

impl SchemaLevel {
    pub fn room_count(&self) -> u32 {
        self.rooms.len() as u32
    }

    pub fn room(&self, index: u32) -> Option<&SchemaRoom> {
        self.rooms.get(&index)
    }

    pub fn is_first(&self) -> bool {
        self.previous.is_none()
    }

    pub fn is_last(&self) -> bool {
        self.next.is_none()
    }
}

impl DungeonSchema {
    pub fn level_count(&self) -> u32 {
        self.levels.len() as u32
    }

    pub fn level(&self, index: u32) -> Option<&SchemaLevel> {
        self.levels.get(&index)
    }

    /// Room count of a level, if the level exists.
    pub fn room_count(&self, level: u32) -> Option<u32> {
        self.level(level).map(SchemaLevel::room_count)
    }

    /// Rooms across every level.
    pub fn total_rooms(&self) -> u32 {
        self.levels.values().map(SchemaLevel::room_count).sum()
    }

    /// Rooms whose monster is a boss.
    pub fn boss_rooms(&self) -> u32 {
        self.levels
            .values()
            .flat_map(|level| level.rooms.values())
            .filter(|room| room.is_boss)
            .count() as u32
    }

    /// Checks every structural invariant against the tier and catalog the
    /// schema was generated from.
    ///
    /// Reports the first violation found.
    pub fn validate(&self, tier: &TierConfig, catalog: &MonsterCatalog) -> CarnageResult<()> {
        if self.level_count() != tier.level_count {
            return Err(violation(format!(
                "expected {} levels, found {}",
                tier.level_count,
                self.level_count()
            )));
        }

        let monsters = catalog.by_id();
        let last_level = tier.level_count.saturating_sub(1);
        for (position, (&index, level)) in self.levels.iter().enumerate() {
            if index != position as u32 {
                return Err(violation(format!(
                    "level indices are not contiguous: found {index} at position {position}"
                )));
            }

            let expected_next = (index < last_level).then(|| index + 1);
            let expected_previous = index.checked_sub(1);
            if level.next != expected_next {
                return Err(violation(format!(
                    "level {index} has next {:?}, expected {expected_next:?}",
                    level.next
                )));
            }
            if level.previous != expected_previous {
                return Err(violation(format!(
                    "level {index} has previous {:?}, expected {expected_previous:?}",
                    level.previous
                )));
            }

            validate_rooms(index, level, tier, &monsters)?;
        }

        Ok(())
    }

    /// Compact JSON, as stored by the persistence layer.
    pub fn to_json(&self) -> CarnageResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> CarnageResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json_str(json: &str) -> CarnageResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

fn validate_rooms(
    index: u32,
    level: &SchemaLevel,
    tier: &TierConfig,
    monsters: &HashMap<&str, &Monster>,
) -> CarnageResult<()> {
    let room_count = level.room_count();
    if !tier.room_range.contains(room_count) {
        return Err(violation(format!(
            "level {index} has {room_count} rooms, allowed range is {}",
            tier.room_range
        )));
    }

    for (position, (&room_index, room)) in level.rooms.iter().enumerate() {
        if room_index != position as u32 {
            return Err(violation(format!(
                "level {index} room indices are not contiguous: found {room_index} at position {position}"
            )));
        }

        let should_be_last = room_index == room_count - 1;
        if room.last_room != should_be_last {
            return Err(violation(format!(
                "level {index} room {room_index} has last_room {}, expected {should_be_last}",
                room.last_room
            )));
        }

        let monster = monsters.get(room.monster.as_str()).ok_or_else(|| {
            violation(format!(
                "level {index} room {room_index} references unknown monster {}",
                room.monster
            ))
        })?;
        if monster.is_boss != room.is_boss {
            return Err(violation(format!(
                "level {index} room {room_index} has is_boss {}, monster {} has {}",
                room.is_boss, monster.id, monster.is_boss
            )));
        }
    }

    Ok(())
}

fn violation(message: String) -> CarnageError {
    CarnageError::SchemaViolation(message)
}
