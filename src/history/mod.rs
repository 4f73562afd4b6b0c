//! # Dungeon History
//!
//! Tracks a player's run through a generated dungeon schema: the level and
//! room they last reached, whether they are still alive, and whether the
//! dungeon has been cleared.
//!
//! Traversal follows the schema graph only. Within a level the player moves
//! room by room; from the `last_room` of a level they follow the level's
//! `next` pointer to room 0 of the following level.

use crate::{CarnageError, CarnageResult, DungeonSchema, SchemaRoom};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Outcome of a single [`DungeonHistory::advance`] step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Progress {
    /// Moved to another room on the same level
    NextRoom { level: u32, room: u32 },
    /// Cleared a level and entered the first room of the next one
    NextLevel { level: u32 },
    /// Cleared the final room of the final level
    Completed,
}

/// A player's progress pointer through one dungeon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DungeonHistory {
    pub id: Uuid,
    pub player_id: Uuid,
    pub dungeon_id: Uuid,
    pub last_level: u32,
    pub last_room: u32,
    pub is_player_alive: bool,
    pub is_dungeon_complete: bool,
}

impl DungeonHistory {
    /// Starts a fresh run at the first room of the first level.
    ///
    /// # Examples
    ///
    /// ```
    /// use carnage::DungeonHistory;
    /// use uuid::Uuid;
    ///
    /// let history = DungeonHistory::start(Uuid::new_v4(), Uuid::new_v4());
    /// assert_eq!((history.last_level, history.last_room), (0, 0));
    /// assert!(history.is_player_alive);
    /// assert!(!history.is_dungeon_complete);
    /// ```
    pub fn start(player_id: Uuid, dungeon_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            player_id,
            dungeon_id,
            last_level: 0,
            last_room: 0,
            is_player_alive: true,
            is_dungeon_complete: false,
        }
    }

    /// The room the player currently stands in.
    pub fn current_room<'a>(&self, schema: &'a DungeonSchema) -> CarnageResult<&'a SchemaRoom> {
        schema
            .level(self.last_level)
            .and_then(|level| level.room(self.last_room))
            .ok_or_else(|| {
                CarnageError::HistoryError(format!(
                    "level {} room {} is not part of the dungeon",
                    self.last_level, self.last_room
                ))
            })
    }

    /// Moves one step forward through the dungeon.
    pub fn advance(&mut self, schema: &DungeonSchema) -> CarnageResult<Progress> {
        if !self.is_player_alive {
            return Err(CarnageError::HistoryError(
                "player is dead and cannot advance".to_string(),
            ));
        }
        if self.is_dungeon_complete {
            return Err(CarnageError::HistoryError(
                "dungeon is already complete".to_string(),
            ));
        }

        let room = self.current_room(schema)?;
        if !room.last_room {
            self.last_room += 1;
            return Ok(Progress::NextRoom {
                level: self.last_level,
                room: self.last_room,
            });
        }

        // current_room succeeded, so the level exists
        let next = schema.level(self.last_level).and_then(|level| level.next);
        match next {
            Some(level) => {
                self.last_level = level;
                self.last_room = 0;
                log::debug!("History {} entered level {}", self.id, level);
                Ok(Progress::NextLevel { level })
            }
            None => {
                self.is_dungeon_complete = true;
                log::info!(
                    "Player {} completed dungeon {}",
                    self.player_id,
                    self.dungeon_id
                );
                Ok(Progress::Completed)
            }
        }
    }

    /// Marks the player as dead at their current position.
    pub fn record_death(&mut self) {
        self.is_player_alive = false;
        log::info!(
            "Player {} died on level {} room {}",
            self.player_id,
            self.last_level,
            self.last_room
        );
    }
}
