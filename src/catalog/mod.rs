//! # Monster Catalog
//!
//! Read-only snapshot of the monsters a dungeon schema may reference.
//!
//! The catalog is taken once before generation and never mutated while a
//! schema is being built. It is guaranteed non-empty, so drawing from it is
//! always defined.

use crate::{CarnageError, CarnageResult, Sampler};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use uuid::Uuid;

/// A monster as seen by the schema generator.
///
/// # Examples
///
/// ```
/// use carnage::Monster;
///
/// let goblin = Monster::new("m1", false);
/// assert_eq!(goblin.id, "m1");
/// assert!(!goblin.is_boss);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Monster {
    /// Opaque identifier, usually a UUID
    pub id: String,
    /// Whether this monster is a boss encounter
    #[serde(default)]
    pub is_boss: bool,
    /// Optional display name, ignored by generation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Monster {
    /// Creates a monster with the given identifier.
    pub fn new(id: impl Into<String>, is_boss: bool) -> Self {
        Self {
            id: id.into(),
            is_boss,
            name: None,
        }
    }

    /// Creates a named monster under a fresh UUID v4 identifier.
    pub fn with_random_id(name: impl Into<String>, is_boss: bool) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            is_boss,
            name: Some(name.into()),
        }
    }
}

/// Immutable, non-empty collection of monsters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MonsterCatalog {
    monsters: Vec<Monster>,
}

impl MonsterCatalog {
    /// Takes ownership of the monsters as a catalog snapshot.
    ///
    /// # Examples
    ///
    /// ```
    /// use carnage::{CarnageError, Monster, MonsterCatalog};
    ///
    /// let catalog = MonsterCatalog::new(vec![Monster::new("m1", false)]).unwrap();
    /// assert_eq!(catalog.len(), 1);
    ///
    /// let empty = MonsterCatalog::new(Vec::new());
    /// assert!(matches!(empty, Err(CarnageError::EmptyCatalog)));
    /// ```
    ///
    /// Identifiers must be unique: a room records only the monster id, so
    /// two monsters sharing one would make its boss flag ambiguous.
    pub fn new(monsters: Vec<Monster>) -> CarnageResult<Self> {
        if monsters.is_empty() {
            return Err(CarnageError::EmptyCatalog);
        }

        let mut seen = HashSet::with_capacity(monsters.len());
        if let Some(duplicate) = monsters
            .iter()
            .find(|monster| !seen.insert(monster.id.as_str()))
        {
            return Err(CarnageError::DuplicateMonster(duplicate.id.clone()));
        }

        Ok(Self { monsters })
    }

    /// Copies a borrowed slice into a catalog snapshot.
    pub fn snapshot(monsters: &[Monster]) -> CarnageResult<Self> {
        Self::new(monsters.to_vec())
    }

    /// Parses a JSON array of monster records.
    pub fn from_json_str(json: &str) -> CarnageResult<Self> {
        let monsters: Vec<Monster> = serde_json::from_str(json)?;
        Self::new(monsters)
    }

    /// Loads a JSON array of monster records from disk.
    pub fn load(path: impl AsRef<Path>) -> CarnageResult<Self> {
        let path = path.as_ref();
        log::debug!("Loading monster catalog from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&contents)?;
        log::info!(
            "Loaded {} monsters ({} bosses) from {}",
            catalog.len(),
            catalog.boss_count(),
            path.display()
        );
        Ok(catalog)
    }

    /// Number of monsters in the catalog. Never zero.
    pub fn len(&self) -> usize {
        self.monsters.len()
    }

    /// Always false; kept for API symmetry with collections.
    pub fn is_empty(&self) -> bool {
        self.monsters.is_empty()
    }

    /// Iterates over the monsters in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Monster> {
        self.monsters.iter()
    }

    /// Looks up a monster by identifier.
    pub fn get(&self, id: &str) -> Option<&Monster> {
        self.monsters.iter().find(|monster| monster.id == id)
    }

    /// Identifier index for repeated lookups.
    pub fn by_id(&self) -> HashMap<&str, &Monster> {
        self.monsters
            .iter()
            .map(|monster| (monster.id.as_str(), monster))
            .collect()
    }

    /// Number of boss monsters in the catalog.
    pub fn boss_count(&self) -> usize {
        self.monsters.iter().filter(|monster| monster.is_boss).count()
    }

    /// Draws one monster uniformly at random, with replacement.
    pub fn pick(&self, sampler: &mut dyn Sampler) -> &Monster {
        &self.monsters[sampler.index(self.monsters.len())]
    }
}

impl<'a> IntoIterator for &'a MonsterCatalog {
    type Item = &'a Monster;
    type IntoIter = std::slice::Iter<'a, Monster>;

    fn into_iter(self) -> Self::IntoIter {
        self.monsters.iter()
    }
}
