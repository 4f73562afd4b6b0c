//! # Carnage Dungeon Schemas
//!
//! Procedural dungeon schema generation for the Carnage game backend.
//!
//! ## Architecture Overview
//!
//! The crate turns a monster catalog and a difficulty tier into a dungeon
//! schema document that the persistence layer stores verbatim:
//!
//! - **Catalog**: immutable, non-empty snapshot of the monsters to draw from
//! - **Generation**: tier table, injectable sampler and the schema generator
//! - **Seeds**: one persisted record per tier, built all-or-nothing
//! - **History**: a player's progress pointer through a generated schema
//!
//! Documents are built as plain data structures and serialized to JSON once,
//! at the boundary.

pub mod catalog;
pub mod generation;
pub mod history;
pub mod seeds;

pub use catalog::*;
pub use generation::*;
pub use history::*;
pub use seeds::*;

/// Core error type for the Carnage schema generator.
#[derive(thiserror::Error, Debug)]
pub enum CarnageError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Tier name or tier table entry is not recognized
    #[error("Unknown dungeon difficulty tier: {0}")]
    UnknownTier(String),

    /// Monster catalog has no entries to draw from
    #[error("Monster catalog is empty")]
    EmptyCatalog,

    /// Two catalog entries share one monster identifier
    #[error("Duplicate monster id in catalog: {0}")]
    DuplicateMonster(String),

    /// A tier's room range has its bounds inverted
    #[error("Invalid room range for {tier}: min {min} is greater than max {max}")]
    InvalidRange { tier: String, min: u32, max: u32 },

    /// Tier table is malformed in some other way
    #[error("Invalid tier configuration: {0}")]
    InvalidTierConfig(String),

    /// A schema document breaks a structural invariant
    #[error("Schema violation: {0}")]
    SchemaViolation(String),

    /// Illegal step on a dungeon history
    #[error("Dungeon history error: {0}")]
    HistoryError(String),
}

/// Result type used throughout the Carnage codebase.
pub type CarnageResult<T> = Result<T, CarnageError>;

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate-wide configuration constants.
pub mod config {
    /// Version stamped on seed records unless the configuration overrides it
    pub const DEFAULT_SCHEMA_VERSION: u32 = 1;

    /// Log level used by the binary when neither flag nor `RUST_LOG` is set
    pub const DEFAULT_LOG_LEVEL: &str = "info";

    /// Largest number of rooms a single tier may request per level
    pub const MAX_ROOMS_PER_LEVEL: u32 = 1000;

    /// Largest number of levels a single tier may request
    pub const MAX_LEVELS: u32 = 10_000;
}
