//! Error types for catalog loading, configuration, and deck storage.
//!
//! Rule rejections (a card that can't be added, a deck that can't be saved)
//! are not errors; they live next to the rules in `deck`.

use thiserror::Error;

use crate::cards::{CardId, Faction};

/// Result type for fallible companion operations.
pub type Result<T> = std::result::Result<T, CompanionError>;

/// Errors surfaced by I/O-facing parts of the crate.
#[derive(Debug, Error)]
pub enum CompanionError {
    /// File system error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Config file could not be parsed.
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    /// The catalog lists the same identifier twice.
    #[error("duplicate card id in catalog: {0}")]
    DuplicateCard(CardId),

    /// A deck faction the catalog has no cards for, or `neutral`.
    #[error("not a deck faction in this catalog: {0}")]
    UnknownFaction(Faction),

    /// A storage backend refused the write.
    #[error("storage error: {0}")]
    Storage(String),
}
