//! Companion configuration.
//!
//! - `DeckRules`: Deck-construction limits (size, cost, copies, leaders)
//! - `CompanionConfig`: Storage slot, catalog source, and the rules
//!
//! Every field has a default, so an empty TOML file is a valid config.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cards::{Faction, Rarity};
use crate::error::Result;

/// Deck-construction limits.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckRules {
    /// Hard cap on cards in a deck; adds beyond it are rejected.
    pub deck_size: usize,

    /// Cost ceiling. Exceeding it blocks saving.
    pub cost_limit: u32,

    /// Advisory minimum number of units. Never blocks saving.
    pub min_units: usize,

    /// Leaders a saveable deck must contain.
    pub leaders_required: usize,

    pub bronze_copies: usize,

    pub gold_copies: usize,
}

impl Default for DeckRules {
    fn default() -> Self {
        Self {
            deck_size: 26,
            cost_limit: 65,
            min_units: 13,
            leaders_required: 1,
            bronze_copies: 2,
            gold_copies: 1,
        }
    }
}

impl DeckRules {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies allowed per deck for a rarity tier.
    #[must_use]
    pub fn copy_limit(&self, rarity: Rarity) -> usize {
        match rarity {
            Rarity::Gold => self.gold_copies,
            Rarity::Bronze => self.bronze_copies,
        }
    }

    #[must_use]
    pub fn with_deck_size(mut self, size: usize) -> Self {
        self.deck_size = size;
        self
    }

    #[must_use]
    pub fn with_cost_limit(mut self, limit: u32) -> Self {
        self.cost_limit = limit;
        self
    }

    #[must_use]
    pub fn with_min_units(mut self, min: usize) -> Self {
        self.min_units = min;
        self
    }

    #[must_use]
    pub fn with_copy_limits(mut self, bronze: usize, gold: usize) -> Self {
        self.bronze_copies = bronze;
        self.gold_copies = gold;
        self
    }
}

/// Top-level configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanionConfig {
    /// Storage slot holding the serialized deck list.
    pub storage_key: String,

    /// Catalog file. `None` uses the bundled catalog.
    pub catalog_path: Option<PathBuf>,

    /// Faction a fresh builder starts with. Must be a non-neutral faction
    /// present in the catalog.
    pub default_faction: Faction,

    pub rules: DeckRules,
}

impl Default for CompanionConfig {
    fn default() -> Self {
        Self {
            storage_key: "custom_decks".to_string(),
            catalog_path: None,
            default_faction: Faction::Monster,
            rules: DeckRules::default(),
        }
    }
}

impl CompanionConfig {
    /// Parse a config from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    #[must_use]
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    #[must_use]
    pub fn with_default_faction(mut self, faction: Faction) -> Self {
        self.default_faction = faction;
        self
    }

    #[must_use]
    pub fn with_rules(mut self, rules: DeckRules) -> Self {
        self.rules = rules;
        self
    }
}
