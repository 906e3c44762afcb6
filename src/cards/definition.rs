//! Card records - static catalog data.
//!
//! `CardRecord` holds the immutable properties of a card as shipped in the
//! catalog. Decks never copy records; they hold `CardId`s and resolve them
//! through the `Catalog` on demand.

use serde::{Deserialize, Serialize};

/// Catalog identifier for a card.
///
/// Stored decks reference cards by this string, so it must stay stable
/// across catalog versions.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub String);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CardId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Rarity tier. Controls how many copies a deck may hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Gold,
    Bronze,
}

impl Rarity {
    #[must_use]
    pub fn is_gold(self) -> bool {
        matches!(self, Rarity::Gold)
    }
}

/// Card category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Unit,
    Spell,
    /// Exactly one per saveable deck.
    Leader,
}

/// Card faction.
///
/// `Neutral` is the wildcard: neutral cards fit any deck and are the only
/// cards subject to shared-pool accounting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Faction {
    #[default]
    Monster,
    Nilfgaard,
    NorthernRealms,
    #[serde(rename = "scoiatel")]
    Scoiatael,
    Skellige,
    Neutral,
}

impl Faction {
    /// Check if this is the neutral wildcard.
    #[must_use]
    pub fn is_neutral(self) -> bool {
        matches!(self, Faction::Neutral)
    }

    /// Can a card of faction `card` go into a deck of this faction?
    #[must_use]
    pub fn accepts(self, card: Faction) -> bool {
        card == self || card.is_neutral()
    }

    /// Storage name, matching the serialized form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Faction::Monster => "monster",
            Faction::Nilfgaard => "nilfgaard",
            Faction::NorthernRealms => "northern_realms",
            Faction::Scoiatael => "scoiatel",
            Faction::Skellige => "skellige",
            Faction::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for Faction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static card record.
///
/// Field names follow the catalog file; the rarity tier is stored under
/// `type`.
///
/// ## Example
///
/// ```
/// use gwent_companion::cards::{CardRecord, Category, Faction, Rarity};
///
/// let ghoul = CardRecord::new("ghoul", "Ghoul", Faction::Monster)
///     .with_cost(4)
///     .with_strength(3);
///
/// assert_eq!(ghoul.rarity, Rarity::Bronze);
/// assert_eq!(ghoul.category, Category::Unit);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    pub id: CardId,
    pub name: String,
    pub strength: u32,
    pub cost: u32,
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub ability: String,
    #[serde(rename = "type")]
    pub rarity: Rarity,
    pub category: Category,
    pub faction: Faction,
}

impl CardRecord {
    /// Create a bronze unit with zero cost and strength.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, faction: Faction) -> Self {
        Self {
            id: CardId::new(id),
            name: name.into(),
            strength: 0,
            cost: 0,
            tags: String::new(),
            ability: String::new(),
            rarity: Rarity::Bronze,
            category: Category::Unit,
            faction,
        }
    }

    #[must_use]
    pub fn with_cost(mut self, cost: u32) -> Self {
        self.cost = cost;
        self
    }

    #[must_use]
    pub fn with_strength(mut self, strength: u32) -> Self {
        self.strength = strength;
        self
    }

    #[must_use]
    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    #[must_use]
    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = tags.into();
        self
    }

    #[must_use]
    pub fn with_ability(mut self, ability: impl Into<String>) -> Self {
        self.ability = ability.into();
        self
    }

    #[must_use]
    pub fn is_leader(&self) -> bool {
        self.category == Category::Leader
    }

    #[must_use]
    pub fn is_unit(&self) -> bool {
        self.category == Category::Unit
    }

    #[must_use]
    pub fn is_neutral(&self) -> bool {
        self.faction.is_neutral()
    }
}
