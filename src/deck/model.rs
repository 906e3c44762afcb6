//! Saved decks.
//!
//! A `Deck` is what the library persists: an id, a name, a faction, and the
//! ordered multiset of card ids. The JSON shape (`cardIds`, `createdAt`)
//! matches decks written by earlier versions of the app.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{CardId, Faction};

/// Identifier assigned to a deck on first save.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeckId(pub String);

impl DeckId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DeckId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for DeckId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Deck({})", self.0)
    }
}

/// A persisted deck.
///
/// `card_ids` keeps insertion order and may repeat ids (one entry per copy).
/// Cloning is O(1): the sequence is a persistent vector.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub id: DeckId,
    pub name: String,
    pub faction: Faction,
    pub card_ids: Vector<CardId>,
    /// Milliseconds since the Unix epoch.
    pub created_at: i64,
}

impl Deck {
    #[must_use]
    pub fn new(id: DeckId, name: impl Into<String>, faction: Faction, created_at: i64) -> Self {
        Self {
            id,
            name: name.into(),
            faction,
            card_ids: Vector::new(),
            created_at,
        }
    }

    /// Append cards (builder pattern). No rule checks.
    #[must_use]
    pub fn with_cards<I, C>(mut self, cards: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<CardId>,
    {
        self.card_ids.extend(cards.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.card_ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.card_ids.is_empty()
    }

    /// Copies of `card` in this deck.
    #[must_use]
    pub fn count_of(&self, card: &CardId) -> usize {
        self.card_ids.iter().filter(|id| *id == card).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_of() {
        let deck = Deck::new(DeckId::new("1"), "Test", Faction::Monster, 0)
            .with_cards(["a", "b", "a"]);

        assert_eq!(deck.len(), 3);
        assert_eq!(deck.count_of(&CardId::new("a")), 2);
        assert_eq!(deck.count_of(&CardId::new("z")), 0);
    }

    #[test]
    fn test_storage_shape() {
        let deck = Deck::new(DeckId::new("1700000000000"), "Wild Hunt", Faction::Monster, 1_700_000_000_000)
            .with_cards(["mo-l1", "mo-b1"]);

        let value = serde_json::to_value(&deck).unwrap();
        assert_eq!(value["id"], "1700000000000");
        assert_eq!(value["faction"], "monster");
        assert_eq!(value["cardIds"][1], "mo-b1");
        assert_eq!(value["createdAt"], 1_700_000_000_000i64);

        let back: Deck = serde_json::from_value(value).unwrap();
        assert_eq!(back, deck);
    }
}
