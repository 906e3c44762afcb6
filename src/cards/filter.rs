//! Catalog search for the deck builder.

use std::cmp::Ordering;

use super::catalog::Catalog;
use super::definition::{CardId, CardRecord, Faction};

/// Display ordering used by every card list: cost descending, then name.
#[must_use]
pub fn display_order(a: &CardRecord, b: &CardRecord) -> Ordering {
    b.cost
        .cmp(&a.cost)
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        .then_with(|| a.name.cmp(&b.name))
}

/// Builder search criteria.
///
/// A card matches when it is playable in `faction`, its name, tags, or
/// ability contains `query` (case-insensitive), and, with `only_in_deck`
/// set, the deck holds at least one copy.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CardFilter {
    pub faction: Faction,
    pub query: String,
    pub only_in_deck: bool,
}

impl CardFilter {
    #[must_use]
    pub fn new(faction: Faction) -> Self {
        Self {
            faction,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    #[must_use]
    pub fn only_in_deck(mut self, only: bool) -> Self {
        self.only_in_deck = only;
        self
    }

    /// Check a single card. `in_deck` reports whether the deck holds a copy.
    #[must_use]
    pub fn matches<F>(&self, card: &CardRecord, in_deck: F) -> bool
    where
        F: Fn(&CardId) -> bool,
    {
        if !self.faction.accepts(card.faction) {
            return false;
        }
        if self.only_in_deck && !in_deck(&card.id) {
            return false;
        }
        let query = self.query.to_lowercase();
        query.is_empty()
            || card.name.to_lowercase().contains(&query)
            || card.tags.to_lowercase().contains(&query)
            || card.ability.to_lowercase().contains(&query)
    }

    /// Matching catalog cards in display order.
    pub fn apply<'a, F>(&self, catalog: &'a Catalog, in_deck: F) -> Vec<&'a CardRecord>
    where
        F: Fn(&CardId) -> bool,
    {
        let mut cards: Vec<_> = catalog.iter().filter(|c| self.matches(c, &in_deck)).collect();
        cards.sort_by(|a, b| display_order(a, b));
        cards
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::from_records(vec![
            CardRecord::new("mo1", "Ghoul", Faction::Monster)
                .with_cost(4)
                .with_tags("Necrophage"),
            CardRecord::new("mo2", "Nekker", Faction::Monster)
                .with_cost(3)
                .with_ability("Thrive."),
            CardRecord::new("mo3", "Foglet", Faction::Monster).with_cost(4),
            CardRecord::new("n1", "Ballista", Faction::Neutral).with_cost(5),
            CardRecord::new("sk1", "Raider", Faction::Skellige).with_cost(9),
        ])
        .unwrap()
    }

    fn names(cards: &[&CardRecord]) -> Vec<String> {
        cards.iter().map(|c| c.name.clone()).collect()
    }

    #[test]
    fn test_faction_and_order() {
        let catalog = catalog();
        let found = CardFilter::new(Faction::Monster).apply(&catalog, |_| false);
        // Cost desc, then name asc; Skellige excluded, neutral included.
        assert_eq!(names(&found), vec!["Ballista", "Foglet", "Ghoul", "Nekker"]);
    }

    #[test]
    fn test_query_matches_tags_and_ability() {
        let catalog = catalog();
        let by_tag = CardFilter::new(Faction::Monster).with_query("necro").apply(&catalog, |_| false);
        assert_eq!(names(&by_tag), vec!["Ghoul"]);

        let by_ability = CardFilter::new(Faction::Monster).with_query("THRIVE").apply(&catalog, |_| false);
        assert_eq!(names(&by_ability), vec!["Nekker"]);
    }

    #[test]
    fn test_only_in_deck() {
        let catalog = catalog();
        let held = CardId::new("mo2");
        let found = CardFilter::new(Faction::Monster)
            .only_in_deck(true)
            .apply(&catalog, |id| *id == held);
        assert_eq!(names(&found), vec!["Nekker"]);
    }
}
