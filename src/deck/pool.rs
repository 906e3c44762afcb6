//! Shared-pool accounting for neutral cards.
//!
//! Two decks of different factions can be paired so their neutral cards
//! draw from one pool: a bronze neutral with two copies split across the
//! pair is at its limit in both decks.
//!
//! The link stores only the peer's id. It is resolved against the current
//! library snapshot at every decision point and never cached.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::model::{Deck, DeckId};
use crate::cards::{CardId, Catalog, Faction};

/// Pairing between the deck under edit and one saved deck.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SharedPoolLink {
    pub peer: DeckId,
}

impl SharedPoolLink {
    #[must_use]
    pub fn new(peer: DeckId) -> Self {
        Self { peer }
    }

    /// Find the peer in `decks`.
    ///
    /// Returns `None` when the peer is gone, is the draft itself, or now
    /// shares the draft's faction. Such a link counts as inactive.
    #[must_use]
    pub fn resolve<'a>(
        &self,
        decks: &'a Vector<Deck>,
        draft_id: Option<&DeckId>,
        draft_faction: Faction,
    ) -> Option<&'a Deck> {
        if draft_id == Some(&self.peer) {
            return None;
        }
        decks
            .iter()
            .find(|d| d.id == self.peer)
            .filter(|d| d.faction != draft_faction)
    }
}

/// Copies of each neutral card used by a peer deck.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NeutralUsage {
    counts: FxHashMap<CardId, usize>,
}

impl NeutralUsage {
    /// Count the neutral cards in `peer`. Non-neutral and dangling entries
    /// are ignored.
    #[must_use]
    pub fn of(peer: &Deck, catalog: &Catalog) -> Self {
        let mut counts = FxHashMap::default();
        for id in peer.card_ids.iter() {
            if catalog.get(id).is_some_and(|c| c.is_neutral()) {
                *counts.entry(id.clone()).or_insert(0) += 1;
            }
        }
        Self { counts }
    }

    #[must_use]
    pub fn count(&self, card: &CardId) -> usize {
        self.counts.get(card).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Candidate peers for a draft: saved decks other than the draft itself
/// with a different faction.
pub fn link_candidates<'a>(
    decks: &'a Vector<Deck>,
    draft_id: Option<&'a DeckId>,
    draft_faction: Faction,
) -> impl Iterator<Item = &'a Deck> {
    decks
        .iter()
        .filter(move |d| Some(&d.id) != draft_id && d.faction != draft_faction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardRecord;

    fn catalog() -> Catalog {
        Catalog::from_records(vec![
            CardRecord::new("n1", "Ballista", Faction::Neutral),
            CardRecord::new("sk1", "Raider", Faction::Skellige),
        ])
        .unwrap()
    }

    fn decks() -> Vector<Deck> {
        let mut decks = Vector::new();
        decks.push_back(
            Deck::new(DeckId::new("a"), "A", Faction::Skellige, 0).with_cards(["n1", "sk1", "n1", "gone"]),
        );
        decks.push_back(Deck::new(DeckId::new("b"), "B", Faction::Monster, 0));
        decks
    }

    #[test]
    fn test_neutral_usage_ignores_faction_cards() {
        let decks = decks();
        let usage = NeutralUsage::of(&decks[0], &catalog());
        assert_eq!(usage.count(&CardId::new("n1")), 2);
        assert_eq!(usage.count(&CardId::new("sk1")), 0);
        assert_eq!(usage.count(&CardId::new("gone")), 0);
    }

    #[test]
    fn test_resolve() {
        let decks = decks();
        let link = SharedPoolLink::new(DeckId::new("a"));

        assert!(link.resolve(&decks, None, Faction::Monster).is_some());
        // Same faction: inactive.
        assert!(link.resolve(&decks, None, Faction::Skellige).is_none());
        // Linked to itself: inactive.
        assert!(link.resolve(&decks, Some(&DeckId::new("a")), Faction::Monster).is_none());
        // Peer deleted: inactive.
        assert!(SharedPoolLink::new(DeckId::new("zz")).resolve(&decks, None, Faction::Monster).is_none());
    }

    #[test]
    fn test_link_candidates() {
        let decks = decks();
        let b = DeckId::new("b");
        let found: Vec<_> = link_candidates(&decks, Some(&b), Faction::Monster).map(|d| d.id.clone()).collect();
        assert_eq!(found, vec![DeckId::new("a")]);
    }
}
