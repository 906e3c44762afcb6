//! Tracker session: which cards of a saved deck have been drawn.
//!
//! State is one flag per position in the deck's card sequence, so two
//! copies of the same card are tracked separately. Sessions are never
//! persisted.

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::cards::{display_order, CardRecord, Catalog};
use crate::deck::Deck;

/// A card at a position in the tracked deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrackedCard<'a> {
    pub index: usize,
    pub card: &'a CardRecord,
}

/// Drawn-state overlay on a saved deck.
///
/// ## Example
///
/// ```
/// use gwent_companion::cards::{Catalog, CardRecord, Category, Faction};
/// use gwent_companion::deck::{Deck, DeckId};
/// use gwent_companion::tracker::TrackerSession;
///
/// let catalog = Catalog::from_records(vec![
///     CardRecord::new("l", "Eredin", Faction::Monster).with_category(Category::Leader),
///     CardRecord::new("u", "Ghoul", Faction::Monster),
/// ]).unwrap();
/// let deck = Deck::new(DeckId::new("1"), "Hunt", Faction::Monster, 0).with_cards(["u", "l", "u"]);
///
/// let mut session = TrackerSession::start(deck, &catalog);
/// assert!(session.is_drawn(1));
/// assert_eq!(session.remaining(), 2);
///
/// session.toggle(0);
/// session.toggle(2);
/// assert!(session.is_complete());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackerSession {
    deck: Deck,
    drawn: FxHashSet<usize>,
}

impl TrackerSession {
    /// Start tracking. Leaders begin drawn.
    #[must_use]
    pub fn start(deck: Deck, catalog: &Catalog) -> Self {
        let drawn = initial_drawn(&deck, catalog);
        debug!(deck = %deck.id, cards = deck.len(), leaders = drawn.len(), "tracking started");
        Self { deck, drawn }
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Flip the drawn flag at `index`. Returns false for an index outside
    /// the deck, which changes nothing.
    pub fn toggle(&mut self, index: usize) -> bool {
        if index >= self.deck.len() {
            return false;
        }
        if !self.drawn.remove(&index) {
            self.drawn.insert(index);
        }
        true
    }

    #[must_use]
    pub fn is_drawn(&self, index: usize) -> bool {
        self.drawn.contains(&index)
    }

    #[must_use]
    pub fn drawn_count(&self) -> usize {
        self.drawn.len()
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.deck.len().saturating_sub(self.drawn.len())
    }

    /// Every position drawn: the deck is empty.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.drawn.len() == self.deck.len()
    }

    /// Back to the starting state (only leaders drawn).
    pub fn reset(&mut self, catalog: &Catalog) {
        self.drawn = initial_drawn(&self.deck, catalog);
        debug!(deck = %self.deck.id, "tracker reset");
    }

    /// Card at a position, if it resolves.
    #[must_use]
    pub fn card_at<'a>(&self, index: usize, catalog: &'a Catalog) -> Option<&'a CardRecord> {
        self.deck.card_ids.get(index).and_then(|id| catalog.get(id))
    }

    /// Undrawn cards in display order. Dangling ids are skipped.
    #[must_use]
    pub fn remaining_cards<'a>(&self, catalog: &'a Catalog) -> Vec<TrackedCard<'a>> {
        self.cards_where(catalog, false)
    }

    /// Drawn cards in display order. Dangling ids are skipped.
    #[must_use]
    pub fn drawn_cards<'a>(&self, catalog: &'a Catalog) -> Vec<TrackedCard<'a>> {
        self.cards_where(catalog, true)
    }

    fn cards_where<'a>(&self, catalog: &'a Catalog, drawn: bool) -> Vec<TrackedCard<'a>> {
        let mut cards: Vec<_> = self
            .deck
            .card_ids
            .iter()
            .enumerate()
            .filter(|(index, _)| self.is_drawn(*index) == drawn)
            .filter_map(|(index, id)| catalog.get(id).map(|card| TrackedCard { index, card }))
            .collect();
        cards.sort_by(|a, b| display_order(a.card, b.card).then(a.index.cmp(&b.index)));
        cards
    }
}

fn initial_drawn(deck: &Deck, catalog: &Catalog) -> FxHashSet<usize> {
    deck.card_ids
        .iter()
        .enumerate()
        .filter(|(_, id)| catalog.get(id).is_some_and(CardRecord::is_leader))
        .map(|(index, _)| index)
        .collect()
}
