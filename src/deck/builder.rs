//! The deck under edit.
//!
//! `DeckBuilder` holds a draft deck plus the optional shared-pool link.
//! Cards are appended at the tail; removal takes the most recent copy of an
//! id, so add-then-remove restores the previous sequence exactly.

use im::Vector;
use tracing::debug;

use super::model::{Deck, DeckId};
use super::pool::SharedPoolLink;
use super::rules::{AddRejection, BuildContext, CopyAllowance};
use super::stats::{save_blockers, DeckStats, SaveBlocker};
use crate::cards::{CardId, CardRecord, Catalog, Faction};
use crate::core::DeckRules;

/// Display state for one catalog card in the builder list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CardSlot {
    pub allowance: CopyAllowance,
    /// False when the deck is full or the card is at its copy limit.
    pub addable: bool,
}

/// A draft deck being edited.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeckBuilder {
    /// Set when editing a saved deck.
    id: Option<DeckId>,
    name: String,
    faction: Faction,
    cards: Vector<CardId>,
    created_at: Option<i64>,
    link: Option<SharedPoolLink>,
}

impl DeckBuilder {
    /// Start an empty draft.
    #[must_use]
    pub fn new(faction: Faction) -> Self {
        Self {
            faction,
            ..Self::default()
        }
    }

    /// Load a saved deck for editing. Any link is dropped.
    #[must_use]
    pub fn edit(deck: &Deck) -> Self {
        Self {
            id: Some(deck.id.clone()),
            name: deck.name.clone(),
            faction: deck.faction,
            cards: deck.card_ids.clone(),
            created_at: Some(deck.created_at),
            link: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> Option<&DeckId> {
        self.id.as_ref()
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn faction(&self) -> Faction {
        self.faction
    }

    #[must_use]
    pub fn cards(&self) -> &Vector<CardId> {
        &self.cards
    }

    #[must_use]
    pub fn created_at(&self) -> Option<i64> {
        self.created_at
    }

    #[must_use]
    pub fn link(&self) -> Option<&SharedPoolLink> {
        self.link.as_ref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Switch faction. Clears the card list, since faction cards from the
    /// old faction would no longer fit.
    ///
    /// `Neutral` is not a deck faction and is refused. Returns false when
    /// the faction is refused.
    pub fn set_faction(&mut self, faction: Faction, decks: &Vector<Deck>) -> bool {
        if faction.is_neutral() {
            debug!(%faction, "deck faction refused");
            return false;
        }
        if faction == self.faction {
            return true;
        }
        self.faction = faction;
        self.cards = Vector::new();
        if self.peer(decks).is_none() {
            self.link = None;
        }
        true
    }

    pub fn link_to(&mut self, peer: DeckId) {
        self.link = Some(SharedPoolLink::new(peer));
    }

    pub fn unlink(&mut self) {
        self.link = None;
    }

    /// Resolve the linked peer against the current library snapshot.
    #[must_use]
    pub fn peer<'a>(&self, decks: &'a Vector<Deck>) -> Option<&'a Deck> {
        self.link
            .as_ref()
            .and_then(|link| link.resolve(decks, self.id.as_ref(), self.faction))
    }

    /// Decision inputs for the current snapshot.
    #[must_use]
    pub fn context<'a>(
        &self,
        catalog: &'a Catalog,
        rules: &'a DeckRules,
        decks: &Vector<Deck>,
    ) -> BuildContext<'a> {
        BuildContext::new(catalog, rules, self.peer(decks))
    }

    /// Copies of `card` in the draft.
    #[must_use]
    pub fn count_of(&self, card: &CardId) -> usize {
        self.cards.iter().filter(|id| *id == card).count()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Would `add` accept this card right now?
    pub fn check_add(&self, card: &CardId, ctx: &BuildContext<'_>) -> Result<(), AddRejection> {
        ctx.check_add(card, self.faction, &self.cards)
    }

    /// Append a copy of `card`. On rejection nothing changes.
    pub fn add(&mut self, card: &CardId, ctx: &BuildContext<'_>) -> Result<(), AddRejection> {
        if let Err(rejection) = self.check_add(card, ctx) {
            debug!(%card, %rejection, "add rejected");
            return Err(rejection);
        }
        self.cards.push_back(card.clone());
        Ok(())
    }

    /// Remove the most recently added copy of `card`.
    ///
    /// Returns false if the draft holds no copy.
    pub fn remove(&mut self, card: &CardId) -> bool {
        let last = self
            .cards
            .iter()
            .enumerate()
            .filter(|(_, id)| *id == card)
            .map(|(pos, _)| pos)
            .last();
        match last {
            Some(pos) => {
                self.cards.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Builder-list display state for a catalog card.
    #[must_use]
    pub fn slot(&self, card: &CardRecord, ctx: &BuildContext<'_>) -> CardSlot {
        let allowance = ctx.allowance(card, self.count_of(&card.id));
        CardSlot {
            allowance,
            addable: !allowance.at_limit() && self.len() < ctx.rules.deck_size,
        }
    }

    #[must_use]
    pub fn stats(&self, catalog: &Catalog) -> DeckStats {
        DeckStats::compute(&self.cards, catalog)
    }

    /// Reasons the draft can't be saved; empty when it can.
    #[must_use]
    pub fn save_blockers(&self, catalog: &Catalog, rules: &DeckRules) -> Vec<SaveBlocker> {
        save_blockers(&self.name, &self.stats(catalog), rules)
    }

    #[must_use]
    pub fn is_saveable(&self, catalog: &Catalog, rules: &DeckRules) -> bool {
        self.save_blockers(catalog, rules).is_empty()
    }

    /// Materialize the draft as a deck with the given id and creation time.
    ///
    /// An existing id and timestamp win over the supplied ones.
    #[must_use]
    pub fn to_deck(&self, id: DeckId, created_at: i64) -> Deck {
        Deck {
            id: self.id.clone().unwrap_or(id),
            name: self.name.clone(),
            faction: self.faction,
            card_ids: self.cards.clone(),
            created_at: self.created_at.unwrap_or(created_at),
        }
    }
}
