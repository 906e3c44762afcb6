//! Card-add legality: faction fit, deck size, and copy limits.
//!
//! ## Copy limits
//!
//! Gold cards allow one copy, bronze two (see `DeckRules`). For a neutral
//! card with an active shared-pool link the peer's copies count against the
//! same limit; faction cards only count local copies.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::model::Deck;
use super::pool::NeutralUsage;
use crate::cards::{CardId, CardRecord, Catalog, Faction};
use crate::core::DeckRules;

/// Why an add was refused. The deck is left untouched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AddRejection {
    /// The catalog has no such card.
    UnknownCard(CardId),
    /// Card faction is neither the deck's nor neutral.
    WrongFaction { card: Faction, deck: Faction },
    /// Deck already holds the maximum number of cards.
    DeckFull { size: usize },
    /// Local (plus shared-pool) copies already reach the limit.
    CopyLimit { local: usize, peer: usize, limit: usize },
}

impl std::fmt::Display for AddRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AddRejection::UnknownCard(id) => write!(f, "{id} is not in the catalog"),
            AddRejection::WrongFaction { card, deck } => {
                write!(f, "{card} card can't go in a {deck} deck")
            }
            AddRejection::DeckFull { size } => write!(f, "deck is full ({size} cards)"),
            AddRejection::CopyLimit { local, peer, limit } => {
                write!(f, "copy limit reached ({local} + {peer} shared of {limit})")
            }
        }
    }
}

/// Copy accounting for one card against one deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyAllowance {
    /// Copies in the deck under edit.
    pub local: usize,
    /// Copies consumed by the linked peer. Always 0 for faction cards.
    pub peer: usize,
    pub limit: usize,
}

impl CopyAllowance {
    #[must_use]
    pub fn at_limit(&self) -> bool {
        self.local + self.peer >= self.limit
    }
}

/// Read-only inputs for an add decision.
///
/// Build one per decision point. Peer usage is counted when the context is
/// built and goes stale after the library changes.
#[derive(Clone, Debug)]
pub struct BuildContext<'a> {
    pub catalog: &'a Catalog,
    pub rules: &'a DeckRules,
    peer_usage: Option<NeutralUsage>,
}

impl<'a> BuildContext<'a> {
    /// Create a context, optionally with the resolved linked peer deck.
    #[must_use]
    pub fn new(catalog: &'a Catalog, rules: &'a DeckRules, peer: Option<&Deck>) -> Self {
        Self {
            catalog,
            rules,
            peer_usage: peer.map(|p| NeutralUsage::of(p, catalog)),
        }
    }

    /// Is a shared-pool link active?
    #[must_use]
    pub fn has_peer(&self) -> bool {
        self.peer_usage.is_some()
    }

    /// Copy accounting for `card` given `local` copies in the draft.
    #[must_use]
    pub fn allowance(&self, card: &CardRecord, local: usize) -> CopyAllowance {
        let peer = match &self.peer_usage {
            Some(usage) if card.is_neutral() => usage.count(&card.id),
            _ => 0,
        };
        CopyAllowance {
            local,
            peer,
            limit: self.rules.copy_limit(card.rarity),
        }
    }

    /// Decide whether `card_id` may be appended to a deck of `faction` that
    /// currently holds `cards`.
    pub fn check_add(
        &self,
        card_id: &CardId,
        faction: Faction,
        cards: &Vector<CardId>,
    ) -> Result<(), AddRejection> {
        let card = self
            .catalog
            .get(card_id)
            .ok_or_else(|| AddRejection::UnknownCard(card_id.clone()))?;

        if !faction.accepts(card.faction) {
            return Err(AddRejection::WrongFaction {
                card: card.faction,
                deck: faction,
            });
        }

        if cards.len() >= self.rules.deck_size {
            return Err(AddRejection::DeckFull {
                size: self.rules.deck_size,
            });
        }

        let local = cards.iter().filter(|id| *id == card_id).count();
        let allowance = self.allowance(card, local);
        if allowance.at_limit() {
            return Err(AddRejection::CopyLimit {
                local: allowance.local,
                peer: allowance.peer,
                limit: allowance.limit,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardRecord, Rarity};
    use crate::deck::model::DeckId;

    fn catalog() -> Catalog {
        Catalog::from_records(vec![
            CardRecord::new("c1", "Ghoul", Faction::Monster).with_cost(4),
            CardRecord::new("g1", "Imlerith", Faction::Monster).with_rarity(Rarity::Gold),
            CardRecord::new("n1", "Ballista", Faction::Neutral),
            CardRecord::new("sk1", "Raider", Faction::Skellige),
        ])
        .unwrap()
    }

    fn ids(raw: &[&str]) -> Vector<CardId> {
        raw.iter().map(|s| CardId::new(*s)).collect()
    }

    #[test]
    fn test_bronze_limit() {
        let catalog = catalog();
        let rules = DeckRules::default();
        let ctx = BuildContext::new(&catalog, &rules, None);
        let c1 = CardId::new("c1");

        assert!(ctx.check_add(&c1, Faction::Monster, &ids(&["c1"])).is_ok());
        assert_eq!(
            ctx.check_add(&c1, Faction::Monster, &ids(&["c1", "c1"])),
            Err(AddRejection::CopyLimit { local: 2, peer: 0, limit: 2 })
        );
    }

    #[test]
    fn test_gold_limit() {
        let catalog = catalog();
        let rules = DeckRules::default();
        let ctx = BuildContext::new(&catalog, &rules, None);

        assert!(ctx.check_add(&CardId::new("g1"), Faction::Monster, &ids(&[])).is_ok());
        assert!(matches!(
            ctx.check_add(&CardId::new("g1"), Faction::Monster, &ids(&["g1"])),
            Err(AddRejection::CopyLimit { limit: 1, .. })
        ));
    }

    #[test]
    fn test_wrong_faction_and_unknown() {
        let catalog = catalog();
        let rules = DeckRules::default();
        let ctx = BuildContext::new(&catalog, &rules, None);

        assert_eq!(
            ctx.check_add(&CardId::new("sk1"), Faction::Monster, &ids(&[])),
            Err(AddRejection::WrongFaction { card: Faction::Skellige, deck: Faction::Monster })
        );
        assert_eq!(
            ctx.check_add(&CardId::new("nope"), Faction::Monster, &ids(&[])),
            Err(AddRejection::UnknownCard(CardId::new("nope")))
        );
    }

    #[test]
    fn test_deck_full() {
        let catalog = catalog();
        let rules = DeckRules::default().with_deck_size(3);
        let ctx = BuildContext::new(&catalog, &rules, None);

        assert_eq!(
            ctx.check_add(&CardId::new("n1"), Faction::Monster, &ids(&["c1", "c1", "g1"])),
            Err(AddRejection::DeckFull { size: 3 })
        );
    }

    #[test]
    fn test_shared_pool_counts_neutral_only() {
        let catalog = catalog();
        let rules = DeckRules::default();
        let peer = Deck::new(DeckId::new("p"), "Peer", Faction::Skellige, 0).with_cards(["n1", "sk1"]);
        let ctx = BuildContext::new(&catalog, &rules, Some(&peer));
        assert!(ctx.has_peer());

        let n1 = catalog.get(&CardId::new("n1")).unwrap();
        assert_eq!(ctx.allowance(n1, 1), CopyAllowance { local: 1, peer: 1, limit: 2 });
        assert_eq!(
            ctx.check_add(&n1.id, Faction::Monster, &ids(&["n1"])),
            Err(AddRejection::CopyLimit { local: 1, peer: 1, limit: 2 })
        );

        // Faction cards ignore the peer entirely.
        let c1 = catalog.get(&CardId::new("c1")).unwrap();
        assert_eq!(ctx.allowance(c1, 1).peer, 0);
    }
}
