//! Card catalog for record lookup.
//!
//! The `Catalog` is loaded once at startup and never mutated. It keeps the
//! records in file order and indexes them by `CardId` for O(1) lookup.

use std::path::Path;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::{debug, info};

use super::definition::{CardId, CardRecord, Faction};
use crate::error::{CompanionError, Result};

/// The catalog bundled with the crate.
const BUNDLED_CATALOG: &str = include_str!("../../data/cards.json");

/// Faction list derived from the catalog.
pub type FactionList = SmallVec<[Faction; 8]>;

/// Read-only registry of card records.
///
/// ## Example
///
/// ```
/// use gwent_companion::cards::{Catalog, CardId, CardRecord, Faction};
///
/// let catalog = Catalog::from_records(vec![
///     CardRecord::new("c1", "Ghoul", Faction::Monster).with_cost(4),
///     CardRecord::new("n1", "Ballista", Faction::Neutral),
/// ]).unwrap();
///
/// assert_eq!(catalog.get(&CardId::new("c1")).unwrap().name, "Ghoul");
/// assert!(catalog.get(&CardId::new("missing")).is_none());
/// assert_eq!(catalog.factions(), &[Faction::Monster]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    cards: Vec<CardRecord>,
    index: FxHashMap<CardId, usize>,
    factions: FactionList,
}

impl Catalog {
    /// Build a catalog from records.
    ///
    /// Fails if two records share an identifier.
    pub fn from_records(cards: Vec<CardRecord>) -> Result<Self> {
        let mut index = FxHashMap::default();
        let mut factions = FactionList::new();

        for (pos, card) in cards.iter().enumerate() {
            if index.insert(card.id.clone(), pos).is_some() {
                return Err(CompanionError::DuplicateCard(card.id.clone()));
            }
            if !card.faction.is_neutral() && !factions.contains(&card.faction) {
                factions.push(card.faction);
            }
        }

        debug!(cards = cards.len(), factions = factions.len(), "catalog indexed");
        Ok(Self { cards, index, factions })
    }

    /// Parse a catalog from its JSON form (an array of card records).
    pub fn from_json(json: &str) -> Result<Self> {
        let cards: Vec<CardRecord> = serde_json::from_str(json)?;
        Self::from_records(cards)
    }

    /// Load a catalog file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&json)?;
        info!(path = %path.display(), cards = catalog.len(), "loaded card catalog");
        Ok(catalog)
    }

    /// The catalog shipped with the crate.
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_CATALOG)
    }

    /// Look up a card. `None` means a dangling reference; callers skip it.
    #[must_use]
    pub fn get(&self, id: &CardId) -> Option<&CardRecord> {
        self.index.get(id).map(|&pos| &self.cards[pos])
    }

    #[must_use]
    pub fn contains(&self, id: &CardId) -> bool {
        self.index.contains_key(id)
    }

    /// Distinct non-neutral factions, in order of first appearance.
    #[must_use]
    pub fn factions(&self) -> &[Faction] {
        &self.factions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all records in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &CardRecord> {
        self.cards.iter()
    }

    /// Cards playable in a deck of `faction` (its own plus neutral).
    pub fn playable_in(&self, faction: Faction) -> impl Iterator<Item = &CardRecord> {
        self.cards.iter().filter(move |c| faction.accepts(c.faction))
    }

    /// Resolve a sequence of identifiers, skipping ones the catalog lacks.
    pub fn resolve<'a, I>(&'a self, ids: I) -> impl Iterator<Item = &'a CardRecord>
    where
        I: IntoIterator<Item = &'a CardId>,
        I::IntoIter: 'a,
    {
        ids.into_iter().filter_map(move |id| self.get(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::definition::Category;

    fn sample() -> Catalog {
        Catalog::from_records(vec![
            CardRecord::new("sk1", "Raider", Faction::Skellige),
            CardRecord::new("n1", "Ballista", Faction::Neutral),
            CardRecord::new("mo1", "Ghoul", Faction::Monster),
            CardRecord::new("sk2", "Axeman", Faction::Skellige),
        ])
        .unwrap()
    }

    #[test]
    fn test_lookup() {
        let catalog = sample();
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.get(&CardId::new("mo1")).unwrap().name, "Ghoul");
        assert!(catalog.get(&CardId::new("zz")).is_none());
        assert!(catalog.contains(&CardId::new("n1")));
    }

    #[test]
    fn test_factions_first_appearance_order() {
        let catalog = sample();
        assert_eq!(catalog.factions(), &[Faction::Skellige, Faction::Monster]);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let result = Catalog::from_records(vec![
            CardRecord::new("x", "A", Faction::Monster),
            CardRecord::new("x", "B", Faction::Monster),
        ]);
        assert!(matches!(result, Err(CompanionError::DuplicateCard(id)) if id == CardId::new("x")));
    }

    #[test]
    fn test_playable_in() {
        let catalog = sample();
        let names: Vec<_> = catalog.playable_in(Faction::Monster).map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Ballista", "Ghoul"]);
    }

    #[test]
    fn test_resolve_skips_dangling() {
        let catalog = sample();
        let ids = [CardId::new("mo1"), CardId::new("gone"), CardId::new("n1")];
        assert_eq!(catalog.resolve(&ids).count(), 2);
    }

    #[test]
    fn test_bundled_catalog() {
        let catalog = Catalog::bundled().unwrap();
        assert!(!catalog.is_empty());
        assert!(!catalog.factions().contains(&Faction::Neutral));
        for faction in catalog.factions() {
            let leaders = catalog
                .playable_in(*faction)
                .filter(|c| c.category == Category::Leader)
                .count();
            assert!(leaders >= 1, "{faction} has no leader");
        }
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cards.json");
        std::fs::write(&path, r#"[{"id":"a","name":"A","strength":1,"cost":2,"type":"bronze","category":"Unit","faction":"nilfgaard"}]"#).unwrap();

        let catalog = Catalog::load(&path).unwrap();
        assert_eq!(catalog.get(&CardId::new("a")).unwrap().cost, 2);
        assert_eq!(catalog.factions(), &[Faction::Nilfgaard]);
    }
}
