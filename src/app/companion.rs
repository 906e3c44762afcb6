//! Companion controller: view state and user intents.
//!
//! Rendering lives elsewhere. The controller owns the catalog, the library,
//! the deck under edit, and the tracker session, and applies one intent at
//! a time on the caller's thread.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cards::{CardFilter, CardId, CardRecord, Catalog, Faction};
use crate::core::{Clock, CompanionConfig, DeckRules, SystemClock};
use crate::deck::{
    link_candidates, AddRejection, CardSlot, Deck, DeckBuilder, DeckId, DeckStats, SaveBlocker,
};
use crate::error::{CompanionError, Result};
use crate::store::{DeckLibrary, FileBackend, KeyValueBackend};
use crate::tracker::TrackerSession;

/// The three screens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Builder,
    Decks,
    Tracker,
}

/// A user action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    Navigate(View),
    NewDeck,
    EditDeck(DeckId),
    SetName(String),
    SetFaction(Faction),
    Link(DeckId),
    Unlink,
    SetQuery(String),
    ShowOnlyInDeck(bool),
    AddCard(CardId),
    RemoveCard(CardId),
    Save,
    DeleteDeck(DeckId),
    StartTracking(DeckId),
    ToggleDrawn(usize),
    ResetTracker,
}

/// What an intent did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// Nothing to do (unknown id, out-of-range index, no session).
    Ignored,
    Rejected(AddRejection),
    Blocked(Vec<SaveBlocker>),
    Saved(DeckId),
}

/// Application state behind the three views.
pub struct Companion<B> {
    config: CompanionConfig,
    catalog: Catalog,
    library: DeckLibrary<B>,
    clock: Box<dyn Clock>,
    view: View,
    builder: DeckBuilder,
    query: String,
    only_in_deck: bool,
    tracker: Option<TrackerSession>,
}

impl Companion<FileBackend> {
    /// Open a file-backed companion storing decks under `data_dir`.
    ///
    /// The catalog comes from `config.catalog_path`, or the bundled one.
    pub fn open(config: CompanionConfig, data_dir: impl AsRef<Path>) -> Result<Self> {
        let catalog = match &config.catalog_path {
            Some(path) => Catalog::load(path)?,
            None => Catalog::bundled()?,
        };
        let backend = FileBackend::new(data_dir.as_ref());
        Self::new(config, catalog, backend, Box::new(SystemClock))
    }
}

impl<B: KeyValueBackend> Companion<B> {
    /// Fails with `UnknownFaction` when `config.default_faction` is not one
    /// of the catalog's deck factions.
    pub fn new(
        config: CompanionConfig,
        catalog: Catalog,
        backend: B,
        clock: Box<dyn Clock>,
    ) -> Result<Self> {
        if !catalog.factions().contains(&config.default_faction) {
            return Err(CompanionError::UnknownFaction(config.default_faction));
        }
        let library = DeckLibrary::open(backend, config.storage_key.clone())?;
        info!(cards = catalog.len(), decks = library.len(), "companion ready");
        let builder = DeckBuilder::new(config.default_faction);
        Ok(Self {
            config,
            catalog,
            library,
            clock,
            view: View::Builder,
            builder,
            query: String::new(),
            only_in_deck: false,
            tracker: None,
        })
    }

    #[must_use]
    pub fn view(&self) -> View {
        self.view
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn rules(&self) -> &DeckRules {
        &self.config.rules
    }

    #[must_use]
    pub fn library(&self) -> &DeckLibrary<B> {
        &self.library
    }

    #[must_use]
    pub fn decks(&self) -> &im::Vector<Deck> {
        self.library.decks()
    }

    #[must_use]
    pub fn builder(&self) -> &DeckBuilder {
        &self.builder
    }

    #[must_use]
    pub fn tracker(&self) -> Option<&TrackerSession> {
        self.tracker.as_ref()
    }

    /// Apply one intent.
    pub fn dispatch(&mut self, intent: Intent) -> Result<Outcome> {
        debug!(?intent, view = ?self.view, "dispatch");
        let outcome = match intent {
            Intent::Navigate(view) => applied(self.navigate(view)),
            Intent::NewDeck => {
                self.new_deck();
                Outcome::Applied
            }
            Intent::EditDeck(id) => applied(self.edit_deck(&id)),
            Intent::SetName(name) => {
                self.builder.set_name(name);
                Outcome::Applied
            }
            Intent::SetFaction(faction) => applied(self.set_faction(faction)),
            Intent::Link(peer) => applied(self.link(peer)),
            Intent::Unlink => {
                self.builder.unlink();
                Outcome::Applied
            }
            Intent::SetQuery(query) => {
                self.query = query;
                Outcome::Applied
            }
            Intent::ShowOnlyInDeck(only) => {
                self.only_in_deck = only;
                Outcome::Applied
            }
            Intent::AddCard(card) => match self.add_card(&card) {
                Ok(()) => Outcome::Applied,
                Err(rejection) => Outcome::Rejected(rejection),
            },
            Intent::RemoveCard(card) => applied(self.remove_card(&card)),
            Intent::Save => self.save()?,
            Intent::DeleteDeck(id) => applied(self.delete_deck(&id)?),
            Intent::StartTracking(id) => applied(self.start_tracking(&id)),
            Intent::ToggleDrawn(index) => applied(self.toggle_drawn(index)),
            Intent::ResetTracker => applied(self.reset_tracker()),
        };
        Ok(outcome)
    }

    /// Switch views. Leaving the tracker discards its session; the tracker
    /// view can't be entered without one.
    pub fn navigate(&mut self, view: View) -> bool {
        if view == View::Tracker && self.tracker.is_none() {
            return false;
        }
        if self.view == View::Tracker && view != View::Tracker {
            self.tracker = None;
        }
        self.view = view;
        true
    }

    /// Fresh empty draft in the builder.
    pub fn new_deck(&mut self) {
        self.builder = DeckBuilder::new(self.config.default_faction);
        self.navigate(View::Builder);
    }

    /// Load a saved deck into the builder.
    pub fn edit_deck(&mut self, id: &DeckId) -> bool {
        let Some(deck) = self.library.get(id) else {
            return false;
        };
        self.builder = DeckBuilder::edit(deck);
        self.navigate(View::Builder);
        true
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.builder.set_name(name);
    }

    /// Switch the draft's faction. Only factions the catalog lists are
    /// accepted.
    pub fn set_faction(&mut self, faction: Faction) -> bool {
        if !self.catalog.factions().contains(&faction) {
            debug!(%faction, "faction not in catalog");
            return false;
        }
        self.builder.set_faction(faction, self.library.decks())
    }

    /// Link the draft to a saved deck of another faction.
    pub fn link(&mut self, peer: DeckId) -> bool {
        let candidate = self.link_candidates().any(|d| d.id == peer);
        if candidate {
            self.builder.link_to(peer);
        }
        candidate
    }

    pub fn unlink(&mut self) {
        self.builder.unlink();
    }

    /// Decks the draft may link to.
    pub fn link_candidates(&self) -> impl Iterator<Item = &Deck> {
        link_candidates(self.library.decks(), self.builder.id(), self.builder.faction())
    }

    /// The linked deck, if the link is currently active.
    #[must_use]
    pub fn peer(&self) -> Option<&Deck> {
        self.builder.peer(self.library.decks())
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn set_only_in_deck(&mut self, only: bool) {
        self.only_in_deck = only;
    }

    pub fn add_card(&mut self, card: &CardId) -> std::result::Result<(), AddRejection> {
        let ctx = self
            .builder
            .context(&self.catalog, &self.config.rules, self.library.decks());
        self.builder.add(card, &ctx)
    }

    pub fn remove_card(&mut self, card: &CardId) -> bool {
        self.builder.remove(card)
    }

    /// Catalog cards for the builder list, filtered and in display order,
    /// each with its copy accounting.
    #[must_use]
    pub fn builder_cards(&self) -> Vec<(&CardRecord, CardSlot)> {
        let ctx = self
            .builder
            .context(&self.catalog, &self.config.rules, self.library.decks());
        CardFilter::new(self.builder.faction())
            .with_query(self.query.as_str())
            .only_in_deck(self.only_in_deck)
            .apply(&self.catalog, |id| self.builder.count_of(id) > 0)
            .into_iter()
            .map(|card| (card, self.builder.slot(card, &ctx)))
            .collect()
    }

    #[must_use]
    pub fn stats(&self) -> DeckStats {
        self.builder.stats(&self.catalog)
    }

    #[must_use]
    pub fn save_blockers(&self) -> Vec<SaveBlocker> {
        self.builder.save_blockers(&self.catalog, &self.config.rules)
    }

    /// Save the draft if the gate allows it, then reset the builder and
    /// show the deck list.
    pub fn save(&mut self) -> Result<Outcome> {
        let blockers = self.save_blockers();
        if !blockers.is_empty() {
            debug!(?blockers, "save blocked");
            return Ok(Outcome::Blocked(blockers));
        }
        let id = self.library.save_draft(&self.builder, self.clock.as_ref())?;
        self.builder = DeckBuilder::new(self.config.default_faction);
        self.navigate(View::Decks);
        Ok(Outcome::Saved(id))
    }

    /// Delete a saved deck. Drops a link or tracker session pointing at it.
    pub fn delete_deck(&mut self, id: &DeckId) -> Result<bool> {
        if !self.library.delete(id)? {
            return Ok(false);
        }
        if self.builder.link().is_some_and(|l| &l.peer == id) {
            self.builder.unlink();
        }
        if self.tracker.as_ref().is_some_and(|t| &t.deck().id == id) {
            self.tracker = None;
            if self.view == View::Tracker {
                self.view = View::Decks;
            }
        }
        Ok(true)
    }

    /// Begin tracking a saved deck, replacing any current session.
    pub fn start_tracking(&mut self, id: &DeckId) -> bool {
        let Some(deck) = self.library.get(id) else {
            return false;
        };
        self.tracker = Some(TrackerSession::start(deck.clone(), &self.catalog));
        self.view = View::Tracker;
        true
    }

    pub fn toggle_drawn(&mut self, index: usize) -> bool {
        self.tracker.as_mut().is_some_and(|t| t.toggle(index))
    }

    pub fn reset_tracker(&mut self) -> bool {
        match self.tracker.as_mut() {
            Some(session) => {
                session.reset(&self.catalog);
                true
            }
            None => false,
        }
    }
}

fn applied(changed: bool) -> Outcome {
    if changed {
        Outcome::Applied
    } else {
        Outcome::Ignored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardRecord, Category};
    use crate::core::FixedClock;
    use crate::store::MemoryBackend;

    fn companion() -> Companion<MemoryBackend> {
        let catalog = Catalog::from_records(vec![
            CardRecord::new("lead", "Eredin", Faction::Monster).with_category(Category::Leader),
            CardRecord::new("c1", "Ghoul", Faction::Monster).with_cost(4),
            CardRecord::new("sk-lead", "Crach", Faction::Skellige).with_category(Category::Leader),
            CardRecord::new("n1", "Ballista", Faction::Neutral).with_cost(5),
        ])
        .unwrap();
        Companion::new(
            CompanionConfig::default(),
            catalog,
            MemoryBackend::new(),
            Box::new(FixedClock::new(1_000)),
        )
        .unwrap()
    }

    #[test]
    fn test_save_flow() {
        let mut app = companion();
        app.set_name("Hunt");
        app.add_card(&CardId::new("lead")).unwrap();
        app.add_card(&CardId::new("c1")).unwrap();

        let outcome = app.save().unwrap();
        assert_eq!(outcome, Outcome::Saved(DeckId::new("1000")));
        assert_eq!(app.view(), View::Decks);
        assert!(app.builder().is_empty());
        assert_eq!(app.decks().len(), 1);
    }

    #[test]
    fn test_blocked_save_changes_nothing() {
        let mut app = companion();
        app.add_card(&CardId::new("c1")).unwrap();

        let outcome = app.save().unwrap();
        assert!(matches!(outcome, Outcome::Blocked(ref b) if b.contains(&SaveBlocker::MissingName)));
        assert_eq!(app.view(), View::Builder);
        assert_eq!(app.builder().len(), 1);
        assert!(app.decks().is_empty());
    }

    #[test]
    fn test_tracker_view_needs_session() {
        let mut app = companion();
        assert!(!app.navigate(View::Tracker));
        assert_eq!(app.view(), View::Builder);
    }

    #[test]
    fn test_leaving_tracker_discards_session() {
        let mut app = companion();
        app.set_name("Hunt");
        app.add_card(&CardId::new("lead")).unwrap();
        let Outcome::Saved(id) = app.save().unwrap() else {
            panic!("expected save");
        };

        assert!(app.start_tracking(&id));
        assert_eq!(app.view(), View::Tracker);
        assert!(app.tracker().unwrap().is_complete());

        app.navigate(View::Decks);
        assert!(app.tracker().is_none());
    }

    #[test]
    fn test_dispatch() {
        let mut app = companion();
        assert_eq!(app.dispatch(Intent::SetName("Hunt".into())).unwrap(), Outcome::Applied);
        assert_eq!(app.dispatch(Intent::AddCard(CardId::new("lead"))).unwrap(), Outcome::Applied);
        assert_eq!(
            app.dispatch(Intent::AddCard(CardId::new("sk-lead"))).unwrap(),
            Outcome::Rejected(AddRejection::WrongFaction { card: Faction::Skellige, deck: Faction::Monster })
        );
        assert_eq!(app.dispatch(Intent::RemoveCard(CardId::new("c1"))).unwrap(), Outcome::Ignored);
        assert_eq!(app.dispatch(Intent::ToggleDrawn(0)).unwrap(), Outcome::Ignored);
        assert!(matches!(app.dispatch(Intent::Save).unwrap(), Outcome::Saved(_)));
    }

    #[test]
    fn test_second_leader_blocks_only_at_save() {
        let mut app = companion();
        app.dispatch(Intent::SetName("Hunt".into())).unwrap();

        // The fixture leader is bronze, so the copy limit allows a second one.
        assert_eq!(app.dispatch(Intent::AddCard(CardId::new("lead"))).unwrap(), Outcome::Applied);
        assert_eq!(app.dispatch(Intent::AddCard(CardId::new("lead"))).unwrap(), Outcome::Applied);
        assert_eq!(
            app.dispatch(Intent::AddCard(CardId::new("lead"))).unwrap(),
            Outcome::Rejected(AddRejection::CopyLimit { local: 2, peer: 0, limit: 2 })
        );

        assert_eq!(
            app.dispatch(Intent::Save).unwrap(),
            Outcome::Blocked(vec![SaveBlocker::LeaderCount { found: 2, required: 1 }])
        );
        assert!(app.decks().is_empty());
        assert_eq!(app.builder().len(), 2);

        assert_eq!(app.dispatch(Intent::RemoveCard(CardId::new("lead"))).unwrap(), Outcome::Applied);
        assert!(matches!(app.dispatch(Intent::Save).unwrap(), Outcome::Saved(_)));
    }

    #[test]
    fn test_set_faction_limited_to_catalog() {
        let mut app = companion();
        app.add_card(&CardId::new("c1")).unwrap();

        assert_eq!(app.dispatch(Intent::SetFaction(Faction::Neutral)).unwrap(), Outcome::Ignored);
        assert_eq!(app.dispatch(Intent::SetFaction(Faction::Nilfgaard)).unwrap(), Outcome::Ignored);
        assert_eq!(app.builder().faction(), Faction::Monster);
        assert_eq!(app.builder().len(), 1);

        assert_eq!(app.dispatch(Intent::SetFaction(Faction::Skellige)).unwrap(), Outcome::Applied);
        assert_eq!(app.builder().faction(), Faction::Skellige);
        assert!(app.builder().is_empty());
    }

    #[test]
    fn test_neutral_deck_never_saved() {
        let catalog = Catalog::from_records(vec![
            CardRecord::new("lead", "Eredin", Faction::Monster).with_category(Category::Leader),
            CardRecord::new("n-lead", "Gaunter", Faction::Neutral).with_category(Category::Leader),
        ])
        .unwrap();
        let mut app = Companion::new(
            CompanionConfig::default(),
            catalog,
            MemoryBackend::new(),
            Box::new(FixedClock::new(1_000)),
        )
        .unwrap();

        assert!(!app.set_faction(Faction::Neutral));
        app.set_name("N");
        app.add_card(&CardId::new("n-lead")).unwrap();
        let Outcome::Saved(id) = app.save().unwrap() else {
            panic!("expected save");
        };
        assert_eq!(app.library().get(&id).unwrap().faction, Faction::Monster);
    }

    #[test]
    fn test_default_faction_must_be_in_catalog() {
        let catalog = || {
            Catalog::from_records(vec![
                CardRecord::new("lead", "Eredin", Faction::Monster).with_category(Category::Leader),
            ])
            .unwrap()
        };
        let open = |faction| {
            Companion::new(
                CompanionConfig::default().with_default_faction(faction),
                catalog(),
                MemoryBackend::new(),
                Box::new(FixedClock::new(1)),
            )
        };

        assert!(matches!(open(Faction::Skellige), Err(CompanionError::UnknownFaction(Faction::Skellige))));
        assert!(matches!(open(Faction::Neutral), Err(CompanionError::UnknownFaction(Faction::Neutral))));
        assert!(open(Faction::Monster).is_ok());
    }

    #[test]
    fn test_builder_cards() {
        let mut app = companion();
        app.add_card(&CardId::new("c1")).unwrap();

        let names: Vec<_> = app.builder_cards().iter().map(|(c, _)| c.name.clone()).collect();
        assert_eq!(names, vec!["Ballista", "Ghoul", "Eredin"]);

        app.set_only_in_deck(true);
        let listed = app.builder_cards();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].1.allowance.local, 1);
    }
}
