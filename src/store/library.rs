//! Saved-deck library.
//!
//! `DeckLibrary` owns the in-memory deck list and mirrors it to a single
//! backend slot. Every mutation rewrites the whole slot (last writer wins;
//! the session is the only writer).
//!
//! ## Corrupt storage
//!
//! Entries are decoded one at a time: a malformed entry (an unknown faction,
//! a missing field) is logged and skipped while the rest load. A slot that
//! isn't a JSON array at all is logged and treated as an empty library.
//! Either way the bad value stays in place until the next successful write.

use im::Vector;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::backend::KeyValueBackend;
use crate::core::Clock;
use crate::deck::{Deck, DeckBuilder, DeckId};
use crate::error::Result;

/// Repository of saved decks over a key-value backend.
///
/// ```
/// use gwent_companion::store::{DeckLibrary, MemoryBackend};
///
/// let library = DeckLibrary::open(MemoryBackend::new(), "custom_decks").unwrap();
/// assert!(library.is_empty());
/// ```
#[derive(Debug)]
pub struct DeckLibrary<B> {
    backend: B,
    key: String,
    decks: Vector<Deck>,
}

impl<B: KeyValueBackend> DeckLibrary<B> {
    /// Open the library and load the slot.
    pub fn open(backend: B, key: impl Into<String>) -> Result<Self> {
        let mut library = Self {
            backend,
            key: key.into(),
            decks: Vector::new(),
        };
        library.load()?;
        Ok(library)
    }

    /// Reload from the backend, replacing the in-memory list.
    pub fn load(&mut self) -> Result<()> {
        self.decks = match self.backend.get(&self.key)? {
            None => Vector::new(),
            Some(raw) => match serde_json::from_str::<Vec<Value>>(&raw) {
                Ok(entries) => self.decode_entries(entries),
                Err(e) => {
                    warn!(
                        key = %self.key,
                        bytes = raw.len(),
                        error = %e,
                        "stored decks unreadable, starting empty"
                    );
                    Vector::new()
                }
            },
        };
        debug!(key = %self.key, decks = self.decks.len(), "library loaded");
        Ok(())
    }

    fn decode_entries(&self, entries: Vec<Value>) -> Vector<Deck> {
        entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value::<Deck>(entry) {
                Ok(deck) => Some(deck),
                Err(e) => {
                    warn!(key = %self.key, index, error = %e, "skipping unreadable stored deck");
                    None
                }
            })
            .collect()
    }

    /// Replace the whole list and write it out.
    ///
    /// The in-memory list only changes if the write succeeds.
    pub fn save_all(&mut self, decks: Vector<Deck>) -> Result<()> {
        let json = serde_json::to_string(&decks)?;
        self.backend.set(&self.key, json)?;
        self.decks = decks;
        Ok(())
    }

    /// Current decks. Cheap to clone as a snapshot.
    #[must_use]
    pub fn decks(&self) -> &Vector<Deck> {
        &self.decks
    }

    #[must_use]
    pub fn get(&self, id: &DeckId) -> Option<&Deck> {
        self.decks.iter().find(|d| &d.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.decks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.decks.is_empty()
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mint an id from the clock, bumped past any id already in use.
    #[must_use]
    pub fn mint_id(&self, clock: &dyn Clock) -> DeckId {
        let mut millis = clock.now_millis();
        loop {
            let id = DeckId::new(millis.to_string());
            if self.get(&id).is_none() {
                return id;
            }
            millis += 1;
        }
    }

    /// Insert or replace a deck by id.
    ///
    /// Replacing keeps the deck's position and its original creation time.
    pub fn upsert(&mut self, mut deck: Deck) -> Result<()> {
        let mut decks = self.decks.clone();
        match decks.iter().position(|d| d.id == deck.id) {
            Some(pos) => {
                deck.created_at = decks[pos].created_at;
                decks[pos] = deck;
            }
            None => decks.push_back(deck),
        }
        self.save_all(decks)
    }

    /// Save a draft. New drafts get a minted id and the current time;
    /// drafts loaded from a saved deck update it in place.
    ///
    /// Does not check the save gate.
    pub fn save_draft(&mut self, draft: &DeckBuilder, clock: &dyn Clock) -> Result<DeckId> {
        let deck = match draft.id() {
            Some(_) => draft.to_deck(DeckId::new(""), clock.now_millis()),
            None => draft.to_deck(self.mint_id(clock), clock.now_millis()),
        };
        let id = deck.id.clone();
        let existed = self.get(&id).is_some();
        self.upsert(deck)?;
        info!(%id, updated = existed, "deck saved");
        Ok(id)
    }

    /// Delete a deck. Returns false if no deck had that id.
    pub fn delete(&mut self, id: &DeckId) -> Result<bool> {
        let before = self.decks.len();
        let decks: Vector<Deck> = self.decks.iter().filter(|d| &d.id != id).cloned().collect();
        if decks.len() == before {
            return Ok(false);
        }
        self.save_all(decks)?;
        info!(%id, "deck deleted");
        Ok(true)
    }
}
