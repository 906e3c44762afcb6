//! # gwent-companion
//!
//! Deck builder, saved-deck library, and in-match card tracker for a
//! collectible card game.
//!
//! ## Design Principles
//!
//! 1. **Derived, not tracked**: Cost, unit, and leader counts are recomputed
//!    from the card sequence on demand. No running totals.
//!
//! 2. **Explicit repository**: Saved decks live in a `DeckLibrary` over a
//!    swappable `KeyValueBackend`, never in ambient global state.
//!
//! 3. **Links resolve late**: A shared-pool link is a deck id, resolved
//!    against the current library snapshot at each decision.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: Card sequences and the library use
//!   `im::Vector`, so snapshots and tracker copies are O(1).
//!
//! - **Soft failures**: Dangling card ids are skipped, rejected adds and
//!   blocked saves return reasons, unreadable storage loads as empty.
//!
//! ## Modules
//!
//! - `cards`: Card records, the catalog, and builder search
//! - `deck`: Saved decks, the draft builder, copy limits, shared pool, save gate
//! - `store`: Key-value backends and the deck library
//! - `tracker`: Drawn-card tracking for a saved deck
//! - `app`: View state and intent dispatch
//! - `core`: Configuration and clock

pub mod app;
pub mod cards;
pub mod core;
pub mod deck;
pub mod error;
pub mod store;
pub mod tracker;

// Re-export commonly used types
pub use crate::core::{Clock, CompanionConfig, DeckRules, FixedClock, SystemClock};

pub use crate::error::{CompanionError, Result};

pub use crate::cards::{CardFilter, CardId, CardRecord, Catalog, Category, Faction, Rarity};

pub use crate::deck::{
    AddRejection, BuildContext, CardSlot, CopyAllowance, Deck, DeckBuilder, DeckId, DeckStats,
    Indicator, SaveBlocker, SharedPoolLink,
};

pub use crate::store::{DeckLibrary, FileBackend, KeyValueBackend, MemoryBackend};

pub use crate::tracker::{TrackedCard, TrackerSession};

pub use crate::app::{Companion, Intent, Outcome, View};
