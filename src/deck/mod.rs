//! Deck model and construction rules.
//!
//! ## Key Types
//!
//! - `Deck`: A saved deck (id, name, faction, card ids, creation time)
//! - `DeckBuilder`: The draft under edit, with add/remove and the save gate
//! - `BuildContext`: Catalog, rules, and peer snapshot for one decision
//! - `DeckStats`: Cost, unit, and leader aggregates with status indicators
//! - `SharedPoolLink`: Ephemeral pairing for neutral-card pool sharing
//!
//! ## Hard vs. advisory constraints
//!
//! Saving is blocked only by a missing name, an empty deck, a leader count
//! other than the required one, or exceeding the cost limit. Deck size and
//! minimum unit count are reported as indicators but never block.

pub mod builder;
pub mod model;
pub mod pool;
pub mod rules;
pub mod stats;

pub use builder::{CardSlot, DeckBuilder};
pub use model::{Deck, DeckId};
pub use pool::{link_candidates, NeutralUsage, SharedPoolLink};
pub use rules::{AddRejection, BuildContext, CopyAllowance};
pub use stats::{save_blockers, DeckStats, Indicator, SaveBlocker};
