//! Card catalog: static records, lookup, and search.
//!
//! ## Key Types
//!
//! - `CardId`: Stable catalog identifier, stored in decks
//! - `CardRecord`: Immutable card data (cost, rarity, category, faction)
//! - `Catalog`: Read-only lookup loaded at startup
//! - `CardFilter`: Builder search with the shared display ordering
//!
//! ## Neutral Cards
//!
//! `Faction::Neutral` cards fit any deck. Their copies are counted jointly
//! across a deck and its linked peer (see `deck::pool`).

pub mod catalog;
pub mod definition;
pub mod filter;

pub use catalog::{Catalog, FactionList};
pub use definition::{CardId, CardRecord, Category, Faction, Rarity};
pub use filter::{display_order, CardFilter};
