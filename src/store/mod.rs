//! Deck persistence.
//!
//! - `KeyValueBackend`: String slots (`MemoryBackend`, `FileBackend`)
//! - `DeckLibrary`: Load/save-all repository over one slot
//!
//! The stored value is the JSON array of all saved decks.

pub mod backend;
pub mod file;
pub mod library;
pub mod memory;

pub use backend::KeyValueBackend;
pub use file::FileBackend;
pub use library::DeckLibrary;
pub use memory::MemoryBackend;
