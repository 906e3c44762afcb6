//! Key-value backends for deck storage.
//!
//! The library keeps one slot: a key whose value is the JSON deck list.
//! Backends only move strings; parsing happens in `DeckLibrary`.

use crate::error::Result;

/// A string key-value store.
pub trait KeyValueBackend {
    /// Read a slot. `Ok(None)` means the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite a slot.
    fn set(&mut self, key: &str, value: String) -> Result<()>;
}

impl<B: KeyValueBackend + ?Sized> KeyValueBackend for Box<B> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        (**self).set(key, value)
    }
}
