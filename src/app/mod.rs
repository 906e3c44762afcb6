//! Intent dispatch for the builder, deck-library, and tracker views.

mod companion;

pub use companion::{Companion, Intent, Outcome, View};
