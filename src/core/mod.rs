//! Ambient building blocks: configuration and time.

pub mod clock;
pub mod config;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{CompanionConfig, DeckRules};
