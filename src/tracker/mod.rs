//! In-match card tracker.
//!
//! A `TrackerSession` marks positions of a saved deck as drawn. It starts
//! with every leader drawn, reports the remaining count, and signals
//! completion when every position is drawn.

pub mod session;

pub use session::{TrackedCard, TrackerSession};
