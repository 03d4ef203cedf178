//! Meme widget feature module.
//!
//! Holds the current meme, the two captions and the image readiness flag.
//!
//! # Architecture
//!
//! Uses MVI (Model-View-Intent) pattern:
//! - `state.rs` - Widget state (current meme, captions, readiness)
//! - `intent.rs` - User and system events (fetch, caption edits, image loads)
//! - `reducer.rs` - State transitions (pure, no side effects)

mod intent;
mod reducer;
mod state;

pub use intent::MemeIntent;
pub use reducer::MemeReducer;
pub use state::{CaptionSlot, ImageReadiness, MemeWidgetState};
