//! Unidirectional state flow for widgets.
//!
//! Key presses and worker results become intents; a reducer folds each one
//! into a fresh state value that the renderer draws from:
//!
//! ```text
//! key / worker event ─→ Intent ─→ Reducer ─→ State ─→ draw
//! ```
//!
//! Side effects (HTTP, file writes, clipboard) never happen inside a
//! reducer. The app issues them as commands before or after reducing.

/// Something that happened: a user edit or a worker outcome.
pub trait Intent: Send + 'static {}

/// Snapshot of everything a widget needs to render.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}

/// Folds intents into state. `(State, Intent) -> State`, nothing else.
pub trait Reducer {
    type State: UiState;
    type Intent: Intent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
