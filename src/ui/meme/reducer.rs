//! Reducer for the meme widget.

use crate::ui::mvi::Reducer;

use super::intent::MemeIntent;
use super::state::{CaptionSlot, ImageReadiness, MemeWidgetState};

/// Pure state transitions of the widget.
///
/// Network, image and export side effects are issued by the app around the
/// dispatch call.
pub struct MemeReducer;

impl Reducer for MemeReducer {
    type State = MemeWidgetState;
    type Intent = MemeIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            MemeIntent::FetchRequested => MemeWidgetState {
                pending_fetches: state.pending_fetches + 1,
                ..state
            },

            MemeIntent::MemeFetched { meme } => MemeWidgetState {
                current: Some(meme),
                generation: state.generation + 1,
                readiness: ImageReadiness::Unloaded { failed: false },
                pending_fetches: state.pending_fetches.saturating_sub(1),
                ..state
            },

            MemeIntent::FetchFailed => MemeWidgetState {
                pending_fetches: state.pending_fetches.saturating_sub(1),
                ..state
            },

            MemeIntent::CaptionChanged { slot, text } => match slot {
                CaptionSlot::Top => MemeWidgetState {
                    top_caption: text,
                    ..state
                },
                CaptionSlot::Bottom => MemeWidgetState {
                    bottom_caption: text,
                    ..state
                },
            },

            MemeIntent::ImageLoaded { generation } => {
                if generation != state.generation || state.current.is_none() {
                    return state;
                }
                MemeWidgetState {
                    readiness: ImageReadiness::Ready,
                    ..state
                }
            }

            MemeIntent::ImageLoadFailed { generation } => {
                if generation != state.generation || state.readiness == ImageReadiness::Ready {
                    return state;
                }
                MemeWidgetState {
                    readiness: ImageReadiness::Unloaded { failed: true },
                    ..state
                }
            }

            MemeIntent::ExportRequested => state,

            MemeIntent::ExportSaved { path } => MemeWidgetState {
                last_export: Some(path),
                ..state
            },
        }
    }
}
