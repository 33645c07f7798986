//! User interactions as dispatched data, applied by a single reducer.

use crate::cycle::CycleSelection;
use crate::reveal::ToggleAction;
use crate::stations::Station;
use crate::store::{StateKey, StateValue, Store};

/// Everything a user can do to the briefing. The view captures these
/// and the app queue replays them one at a time between passes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Inspect a different transport hub.
    SelectStation { station: Station },
    /// Highlight a cycle stage (or the whole ring).
    SelectCycleStage { selection: CycleSelection },
    /// Fire a reveal-toggle transition.
    ToggleReveal { action: ToggleAction },
}

/// Apply a single action to the store. Each slot is written only by
/// its own action; a rejected toggle transition leaves the store
/// untouched.
pub fn update(store: &mut Store, action: Action) {
    match action {
        Action::SelectStation { station } => {
            store.session.set(
                StateKey::Station,
                StateValue::Station(station),
            );
        }
        Action::SelectCycleStage { selection } => {
            store.session.set(
                StateKey::CycleStage,
                StateValue::CycleStage(selection),
            );
        }
        Action::ToggleReveal { action } => {
            if let Some(next) =
                store.session.reveal().transition(action)
            {
                store.session.set(
                    StateKey::Reveal,
                    StateValue::Reveal(next.flag()),
                );
            }
        }
    }
}
