//! Session-scoped state: an enumerated key/value store surviving across
//! render passes, plus the immutable data loaded at startup.

use crate::cycle::CycleSelection;
use crate::incidents::IncidentRecord;
use crate::reveal::RevealState;
use crate::stations::Station;
use std::collections::HashMap;

/// The three interaction slots. Each is mutated only by its own user
/// interaction; none survive the end of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKey {
    Station,
    CycleStage,
    Reveal,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StateValue {
    Station(Station),
    CycleStage(CycleSelection),
    Reveal(bool),
}

fn default_value(key: StateKey) -> StateValue {
    match key {
        StateKey::Station => {
            StateValue::Station(Station::default())
        }
        StateKey::CycleStage => {
            StateValue::CycleStage(CycleSelection::default())
        }
        StateKey::Reveal => StateValue::Reveal(false),
    }
}

/// Keyed session state. `set` is the only mutator and takes effect
/// immediately; `init_if_absent` is a no-op once a key holds a value,
/// which is what makes the slots persist across passes instead of
/// being reset by every pass.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    slots: HashMap<StateKey, StateValue>,
}

impl SessionStore {
    pub fn new() -> Self {
        let mut store = Self::default();
        for key in
            [StateKey::Station, StateKey::CycleStage, StateKey::Reveal]
        {
            store.init_if_absent(key, default_value(key));
        }
        store
    }

    pub fn init_if_absent(
        &mut self,
        key: StateKey,
        default: StateValue,
    ) {
        self.slots.entry(key).or_insert(default);
    }

    pub fn get(&self, key: StateKey) -> StateValue {
        self.slots
            .get(&key)
            .copied()
            .unwrap_or_else(|| default_value(key))
    }

    pub fn set(&mut self, key: StateKey, value: StateValue) {
        self.slots.insert(key, value);
    }

    // Typed views over the keyed slots.

    pub fn station(&self) -> Station {
        match self.get(StateKey::Station) {
            StateValue::Station(station) => station,
            _ => Station::default(),
        }
    }

    pub fn cycle_stage(&self) -> CycleSelection {
        match self.get(StateKey::CycleStage) {
            StateValue::CycleStage(selection) => selection,
            _ => CycleSelection::default(),
        }
    }

    pub fn reveal(&self) -> RevealState {
        match self.get(StateKey::Reveal) {
            StateValue::Reveal(flag) => RevealState::from_flag(flag),
            _ => RevealState::Hidden,
        }
    }
}

/// Everything a render pass reads: the mutable session slots and the
/// incident table, which is immutable for the whole session.
pub struct Store {
    pub session: SessionStore,
    pub incidents: Vec<IncidentRecord>,
}

impl Store {
    pub fn new(incidents: Vec<IncidentRecord>) -> Self {
        Self {
            session: SessionStore::new(),
            incidents,
        }
    }
}
