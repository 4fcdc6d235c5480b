//! Translation of the active centroid.

use serde::{Deserialize, Serialize};

use crate::gesture::{Gesture, GestureData, GestureError, HookResult, ProgressScope};
use crate::input::ModifierKey;
use crate::progress::PanProgress;
use crate::state::State;

/// Inputs a pan needs before it tracks anything.
pub const PAN_REQUIRED_INPUTS: usize = 1;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanConfig {
    /// While held, moves re-baseline instead of emitting.
    pub mute_key: Option<ModifierKey>,
}

/// Emits the centroid's translation since the previous move.
///
/// A move that leaves the centroid in place emits a zero translation; zero
/// deltas are not suppressed.
#[derive(Debug, Clone)]
pub struct Pan {
    name: String,
    config: PanConfig,
}

impl Pan {
    pub fn new() -> Self {
        Self {
            name: "pan".to_string(),
            config: PanConfig::default(),
        }
    }

    pub fn with_config(config: PanConfig) -> Result<Self, GestureError> {
        Ok(Self {
            config,
            ..Self::new()
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn config(&self) -> &PanConfig {
        &self.config
    }

    /// Re-baseline at the current centroid so a change in input count never
    /// reads as a jump.
    fn refresh(&self, state: &State, progress: &mut ProgressScope<'_>) {
        let record = progress.shared::<PanProgress>();
        record.previous = (state.active_count() >= PAN_REQUIRED_INPUTS).then(|| state.centroid());
    }
}

impl Default for Pan {
    fn default() -> Self {
        Self::new()
    }
}

impl Gesture for Pan {
    fn name(&self) -> &str {
        &self.name
    }

    fn on_start(&mut self, state: &State, progress: &mut ProgressScope<'_>) -> HookResult {
        self.refresh(state, progress);
        Ok(None)
    }

    fn on_move(&mut self, state: &State, progress: &mut ProgressScope<'_>) -> HookResult {
        if state.active_count() < PAN_REQUIRED_INPUTS {
            return Ok(None);
        }

        let muted = self
            .config
            .mute_key
            .is_some_and(|key| state.event().modifiers.is_pressed(key));
        if muted {
            self.refresh(state, progress);
            return Ok(None);
        }

        let centroid = state.centroid();
        let record = progress.shared::<PanProgress>();
        let Some(previous) = record.previous.replace(centroid) else {
            return Ok(None);
        };

        Ok(Some(GestureData::Pan {
            translation: centroid - previous,
            point: centroid,
        }))
    }

    fn on_end(&mut self, state: &State, progress: &mut ProgressScope<'_>) -> HookResult {
        self.refresh(state, progress);
        Ok(None)
    }

    fn on_cancel(&mut self, state: &State, progress: &mut ProgressScope<'_>) -> HookResult {
        self.refresh(state, progress);
        Ok(None)
    }
}
