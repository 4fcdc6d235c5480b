//! Pass-through reporting of the raw active points.

use serde::{Deserialize, Serialize};

use crate::gesture::{Gesture, GestureData, GestureError, HookResult, ProgressScope};
use crate::input::Phase;
use crate::state::State;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackConfig {
    /// Phases on which to report.
    pub phases: Vec<Phase>,
}

impl TrackConfig {
    pub fn new(phases: impl IntoIterator<Item = Phase>) -> Self {
        Self {
            phases: phases.into_iter().collect(),
        }
    }

    pub fn validate(&self) -> Result<(), GestureError> {
        if self.phases.is_empty() {
            return Err(GestureError::invalid("track", "at least one phase must be tracked"));
        }
        Ok(())
    }
}

/// Forwards the active points and their centroid on the configured phases.
#[derive(Debug, Clone)]
pub struct Track {
    name: String,
    config: TrackConfig,
}

impl Track {
    pub fn with_config(config: TrackConfig) -> Result<Self, GestureError> {
        config.validate()?;
        Ok(Self {
            name: "track".to_string(),
            config,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn config(&self) -> &TrackConfig {
        &self.config
    }

    fn report(&self, phase: Phase, state: &State) -> HookResult {
        if !self.config.phases.contains(&phase) {
            return Ok(None);
        }
        Ok(Some(GestureData::Track {
            active: state.active_points().to_vec(),
            centroid: state.centroid(),
        }))
    }
}

impl Gesture for Track {
    fn name(&self) -> &str {
        &self.name
    }

    fn on_start(&mut self, state: &State, _progress: &mut ProgressScope<'_>) -> HookResult {
        self.report(Phase::Start, state)
    }

    fn on_move(&mut self, state: &State, _progress: &mut ProgressScope<'_>) -> HookResult {
        self.report(Phase::Move, state)
    }

    fn on_end(&mut self, state: &State, _progress: &mut ProgressScope<'_>) -> HookResult {
        self.report(Phase::End, state)
    }

    fn on_cancel(&mut self, state: &State, _progress: &mut ProgressScope<'_>) -> HookResult {
        self.report(Phase::Cancel, state)
    }
}
