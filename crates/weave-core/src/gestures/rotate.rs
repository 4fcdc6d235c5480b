//! Rotation of the inputs around their shared centroid.

use serde::{Deserialize, Serialize};

use crate::geometry::{PointExt, angular_minus};
use crate::gesture::{Gesture, GestureData, GestureError, HookResult, ProgressScope};
use crate::progress::RotateProgress;
use crate::state::State;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotateConfig {
    pub min_inputs: usize,
}

impl Default for RotateConfig {
    fn default() -> Self {
        Self { min_inputs: 2 }
    }
}

impl RotateConfig {
    pub fn validate(&self) -> Result<(), GestureError> {
        if self.min_inputs < 2 {
            return Err(GestureError::invalid("rotate", "min_inputs must be at least 2"));
        }
        Ok(())
    }
}

/// Emits the average angular change of each input around the centroid.
///
/// Every input keeps its own previous angle, so inputs joining or leaving
/// only affect the average, never the reference line.
#[derive(Debug, Clone)]
pub struct Rotate {
    name: String,
    config: RotateConfig,
}

impl Rotate {
    pub fn new() -> Self {
        Self {
            name: "rotate".to_string(),
            config: RotateConfig::default(),
        }
    }

    pub fn with_config(config: RotateConfig) -> Result<Self, GestureError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new()
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn config(&self) -> &RotateConfig {
        &self.config
    }

    /// Store each active input's current angle without emitting.
    fn anchor(&self, state: &State, progress: &mut ProgressScope<'_>) {
        let centroid = state.centroid();
        for input in state.active() {
            if let Some(record) = progress.input::<RotateProgress>(&input.id) {
                record.previous_angle = Some(centroid.angle_to(input.point));
            }
        }
    }
}

impl Default for Rotate {
    fn default() -> Self {
        Self::new()
    }
}

impl Gesture for Rotate {
    fn name(&self) -> &str {
        &self.name
    }

    fn on_start(&mut self, state: &State, progress: &mut ProgressScope<'_>) -> HookResult {
        self.anchor(state, progress);
        Ok(None)
    }

    fn on_move(&mut self, state: &State, progress: &mut ProgressScope<'_>) -> HookResult {
        if state.active_count() < self.config.min_inputs {
            return Ok(None);
        }

        let pivot = state.centroid();
        let mut total = 0.0;
        for input in state.active() {
            let angle = pivot.angle_to(input.point);
            if let Some(record) = progress.input::<RotateProgress>(&input.id) {
                if let Some(previous) = record.previous_angle.replace(angle) {
                    total += angular_minus(angle, previous);
                }
            }
        }

        let delta = total / state.active_count() as f64;
        if delta == 0.0 {
            return Ok(None);
        }
        Ok(Some(GestureData::Rotate { pivot, delta }))
    }

    fn on_end(&mut self, state: &State, progress: &mut ProgressScope<'_>) -> HookResult {
        self.anchor(state, progress);
        Ok(None)
    }

    fn on_cancel(&mut self, state: &State, progress: &mut ProgressScope<'_>) -> HookResult {
        self.anchor(state, progress);
        Ok(None)
    }
}
