//! Convergence and divergence of two or more inputs.

use serde::{Deserialize, Serialize};

use crate::geometry::PointExt;
use crate::gesture::{Gesture, GestureData, GestureError, HookResult, ProgressScope};
use crate::progress::PinchProgress;
use crate::state::State;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PinchConfig {
    pub min_inputs: usize,
}

impl Default for PinchConfig {
    fn default() -> Self {
        Self { min_inputs: 2 }
    }
}

impl PinchConfig {
    pub fn validate(&self) -> Result<(), GestureError> {
        if self.min_inputs < 1 {
            return Err(GestureError::invalid("pinch", "min_inputs must be at least 1"));
        }
        Ok(())
    }
}

/// Emits the ratio between the current and previous spread of the inputs.
///
/// Spread is measured on physical points so the factor does not depend on
/// any scale the viewing device already applies. The previous spread is a
/// gesture-wide record, so it survives whichever input happens to lift.
#[derive(Debug, Clone)]
pub struct Pinch {
    name: String,
    config: PinchConfig,
}

impl Pinch {
    pub fn new() -> Self {
        Self {
            name: "pinch".to_string(),
            config: PinchConfig::default(),
        }
    }

    pub fn with_config(config: PinchConfig) -> Result<Self, GestureError> {
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

    pub fn config(&self) -> &PinchConfig {
        &self.config
    }

    fn spread(state: &State) -> f64 {
        state.physical_centroid().average_distance_to(state.physical_points())
    }

    fn anchor(&self, state: &State, progress: &mut ProgressScope<'_>) {
        let record = progress.shared::<PinchProgress>();
        record.previous_distance =
            (state.active_count() >= self.config.min_inputs).then(|| Self::spread(state));
    }
}

impl Default for Pinch {
    fn default() -> Self {
        Self::new()
    }
}

impl Gesture for Pinch {
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

        let distance = Self::spread(state);
        let record = progress.shared::<PinchProgress>();
        let previous = record.previous_distance.replace(distance);
        match previous {
            Some(previous) if previous > f64::EPSILON => Ok(Some(GestureData::Pinch {
                distance,
                midpoint: state.centroid(),
                change: distance / previous,
            })),
            _ => Ok(None),
        }
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
