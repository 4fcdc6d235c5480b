//! Pan, pinch and rotate coalesced into one emission per event.

use serde::{Deserialize, Serialize};

use super::{Pan, PanConfig, Pinch, PinchConfig, Rotate, RotateConfig};
use crate::gesture::{Gesture, GestureData, GestureError, HookResult, ProgressScope, TransformDelta};
use crate::input::Phase;
use crate::state::State;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    pub pan: PanConfig,
    pub pinch: PinchConfig,
    pub rotate: RotateConfig,
}

/// Runs a pan, a pinch and a rotate on every hook and merges whatever they
/// produce into a single `transform` payload.
///
/// Consumers apply one combined delta per event instead of up to three
/// order-dependent ones.
#[derive(Debug, Clone)]
pub struct Transform {
    name: String,
    pan: Pan,
    pinch: Pinch,
    rotate: Rotate,
}

impl Transform {
    pub fn new() -> Self {
        Self {
            name: "transform".to_string(),
            pan: Pan::new(),
            pinch: Pinch::new(),
            rotate: Rotate::new(),
        }
    }

    pub fn with_config(config: TransformConfig) -> Result<Self, GestureError> {
        Ok(Self {
            name: "transform".to_string(),
            pan: Pan::with_config(config.pan)?,
            pinch: Pinch::with_config(config.pinch)?,
            rotate: Rotate::with_config(config.rotate)?,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    fn run(&mut self, phase: Phase, state: &State, progress: &mut ProgressScope<'_>) -> HookResult {
        let parts = [
            self.pan.handle(phase, state, progress)?,
            self.pinch.handle(phase, state, progress)?,
            self.rotate.handle(phase, state, progress)?,
        ];

        let mut delta = TransformDelta::default();
        for part in parts.into_iter().flatten() {
            match part {
                GestureData::Pan { translation, .. } => delta.translation = Some(translation),
                GestureData::Pinch { change, .. } => delta.scale = Some(change),
                GestureData::Rotate { delta: rotation, .. } => delta.rotation = Some(rotation),
                _ => {}
            }
        }

        if delta.is_empty() {
            return Ok(None);
        }
        Ok(Some(GestureData::Transform {
            centroid: state.centroid(),
            delta,
        }))
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

impl Gesture for Transform {
    fn name(&self) -> &str {
        &self.name
    }

    fn on_start(&mut self, state: &State, progress: &mut ProgressScope<'_>) -> HookResult {
        self.run(Phase::Start, state, progress)
    }

    fn on_move(&mut self, state: &State, progress: &mut ProgressScope<'_>) -> HookResult {
        self.run(Phase::Move, state, progress)
    }

    fn on_end(&mut self, state: &State, progress: &mut ProgressScope<'_>) -> HookResult {
        self.run(Phase::End, state, progress)
    }

    fn on_cancel(&mut self, state: &State, progress: &mut ProgressScope<'_>) -> HookResult {
        self.run(Phase::Cancel, state, progress)
    }
}
