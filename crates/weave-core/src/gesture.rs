//! The gesture capability interface and the payloads gestures emit.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::input::{Input, InputId, Phase};
use crate::progress::{GestureKey, ProgressMap, Record};
use crate::state::State;

/// Gesture errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GestureError {
    #[error("Invalid {gesture} configuration: {reason}")]
    InvalidConfig { gesture: &'static str, reason: String },
    #[error("Gesture {gesture} failed: {reason}")]
    Hook { gesture: String, reason: String },
}

impl GestureError {
    pub(crate) fn invalid(gesture: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            gesture,
            reason: reason.into(),
        }
    }
}

/// What a hook returns: a payload to emit, nothing, or a failure.
pub type HookResult = Result<Option<GestureData>, GestureError>;

/// Per-axis deltas of a combined transform. Absent fields did not change
/// this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformDelta {
    /// Multiplicative scale factor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    /// Rotation in radians.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation: Option<Vec2>,
}

impl TransformDelta {
    pub fn is_empty(&self) -> bool {
        self.scale.is_none() && self.rotation.is_none() && self.translation.is_none()
    }
}

/// Payload of a recognized gesture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GestureData {
    Pan {
        translation: Vec2,
        point: Point,
    },
    Pinch {
        /// Average physical distance from the physical centroid.
        distance: f64,
        midpoint: Point,
        /// Ratio to the previous distance.
        change: f64,
    },
    Rotate {
        pivot: Point,
        delta: f64,
    },
    Swivel {
        delta: f64,
        pivot: Point,
        point: Point,
    },
    Tap {
        x: f64,
        y: f64,
    },
    Track {
        active: Vec<Point>,
        centroid: Point,
    },
    Transform {
        centroid: Point,
        delta: TransformDelta,
    },
}

/// A payload tagged with the name of the gesture that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Emission {
    pub gesture: String,
    pub data: GestureData,
}

/// A gesture's window onto its own progress records for one hook call.
pub struct ProgressScope<'a> {
    gesture: GestureKey,
    inputs: &'a mut [Input],
    shared: &'a mut ProgressMap,
}

impl<'a> ProgressScope<'a> {
    pub(crate) fn new(
        gesture: GestureKey,
        inputs: &'a mut [Input],
        shared: &'a mut ProgressMap,
    ) -> Self {
        Self {
            gesture,
            inputs,
            shared,
        }
    }

    pub fn key(&self) -> GestureKey {
        self.gesture
    }

    /// Record `R` kept on the input `id`, or `None` if no such input is tracked.
    pub fn input<R: Record>(&mut self, id: &InputId) -> Option<&mut R> {
        let gesture = self.gesture;
        self.inputs
            .iter_mut()
            .find(|input| input.id() == id)
            .map(|input| input.progress_mut::<R>(gesture))
    }

    /// Gesture-wide record `R`, held by the region rather than any one input.
    pub fn shared<R: Record>(&mut self) -> &mut R {
        self.shared.get_or_default::<R>(self.gesture)
    }
}

/// A recognizer driven by a region.
///
/// Every hook is optional; the default does nothing and emits nothing. Hooks
/// receive the frozen [`State`] for the event and a [`ProgressScope`] for
/// whatever they need to remember between events.
pub trait Gesture {
    /// Name emissions are tagged with.
    fn name(&self) -> &str;

    fn on_start(&mut self, _state: &State, _progress: &mut ProgressScope<'_>) -> HookResult {
        Ok(None)
    }

    fn on_move(&mut self, _state: &State, _progress: &mut ProgressScope<'_>) -> HookResult {
        Ok(None)
    }

    fn on_end(&mut self, _state: &State, _progress: &mut ProgressScope<'_>) -> HookResult {
        Ok(None)
    }

    fn on_cancel(&mut self, _state: &State, _progress: &mut ProgressScope<'_>) -> HookResult {
        Ok(None)
    }

    /// Call the hook matching `phase`.
    fn handle(
        &mut self,
        phase: Phase,
        state: &State,
        progress: &mut ProgressScope<'_>,
    ) -> HookResult {
        match phase {
            Phase::Start => self.on_start(state, progress),
            Phase::Move => self.on_move(state, progress),
            Phase::End => self.on_end(state, progress),
            Phase::Cancel => self.on_cancel(state, progress),
        }
    }
}
