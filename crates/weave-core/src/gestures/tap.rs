//! Quick, near-stationary touch and release of a fixed number of inputs.

use kurbo::Point;
use serde::{Deserialize, Serialize};

use crate::geometry::midpoint;
use crate::gesture::{Gesture, GestureData, GestureError, HookResult, ProgressScope};
use crate::input::Phase;
use crate::progress::{EndedInput, TapProgress};
use crate::state::State;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TapConfig {
    /// Shortest accepted contact, in milliseconds.
    pub min_delay_ms: i64,
    /// Longest accepted contact, in milliseconds.
    pub max_delay_ms: i64,
    /// Exact number of inputs that make up the tap.
    pub num_inputs: usize,
    /// Longest path, in pixels, an input may travel and still tap.
    pub tolerance: f64,
}

impl Default for TapConfig {
    fn default() -> Self {
        Self {
            min_delay_ms: 0,
            max_delay_ms: 300,
            num_inputs: 1,
            tolerance: 10.0,
        }
    }
}

impl TapConfig {
    pub fn validate(&self) -> Result<(), GestureError> {
        if self.min_delay_ms < 0 || self.max_delay_ms < 0 {
            return Err(GestureError::invalid("tap", "timing window must not be negative"));
        }
        if self.min_delay_ms > self.max_delay_ms {
            return Err(GestureError::invalid(
                "tap",
                format!(
                    "min_delay_ms {} exceeds max_delay_ms {}",
                    self.min_delay_ms, self.max_delay_ms
                ),
            ));
        }
        if self.num_inputs < 1 {
            return Err(GestureError::invalid("tap", "num_inputs must be at least 1"));
        }
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(GestureError::invalid("tap", "tolerance must be a non-negative number"));
        }
        Ok(())
    }
}

/// Fires when exactly `num_inputs` inputs have lifted within the timing
/// window without travelling further than `tolerance`.
///
/// The buffer of ended inputs is a gesture-wide progress record. Cancelled
/// inputs never reach it. A successful tap consumes the buffer, so the next
/// tap accumulates from scratch.
#[derive(Debug, Clone)]
pub struct Tap {
    name: String,
    config: TapConfig,
}

impl Tap {
    pub fn new() -> Self {
        Self {
            name: "tap".to_string(),
            config: TapConfig::default(),
        }
    }

    pub fn with_config(config: TapConfig) -> Result<Self, GestureError> {
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

    pub fn config(&self) -> &TapConfig {
        &self.config
    }

    fn in_window(config: &TapConfig, now_ms: u64, start_time_ms: u64) -> bool {
        let elapsed = now_ms as i64 - start_time_ms as i64;
        elapsed >= config.min_delay_ms && elapsed <= config.max_delay_ms
    }
}

impl Default for Tap {
    fn default() -> Self {
        Self::new()
    }
}

impl Gesture for Tap {
    fn name(&self) -> &str {
        &self.name
    }

    fn on_end(&mut self, state: &State, progress: &mut ProgressScope<'_>) -> HookResult {
        let now_ms = state.event().time_ms;
        let config = &self.config;
        let buffer = &mut progress.shared::<TapProgress>().ended;

        for input in state.in_phase(Phase::End) {
            if buffer.iter().all(|e| e.id != input.id) {
                buffer.push(EndedInput {
                    id: input.id.clone(),
                    start_time_ms: input.start_time_ms,
                    point: input.point,
                    total_distance: input.total_distance,
                });
            }
        }
        buffer.retain(|e| Self::in_window(config, now_ms, e.start_time_ms));

        if buffer.len() != config.num_inputs
            || buffer.iter().any(|e| e.total_distance > config.tolerance)
        {
            return Ok(None);
        }

        let points: Vec<Point> = buffer.iter().map(|e| e.point).collect();
        let Some(center) = midpoint(&points) else {
            return Ok(None);
        };
        buffer.clear();
        Ok(Some(GestureData::Tap {
            x: center.x,
            y: center.y,
        }))
    }
}
