//! Single-input rotation around a fixed pivot.

use kurbo::Point;
use serde::{Deserialize, Serialize};

use crate::geometry::{PointExt, angular_minus};
use crate::gesture::{Gesture, GestureData, GestureError, HookResult, ProgressScope};
use crate::input::{InputId, ModifierKey};
use crate::progress::SwivelProgress;
use crate::state::State;

/// Inputs a swivel tracks; any other count suspends it.
pub const SWIVEL_REQUIRED_INPUTS: usize = 1;

/// Default radius around the pivot in which motion is ignored.
pub const DEFAULT_DEADZONE_RADIUS: f64 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwivelConfig {
    /// Pixels around the pivot inside which no rotation is emitted.
    pub deadzone_radius: f64,
    /// If set, the swivel only responds while this key is held.
    pub enable_key: Option<ModifierKey>,
}

impl Default for SwivelConfig {
    fn default() -> Self {
        Self {
            deadzone_radius: DEFAULT_DEADZONE_RADIUS,
            enable_key: None,
        }
    }
}

impl SwivelConfig {
    pub fn validate(&self) -> Result<(), GestureError> {
        if !self.deadzone_radius.is_finite() || self.deadzone_radius < 0.0 {
            return Err(GestureError::invalid(
                "swivel",
                format!(
                    "deadzone_radius must be a non-negative number, got {}",
                    self.deadzone_radius
                ),
            ));
        }
        Ok(())
    }
}

/// Rotation of one input around the point where it was armed.
///
/// Unlike [`Rotate`](super::Rotate) the pivot does not follow the input. The
/// swivel re-arms whenever its gate opens again or the input count drops
/// back to exactly one.
#[derive(Debug, Clone)]
pub struct Swivel {
    name: String,
    config: SwivelConfig,
}

impl Swivel {
    pub fn new() -> Self {
        Self {
            name: "swivel".to_string(),
            config: SwivelConfig::default(),
        }
    }

    pub fn with_config(config: SwivelConfig) -> Result<Self, GestureError> {
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

    pub fn config(&self) -> &SwivelConfig {
        &self.config
    }

    fn is_enabled(&self, state: &State) -> bool {
        self.config
            .enable_key
            .is_none_or(|key| state.event().modifiers.is_pressed(key))
    }

    fn restart(record: &mut SwivelProgress, point: Point) {
        record.active = true;
        record.pivot = Some(point);
        record.previous_angle = 0.0;
    }

    fn deactivate(record: &mut SwivelProgress) {
        record.active = false;
        record.pivot = None;
    }

    /// Arm on the lone active input, if there is exactly one.
    fn rearm(&self, state: &State, progress: &mut ProgressScope<'_>) {
        let [input] = state.active() else {
            return;
        };
        let enabled = self.is_enabled(state);
        if let Some(record) = progress.input::<SwivelProgress>(&input.id) {
            if enabled {
                Self::restart(record, input.point);
            } else {
                Self::deactivate(record);
            }
        }
    }

    fn step(
        &self,
        id: &InputId,
        point: Point,
        progress: &mut ProgressScope<'_>,
    ) -> Option<GestureData> {
        let record = progress.input::<SwivelProgress>(id)?;
        let pivot = match (record.active, record.pivot) {
            (true, Some(pivot)) => pivot,
            _ => {
                Self::restart(record, point);
                return None;
            }
        };

        let angle = pivot.angle_to(point);
        let delta = angular_minus(angle, record.previous_angle);
        record.previous_angle = angle;

        (pivot.distance(point) > self.config.deadzone_radius).then_some(GestureData::Swivel {
            delta,
            pivot,
            point,
        })
    }
}

impl Default for Swivel {
    fn default() -> Self {
        Self::new()
    }
}

impl Gesture for Swivel {
    fn name(&self) -> &str {
        &self.name
    }

    fn on_start(&mut self, state: &State, progress: &mut ProgressScope<'_>) -> HookResult {
        self.rearm(state, progress);
        Ok(None)
    }

    fn on_move(&mut self, state: &State, progress: &mut ProgressScope<'_>) -> HookResult {
        if state.active_count() != SWIVEL_REQUIRED_INPUTS {
            return Ok(None);
        }
        let input = &state.active()[0];

        if !self.is_enabled(state) {
            if let Some(record) = progress.input::<SwivelProgress>(&input.id) {
                Self::deactivate(record);
            }
            return Ok(None);
        }

        Ok(self.step(&input.id, input.point, progress))
    }

    fn on_end(&mut self, state: &State, progress: &mut ProgressScope<'_>) -> HookResult {
        self.rearm(state, progress);
        Ok(None)
    }

    fn on_cancel(&mut self, state: &State, progress: &mut ProgressScope<'_>) -> HookResult {
        self.rearm(state, progress);
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Modifiers, PointerEvent};
    use crate::region::{Dispatch, Region};
    use std::f64::consts::FRAC_PI_2;

    fn swivel(dispatch: &Dispatch) -> Option<(f64, Point)> {
        dispatch.emitted("swivel").find_map(|data| match data {
            GestureData::Swivel { delta, pivot, .. } => Some((*delta, *pivot)),
            _ => None,
        })
    }

    #[test]
    fn test_config_validation() {
        let config = SwivelConfig {
            deadzone_radius: -1.0,
            ..SwivelConfig::default()
        };
        assert!(Swivel::with_config(config).is_err());
        assert_eq!(Swivel::new().config().deadzone_radius, DEFAULT_DEADZONE_RADIUS);
    }

    #[test]
    fn test_deadzone_boundary() {
        let mut region = Region::new();
        region.register(Swivel::new());
        region.dispatch(&PointerEvent::start("a", Point::ZERO, 0)).unwrap();

        let on_edge = region
            .dispatch(&PointerEvent::moved("a", Point::new(15.0, 0.0), 10))
            .unwrap();
        assert!(on_edge.is_empty());

        let outside = region
            .dispatch(&PointerEvent::moved("a", Point::new(15.001, 0.0), 20))
            .unwrap();
        assert_eq!(swivel(&outside).map(|(_, pivot)| pivot), Some(Point::ZERO));
    }

    #[test]
    fn test_rotation_about_fixed_pivot() {
        let mut region = Region::new();
        region.register(Swivel::new());
        region.dispatch(&PointerEvent::start("a", Point::new(100.0, 100.0), 0)).unwrap();
        region.dispatch(&PointerEvent::moved("a", Point::new(150.0, 100.0), 10)).unwrap();

        let d = region.dispatch(&PointerEvent::moved("a", Point::new(100.0, 150.0), 20)).unwrap();
        let (delta, pivot) = swivel(&d).unwrap();
        assert!((delta - FRAC_PI_2).abs() < 1e-9);
        assert_eq!(pivot, Point::new(100.0, 100.0));
    }

    #[test]
    fn test_enable_key_gates_and_rearms() {
        let config = SwivelConfig {
            enable_key: Some(ModifierKey::Shift),
            ..SwivelConfig::default()
        };
        let mut region = Region::new();
        region.register(Swivel::with_config(config).unwrap());
        let shift = Modifiers::default().with(ModifierKey::Shift);

        region.dispatch(&PointerEvent::start("a", Point::ZERO, 0)).unwrap();
        let released = region
            .dispatch(&PointerEvent::moved("a", Point::new(50.0, 0.0), 10))
            .unwrap();
        assert!(released.is_empty());

        // Pressing the key arms at the current point without emitting.
        let armed = region
            .dispatch(&PointerEvent::moved("a", Point::new(60.0, 0.0), 20).with_modifiers(shift))
            .unwrap();
        assert!(armed.is_empty());

        let d = region
            .dispatch(&PointerEvent::moved("a", Point::new(60.0, 40.0), 30).with_modifiers(shift))
            .unwrap();
        let (_, pivot) = swivel(&d).unwrap();
        assert_eq!(pivot, Point::new(60.0, 0.0));

        let released = region
            .dispatch(&PointerEvent::moved("a", Point::new(60.0, 80.0), 40))
            .unwrap();
        assert!(released.is_empty());
    }

    #[test]
    fn test_second_input_suspends_and_lift_rearms() {
        let mut region = Region::new();
        region.register(Swivel::new());
        region.dispatch(&PointerEvent::start("a", Point::ZERO, 0)).unwrap();
        region.dispatch(&PointerEvent::start("b", Point::new(200.0, 0.0), 5)).unwrap();

        let d = region.dispatch(&PointerEvent::moved("a", Point::new(0.0, 40.0), 10)).unwrap();
        assert!(d.is_empty());

        region.dispatch(&PointerEvent::end("b", Point::new(200.0, 0.0), 20)).unwrap();
        let d = region.dispatch(&PointerEvent::moved("a", Point::new(30.0, 40.0), 30)).unwrap();
        let (_, pivot) = swivel(&d).unwrap();
        assert_eq!(pivot, Point::new(0.0, 40.0));
    }
}
