//! The region owns the live inputs and the registered gestures, and turns
//! each pointer event into one pass over every gesture.

use std::fmt;

use thiserror::Error;

use crate::gesture::{Emission, Gesture, GestureData, GestureError, ProgressScope};
use crate::input::{Input, InputId, Phase, PointerEvent};
use crate::progress::{GestureKey, ProgressMap};
use crate::state::State;

/// Events a region refuses. Neither leaves any trace on the region.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegionError {
    #[error("No active input {id} for {phase} event")]
    UnknownInput { id: InputId, phase: Phase },
    #[error("Input {0} is already active")]
    DuplicateStart(InputId),
}

/// A gesture hook that returned an error during a dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct HookFailure {
    pub gesture: String,
    pub phase: Phase,
    pub error: GestureError,
}

/// Outcome of one dispatched event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dispatch {
    /// Payloads in gesture registration order.
    pub emissions: Vec<Emission>,
    pub failures: Vec<HookFailure>,
}

impl Dispatch {
    pub fn is_empty(&self) -> bool {
        self.emissions.is_empty() && self.failures.is_empty()
    }

    /// Payloads emitted by the gesture registered as `name`.
    pub fn emitted<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a GestureData> + 'a {
        self.emissions
            .iter()
            .filter(move |e| e.gesture == name)
            .map(|e| &e.data)
    }
}

struct Registered {
    key: GestureKey,
    gesture: Box<dyn Gesture>,
}

/// Single owner of the active inputs and the gesture set.
///
/// Events are processed one at a time and to completion: record the event on
/// its input, snapshot a [`State`], run the matching hook of every gesture in
/// registration order, then drop the input if the event ended it.
#[derive(Default)]
pub struct Region {
    gestures: Vec<Registered>,
    /// In order of first contact.
    inputs: Vec<Input>,
    /// Gesture-wide progress records.
    shared: ProgressMap,
}

impl Region {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a gesture to the dispatch set.
    pub fn register(&mut self, gesture: impl Gesture + 'static) -> GestureKey {
        self.register_boxed(Box::new(gesture))
    }

    pub fn register_boxed(&mut self, gesture: Box<dyn Gesture>) -> GestureKey {
        let key = GestureKey(self.gestures.len());
        log::debug!("Registered gesture {} as {:?}", gesture.name(), key);
        self.gestures.push(Registered { key, gesture });
        key
    }

    /// Names of the registered gestures in dispatch order.
    pub fn gesture_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.gestures.iter().map(|r| r.gesture.name())
    }

    pub fn inputs(&self) -> &[Input] {
        &self.inputs
    }

    pub fn input(&self, id: &InputId) -> Option<&Input> {
        self.inputs.iter().find(|input| input.id() == id)
    }

    pub fn active_count(&self) -> usize {
        self.inputs.len()
    }

    /// Forget every progress record of the gestures registered as `name`.
    ///
    /// Returns whether any such gesture exists.
    pub fn reset_gesture(&mut self, name: &str) -> bool {
        let keys: Vec<GestureKey> = self
            .gestures
            .iter()
            .filter(|r| r.gesture.name() == name)
            .map(|r| r.key)
            .collect();
        for &key in &keys {
            self.shared.remove_gesture(key);
            for input in &mut self.inputs {
                input.clear_progress(key);
            }
        }
        !keys.is_empty()
    }

    /// Process one pointer event to completion.
    pub fn dispatch(&mut self, event: &PointerEvent) -> Result<Dispatch, RegionError> {
        self.track(event)?;

        let state = State::capture(event, &self.inputs);
        let mut dispatch = Dispatch::default();

        for registered in &mut self.gestures {
            let mut progress =
                ProgressScope::new(registered.key, &mut self.inputs, &mut self.shared);
            let name = registered.gesture.name().to_string();
            match registered.gesture.handle(event.phase, &state, &mut progress) {
                Ok(Some(data)) => {
                    log::trace!("{name} emitted {data:?}");
                    dispatch.emissions.push(Emission { gesture: name, data });
                }
                Ok(None) => {}
                Err(error) => {
                    log::warn!("Gesture {name} failed on {} of {}: {error}", event.phase, event.id);
                    dispatch.failures.push(HookFailure {
                        gesture: name,
                        phase: event.phase,
                        error,
                    });
                }
            }
        }

        if event.phase.is_terminal() {
            self.inputs.retain(|input| input.id() != &event.id);
            log::debug!(
                "Input {} finished ({}), {} still active",
                event.id,
                event.phase,
                self.inputs.len()
            );
        }

        log::debug!(
            "Dispatched {} of {}: {} emissions, {} failures",
            event.phase,
            event.id,
            dispatch.emissions.len(),
            dispatch.failures.len()
        );
        Ok(dispatch)
    }

    /// Create, update or reject the input an event refers to.
    fn track(&mut self, event: &PointerEvent) -> Result<(), RegionError> {
        let existing = self.inputs.iter_mut().find(|input| input.id() == &event.id);
        match (existing, event.phase) {
            (Some(_), Phase::Start) => {
                log::warn!("Dropping start for input {} which is already active", event.id);
                Err(RegionError::DuplicateStart(event.id.clone()))
            }
            (Some(input), _) => {
                input.record(event);
                Ok(())
            }
            (None, Phase::Start) => {
                log::debug!("Input {} started at {:?}", event.id, event.point);
                self.inputs.push(Input::begin(event));
                Ok(())
            }
            (None, phase) => {
                log::warn!("Dropping {phase} event for unknown input {}", event.id);
                Err(RegionError::UnknownInput {
                    id: event.id.clone(),
                    phase,
                })
            }
        }
    }
}

impl fmt::Debug for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Region")
            .field("gestures", &self.gesture_names().collect::<Vec<_>>())
            .field("inputs", &self.inputs)
            .field("shared", &self.shared)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::{HookResult, ProgressScope};
    use crate::gestures::{Pan, Pinch};
    use crate::progress::RotateProgress;
    use kurbo::{Point, Vec2};

    /// Fails every move; used to check that one gesture cannot starve others.
    struct Faulty;

    impl Gesture for Faulty {
        fn name(&self) -> &str {
            "faulty"
        }

        fn on_move(&mut self, _state: &State, _progress: &mut ProgressScope<'_>) -> HookResult {
            Err(GestureError::Hook {
                gesture: "faulty".to_string(),
                reason: "always fails".to_string(),
            })
        }
    }

    /// Writes a record on every input it sees so tests can look for it.
    struct Marker;

    impl Gesture for Marker {
        fn name(&self) -> &str {
            "marker"
        }

        fn on_start(&mut self, state: &State, progress: &mut ProgressScope<'_>) -> HookResult {
            for input in state.active() {
                if let Some(record) = progress.input::<RotateProgress>(&input.id) {
                    record.previous_angle = Some(1.0);
                }
            }
            Ok(None)
        }
    }

    fn pan_translation(dispatch: &Dispatch) -> Option<Vec2> {
        dispatch.emitted("pan").find_map(|data| match data {
            GestureData::Pan { translation, .. } => Some(*translation),
            _ => None,
        })
    }

    #[test]
    fn test_start_creates_input() {
        let mut region = Region::new();
        let dispatch = region.dispatch(&PointerEvent::start("a", Point::ZERO, 0)).unwrap();
        assert!(dispatch.is_empty());
        assert_eq!(region.active_count(), 1);
        assert!(region.input(&InputId::new("a")).is_some());
    }

    #[test]
    fn test_move_for_unknown_input_is_rejected() {
        let mut region = Region::new();
        region.register(Pan::new());
        let err = region.dispatch(&PointerEvent::moved("ghost", Point::ZERO, 0)).unwrap_err();
        assert_eq!(
            err,
            RegionError::UnknownInput {
                id: InputId::new("ghost"),
                phase: Phase::Move
            }
        );
        assert_eq!(region.active_count(), 0);
    }

    #[test]
    fn test_duplicate_start_is_rejected() {
        let mut region = Region::new();
        region.dispatch(&PointerEvent::start("a", Point::ZERO, 0)).unwrap();
        let err = region.dispatch(&PointerEvent::start("a", Point::new(5.0, 5.0), 10)).unwrap_err();
        assert_eq!(err, RegionError::DuplicateStart(InputId::new("a")));

        let input = region.input(&InputId::new("a")).unwrap();
        assert_eq!(input.history().len(), 1);
        assert_eq!(input.current().point, Point::ZERO);
    }

    #[test]
    fn test_end_and_cancel_remove_input() {
        let mut region = Region::new();
        region.dispatch(&PointerEvent::start("a", Point::ZERO, 0)).unwrap();
        region.dispatch(&PointerEvent::start("b", Point::ZERO, 0)).unwrap();
        region.dispatch(&PointerEvent::end("a", Point::ZERO, 10)).unwrap();
        region.dispatch(&PointerEvent::cancel("b", Point::ZERO, 10)).unwrap();
        assert_eq!(region.active_count(), 0);

        for id in ["a", "b"] {
            let err = region.dispatch(&PointerEvent::moved(id, Point::ZERO, 20)).unwrap_err();
            assert!(matches!(err, RegionError::UnknownInput { .. }));
        }
    }

    #[test]
    fn test_restarted_id_has_no_stale_progress() {
        let mut region = Region::new();
        let key = region.register(Marker);
        region.dispatch(&PointerEvent::start("a", Point::ZERO, 0)).unwrap();
        assert!(
            region
                .input(&InputId::new("a"))
                .and_then(|i| i.progress::<RotateProgress>(key))
                .is_some()
        );

        region.dispatch(&PointerEvent::end("a", Point::ZERO, 10)).unwrap();
        region.dispatch(&PointerEvent::moved("a", Point::ZERO, 20)).unwrap_err();
        assert!(region.input(&InputId::new("a")).is_none());
    }

    #[test]
    fn test_failing_gesture_does_not_block_others() {
        let mut region = Region::new();
        region.register(Faulty);
        region.register(Pan::new());

        region.dispatch(&PointerEvent::start("a", Point::ZERO, 0)).unwrap();
        let dispatch = region
            .dispatch(&PointerEvent::moved("a", Point::new(4.0, 0.0), 10))
            .unwrap();

        assert_eq!(dispatch.failures.len(), 1);
        assert_eq!(dispatch.failures[0].gesture, "faulty");
        assert_eq!(dispatch.failures[0].phase, Phase::Move);
        assert_eq!(pan_translation(&dispatch), Some(Vec2::new(4.0, 0.0)));

        // Bookkeeping still happened.
        let input = region.input(&InputId::new("a")).unwrap();
        assert_eq!(input.current().point, Point::new(4.0, 0.0));
    }

    #[test]
    fn test_emissions_follow_registration_order() {
        let mut region = Region::new();
        region.register(Pinch::new());
        region.register(Pan::new());

        region.dispatch(&PointerEvent::start("a", Point::new(0.0, 0.0), 0)).unwrap();
        region.dispatch(&PointerEvent::start("b", Point::new(10.0, 0.0), 0)).unwrap();
        let dispatch = region
            .dispatch(&PointerEvent::moved("b", Point::new(20.0, 0.0), 10))
            .unwrap();

        let names: Vec<&str> = dispatch.emissions.iter().map(|e| e.gesture.as_str()).collect();
        assert_eq!(names, ["pinch", "pan"]);
    }

    #[test]
    fn test_reset_gesture_drops_progress() {
        let mut region = Region::new();
        let key = region.register(Marker);
        region.dispatch(&PointerEvent::start("a", Point::ZERO, 0)).unwrap();

        assert!(region.reset_gesture("marker"));
        assert!(!region.reset_gesture("missing"));
        let input = region.input(&InputId::new("a")).unwrap();
        assert!(input.progress::<RotateProgress>(key).is_none());
    }

    /// Pan over one input, pinch over two, driven through one region.
    #[test]
    fn test_pan_and_pinch_scenario() {
        let mut region = Region::new();
        region.register(Pan::new());
        region.register(Pinch::new());

        let d = region.dispatch(&PointerEvent::start("A", Point::new(0.0, 0.0), 0)).unwrap();
        assert!(d.is_empty());

        let d = region.dispatch(&PointerEvent::moved("A", Point::new(10.0, 0.0), 16)).unwrap();
        assert_eq!(pan_translation(&d), Some(Vec2::new(10.0, 0.0)));
        assert_eq!(d.emitted("pinch").count(), 0);

        let d = region.dispatch(&PointerEvent::start("B", Point::new(100.0, 0.0), 32)).unwrap();
        assert!(d.is_empty());

        let d = region.dispatch(&PointerEvent::moved("B", Point::new(80.0, 0.0), 48)).unwrap();
        let change = d.emitted("pinch").find_map(|data| match data {
            GestureData::Pinch { change, .. } => Some(*change),
            _ => None,
        });
        let change = change.unwrap();
        assert!(change < 1.0);
        assert!((change - 35.0 / 45.0).abs() < 1e-9);

        // Centroid went from (55, 0) to (45, 0).
        assert_eq!(pan_translation(&d), Some(Vec2::new(-10.0, 0.0)));
    }
}
