//! Pointer events and per-pointer input lifecycles.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::progress::{GestureKey, ProgressMap, Record};
use crate::view::View;

/// Lifecycle stage of a pointer or of the event that moved it there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Start,
    Move,
    End,
    Cancel,
}

impl Phase {
    /// End and cancel both finish an input.
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::End | Phase::Cancel)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Start => "start",
            Phase::Move => "move",
            Phase::End => "end",
            Phase::Cancel => "cancel",
        };
        f.write_str(name)
    }
}

/// Identifier of a pointer, unique across every contributing device.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputId(String);

impl InputId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Prefix a device-local pointer id with its device so two devices'
    /// pointer `0` stay distinct.
    pub fn namespaced(device: &str, pointer: impl fmt::Display) -> Self {
        Self(format!("{device}:{pointer}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InputId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for InputId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for InputId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// A single modifier key, used to gate or mute gestures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierKey {
    Shift,
    Ctrl,
    Alt,
    Meta,
}

impl Modifiers {
    pub fn is_pressed(&self, key: ModifierKey) -> bool {
        match key {
            ModifierKey::Shift => self.shift,
            ModifierKey::Ctrl => self.ctrl,
            ModifierKey::Alt => self.alt,
            ModifierKey::Meta => self.meta,
        }
    }

    /// Same state with `key` held down.
    pub fn with(mut self, key: ModifierKey) -> Self {
        match key {
            ModifierKey::Shift => self.shift = true,
            ModifierKey::Ctrl => self.ctrl = true,
            ModifierKey::Alt => self.alt = true,
            ModifierKey::Meta => self.meta = true,
        }
        self
    }
}

/// One pointer transition as delivered to a region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub id: InputId,
    pub phase: Phase,
    /// Position in workspace coordinates.
    pub point: Point,
    /// Raw device position, before any view transform.
    pub physical: Point,
    /// Milliseconds on the feed's clock.
    pub time_ms: u64,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl PointerEvent {
    /// Event whose logical and physical positions coincide.
    pub fn new(id: impl Into<InputId>, phase: Phase, point: Point, time_ms: u64) -> Self {
        Self {
            id: id.into(),
            phase,
            point,
            physical: point,
            time_ms,
            modifiers: Modifiers::default(),
        }
    }

    pub fn start(id: impl Into<InputId>, point: Point, time_ms: u64) -> Self {
        Self::new(id, Phase::Start, point, time_ms)
    }

    pub fn moved(id: impl Into<InputId>, point: Point, time_ms: u64) -> Self {
        Self::new(id, Phase::Move, point, time_ms)
    }

    pub fn end(id: impl Into<InputId>, point: Point, time_ms: u64) -> Self {
        Self::new(id, Phase::End, point, time_ms)
    }

    pub fn cancel(id: impl Into<InputId>, point: Point, time_ms: u64) -> Self {
        Self::new(id, Phase::Cancel, point, time_ms)
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Treat `point` as a raw device position and map it into the workspace
    /// through `view`.
    pub fn through_view(mut self, view: &View) -> Self {
        self.physical = self.point;
        self.point = view.to_workspace(self.physical);
        self
    }
}

/// One recorded position of an input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub point: Point,
    pub physical: Point,
    pub phase: Phase,
    pub time_ms: u64,
}

impl Sample {
    fn from_event(event: &PointerEvent) -> Self {
        Self {
            point: event.point,
            physical: event.physical,
            phase: event.phase,
            time_ms: event.time_ms,
        }
    }
}

/// Lifecycle of one physical pointer from first contact to lift-off.
#[derive(Debug, Clone)]
pub struct Input {
    id: InputId,
    /// Append-only, never empty.
    history: Vec<Sample>,
    start_time_ms: u64,
    progress: ProgressMap,
}

impl Input {
    /// Begin tracking a pointer from its start event.
    pub(crate) fn begin(event: &PointerEvent) -> Self {
        Self {
            id: event.id.clone(),
            history: vec![Sample::from_event(event)],
            start_time_ms: event.time_ms,
            progress: ProgressMap::default(),
        }
    }

    /// Record a later event for this pointer.
    pub(crate) fn record(&mut self, event: &PointerEvent) {
        self.history.push(Sample::from_event(event));
    }

    pub fn id(&self) -> &InputId {
        &self.id
    }

    pub fn phase(&self) -> Phase {
        self.current().phase
    }

    pub fn start_time_ms(&self) -> u64 {
        self.start_time_ms
    }

    pub fn history(&self) -> &[Sample] {
        &self.history
    }

    /// First recorded sample.
    pub fn initial(&self) -> &Sample {
        &self.history[0]
    }

    /// Latest recorded sample.
    pub fn current(&self) -> &Sample {
        &self.history[self.history.len() - 1]
    }

    /// Sample before the latest one, if any.
    pub fn previous(&self) -> Option<&Sample> {
        self.history.len().checked_sub(2).map(|i| &self.history[i])
    }

    pub fn is_active(&self) -> bool {
        !self.phase().is_terminal()
    }

    /// Time from first contact to the latest sample.
    pub fn duration_ms(&self) -> u64 {
        self.current().time_ms.saturating_sub(self.start_time_ms)
    }

    /// Path length over every recorded logical point.
    pub fn total_distance(&self) -> f64 {
        self.history
            .windows(2)
            .map(|pair| pair[0].point.distance(pair[1].point))
            .sum()
    }

    /// Progress record `R` of the given gesture, created on first access.
    pub fn progress_mut<R: Record>(&mut self, gesture: GestureKey) -> &mut R {
        self.progress.get_or_default::<R>(gesture)
    }

    /// Progress record `R` of the given gesture, if one was created.
    pub fn progress<R: Record>(&self, gesture: GestureKey) -> Option<&R> {
        self.progress.get::<R>(gesture)
    }

    pub(crate) fn clear_progress(&mut self, gesture: GestureKey) {
        self.progress.remove_gesture(gesture);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::RotateProgress;

    fn begin(point: Point) -> Input {
        Input::begin(&PointerEvent::start("a", point, 100))
    }

    #[test]
    fn test_phase_terminal() {
        assert!(!Phase::Start.is_terminal());
        assert!(!Phase::Move.is_terminal());
        assert!(Phase::End.is_terminal());
        assert!(Phase::Cancel.is_terminal());
        assert_eq!(Phase::Cancel.to_string(), "cancel");
    }

    #[test]
    fn test_namespaced_ids_differ() {
        let table = InputId::namespaced("table", 0);
        let wall = InputId::namespaced("wall", 0);
        assert_ne!(table, wall);
        assert_eq!(table.as_str(), "table:0");
    }

    #[test]
    fn test_modifiers() {
        let mods = Modifiers::default().with(ModifierKey::Ctrl);
        assert!(mods.is_pressed(ModifierKey::Ctrl));
        assert!(!mods.is_pressed(ModifierKey::Shift));
    }

    #[test]
    fn test_through_view_keeps_physical() {
        let view = View {
            scale: 2.0,
            ..View::default()
        };
        let event = PointerEvent::start("a", Point::new(40.0, 20.0), 0).through_view(&view);
        assert_eq!(event.physical, Point::new(40.0, 20.0));
        assert!((event.point.x - 20.0).abs() < 1e-9);
        assert!((event.point.y - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_history_and_phase() {
        let mut input = begin(Point::ZERO);
        assert_eq!(input.phase(), Phase::Start);
        assert!(input.previous().is_none());

        input.record(&PointerEvent::moved("a", Point::new(3.0, 4.0), 150));
        input.record(&PointerEvent::end("a", Point::new(3.0, 4.0), 180));

        assert_eq!(input.history().len(), 3);
        assert_eq!(input.phase(), Phase::End);
        assert!(!input.is_active());
        assert_eq!(input.initial().point, Point::ZERO);
        assert_eq!(input.previous().map(|s| s.phase), Some(Phase::Move));
        assert_eq!(input.start_time_ms(), 100);
        assert_eq!(input.duration_ms(), 80);
    }

    #[test]
    fn test_total_distance_is_path_length() {
        let mut input = begin(Point::ZERO);
        input.record(&PointerEvent::moved("a", Point::new(3.0, 4.0), 110));
        input.record(&PointerEvent::moved("a", Point::new(0.0, 0.0), 120));
        input.record(&PointerEvent::end("a", Point::new(0.0, 0.0), 130));
        assert!((input.total_distance() - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_progress_is_lazy() {
        let mut input = begin(Point::ZERO);
        let key = GestureKey(3);
        assert!(input.progress::<RotateProgress>(key).is_none());

        input.progress_mut::<RotateProgress>(key).previous_angle = Some(1.5);
        assert_eq!(input.progress::<RotateProgress>(key).and_then(|p| p.previous_angle), Some(1.5));

        input.clear_progress(key);
        assert!(input.progress::<RotateProgress>(key).is_none());
    }
}
