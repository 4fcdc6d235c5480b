//! Frozen snapshot of all tracked inputs at one dispatched event.

use kurbo::Point;

use crate::geometry::{PointExt, midpoint};
use crate::input::{Input, InputId, Phase, PointerEvent};

/// Immutable copy of one input as of the current event.
#[derive(Debug, Clone, PartialEq)]
pub struct InputSnapshot {
    pub id: InputId,
    pub phase: Phase,
    /// Current position in workspace coordinates.
    pub point: Point,
    /// Current raw device position.
    pub physical: Point,
    /// Position at first contact.
    pub initial: Point,
    pub start_time_ms: u64,
    /// Path length so far.
    pub total_distance: f64,
}

impl InputSnapshot {
    fn of(input: &Input) -> Self {
        let current = input.current();
        Self {
            id: input.id().clone(),
            phase: current.phase,
            point: current.point,
            physical: current.physical,
            initial: input.initial().point,
            start_time_ms: input.start_time_ms(),
            total_distance: input.total_distance(),
        }
    }

    pub fn is_active(&self) -> bool {
        !self.phase.is_terminal()
    }
}

/// What every gesture sees for one event.
///
/// `inputs` includes the input whose end or cancel is being dispatched;
/// `active` does not. Logical fields are in workspace coordinates, physical
/// fields in raw device coordinates.
#[derive(Debug, Clone)]
pub struct State {
    event: PointerEvent,
    inputs: Vec<InputSnapshot>,
    active: Vec<InputSnapshot>,
    active_points: Vec<Point>,
    physical_points: Vec<Point>,
    centroid: Point,
    physical_centroid: Point,
}

impl State {
    /// Snapshot `inputs` for the originating `event`.
    pub fn capture<'a>(event: &PointerEvent, inputs: impl IntoIterator<Item = &'a Input>) -> Self {
        let inputs: Vec<InputSnapshot> = inputs.into_iter().map(InputSnapshot::of).collect();
        let active: Vec<InputSnapshot> = inputs.iter().filter(|i| i.is_active()).cloned().collect();
        let active_points: Vec<Point> = active.iter().map(|i| i.point).collect();
        let physical_points: Vec<Point> = active.iter().map(|i| i.physical).collect();
        let centroid = midpoint(&active_points).unwrap_or(event.point);
        let physical_centroid = midpoint(&physical_points).unwrap_or(event.physical);

        Self {
            event: event.clone(),
            inputs,
            active,
            active_points,
            physical_points,
            centroid,
            physical_centroid,
        }
    }

    /// The event this snapshot was built for.
    pub fn event(&self) -> &PointerEvent {
        &self.event
    }

    /// Every tracked input, terminal ones included.
    pub fn inputs(&self) -> &[InputSnapshot] {
        &self.inputs
    }

    /// Inputs still in contact.
    pub fn active(&self) -> &[InputSnapshot] {
        &self.active
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Inputs whose latest sample is in `phase`.
    pub fn in_phase(&self, phase: Phase) -> impl Iterator<Item = &InputSnapshot> + '_ {
        self.inputs.iter().filter(move |i| i.phase == phase)
    }

    pub fn active_points(&self) -> &[Point] {
        &self.active_points
    }

    /// Mean of the active points, or the event point when nothing is active.
    pub fn centroid(&self) -> Point {
        self.centroid
    }

    pub fn physical_points(&self) -> &[Point] {
        &self.physical_points
    }

    pub fn physical_centroid(&self) -> Point {
        self.physical_centroid
    }

    /// Mean distance of the active points from the centroid.
    pub fn radius(&self) -> f64 {
        self.centroid.average_distance_to(&self.active_points)
    }
}
