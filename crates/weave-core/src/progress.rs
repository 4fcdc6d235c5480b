//! Gesture-private scratch records kept between hook calls.
//!
//! Gestures never keep input-keyed state on themselves. Records live either
//! on the [`Input`](crate::input::Input) they describe, or for gesture-wide
//! values on the [`Region`](crate::region::Region), and are keyed by the
//! gesture's registration key plus the record kind.

use kurbo::Point;
use std::collections::HashMap;

use crate::input::InputId;

/// Stable identity of a registered gesture, assigned by the region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GestureKey(pub usize);

/// Discriminant of [`ProgressRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgressKind {
    Pan,
    Pinch,
    Rotate,
    Swivel,
    Tap,
}

/// Key of one record slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgressKey {
    pub gesture: GestureKey,
    pub kind: ProgressKind,
}

/// Last centroid a pan measured from.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PanProgress {
    pub previous: Option<Point>,
}

/// Last spread a pinch measured from.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PinchProgress {
    pub previous_distance: Option<f64>,
}

/// Last angle of one input around the centroid.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RotateProgress {
    pub previous_angle: Option<f64>,
}

/// Arming state of a swivel on one input.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SwivelProgress {
    pub active: bool,
    pub pivot: Option<Point>,
    pub previous_angle: f64,
}

/// An input that lifted recently enough to still count towards a tap.
#[derive(Debug, Clone, PartialEq)]
pub struct EndedInput {
    pub id: InputId,
    pub start_time_ms: u64,
    pub point: Point,
    pub total_distance: f64,
}

/// Inputs a tap is waiting to complete with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TapProgress {
    pub ended: Vec<EndedInput>,
}

/// Tagged union of every record shape.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressRecord {
    Pan(PanProgress),
    Pinch(PinchProgress),
    Rotate(RotateProgress),
    Swivel(SwivelProgress),
    Tap(TapProgress),
}

/// A record shape that can be stored in a [`ProgressMap`].
pub trait Record: Default + Into<ProgressRecord> {
    const KIND: ProgressKind;

    fn project(record: &ProgressRecord) -> Option<&Self>;

    /// The record held in `slot`, replacing a record of another kind with
    /// `Self::default()` first.
    fn project_mut(slot: &mut ProgressRecord) -> &mut Self;
}

macro_rules! impl_record {
    ($ty:ident, $variant:ident) => {
        impl From<$ty> for ProgressRecord {
            fn from(record: $ty) -> Self {
                ProgressRecord::$variant(record)
            }
        }

        impl Record for $ty {
            const KIND: ProgressKind = ProgressKind::$variant;

            fn project(record: &ProgressRecord) -> Option<&Self> {
                match record {
                    ProgressRecord::$variant(inner) => Some(inner),
                    _ => None,
                }
            }

            fn project_mut(slot: &mut ProgressRecord) -> &mut Self {
                match slot {
                    ProgressRecord::$variant(inner) => inner,
                    other => {
                        *other = ProgressRecord::$variant(Self::default());
                        Self::project_mut(other)
                    }
                }
            }
        }
    };
}

impl_record!(PanProgress, Pan);
impl_record!(PinchProgress, Pinch);
impl_record!(RotateProgress, Rotate);
impl_record!(SwivelProgress, Swivel);
impl_record!(TapProgress, Tap);

/// Record slots keyed by gesture and kind.
#[derive(Debug, Clone, Default)]
pub struct ProgressMap {
    records: HashMap<ProgressKey, ProgressRecord>,
}

impl ProgressMap {
    fn key<R: Record>(gesture: GestureKey) -> ProgressKey {
        ProgressKey {
            gesture,
            kind: R::KIND,
        }
    }

    pub fn get<R: Record>(&self, gesture: GestureKey) -> Option<&R> {
        self.records.get(&Self::key::<R>(gesture)).and_then(R::project)
    }

    /// Record `R` for `gesture`, inserting `R::default()` if absent.
    pub fn get_or_default<R: Record>(&mut self, gesture: GestureKey) -> &mut R {
        let slot = self
            .records
            .entry(Self::key::<R>(gesture))
            .or_insert_with(|| R::default().into());
        R::project_mut(slot)
    }

    /// Drop every record owned by `gesture`.
    pub fn remove_gesture(&mut self, gesture: GestureKey) {
        self.records.retain(|key, _| key.gesture != gesture);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
