//! Weave Core Library
//!
//! Multi-input gesture recognition for workspaces spread over several
//! surfaces. A [`Region`] receives namespaced pointer events from every
//! contributing device, keeps one [`Input`] per live pointer and fans a
//! frozen [`State`] out to each registered [`Gesture`].

pub mod config;
pub mod geometry;
pub mod gesture;
pub mod gestures;
pub mod input;
pub mod progress;
pub mod region;
pub mod state;
pub mod view;

pub use config::{ConfigError, GestureSpec, RegionConfig};
pub use geometry::{PointExt, angular_minus, midpoint};
pub use gesture::{
    Emission, Gesture, GestureData, GestureError, HookResult, ProgressScope, TransformDelta,
};
pub use gestures::{Pan, Pinch, Rotate, Swivel, Tap, Track, Transform};
pub use input::{Input, InputId, ModifierKey, Modifiers, Phase, PointerEvent};
pub use progress::GestureKey;
pub use region::{Dispatch, HookFailure, Region, RegionError};
pub use state::{InputSnapshot, State};
pub use view::View;
