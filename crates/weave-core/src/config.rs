//! Declarative gesture registration.
//!
//! ```json
//! { "gestures": [
//!     { "type": "pan", "mute_key": "ctrl" },
//!     { "type": "pinch", "min_inputs": 2 },
//!     { "type": "tap", "name": "double-tap", "num_inputs": 2 }
//! ] }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::gesture::{Gesture, GestureError};
use crate::gestures::{
    Pan, PanConfig, Pinch, PinchConfig, Rotate, RotateConfig, Swivel, SwivelConfig, Tap, TapConfig,
    Track, TrackConfig, Transform, TransformConfig,
};
use crate::region::Region;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Gesture(#[from] GestureError),
}

/// One gesture to register, with its options. `name` overrides the default
/// emission name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GestureSpec {
    Pan {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(flatten)]
        config: PanConfig,
    },
    Pinch {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(flatten)]
        config: PinchConfig,
    },
    Rotate {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(flatten)]
        config: RotateConfig,
    },
    Swivel {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(flatten)]
        config: SwivelConfig,
    },
    Tap {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(flatten)]
        config: TapConfig,
    },
    Track {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(flatten)]
        config: TrackConfig,
    },
    Transform {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(flatten)]
        config: TransformConfig,
    },
}

fn named<G>(gesture: G, name: &Option<String>, rename: impl FnOnce(G, String) -> G) -> G {
    match name {
        Some(name) => rename(gesture, name.clone()),
        None => gesture,
    }
}

impl GestureSpec {
    /// Validate the options and construct the gesture.
    pub fn build(&self) -> Result<Box<dyn Gesture>, GestureError> {
        let gesture: Box<dyn Gesture> = match self {
            GestureSpec::Pan { name, config } => {
                Box::new(named(Pan::with_config(*config)?, name, Pan::with_name))
            }
            GestureSpec::Pinch { name, config } => {
                Box::new(named(Pinch::with_config(*config)?, name, Pinch::with_name))
            }
            GestureSpec::Rotate { name, config } => {
                Box::new(named(Rotate::with_config(*config)?, name, Rotate::with_name))
            }
            GestureSpec::Swivel { name, config } => {
                Box::new(named(Swivel::with_config(*config)?, name, Swivel::with_name))
            }
            GestureSpec::Tap { name, config } => {
                Box::new(named(Tap::with_config(*config)?, name, Tap::with_name))
            }
            GestureSpec::Track { name, config } => {
                Box::new(named(Track::with_config(config.clone())?, name, Track::with_name))
            }
            GestureSpec::Transform { name, config } => {
                Box::new(named(Transform::with_config(*config)?, name, Transform::with_name))
            }
        };
        Ok(gesture)
    }
}

/// The gestures a region starts with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionConfig {
    #[serde(default)]
    pub gestures: Vec<GestureSpec>,
}

impl RegionConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build a region with every gesture registered in order. Fails on the
    /// first invalid gesture, before any event is dispatched.
    pub fn build(&self) -> Result<Region, GestureError> {
        let mut region = Region::new();
        for spec in &self.gestures {
            region.register_boxed(spec.build()?);
        }
        Ok(region)
    }
}
