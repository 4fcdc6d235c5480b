//! Built-in recognizers.

mod pan;
mod pinch;
mod rotate;
mod swivel;
mod tap;
mod track;
mod transform;

pub use pan::{PAN_REQUIRED_INPUTS, Pan, PanConfig};
pub use pinch::{Pinch, PinchConfig};
pub use rotate::{Rotate, RotateConfig};
pub use swivel::{DEFAULT_DEADZONE_RADIUS, SWIVEL_REQUIRED_INPUTS, Swivel, SwivelConfig};
pub use tap::{Tap, TapConfig};
pub use track::{Track, TrackConfig};
pub use transform::{Transform, TransformConfig};
