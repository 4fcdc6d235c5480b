//! Device view transform.
//!
//! Every contributing surface shows the shared workspace through its own
//! view. The view maps workspace (logical) coordinates onto the device's raw
//! (physical) coordinates and back, which is how pointer events get both a
//! logical and a physical position.

use kurbo::{Affine, Point, Vec2};
use serde::{Deserialize, Serialize};

/// Scale used for a freshly created view.
pub const DEFAULT_SCALE: f64 = 1.0;

/// How a device looks at the workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct View {
    /// Device-space position of the workspace origin.
    pub offset: Vec2,
    /// Device pixels per workspace unit.
    pub scale: f64,
    /// Rotation of the workspace on the device, in radians.
    pub rotation: f64,
}

impl Default for View {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            scale: DEFAULT_SCALE,
            rotation: 0.0,
        }
    }
}

impl View {
    /// Create a view with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Workspace to device transform.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::rotate(self.rotation) * Affine::scale(self.scale)
    }

    /// Device to workspace transform.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.scale)
            * Affine::rotate(-self.rotation)
            * Affine::translate(-self.offset)
    }

    /// Convert a raw device point to workspace coordinates.
    pub fn to_workspace(&self, device_point: Point) -> Point {
        self.inverse_transform() * device_point
    }

    /// Convert a workspace point to raw device coordinates.
    pub fn to_device(&self, workspace_point: Point) -> Point {
        self.transform() * workspace_point
    }
}
