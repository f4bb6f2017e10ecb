//! Pointer events delivered by the rendering surface.
//!
//! The renderer does the 3D picking and reports what the pointer hit plus the
//! raw screen coordinates of the press and release. The same button orbits
//! the camera, so a press/release pair only counts as a click when the
//! pointer barely moved.

use serde::{Deserialize, Serialize};
use shared::BlockId;

/// Max per-axis screen displacement (pixels) that still counts as a click
pub const CLICK_TOLERANCE_PX: f32 = 5.0;

/// Screen-space pointer position in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// What the pointer resolved to in the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PickTarget {
    /// World-space point on the ground plane
    Ground { x: f64, z: f64 },
    /// An existing block
    Block { id: BlockId },
}

/// A completed press/release pair over the viewport
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub target: PickTarget,
    pub down: ScreenPoint,
    pub up: ScreenPoint,
    /// Second click of a double click
    #[serde(default)]
    pub double: bool,
}

impl PointerEvent {
    /// Single click with no pointer travel
    pub fn click(target: PickTarget) -> Self {
        Self {
            target,
            down: ScreenPoint::default(),
            up: ScreenPoint::default(),
            double: false,
        }
    }

    pub fn gesture(&self, tolerance: f32) -> Gesture {
        classify_gesture(self.down, self.up, tolerance)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// Placement or removal
    Click,
    /// Camera manipulation; never edits the world
    Drag,
}

pub fn classify_gesture(down: ScreenPoint, up: ScreenPoint, tolerance: f32) -> Gesture {
    let dx = (up.x - down.x).abs();
    let dy = (up.y - down.y).abs();
    if dx > tolerance || dy > tolerance {
        Gesture::Drag
    } else {
        Gesture::Click
    }
}
