//! Viewport-facing geometry: pointer events and block placement.
//!
//! Ray casting happens in the renderer; this side only sees what was hit.

pub mod picking;
pub mod placement;

pub use picking::{classify_gesture, Gesture, PickTarget, PointerEvent, ScreenPoint};
pub use placement::{resolve_ground_placement, resolve_stack_placement};
