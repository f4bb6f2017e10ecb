//! Pointer gestures from the viewport turned into edits

use shared::BlockId;

use super::EditSession;
use crate::viewport::picking::{Gesture, PickTarget, PointerEvent};
use crate::viewport::placement::{resolve_ground_placement, resolve_stack_placement};

/// What a pointer event did to the world
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerOutcome {
    Placed(BlockId),
    Removed(BlockId),
    /// Drag, or a target that no longer exists
    Ignored,
}

impl EditSession {
    /// Place a block of the selected type on the ground grid
    pub fn place_on_ground(&mut self, x: f64, z: f64) -> BlockId {
        let position = resolve_ground_placement([x, 0.0, z], self.selected_type);
        self.add_block(position)
    }

    /// Stack a block of the selected type on `target_id`
    pub fn stack_on(&mut self, target_id: &str) -> Option<BlockId> {
        let position = {
            let target = self.world.find(target_id)?;
            resolve_stack_placement(target, self.selected_type)
        };
        Some(self.add_block(position))
    }

    /// Apply a click from the viewport.
    ///
    /// Drags move the camera and never edit. A click on the ground places, a
    /// click on a block stacks on it, a double click on a block removes it.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> PointerOutcome {
        if event.gesture(self.click_tolerance) == Gesture::Drag {
            return PointerOutcome::Ignored;
        }
        match (&event.target, event.double) {
            (PickTarget::Ground { x, z }, false) => {
                PointerOutcome::Placed(self.place_on_ground(*x, *z))
            }
            (PickTarget::Ground { .. }, true) => PointerOutcome::Ignored,
            (PickTarget::Block { id }, false) => match self.stack_on(id) {
                Some(new_id) => PointerOutcome::Placed(new_id),
                None => {
                    tracing::debug!("Stack target {id} is gone");
                    PointerOutcome::Ignored
                }
            },
            (PickTarget::Block { id }, true) => {
                self.remove_block(id);
                PointerOutcome::Removed(id.clone())
            }
        }
    }
}
