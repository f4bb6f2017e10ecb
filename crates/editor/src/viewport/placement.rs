//! Where a new block lands: on the ground grid or on top of another block.
//!
//! Both functions are pure. Rotation is about the vertical axis only, so it
//! never changes where a block's top face is.

use shared::{Block, BlockType, Position};

/// Snap to the nearest lattice coordinate. Ties go toward +inf so a pick on a
/// cell boundary resolves the same way from either side.
fn snap(v: f64) -> f64 {
    (v + 0.5).floor()
}

/// Position for a block of `selected` type dropped at a ground pick.
///
/// Only x and z of `point` are used; the block rests on y = 0.
pub fn resolve_ground_placement(point: Position, selected: BlockType) -> Position {
    [
        snap(point[0]),
        selected.stack_height() / 2.0,
        snap(point[2]),
    ]
}

/// Position for a block of `selected` type sitting on top of `target`.
pub fn resolve_stack_placement(target: &Block, selected: BlockType) -> Position {
    let [x, y, z] = target.position;
    let top = y + target.block_type.stack_height() / 2.0;
    [x, top + selected.stack_height() / 2.0, z]
}
