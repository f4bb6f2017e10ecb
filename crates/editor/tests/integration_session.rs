//! Integration tests for EditSession command sequences.
//!
//! Drives the session the way the viewport and toolbar would and checks
//! world/history consistency after each sequence.

use brickyard_lib::fixtures::*;
use brickyard_lib::state::{EditSession, PointerOutcome, WorldState};
use brickyard_lib::viewport::picking::{PickTarget, PointerEvent, ScreenPoint};
use shared::BlockType;

fn approx(a: [f64; 3], b: [f64; 3]) -> bool {
    a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-9)
}

#[test]
fn test_history_length_is_commands_plus_one() {
    let mut s = EditSession::default();
    let a = s.place_on_ground(0.0, 0.0);
    let b = s.place_on_ground(1.0, 0.0);
    s.stack_on(&a);
    s.remove_block(&b);
    s.place_on_ground(-3.0, 2.0);
    s.remove_block("never-existed");

    assert_eq!(s.history().len(), 7);

    while s.undo() {}
    assert_eq!(s.history().cursor(), 0);
    assert_eq!(s.world(), &WorldState::empty());
}

#[test]
fn test_undo_then_redo_restores_exact_state() {
    let mut s = EditSession::default();
    let base = s.place_on_ground(2.0, 2.0);
    s.select_type(BlockType::Plate);
    s.stack_on(&base);
    s.rotate_selection();
    s.place_on_ground(4.0, 4.0);

    let before = s.world().clone();
    assert!(s.undo());
    assert_ne!(s.world(), &before);
    assert!(s.redo());
    assert_eq!(s.world(), &before);
}

#[test]
fn test_new_edit_after_undo_discards_redo() {
    let mut s = EditSession::default();
    s.place_on_ground(0.0, 0.0);
    s.place_on_ground(1.0, 0.0);
    assert!(s.undo());
    assert!(s.can_redo());

    s.place_on_ground(5.0, 5.0);
    assert!(!s.can_redo());
    assert!(!s.redo());
    assert_eq!(s.block_count(), 2);
}

#[test]
fn test_ground_then_stack_positions() {
    let mut s = EditSession::default();
    let base = s.place_on_ground(2.4, -1.6);
    assert!(approx(s.world().find(&base).unwrap().position, [2.0, 0.5, -2.0]));

    s.select_type(BlockType::Plate);
    let top = s.stack_on(&base).unwrap();
    assert!(approx(s.world().find(&top).unwrap().position, [2.0, 1.15, -2.0]));

    s.select_type(BlockType::Cube);
    let third = s.stack_on(&top).unwrap();
    assert!(approx(s.world().find(&third).unwrap().position, [2.0, 1.8, -2.0]));
}

#[test]
fn test_drag_suppresses_placement() {
    let mut s = EditSession::default();
    let drag = PointerEvent {
        target: PickTarget::Ground { x: 0.0, z: 0.0 },
        down: ScreenPoint::new(300.0, 200.0),
        up: ScreenPoint::new(310.0, 200.0),
        double: false,
    };
    assert_eq!(s.handle_pointer(&drag), PointerOutcome::Ignored);
    assert_eq!(s.block_count(), 0);

    let click = PointerEvent {
        up: ScreenPoint::new(303.0, 200.0),
        ..drag
    };
    assert!(matches!(s.handle_pointer(&click), PointerOutcome::Placed(_)));
    assert_eq!(s.block_count(), 1);
}

#[test]
fn test_unsaved_flag_after_load_and_edits() {
    let saved = work("w1", "alice", "Tower", cube_tower(3));

    let mut s = EditSession::default();
    assert!(s.load_work(saved.clone(), |_| true).unwrap());
    assert!(!s.has_unsaved_changes());
    s.place_on_ground(4.0, 4.0);
    assert!(s.has_unsaved_changes());

    let mut s = EditSession::default();
    s.load_work(saved.clone(), |_| true).unwrap();
    s.remove_block("t2");
    assert!(s.has_unsaved_changes());

    let mut s = EditSession::default();
    s.load_work(saved, |_| true).unwrap();
    assert!(s.clear());
    assert!(s.has_unsaved_changes());
    assert!(s.undo());
    assert!(!s.has_unsaved_changes());
}

#[test]
fn test_unsaved_flag_is_order_sensitive() {
    let blocks = vec![ground_cube("a", 0.0, 0.0), ground_cube("b", 1.0, 0.0)];
    let mut s = EditSession::default();
    s.load_work(work("w1", "alice", "Pair", blocks.clone()), |_| true).unwrap();

    s.bulk_replace(vec![blocks[1].clone(), blocks[0].clone()]);
    assert!(s.has_unsaved_changes());
}

#[test]
fn test_unbound_session_unsaved_only_when_non_empty() {
    let mut s = EditSession::default();
    assert!(!s.has_unsaved_changes());
    let id = s.place_on_ground(0.0, 0.0);
    assert!(s.has_unsaved_changes());
    s.remove_block(&id);
    assert!(!s.has_unsaved_changes());
}

#[test]
fn test_remove_missing_id_records_unchanged_state() {
    let mut s = EditSession::default();
    s.place_on_ground(0.0, 0.0);
    let before = s.world().clone();
    let len = s.history().len();

    s.remove_block("missing");
    assert_eq!(s.history().len(), len + 1);
    assert_eq!(s.history().current(), &before);
    assert_eq!(s.world(), &before);
}

#[test]
fn test_removing_support_leaves_upper_block_in_place() {
    let mut s = EditSession::default();
    let base = s.place_on_ground(0.0, 0.0);
    let top = s.stack_on(&base).unwrap();
    s.remove_block(&base);

    let floating = s.world().find(&top).unwrap();
    assert!(approx(floating.position, [0.0, 1.5, 0.0]));
}

#[test]
fn test_load_then_undo_is_noop() {
    let mut s = EditSession::default();
    s.place_on_ground(0.0, 0.0);
    s.load_work(work("w1", "alice", "Tower", cube_tower(2)), |_| true).unwrap();
    assert!(!s.undo());
    assert_eq!(s.block_count(), 2);
}

#[test]
fn test_long_session_undoes_back_to_empty_world() {
    let mut s = EditSession::default();
    for i in 0..150 {
        s.place_on_ground(i as f64, 0.0);
    }
    assert_eq!(s.history().len(), 151);

    while s.undo() {}
    assert_eq!(s.history().cursor(), 0);
    assert!(s.world().is_empty());
}

#[test]
fn test_work_with_repeated_ids_is_not_loaded() {
    let mut s = EditSession::default();
    let kept = s.place_on_ground(0.0, 0.0);
    let twins = vec![ground_cube("a", 0.0, 0.0), ground_cube("a", 2.0, 0.0)];

    let err = s
        .load_work(work("w1", "alice", "Twins", twins), |_| true)
        .unwrap_err();
    assert!(err.to_string().contains("duplicate block id a"));
    assert!(s.current_work().is_none());
    assert_eq!(s.world().ids(), vec![kept.as_str()]);

    s.remove_block("a");
    assert_eq!(s.block_count(), 1);
}
