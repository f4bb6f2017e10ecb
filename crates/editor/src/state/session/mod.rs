//! Editing session
//!
//! `EditSession` owns the current world, its undo history, the bound work
//! and the toolbar selections. Every user-visible edit goes through it and
//! records exactly one history entry. The session is a plain value: callers
//! hold it and pass it around, there is no global instance.

mod edit_ops;
mod generate_ops;
mod lifecycle;
mod pointer_ops;
mod save_ops;

pub use lifecycle::ConfirmReason;
pub use pointer_ops::PointerOutcome;
pub use save_ops::SaveOutcome;

use shared::{BlockId, BlockType, HexColor, Rotation, Work};

use super::history::HistoryStack;
use super::settings::EditorSettings;
use super::world::WorldState;

pub struct EditSession {
    world: WorldState,
    history: HistoryStack,
    /// Work the current world was loaded from or last saved as
    current_work: Option<Work>,
    selected_type: BlockType,
    selected_color: HexColor,
    selected_rotation: Rotation,
    click_tolerance: f32,
    /// Bumped whenever the visible world changes
    version: u64,
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new(&EditorSettings::default())
    }
}

impl EditSession {
    pub fn new(settings: &EditorSettings) -> Self {
        let world = WorldState::empty();
        let history = match settings.history_limit {
            Some(limit) => HistoryStack::with_limit(world.clone(), limit),
            None => HistoryStack::new(world.clone()),
        };
        Self {
            history,
            world,
            current_work: None,
            selected_type: BlockType::default(),
            selected_color: HexColor::default(),
            selected_rotation: Rotation::default(),
            click_tolerance: settings.click_tolerance_px,
            version: 0,
        }
    }

    pub fn world(&self) -> &WorldState {
        &self.world
    }

    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    pub fn current_work(&self) -> Option<&Work> {
        self.current_work.as_ref()
    }

    pub fn block_count(&self) -> usize {
        self.world.count()
    }

    /// Current scene version (increments on every world change)
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ── Selections ────────────────────────────────────────────

    pub fn selected_type(&self) -> BlockType {
        self.selected_type
    }

    pub fn selected_color(&self) -> &HexColor {
        &self.selected_color
    }

    pub fn selected_rotation(&self) -> Rotation {
        self.selected_rotation
    }

    pub fn select_type(&mut self, block_type: BlockType) {
        self.selected_type = block_type;
    }

    pub fn select_color(&mut self, color: HexColor) {
        self.selected_color = color;
    }

    /// Turn the next placed block a quarter turn further
    pub fn rotate_selection(&mut self) -> Rotation {
        self.selected_rotation = self.selected_rotation.next();
        self.selected_rotation
    }

    // ── Derived state ─────────────────────────────────────────

    /// Whether the world differs from what was last loaded or saved
    pub fn has_unsaved_changes(&self) -> bool {
        match &self.current_work {
            None => !self.world.is_empty(),
            Some(work) => work.blocks.as_slice() != self.world.blocks(),
        }
    }

    // ── Internals ─────────────────────────────────────────────

    /// Replace the world and record it as one history entry
    fn record(&mut self, next: WorldState) {
        self.history.push(next.clone());
        self.world = next;
        self.version += 1;
    }

    /// Replace the world and start a fresh history at it
    fn restart(&mut self, initial: WorldState) {
        self.history.reset(initial.clone());
        self.world = initial;
        self.version += 1;
    }

    fn new_block_id() -> BlockId {
        uuid::Uuid::new_v4().to_string()
    }
}
