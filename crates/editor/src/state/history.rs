//! Undo/redo history over world snapshots

use super::world::WorldState;

/// Linear, cursor-addressed snapshot history.
///
/// The snapshot at `cursor` is always the current world. Pushing after an
/// undo discards the redo branch. Unbounded unless built with a limit, so
/// undoing all the way back reaches the initial state.
#[derive(Debug, Clone)]
pub struct HistoryStack {
    snapshots: Vec<WorldState>,
    cursor: usize,
    /// Oldest snapshots are dropped past this many
    limit: Option<usize>,
}

impl Default for HistoryStack {
    fn default() -> Self {
        Self::new(WorldState::empty())
    }
}

impl HistoryStack {
    pub fn new(initial: WorldState) -> Self {
        Self {
            snapshots: vec![initial],
            cursor: 0,
            limit: None,
        }
    }

    /// Bounded history; a zero limit is clamped to one snapshot
    pub fn with_limit(initial: WorldState, limit: usize) -> Self {
        Self {
            limit: Some(limit.max(1)),
            ..Self::new(initial)
        }
    }

    /// Record `snapshot` as the new current state
    pub fn push(&mut self, snapshot: WorldState) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(snapshot);
        if let Some(limit) = self.limit {
            if self.snapshots.len() > limit {
                self.snapshots.remove(0);
            }
        }
        self.cursor = self.snapshots.len() - 1;
    }

    /// Step back; `None` when already at the oldest snapshot
    pub fn undo(&mut self) -> Option<WorldState> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.snapshots[self.cursor].clone())
    }

    /// Step forward; `None` when there is nothing to redo
    pub fn redo(&mut self) -> Option<WorldState> {
        if self.cursor + 1 >= self.snapshots.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.snapshots[self.cursor].clone())
    }

    /// Start a fresh linear history at `initial`
    pub fn reset(&mut self, initial: WorldState) {
        self.snapshots.clear();
        self.snapshots.push(initial);
        self.cursor = 0;
    }

    pub fn current(&self) -> &WorldState {
        &self.snapshots[self.cursor]
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }
}
