//! Local edits: add, remove, clear, bulk replace, undo/redo

use shared::{Block, BlockId, Position};

use super::EditSession;

impl EditSession {
    /// Place a block built from the current selections at `position`
    pub fn add_block(&mut self, position: Position) -> BlockId {
        let block = Block {
            id: Self::new_block_id(),
            block_type: self.selected_type,
            position,
            rotation: self.selected_rotation,
            color: self.selected_color.clone(),
        };
        let id = block.id.clone();
        tracing::debug!("Adding {} {id} at {position:?}", block.block_type);
        let next = self.world.with_added(block);
        self.record(next);
        id
    }

    /// Remove block `id`. Records a history entry even when the id is
    /// unknown, since the user still took the action.
    pub fn remove_block(&mut self, id: &str) {
        if !self.world.contains(id) {
            tracing::debug!("Remove of unknown block {id}");
        }
        let next = self.world.with_removed(id);
        self.record(next);
    }

    /// Empty the world; false (and no history entry) when already empty
    pub fn clear(&mut self) -> bool {
        if self.world.is_empty() {
            return false;
        }
        let next = self.world.replaced_with(Vec::new());
        self.record(next);
        true
    }

    /// Substitute the whole world as a single undoable step
    pub fn bulk_replace(&mut self, blocks: Vec<Block>) {
        tracing::debug!("Bulk replace with {} blocks", blocks.len());
        let next = self.world.replaced_with(blocks);
        self.record(next);
    }

    /// Undo last change; false when there is nothing to undo
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(snapshot) => {
                self.world = snapshot;
                self.version += 1;
                true
            }
            None => false,
        }
    }

    /// Redo last undone change; false when there is nothing to redo
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => {
                self.world = snapshot;
                self.version += 1;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{BlockType, HexColor, Rotation};

    #[test]
    fn test_add_uses_selections() {
        let mut s = EditSession::default();
        s.select_type(BlockType::Cylinder);
        s.select_color(HexColor::parse("#22C55E").unwrap());
        s.rotate_selection();
        let id = s.add_block([1.0, 0.5, 2.0]);

        let b = s.world().find(&id).unwrap();
        assert_eq!(b.block_type, BlockType::Cylinder);
        assert_eq!(b.color.as_str(), "#22C55E");
        assert_eq!(b.rotation, Rotation::Deg90);
        assert_eq!(b.position, [1.0, 0.5, 2.0]);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut s = EditSession::default();
        let a = s.add_block([0.0, 0.5, 0.0]);
        let b = s.add_block([0.0, 0.5, 0.0]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_history_tracks_world() {
        let mut s = EditSession::default();
        let a = s.add_block([0.0, 0.5, 0.0]);
        s.add_block([1.0, 0.5, 0.0]);
        s.remove_block(&a);
        assert_eq!(s.history().current(), s.world());
        s.undo();
        assert_eq!(s.history().current(), s.world());
        s.redo();
        assert_eq!(s.history().current(), s.world());
    }

    #[test]
    fn test_clear_on_empty_is_noop() {
        let mut s = EditSession::default();
        assert!(!s.clear());
        assert_eq!(s.history().len(), 1);

        s.add_block([0.0, 0.5, 0.0]);
        assert!(s.clear());
        assert_eq!(s.block_count(), 0);
        assert_eq!(s.history().len(), 3);
    }

    #[test]
    fn test_version_bumps_on_world_changes_only() {
        let mut s = EditSession::default();
        let v0 = s.version();
        s.select_type(BlockType::Plate);
        assert_eq!(s.version(), v0);
        s.add_block([0.0, 0.15, 0.0]);
        assert_eq!(s.version(), v0 + 1);
        assert!(!s.redo());
        assert_eq!(s.version(), v0 + 1);
        assert!(s.undo());
        assert_eq!(s.version(), v0 + 2);
    }

    #[test]
    fn test_bulk_replace_is_one_entry() {
        let mut s = EditSession::default();
        s.add_block([0.0, 0.5, 0.0]);
        let blocks: Vec<Block> = (0..12)
            .map(|i| Block {
                id: format!("g{i}"),
                block_type: BlockType::Cube,
                position: [i as f64, 0.5, 0.0],
                rotation: Rotation::Deg0,
                color: HexColor::default(),
            })
            .collect();
        s.bulk_replace(blocks);
        assert_eq!(s.block_count(), 12);
        assert_eq!(s.history().len(), 3);
        assert!(s.undo());
        assert_eq!(s.block_count(), 1);
    }
}
