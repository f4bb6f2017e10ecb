//! Immutable world snapshots

use std::collections::HashSet;
use std::sync::Arc;

use shared::{Block, BlockId};

use crate::error::{Error, Result};

/// The ordered set of placed blocks.
///
/// A `WorldState` is never edited in place: every edit builds a new slice, so
/// clones are cheap and history snapshots can share storage safely.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldState {
    blocks: Arc<[Block]>,
}

impl Default for WorldState {
    fn default() -> Self {
        Self::empty()
    }
}

impl WorldState {
    pub fn empty() -> Self {
        Self {
            blocks: Arc::from(Vec::new()),
        }
    }

    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        Self {
            blocks: Arc::from(blocks),
        }
    }

    /// Build from blocks that came from outside the session (a saved work,
    /// an import). Repeated ids are a `Validation` error.
    pub fn try_from_blocks(blocks: Vec<Block>) -> Result<Self> {
        Self::check_unique_ids(&blocks)?;
        Ok(Self::from_blocks(blocks))
    }

    /// `Validation` error naming the first id that occurs twice
    pub fn check_unique_ids(blocks: &[Block]) -> Result<()> {
        let mut seen = HashSet::with_capacity(blocks.len());
        match blocks.iter().find(|b| !seen.insert(b.id.as_str())) {
            Some(dup) => Err(Error::Validation(format!("duplicate block id {}", dup.id))),
            None => Ok(()),
        }
    }

    /// New state with `block` appended.
    ///
    /// # Panics
    ///
    /// If a block with the same id is already present. Ids come from UUIDs, so
    /// a collision means a caller bug and must not reach the history.
    pub fn with_added(&self, block: Block) -> Self {
        assert!(
            self.find(&block.id).is_none(),
            "duplicate block id {} inserted into world",
            block.id
        );
        let mut blocks = Vec::with_capacity(self.blocks.len() + 1);
        blocks.extend_from_slice(&self.blocks);
        blocks.push(block);
        Self::from_blocks(blocks)
    }

    /// New state without the block `id`; unknown ids yield an equal state.
    pub fn with_removed(&self, id: &str) -> Self {
        let blocks: Vec<Block> = self
            .blocks
            .iter()
            .filter(|b| b.id != id)
            .cloned()
            .collect();
        Self::from_blocks(blocks)
    }

    /// Wholesale substitution (load, generate, clear)
    pub fn replaced_with(&self, blocks: Vec<Block>) -> Self {
        Self::from_blocks(blocks)
    }

    pub fn count(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn iter(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter()
    }

    pub fn ids(&self) -> Vec<BlockId> {
        self.blocks.iter().map(|b| b.id.clone()).collect()
    }

    pub fn to_vec(&self) -> Vec<Block> {
        self.blocks.to_vec()
    }
}
