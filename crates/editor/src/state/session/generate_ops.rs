//! Assisted generation applied to the session

use shared::Block;

use super::EditSession;
use crate::ai::BlockGenerator;
use crate::error::{Error, Result};

impl EditSession {
    /// Replace the world with a generated batch as one undoable step.
    ///
    /// The world and history are only touched after the generator has
    /// returned a complete, valid batch. Returns the number of blocks placed.
    pub async fn generate(&mut self, generator: &dyn BlockGenerator, prompt: &str) -> Result<usize> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(Error::Validation("prompt must not be empty".into()));
        }

        let descriptors = generator.generate(prompt).await.inspect_err(|e| {
            tracing::warn!("Generation failed: {e}");
        })?;

        let blocks: Vec<Block> = descriptors
            .into_iter()
            .map(|d| d.into_block(Self::new_block_id()))
            .collect();
        let count = blocks.len();
        self.bulk_replace(blocks);
        Ok(count)
    }
}
