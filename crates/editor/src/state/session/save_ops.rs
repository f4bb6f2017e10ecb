//! Saving the world as a work

use shared::{NewWork, WorkId, WorkPatch};

use super::EditSession;
use crate::error::{Error, Result};
use crate::persistence::{require_identity, WorkStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The bound work now holds the current blocks
    Updated,
    /// Nothing is bound yet; ask for a title and call `save_as`
    NeedsTitle,
}

impl EditSession {
    fn ensure_savable(&self) -> Result<()> {
        if self.world.is_empty() {
            return Err(Error::Validation(
                "build something before saving".into(),
            ));
        }
        Ok(())
    }

    /// Save into the bound work.
    ///
    /// The binding is replaced with the work the store returns, so the
    /// local `updated_at` is the store's timestamp.
    pub async fn save(
        &mut self,
        store: &dyn WorkStore,
        identity: Option<&str>,
    ) -> Result<SaveOutcome> {
        let owner = require_identity(identity)?;
        self.ensure_savable()?;

        let Some(work_id) = self.current_work.as_ref().map(|w| w.id.clone()) else {
            return Ok(SaveOutcome::NeedsTitle);
        };

        let updated = store
            .update(owner, &work_id, WorkPatch::blocks(self.world.to_vec()))
            .await?;
        self.current_work = Some(updated);
        tracing::info!("Saved work {work_id}");
        Ok(SaveOutcome::Updated)
    }

    /// Always create a new work from the current blocks and bind it
    pub async fn save_as(
        &mut self,
        store: &dyn WorkStore,
        identity: Option<&str>,
        title: &str,
        is_public: bool,
    ) -> Result<WorkId> {
        let owner = require_identity(identity)?;
        self.ensure_savable()?;
        let title = title.trim();
        if title.is_empty() {
            return Err(Error::Validation("title must not be empty".into()));
        }

        let work = store
            .create(
                owner,
                NewWork {
                    title: title.to_string(),
                    blocks: self.world.to_vec(),
                    is_public,
                },
            )
            .await?;
        let id = work.id.clone();
        tracing::info!("Created work {id} ({title})");
        self.current_work = Some(work);
        Ok(id)
    }

    /// Prefill for the save-as title field
    pub fn suggested_save_as_title(&self) -> String {
        self.current_work
            .as_ref()
            .map(|w| format!("{} (copy)", w.title))
            .unwrap_or_default()
    }
}
