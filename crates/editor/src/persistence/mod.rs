//! Saved works: the store seam and the sign-in gate in front of it.
//!
//! The editor never talks to a concrete backend. Anything implementing
//! [`WorkStore`] will do; two are provided here (in-memory and one JSON file
//! per work on disk).

mod file;
mod memory;

pub use file::FileWorkStore;
pub use memory::MemoryWorkStore;

use async_trait::async_trait;
use chrono::Utc;
use shared::{NewWork, Work, WorkId, WorkPatch};

use crate::error::{Error, Result};

/// Public listing size cap
pub const PUBLIC_LISTING_LIMIT: usize = 50;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("work {0} not found")]
    NotFound(WorkId),
    #[error("work {0} belongs to another owner")]
    Forbidden(WorkId),
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored work is malformed: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        Error::Upstream(err.to_string())
    }
}

/// Persistence collaborator for named works.
///
/// Writes take the acting owner and must refuse to touch another owner's
/// work.
#[async_trait]
pub trait WorkStore: Send + Sync {
    /// Create a work owned by `owner`; id and timestamps are assigned here
    async fn create(&self, owner: &str, draft: NewWork) -> StoreResult<Work>;

    /// Apply `patch`, bump `updated_at` and return the work as stored
    async fn update(&self, owner: &str, id: &str, patch: WorkPatch) -> StoreResult<Work>;

    async fn delete(&self, owner: &str, id: &str) -> StoreResult<()>;

    async fn get(&self, id: &str) -> StoreResult<Option<Work>>;

    /// Owner's works, most recently updated first
    async fn list_by_owner(&self, owner: &str) -> StoreResult<Vec<Work>>;

    /// Public works, newest first, at most [`PUBLIC_LISTING_LIMIT`]
    async fn list_public(&self) -> StoreResult<Vec<Work>>;
}

pub(crate) fn new_work(owner: &str, draft: NewWork) -> Work {
    let now = Utc::now();
    Work {
        id: uuid::Uuid::new_v4().to_string(),
        owner_id: owner.to_string(),
        title: draft.title,
        blocks: draft.blocks,
        is_public: draft.is_public,
        created_at: now,
        updated_at: now,
    }
}

pub(crate) fn check_owner(work: &Work, owner: &str) -> StoreResult<()> {
    if work.owner_id == owner {
        Ok(())
    } else {
        Err(StoreError::Forbidden(work.id.clone()))
    }
}

pub(crate) fn apply_patch(work: &mut Work, patch: WorkPatch) {
    if let Some(title) = patch.title {
        work.title = title;
    }
    if let Some(blocks) = patch.blocks {
        work.blocks = blocks;
    }
    if let Some(is_public) = patch.is_public {
        work.is_public = is_public;
    }
    work.updated_at = Utc::now();
}

pub(crate) fn owner_listing(works: impl IntoIterator<Item = Work>, owner: &str) -> Vec<Work> {
    let mut mine: Vec<Work> = works.into_iter().filter(|w| w.owner_id == owner).collect();
    mine.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    mine
}

pub(crate) fn public_listing(works: impl IntoIterator<Item = Work>) -> Vec<Work> {
    let mut public: Vec<Work> = works.into_iter().filter(|w| w.is_public).collect();
    public.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    public.truncate(PUBLIC_LISTING_LIMIT);
    public
}

/// Signed-in owner, or `AuthRequired`
pub fn require_identity(identity: Option<&str>) -> Result<&str> {
    identity
        .filter(|id| !id.trim().is_empty())
        .ok_or(Error::AuthRequired)
}

/// The signed-in owner's works
pub async fn list_my_works(store: &dyn WorkStore, identity: Option<&str>) -> Result<Vec<Work>> {
    let owner = require_identity(identity)?;
    let works = store.list_by_owner(owner).await?;
    tracing::debug!("Listed {} works for {owner}", works.len());
    Ok(works)
}

pub async fn delete_work(store: &dyn WorkStore, identity: Option<&str>, id: &str) -> Result<()> {
    let owner = require_identity(identity)?;
    store.delete(owner, id).await?;
    tracing::info!("Deleted work {id}");
    Ok(())
}

/// Public gallery; no sign-in needed
pub async fn list_public_works(store: &dyn WorkStore) -> Result<Vec<Work>> {
    Ok(store.list_public().await?)
}
