use std::collections::HashMap;

use async_trait::async_trait;
use shared::{NewWork, Work, WorkId, WorkPatch};
use tokio::sync::RwLock;

use super::{
    apply_patch, check_owner, new_work, owner_listing, public_listing, StoreError, StoreResult,
    WorkStore,
};

/// Works kept in process memory
#[derive(Default)]
pub struct MemoryWorkStore {
    works: RwLock<HashMap<WorkId, Work>>,
}

impl MemoryWorkStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.works.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.works.read().await.is_empty()
    }
}

#[async_trait]
impl WorkStore for MemoryWorkStore {
    async fn create(&self, owner: &str, draft: NewWork) -> StoreResult<Work> {
        let work = new_work(owner, draft);
        self.works
            .write()
            .await
            .insert(work.id.clone(), work.clone());
        Ok(work)
    }

    async fn update(&self, owner: &str, id: &str, patch: WorkPatch) -> StoreResult<Work> {
        let mut works = self.works.write().await;
        let work = works
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        check_owner(work, owner)?;
        apply_patch(work, patch);
        Ok(work.clone())
    }

    async fn delete(&self, owner: &str, id: &str) -> StoreResult<()> {
        let mut works = self.works.write().await;
        let work = works
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        check_owner(work, owner)?;
        works.remove(id);
        Ok(())
    }

    async fn get(&self, id: &str) -> StoreResult<Option<Work>> {
        Ok(self.works.read().await.get(id).cloned())
    }

    async fn list_by_owner(&self, owner: &str) -> StoreResult<Vec<Work>> {
        let works = self.works.read().await;
        Ok(owner_listing(works.values().cloned(), owner))
    }

    async fn list_public(&self) -> StoreResult<Vec<Work>> {
        let works = self.works.read().await;
        Ok(public_listing(works.values().cloned()))
    }
}
