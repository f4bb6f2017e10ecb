use std::path::{Path, PathBuf};

use async_trait::async_trait;
use shared::{NewWork, Work, WorkPatch};
use tokio::sync::Mutex;

use super::{
    apply_patch, check_owner, new_work, owner_listing, public_listing, StoreError, StoreResult,
    WorkStore,
};

/// One pretty-printed `<id>.json` per work in a directory.
pub struct FileWorkStore {
    dir: PathBuf,
    /// Serializes read-modify-write cycles
    write_lock: Mutex<()>,
}

impl FileWorkStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Ids are generated UUIDs; anything else cannot name a stored file.
    fn work_path(&self, id: &str) -> Option<PathBuf> {
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        valid.then(|| self.dir.join(format!("{id}.json")))
    }

    async fn read_work(path: &Path) -> StoreResult<Work> {
        let data = tokio::fs::read(path).await?;
        Ok(serde_json::from_slice(&data)?)
    }

    async fn load(&self, id: &str) -> StoreResult<Option<Work>> {
        let Some(path) = self.work_path(id) else {
            return Ok(None);
        };
        match Self::read_work(&path).await {
            Ok(work) => Ok(Some(work)),
            Err(StoreError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn write(&self, work: &Work) -> StoreResult<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let final_path = self.dir.join(format!("{}.json", work.id));
        let tmp_path = self.dir.join(format!("{}.json.tmp", work.id));
        let bytes = serde_json::to_vec_pretty(work)?;
        let written = match tokio::fs::write(&tmp_path, bytes).await {
            Ok(()) => tokio::fs::rename(&tmp_path, &final_path).await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            if let Err(cleanup) = tokio::fs::remove_file(&tmp_path).await {
                tracing::debug!("No temp file to clean up at {}: {cleanup}", tmp_path.display());
            }
            return Err(e.into());
        }
        Ok(())
    }

    async fn load_all(&self) -> StoreResult<Vec<Work>> {
        let mut works = Vec::new();
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(works),
            Err(e) => return Err(e.into()),
        };
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match Self::read_work(&path).await {
                Ok(work) => works.push(work),
                Err(e) => tracing::warn!("Skipping {}: {e}", path.display()),
            }
        }
        Ok(works)
    }
}

#[async_trait]
impl WorkStore for FileWorkStore {
    async fn create(&self, owner: &str, draft: NewWork) -> StoreResult<Work> {
        let _guard = self.write_lock.lock().await;
        let work = new_work(owner, draft);
        self.write(&work).await?;
        tracing::debug!("Stored work {} in {}", work.id, self.dir.display());
        Ok(work)
    }

    async fn update(&self, owner: &str, id: &str, patch: WorkPatch) -> StoreResult<Work> {
        let _guard = self.write_lock.lock().await;
        let mut work = self
            .load(id)
            .await?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        check_owner(&work, owner)?;
        apply_patch(&mut work, patch);
        self.write(&work).await?;
        Ok(work)
    }

    async fn delete(&self, owner: &str, id: &str) -> StoreResult<()> {
        let _guard = self.write_lock.lock().await;
        let work = self
            .load(id)
            .await?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        check_owner(&work, owner)?;
        tokio::fs::remove_file(self.dir.join(format!("{}.json", work.id))).await?;
        Ok(())
    }

    async fn get(&self, id: &str) -> StoreResult<Option<Work>> {
        self.load(id).await
    }

    async fn list_by_owner(&self, owner: &str) -> StoreResult<Vec<Work>> {
        Ok(owner_listing(self.load_all().await?, owner))
    }

    async fn list_public(&self) -> StoreResult<Vec<Work>> {
        Ok(public_listing(self.load_all().await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{Block, BlockType, HexColor, Rotation};

    fn draft(title: &str) -> NewWork {
        NewWork {
            title: title.into(),
            blocks: vec![Block {
                id: "b1".into(),
                block_type: BlockType::Arch,
                position: [0.0, 0.5, 0.0],
                rotation: Rotation::Deg90,
                color: HexColor::default(),
            }],
            is_public: true,
        }
    }

    #[tokio::test]
    async fn test_round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileWorkStore::new(dir.path().join("works"));

        let work = store.create("alice", draft("Arch")).await.unwrap();
        assert!(store.dir().join(format!("{}.json", work.id)).exists());

        let reopened = FileWorkStore::new(dir.path().join("works"));
        let fetched = reopened.get(&work.id).await.unwrap().unwrap();
        assert_eq!(fetched, work);
        assert_eq!(reopened.list_public().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileWorkStore::new(dir.path());
        let work = store.create("alice", draft("Arch")).await.unwrap();

        let updated = store
            .update(
                "alice",
                &work.id,
                WorkPatch {
                    title: Some("Gate".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.title, "Gate");
        assert_eq!(store.get(&work.id).await.unwrap().unwrap(), updated);

        let err = store.delete("bob", &work.id).await.unwrap_err();
        assert!(matches!(err, StoreError::Forbidden(_)));
        store.delete("alice", &work.id).await.unwrap();
        assert!(store.get(&work.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_missing_dir_lists_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileWorkStore::new(dir.path().join("never-created"));
        assert!(store.list_by_owner("alice").await.unwrap().is_empty());
        assert!(store.get("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_path_like_ids_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileWorkStore::new(dir.path());
        assert!(store.get("../settings").await.unwrap().is_none());
        let err = store
            .update("alice", "../settings", WorkPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_failed_rename_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileWorkStore::new(dir.path());
        let work = new_work("alice", draft("Arch"));
        // A directory in the way makes the final rename fail
        std::fs::create_dir(dir.path().join(format!("{}.json", work.id))).unwrap();

        assert!(store.write(&work).await.is_err());
        assert!(!dir.path().join(format!("{}.json.tmp", work.id)).exists());
    }

    #[tokio::test]
    async fn test_malformed_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileWorkStore::new(dir.path());
        store.create("alice", draft("Arch")).await.unwrap();
        std::fs::write(dir.path().join("garbage.json"), "{").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "hello").unwrap();
        assert_eq!(store.list_by_owner("alice").await.unwrap().len(), 1);
    }
}
