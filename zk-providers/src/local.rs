// SPDX-License-Identifier: AGPL-3.0-or-later
//! Local disk file repository
//!
//! Folder and file records live in sled; file contents are plain blobs
//! under `<blob_dir>/<id[0..2]>/<id>`.

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sled::Tree;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;
use uuid::Uuid;
use zk_core::{FileRepository, Folder, NewFile, StoredFile, ZkError, ZkResult};

use crate::sled_store::{db_err, get_json, put_json, scan_json, SledStore};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct FileRecord {
    id: String,
    folder_id: String,
    name: String,
    mime_type: String,
    created: DateTime<Utc>,
    size: u64,
    checksum: String,
    trashed: bool,
}

/// Local disk repository
pub struct LocalFileRepository {
    id: String,
    store: SledStore,
    folders: Tree,
    files: Tree,
    blob_dir: PathBuf,
    base_url: String,
}

impl LocalFileRepository {
    /// `base_url` prefixes the view and download URLs handed out for files
    pub async fn open(
        store: &SledStore,
        blob_dir: impl AsRef<Path>,
        base_url: impl Into<String>,
    ) -> ZkResult<Self> {
        let blob_dir = blob_dir.as_ref().to_path_buf();
        fs::create_dir_all(&blob_dir).await?;

        Ok(Self {
            id: "local".to_string(),
            store: store.clone(),
            folders: store.tree("folders")?,
            files: store.tree("files")?,
            blob_dir,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn blob_path(&self, id: &str) -> PathBuf {
        // first two chars as directory for sharding
        self.blob_dir.join(&id[0..2]).join(id)
    }

    fn to_stored(&self, record: FileRecord) -> StoredFile {
        StoredFile {
            url: format!("{}/files/{}", self.base_url, record.id),
            download_url: format!("{}/files/{}/download", self.base_url, record.id),
            id: record.id,
            name: record.name,
            mime_type: record.mime_type,
            created: record.created,
            size: record.size,
            folder_id: record.folder_id,
            trashed: record.trashed,
            checksum: Some(record.checksum),
        }
    }

    fn record(&self, id: &str) -> ZkResult<FileRecord> {
        get_json(&self.files, id)?.ok_or_else(|| ZkError::FileNotFound(id.to_string()))
    }
}

#[async_trait]
impl FileRepository for LocalFileRepository {
    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        "Local disk"
    }

    async fn is_available(&self) -> bool {
        self.blob_dir.is_dir()
    }

    async fn find_folders(&self, name: &str) -> ZkResult<Vec<Folder>> {
        let mut folders: Vec<Folder> = scan_json(&self.folders)?;
        folders.retain(|f| f.name == name);
        folders.sort_by(|a, b| a.created.cmp(&b.created));
        Ok(folders)
    }

    async fn get_folder(&self, id: &str) -> ZkResult<Option<Folder>> {
        get_json(&self.folders, id)
    }

    async fn create_folder(&self, name: &str, description: &str) -> ZkResult<Folder> {
        let folder = Folder {
            id: Uuid::new_v4().simple().to_string(),
            name: name.to_string(),
            description: description.to_string(),
            created: Utc::now(),
        };
        put_json(&self.folders, &folder.id, &folder)?;
        self.store.flush().await?;
        Ok(folder)
    }

    async fn create_file(&self, folder_id: &str, file: NewFile) -> ZkResult<StoredFile> {
        if !self.folders.contains_key(folder_id).map_err(db_err)? {
            return Err(ZkError::FolderNotFound(folder_id.to_string()));
        }

        let id = Uuid::new_v4().simple().to_string();
        let path = self.blob_path(&id);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&path, &file.content).await?;

        let record = FileRecord {
            checksum: blake3::hash(&file.content).to_hex().to_string(),
            size: file.content.len() as u64,
            id,
            folder_id: folder_id.to_string(),
            name: file.name,
            mime_type: file.mime_type,
            created: file.created,
            trashed: false,
        };
        put_json(&self.files, &record.id, &record)?;
        self.store.flush().await?;

        debug!(file_id = %record.id, path = %path.display(), "wrote blob");
        Ok(self.to_stored(record))
    }

    async fn list_files(&self, folder_id: &str) -> ZkResult<Vec<StoredFile>> {
        let records: Vec<FileRecord> = scan_json(&self.files)?;
        Ok(records
            .into_iter()
            .filter(|r| r.folder_id == folder_id && !r.trashed)
            .map(|r| self.to_stored(r))
            .collect())
    }

    async fn get_file(&self, id: &str) -> ZkResult<StoredFile> {
        Ok(self.to_stored(self.record(id)?))
    }

    async fn read_file(&self, id: &str) -> ZkResult<Bytes> {
        let record = self.record(id)?;
        let data = fs::read(self.blob_path(&record.id)).await?;
        Ok(Bytes::from(data))
    }

    async fn trash_file(&self, id: &str) -> ZkResult<()> {
        let mut record = self.record(id)?;
        if !record.trashed {
            record.trashed = true;
            put_json(&self.files, id, &record)?;
            self.store.flush().await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_file(name: &str, content: &'static [u8]) -> NewFile {
        NewFile {
            name: name.to_string(),
            mime_type: "text/html".to_string(),
            content: Bytes::from_static(content),
            created: Utc::now(),
        }
    }

    async fn open(dir: &Path) -> LocalFileRepository {
        let store = SledStore::open(dir.join("db")).unwrap();
        LocalFileRepository::open(&store, dir.join("blobs"), "http://cards.test/").await.unwrap()
    }

    #[tokio::test]
    async fn test_create_and_read() {
        let dir = tempfile::tempdir().unwrap();
        let repo = open(dir.path()).await;
        assert!(repo.is_available().await);

        let folder = repo.create_folder("Zettelkasten_Cards", "cards").await.unwrap();
        let file = repo.create_file(&folder.id, new_file("a.html", b"<p>a</p>")).await.unwrap();

        assert_eq!(file.size, 8);
        assert_eq!(file.url, format!("http://cards.test/files/{}", file.id));
        assert_eq!(file.download_url, format!("http://cards.test/files/{}/download", file.id));
        assert_eq!(file.checksum.as_deref(), Some(blake3::hash(b"<p>a</p>").to_hex().as_str()));
        assert_eq!(repo.read_file(&file.id).await.unwrap(), Bytes::from_static(b"<p>a</p>"));
        assert_eq!(repo.list_files(&folder.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_trash_hides_from_listing() {
        let dir = tempfile::tempdir().unwrap();
        let repo = open(dir.path()).await;
        let folder = repo.create_folder("cards", "").await.unwrap();
        let file = repo.create_file(&folder.id, new_file("a", b"a")).await.unwrap();

        repo.trash_file(&file.id).await.unwrap();
        repo.trash_file(&file.id).await.unwrap();
        assert!(repo.list_files(&folder.id).await.unwrap().is_empty());
        assert!(repo.get_file(&file.id).await.unwrap().trashed);
    }

    #[tokio::test]
    async fn test_unknown_ids() {
        let dir = tempfile::tempdir().unwrap();
        let repo = open(dir.path()).await;

        assert!(repo.get_file("0000").await.unwrap_err().is_not_found());
        assert!(repo.read_file("../../etc/passwd").await.unwrap_err().is_not_found());
        assert!(repo.trash_file("nope").await.unwrap_err().is_not_found());
        assert!(repo.get_folder("nope").await.unwrap().is_none());
        let err = repo.create_file("nope", new_file("a", b"a")).await.unwrap_err();
        assert!(matches!(err, ZkError::FolderNotFound(_)));
    }

    #[tokio::test]
    async fn test_find_folders_oldest_first() {
        let dir = tempfile::tempdir().unwrap();
        let repo = open(dir.path()).await;
        let first = repo.create_folder("cards", "1").await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        repo.create_folder("other", "").await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let second = repo.create_folder("cards", "2").await.unwrap();

        let found = repo.find_folders("cards").await.unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].id, first.id);
        assert_eq!(found[1].id, second.id);
    }

    #[tokio::test]
    async fn test_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let (folder_id, file_id) = {
            let repo = open(dir.path()).await;
            let folder = repo.create_folder("cards", "").await.unwrap();
            let file = repo.create_file(&folder.id, new_file("kept", b"kept")).await.unwrap();
            (folder.id, file.id)
        };

        let repo = open(dir.path()).await;
        assert!(repo.get_folder(&folder_id).await.unwrap().is_some());
        let listed = repo.list_files(&folder_id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, file_id);
        assert_eq!(repo.read_file(&file_id).await.unwrap(), Bytes::from_static(b"kept"));
    }
}
