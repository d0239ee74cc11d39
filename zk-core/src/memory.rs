// SPDX-License-Identifier: AGPL-3.0-or-later
//! In-memory backends
//!
//! Used for tests and for running without a data directory. Nothing here
//! survives the process.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    backend::{FileRepository, PdfConverter, PropertyScope, SettingsRepository},
    clock::{Clock, SystemClock},
    error::{ZkError, ZkResult},
    file::{Folder, NewFile, StoredFile},
};

#[derive(Default)]
struct Contents {
    folders: Vec<Folder>,
    files: Vec<(StoredFile, Bytes)>,
}

/// File repository backed by a `Vec`
pub struct MemoryFileRepository {
    id: String,
    contents: RwLock<Contents>,
    next_id: AtomicU64,
    clock: Arc<dyn Clock>,
}

impl MemoryFileRepository {
    pub fn new() -> Self {
        Self {
            id: "memory".to_string(),
            contents: RwLock::new(Contents::default()),
            next_id: AtomicU64::new(1),
            clock: Arc::new(SystemClock),
        }
    }

    /// Stamps folder creation times from `clock`
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    fn allocate_id(&self, prefix: &str) -> String {
        format!("{}-{}", prefix, self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Number of files including trashed ones
    pub async fn file_count(&self) -> usize {
        self.contents.read().await.files.len()
    }
}

impl Default for MemoryFileRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FileRepository for MemoryFileRepository {
    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        "In-memory storage"
    }

    async fn is_available(&self) -> bool {
        true
    }

    async fn find_folders(&self, name: &str) -> ZkResult<Vec<Folder>> {
        let contents = self.contents.read().await;
        Ok(contents.folders.iter().filter(|f| f.name == name).cloned().collect())
    }

    async fn get_folder(&self, id: &str) -> ZkResult<Option<Folder>> {
        let contents = self.contents.read().await;
        Ok(contents.folders.iter().find(|f| f.id == id).cloned())
    }

    async fn create_folder(&self, name: &str, description: &str) -> ZkResult<Folder> {
        let folder = Folder {
            id: self.allocate_id("folder"),
            name: name.to_string(),
            description: description.to_string(),
            created: self.clock.now(),
        };
        self.contents.write().await.folders.push(folder.clone());
        Ok(folder)
    }

    async fn create_file(&self, folder_id: &str, file: NewFile) -> ZkResult<StoredFile> {
        let mut contents = self.contents.write().await;
        if !contents.folders.iter().any(|f| f.id == folder_id) {
            return Err(ZkError::FolderNotFound(folder_id.to_string()));
        }

        let id = self.allocate_id("file");
        let stored = StoredFile {
            url: format!("memory://files/{}", id),
            download_url: format!("memory://files/{}/download", id),
            id,
            name: file.name,
            mime_type: file.mime_type,
            created: file.created,
            size: file.content.len() as u64,
            folder_id: folder_id.to_string(),
            trashed: false,
            checksum: None,
        };
        contents.files.push((stored.clone(), file.content));
        Ok(stored)
    }

    async fn list_files(&self, folder_id: &str) -> ZkResult<Vec<StoredFile>> {
        let contents = self.contents.read().await;
        Ok(contents
            .files
            .iter()
            .map(|(file, _)| file)
            .filter(|f| f.folder_id == folder_id && !f.trashed)
            .cloned()
            .collect())
    }

    async fn get_file(&self, id: &str) -> ZkResult<StoredFile> {
        let contents = self.contents.read().await;
        contents
            .files
            .iter()
            .find(|(f, _)| f.id == id)
            .map(|(f, _)| f.clone())
            .ok_or_else(|| ZkError::FileNotFound(id.to_string()))
    }

    async fn read_file(&self, id: &str) -> ZkResult<Bytes> {
        let contents = self.contents.read().await;
        contents
            .files
            .iter()
            .find(|(f, _)| f.id == id)
            .map(|(_, data)| data.clone())
            .ok_or_else(|| ZkError::FileNotFound(id.to_string()))
    }

    async fn trash_file(&self, id: &str) -> ZkResult<()> {
        let mut contents = self.contents.write().await;
        let (file, _) = contents
            .files
            .iter_mut()
            .find(|(f, _)| f.id == id)
            .ok_or_else(|| ZkError::FileNotFound(id.to_string()))?;
        file.trashed = true;
        Ok(())
    }
}

/// Property store backed by a `HashMap`
#[derive(Default)]
pub struct MemorySettingsRepository {
    values: RwLock<HashMap<(PropertyScope, String), String>>,
}

impl MemorySettingsRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SettingsRepository for MemorySettingsRepository {
    async fn get_property(&self, scope: &PropertyScope, key: &str) -> ZkResult<Option<String>> {
        let values = self.values.read().await;
        Ok(values.get(&(scope.clone(), key.to_string())).cloned())
    }

    async fn set_property(&self, scope: &PropertyScope, key: &str, value: &str) -> ZkResult<()> {
        self.values
            .write()
            .await
            .insert((scope.clone(), key.to_string()), value.to_string());
        Ok(())
    }

    async fn delete_property(&self, scope: &PropertyScope, key: &str) -> ZkResult<()> {
        self.values.write().await.remove(&(scope.clone(), key.to_string()));
        Ok(())
    }
}

/// Wraps the markup in a minimal PDF header instead of rendering it
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryPdfConverter;

#[async_trait]
impl PdfConverter for MemoryPdfConverter {
    fn name(&self) -> &str {
        "memory"
    }

    async fn html_to_pdf(&self, html: &str) -> ZkResult<Bytes> {
        let mut pdf = b"%PDF-1.4\n".to_vec();
        pdf.extend_from_slice(html.as_bytes());
        Ok(Bytes::from(pdf))
    }
}
