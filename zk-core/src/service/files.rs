// SPDX-License-Identifier: AGPL-3.0-or-later
//! File store operations

use bytes::Bytes;
use tracing::{debug, info};

use super::{CardService, SavedFile};
use crate::{
    error::ZkResult,
    file::{FileNameTemplate, NewFile, StoredFile, MIME_HTML, MIME_PDF},
};

impl CardService {
    /// Writes content into the storage folder under a dated name
    pub async fn save_file(
        &self,
        content: Bytes,
        mime_type: &str,
        template: FileNameTemplate,
    ) -> ZkResult<SavedFile> {
        let folder = self.storage_folder().await?;
        let now = self.clock.now();
        let new_file = NewFile {
            name: template.file_name(now.date_naive()),
            mime_type: mime_type.to_string(),
            content,
            created: now,
        };

        let stored = self.files.create_file(&folder.id, new_file).await?;
        info!(file_id = %stored.id, name = %stored.name, size = stored.size, "saved file");
        Ok(stored.into())
    }

    /// Renders the markup to PDF and stores the result
    pub async fn generate_pdf(&self, html: &str) -> ZkResult<SavedFile> {
        debug!(converter = self.converter.name(), bytes = html.len(), "rendering pdf");
        let pdf = self.converter.html_to_pdf(html).await?;
        self.save_file(pdf, MIME_PDF, FileNameTemplate::Cards).await
    }

    /// Stores the markup as an HTML template file
    pub async fn save_html_file(&self, html: &str) -> ZkResult<SavedFile> {
        self.save_file(Bytes::copy_from_slice(html.as_bytes()), MIME_HTML, FileNameTemplate::Template)
            .await
    }

    /// Files in the storage folder, newest first
    pub async fn list_files(&self) -> ZkResult<Vec<StoredFile>> {
        let folder = self.storage_folder().await?;
        let mut files = self.files.list_files(&folder.id).await?;
        files.sort_by(|a, b| b.created.cmp(&a.created));
        Ok(files)
    }

    /// Moves a file to the trash
    pub async fn delete_file(&self, id: &str) -> ZkResult<()> {
        self.files.trash_file(id).await?;
        info!(file_id = %id, "moved file to trash");
        Ok(())
    }

    /// Metadata and content of a file, for serving its URLs
    pub async fn open_file(&self, id: &str) -> ZkResult<(StoredFile, Bytes)> {
        let file = self.files.get_file(id).await?;
        if file.trashed {
            return Err(crate::ZkError::FileNotFound(id.to_string()));
        }
        let content = self.files.read_file(id).await?;
        Ok((file, content))
    }
}
