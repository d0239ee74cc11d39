// SPDX-License-Identifier: AGPL-3.0-or-later
//! Card service
//!
//! Every operation the front end can invoke, expressed over injected
//! storage handles. Each call runs to completion on its own; the only
//! state shared between calls lives in the repositories.

mod data;
mod files;
mod folder;
mod maintenance;
mod settings;

use serde::Serialize;
use std::sync::Arc;

use crate::{
    backend::{FileRepository, PdfConverter, SettingsRepository},
    clock::{Clock, SystemClock},
    file::StoredFile,
    format,
    stats::UsageStats,
};

pub use folder::FOLDER_ID_KEY;

/// Service tunables
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub folder_name: String,
    pub folder_description: String,
    pub retention_days: i64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            folder_name: "Zettelkasten_Cards".to_string(),
            folder_description: "Папка для хранения карточек Zettelkasten и шаблонов".to_string(),
            retention_days: 30,
        }
    }
}

/// Identifying metadata of a freshly written file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedFile {
    pub file_name: String,
    pub file_id: String,
    pub url: String,
    pub download_url: String,
}

impl From<StoredFile> for SavedFile {
    fn from(file: StoredFile) -> Self {
        Self {
            file_name: file.name,
            file_id: file.id,
            url: file.url,
            download_url: file.download_url,
        }
    }
}

/// Outcome of a retention sweep
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanupReport {
    pub deleted_count: u64,
    pub message: String,
}

pub struct CardService {
    files: Arc<dyn FileRepository>,
    settings: Arc<dyn SettingsRepository>,
    converter: Arc<dyn PdfConverter>,
    clock: Arc<dyn Clock>,
    config: ServiceConfig,
}

impl CardService {
    pub fn new(
        files: Arc<dyn FileRepository>,
        settings: Arc<dyn SettingsRepository>,
        converter: Arc<dyn PdfConverter>,
    ) -> Self {
        Self {
            files,
            settings,
            converter,
            clock: Arc::new(SystemClock),
            config: ServiceConfig::default(),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_config(mut self, config: ServiceConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn file_repository(&self) -> &dyn FileRepository {
        self.files.as_ref()
    }

    pub fn converter(&self) -> &dyn PdfConverter {
        self.converter.as_ref()
    }

    /// Fresh statistics over the storage folder
    pub async fn usage_stats(&self) -> crate::ZkResult<UsageStats> {
        let files = self.list_files().await?;
        Ok(UsageStats::collect(&files))
    }

    /// New card identifier dated by the service clock
    pub fn generate_card_id(&self) -> String {
        format::card_id(self.clock.now(), &mut rand::thread_rng())
    }
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use crate::file::{FileNameTemplate, MIME_HTML, MIME_PDF};
    use crate::format::NO_FILES_PLACEHOLDER;
    use bytes::Bytes;

    #[tokio::test]
    async fn test_usage_stats_empty_folder() {
        let fx = fixture();
        let stats = fx.service.usage_stats().await.unwrap();
        assert_eq!(stats.total_files, 0);
        assert_eq!(stats.last_created_formatted, NO_FILES_PLACEHOLDER);
    }

    #[tokio::test]
    async fn test_usage_stats_after_saves() {
        let fx = fixture();
        fx.service
            .save_file(Bytes::from_static(b"<p>a</p>"), MIME_HTML, FileNameTemplate::Template)
            .await
            .unwrap();
        fx.service.generate_pdf("<p>cards</p>").await.unwrap();

        let stats = fx.service.usage_stats().await.unwrap();
        assert_eq!(stats.total_files, 2);
        assert_eq!(stats.html_files, 1);
        assert_eq!(stats.pdf_files, 1);
        assert_eq!(stats.json_files, 0);
        assert_eq!(stats.last_created_formatted, "15.06.2024");

        let pdf = fx.service.list_files().await.unwrap().into_iter().find(|f| f.mime_type == MIME_PDF).unwrap();
        assert!(stats.total_size > pdf.size);
    }

    #[test]
    fn test_generate_card_id_uses_clock() {
        let fx = fixture();
        let id = fx.service.generate_card_id();
        assert!(id.starts_with("2024.06.15."));
        assert_eq!(id.len(), 14);
    }
}
