// SPDX-License-Identifier: AGPL-3.0-or-later
//! Usage statistics over the storage folder

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    file::{FileKind, StoredFile},
    format::{format_file_size, format_short_date, NO_FILES_PLACEHOLDER},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageStats {
    pub total_files: u64,
    pub pdf_files: u64,
    pub html_files: u64,
    pub json_files: u64,
    pub total_size: u64,
    pub last_created: Option<DateTime<Utc>>,
    pub total_size_formatted: String,
    pub last_created_formatted: String,
}

impl UsageStats {
    pub fn collect<'a>(files: impl IntoIterator<Item = &'a StoredFile>) -> Self {
        let mut stats = Self {
            total_files: 0,
            pdf_files: 0,
            html_files: 0,
            json_files: 0,
            total_size: 0,
            last_created: None,
            total_size_formatted: String::new(),
            last_created_formatted: String::new(),
        };

        for file in files {
            stats.total_files += 1;
            stats.total_size += file.size;

            match file.kind() {
                FileKind::Pdf => stats.pdf_files += 1,
                FileKind::Html => stats.html_files += 1,
                FileKind::Json => stats.json_files += 1,
                FileKind::Other => {}
            }

            if stats.last_created.map_or(true, |last| file.created > last) {
                stats.last_created = Some(file.created);
            }
        }

        stats.total_size_formatted = format_file_size(stats.total_size);
        stats.last_created_formatted = stats
            .last_created
            .map(format_short_date)
            .unwrap_or_else(|| NO_FILES_PLACEHOLDER.to_string());
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::{MIME_HTML, MIME_JSON, MIME_PDF};

    fn file(mime: &str, size: u64, created: &str) -> StoredFile {
        StoredFile {
            id: format!("{mime}-{created}"),
            name: "f".into(),
            mime_type: mime.into(),
            created: DateTime::parse_from_rfc3339(created).unwrap().into(),
            size,
            url: String::new(),
            download_url: String::new(),
            folder_id: "folder".into(),
            trashed: false,
            checksum: None,
        }
    }

    #[test]
    fn test_empty() {
        let stats = UsageStats::collect(Vec::<StoredFile>::new().iter());
        assert_eq!(stats.total_files, 0);
        assert_eq!(stats.total_size, 0);
        assert_eq!(stats.last_created, None);
        assert_eq!(stats.total_size_formatted, "0 Bytes");
        assert_eq!(stats.last_created_formatted, NO_FILES_PLACEHOLDER);
    }

    #[test]
    fn test_counts_by_kind() {
        let files = vec![
            file(MIME_PDF, 1024, "2024-05-01T10:00:00Z"),
            file(MIME_PDF, 512, "2024-05-03T10:00:00Z"),
            file(MIME_HTML, 256, "2024-05-02T10:00:00Z"),
            file(MIME_JSON, 128, "2024-04-30T10:00:00Z"),
            file("image/png", 128, "2024-04-01T10:00:00Z"),
        ];

        let stats = UsageStats::collect(&files);
        assert_eq!(stats.total_files, 5);
        assert_eq!(stats.pdf_files, 2);
        assert_eq!(stats.html_files, 1);
        assert_eq!(stats.json_files, 1);
        assert_eq!(stats.total_size, 2048);
        assert_eq!(stats.total_size_formatted, "2 KB");
        assert_eq!(stats.last_created_formatted, "03.05.2024");
    }

    #[test]
    fn test_json_shape() {
        let stats = UsageStats::collect(Vec::<StoredFile>::new().iter());
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["totalFiles"], 0);
        assert_eq!(json["lastCreated"], serde_json::Value::Null);
        assert_eq!(json["lastCreatedFormatted"], NO_FILES_PLACEHOLDER);
    }
}
