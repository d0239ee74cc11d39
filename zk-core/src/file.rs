// SPDX-License-Identifier: AGPL-3.0-or-later
//! Folders and stored files

use bytes::Bytes;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub const MIME_PDF: &str = "application/pdf";
pub const MIME_HTML: &str = "text/html";
pub const MIME_JSON: &str = "application/json";

/// A storage folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub id: String,
    pub name: String,
    pub description: String,
    pub created: DateTime<Utc>,
}

/// A file held by a repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredFile {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub created: DateTime<Utc>,
    pub size: u64,
    pub url: String,
    pub download_url: String,
    #[serde(skip)]
    pub folder_id: String,
    #[serde(skip)]
    pub trashed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
}

impl StoredFile {
    pub fn kind(&self) -> FileKind {
        FileKind::from_mime(&self.mime_type)
    }
}

/// Content handed to a repository for a new file
#[derive(Debug, Clone)]
pub struct NewFile {
    pub name: String,
    pub mime_type: String,
    pub content: Bytes,
    pub created: DateTime<Utc>,
}

/// MIME types the statistics distinguish
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    Html,
    Json,
    Other,
}

impl FileKind {
    pub fn from_mime(mime: &str) -> Self {
        match mime {
            MIME_PDF => FileKind::Pdf,
            MIME_HTML => FileKind::Html,
            MIME_JSON => FileKind::Json,
            _ => FileKind::Other,
        }
    }
}

/// Naming scheme for generated files: `<prefix>_<YYYY-MM-DD>.<ext>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileNameTemplate {
    Cards,
    Template,
    Data,
}

impl FileNameTemplate {
    pub fn prefix(&self) -> &'static str {
        match self {
            FileNameTemplate::Cards => "zettelkasten_cards",
            FileNameTemplate::Template => "zettelkasten_template",
            FileNameTemplate::Data => "zettelkasten_data",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            FileNameTemplate::Cards => "pdf",
            FileNameTemplate::Template => "html",
            FileNameTemplate::Data => "json",
        }
    }

    pub fn file_name(&self, date: NaiveDate) -> String {
        format!("{}_{}.{}", self.prefix(), date.format("%Y-%m-%d"), self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_kind_from_mime() {
        assert_eq!(FileKind::from_mime("application/pdf"), FileKind::Pdf);
        assert_eq!(FileKind::from_mime("text/html"), FileKind::Html);
        assert_eq!(FileKind::from_mime("application/json"), FileKind::Json);
        assert_eq!(FileKind::from_mime("text/plain"), FileKind::Other);
        assert_eq!(FileKind::from_mime("text/html; charset=utf-8"), FileKind::Other);
    }

    #[test]
    fn test_file_names() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(FileNameTemplate::Cards.file_name(date), "zettelkasten_cards_2024-03-07.pdf");
        assert_eq!(
            FileNameTemplate::Template.file_name(date),
            "zettelkasten_template_2024-03-07.html"
        );
        assert_eq!(FileNameTemplate::Data.file_name(date), "zettelkasten_data_2024-03-07.json");
    }

    #[test]
    fn test_stored_file_json_shape() {
        let file = StoredFile {
            id: "f1".into(),
            name: "zettelkasten_data_2024-03-07.json".into(),
            mime_type: MIME_JSON.into(),
            created: DateTime::parse_from_rfc3339("2024-03-07T10:00:00Z").unwrap().into(),
            size: 12,
            url: "http://localhost/files/f1".into(),
            download_url: "http://localhost/files/f1/download".into(),
            folder_id: "root".into(),
            trashed: false,
            checksum: None,
        };

        let json = serde_json::to_value(&file).unwrap();
        assert_eq!(json["type"], "application/json");
        assert_eq!(json["downloadUrl"], "http://localhost/files/f1/download");
        assert_eq!(json["created"], "2024-03-07T10:00:00Z");
        assert!(json.get("folderId").is_none());
        assert!(json.get("trashed").is_none());
        assert!(json.get("checksum").is_none());
    }
}
