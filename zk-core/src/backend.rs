// SPDX-License-Identifier: AGPL-3.0-or-later
//! Storage and conversion traits

use async_trait::async_trait;
use bytes::Bytes;
use std::fmt;

use crate::{
    error::ZkResult,
    file::{Folder, NewFile, StoredFile},
};

/// Folder and file storage
#[async_trait]
pub trait FileRepository: Send + Sync {
    fn id(&self) -> &str;
    fn display_name(&self) -> &str;

    async fn is_available(&self) -> bool;

    /// Folders with exactly this name, oldest first
    async fn find_folders(&self, name: &str) -> ZkResult<Vec<Folder>>;
    async fn get_folder(&self, id: &str) -> ZkResult<Option<Folder>>;
    async fn create_folder(&self, name: &str, description: &str) -> ZkResult<Folder>;

    async fn create_file(&self, folder_id: &str, file: NewFile) -> ZkResult<StoredFile>;
    /// Non-trashed files of a folder, in no particular order
    async fn list_files(&self, folder_id: &str) -> ZkResult<Vec<StoredFile>>;
    /// Looks a file up by id; trashed files still resolve
    async fn get_file(&self, id: &str) -> ZkResult<StoredFile>;
    async fn read_file(&self, id: &str) -> ZkResult<Bytes>;
    async fn trash_file(&self, id: &str) -> ZkResult<()>;
}

/// Scope of a stored property
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyScope {
    /// Shared by the whole deployment
    Deployment,
    /// Private to one user
    User(String),
}

impl fmt::Display for PropertyScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyScope::Deployment => write!(f, "deployment"),
            PropertyScope::User(user) => write!(f, "user:{}", user),
        }
    }
}

/// Durable string properties
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    async fn get_property(&self, scope: &PropertyScope, key: &str) -> ZkResult<Option<String>>;
    async fn set_property(&self, scope: &PropertyScope, key: &str, value: &str) -> ZkResult<()>;
    async fn delete_property(&self, scope: &PropertyScope, key: &str) -> ZkResult<()>;
}

/// HTML to PDF rendering
#[async_trait]
pub trait PdfConverter: Send + Sync {
    fn name(&self) -> &str;

    async fn html_to_pdf(&self, html: &str) -> ZkResult<Bytes>;
}
