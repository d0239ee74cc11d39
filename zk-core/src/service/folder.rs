// SPDX-License-Identifier: AGPL-3.0-or-later
//! Storage folder lookup

use tracing::{debug, info, warn};

use super::CardService;
use crate::{backend::PropertyScope, error::ZkResult, file::Folder};

/// Deployment property holding the storage folder id
pub const FOLDER_ID_KEY: &str = "storage_folder_id";

impl CardService {
    /// Resolves the storage folder, creating it on first use.
    ///
    /// The recorded folder id wins; a folder found by name is only adopted
    /// when no usable id has been recorded yet.
    pub async fn storage_folder(&self) -> ZkResult<Folder> {
        let scope = PropertyScope::Deployment;

        if let Some(id) = self.settings.get_property(&scope, FOLDER_ID_KEY).await? {
            match self.files.get_folder(&id).await? {
                Some(folder) => return Ok(folder),
                None => warn!(folder_id = %id, "recorded storage folder is gone"),
            }
        }

        let name = &self.config.folder_name;
        let folder = match self.files.find_folders(name).await?.into_iter().next() {
            Some(existing) => {
                debug!(folder_id = %existing.id, name = %name, "adopting existing folder");
                existing
            }
            None => {
                let created = self
                    .files
                    .create_folder(name, &self.config.folder_description)
                    .await?;
                info!(folder_id = %created.id, name = %name, "created storage folder");
                created
            }
        };

        self.settings.set_property(&scope, FOLDER_ID_KEY, &folder.id).await?;
        Ok(folder)
    }
}
