// SPDX-License-Identifier: AGPL-3.0-or-later
//! Storage providers for the Zettelkasten cards backend
//!
//! One sled database under the data directory holds folder, file and
//! property records; file contents sit next to it as blobs.

mod local;
mod properties;
mod sled_store;

pub use local::LocalFileRepository;
pub use properties::SledSettingsRepository;
pub use sled_store::SledStore;

use std::path::{Path, PathBuf};
use zk_core::ZkResult;

/// Both local providers opened over one data directory
pub struct LocalStorage {
    pub data_dir: PathBuf,
    pub store: SledStore,
    pub files: LocalFileRepository,
    pub settings: SledSettingsRepository,
}

impl LocalStorage {
    pub async fn open(data_dir: impl AsRef<Path>, base_url: impl Into<String>) -> ZkResult<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&data_dir).await?;

        let store = SledStore::open(data_dir.join("db"))?;
        let files = LocalFileRepository::open(&store, data_dir.join("blobs"), base_url).await?;
        let settings = SledSettingsRepository::open(&store)?;
        tracing::debug!(data_dir = %data_dir.display(), "opened local storage");

        Ok(Self { data_dir, store, files, settings })
    }
}
