// SPDX-License-Identifier: AGPL-3.0-or-later
//! Sled database shared by the local providers

use serde::{de::DeserializeOwned, Serialize};
use sled::{Db, Tree};
use std::path::Path;
use zk_core::{ZkError, ZkResult};

pub(crate) fn db_err(e: sled::Error) -> ZkError {
    ZkError::Storage(e.to_string())
}

/// Handle to one sled database; cheap to clone
#[derive(Clone)]
pub struct SledStore {
    db: Db,
}

impl SledStore {
    /// Open or create a sled database at the given path
    pub fn open(path: impl AsRef<Path>) -> ZkResult<Self> {
        let db = sled::open(path).map_err(db_err)?;
        Ok(Self { db })
    }

    /// Database that disappears when the last handle is dropped
    pub fn temporary() -> ZkResult<Self> {
        let db = sled::Config::new().temporary(true).open().map_err(db_err)?;
        Ok(Self { db })
    }

    pub fn tree(&self, name: &str) -> ZkResult<Tree> {
        self.db.open_tree(name).map_err(db_err)
    }

    /// Flush to disk
    pub async fn flush(&self) -> ZkResult<()> {
        self.db.flush_async().await.map_err(db_err)?;
        Ok(())
    }

    /// Get database size on disk
    pub fn size_on_disk(&self) -> ZkResult<u64> {
        self.db.size_on_disk().map_err(db_err)
    }
}

pub(crate) fn get_json<T: DeserializeOwned>(tree: &Tree, key: &str) -> ZkResult<Option<T>> {
    match tree.get(key).map_err(db_err)? {
        Some(raw) => Ok(Some(serde_json::from_slice(&raw)?)),
        None => Ok(None),
    }
}

pub(crate) fn put_json<T: Serialize>(tree: &Tree, key: &str, value: &T) -> ZkResult<()> {
    let raw = serde_json::to_vec(value)?;
    tree.insert(key, raw).map_err(db_err)?;
    Ok(())
}

pub(crate) fn scan_json<T: DeserializeOwned>(tree: &Tree) -> ZkResult<Vec<T>> {
    tree.iter()
        .map(|item| {
            let (_, raw) = item.map_err(db_err)?;
            Ok(serde_json::from_slice(&raw)?)
        })
        .collect()
}
