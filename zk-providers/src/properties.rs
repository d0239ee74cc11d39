// SPDX-License-Identifier: AGPL-3.0-or-later
//! Sled-backed property store

use async_trait::async_trait;
use sled::Tree;
use zk_core::{PropertyScope, SettingsRepository, ZkError, ZkResult};

use crate::sled_store::{db_err, SledStore};

pub struct SledSettingsRepository {
    store: SledStore,
    properties: Tree,
}

impl SledSettingsRepository {
    pub fn open(store: &SledStore) -> ZkResult<Self> {
        Ok(Self {
            store: store.clone(),
            properties: store.tree("properties")?,
        })
    }

    fn key(scope: &PropertyScope, key: &str) -> String {
        format!("{}/{}", scope, key)
    }
}

#[async_trait]
impl SettingsRepository for SledSettingsRepository {
    async fn get_property(&self, scope: &PropertyScope, key: &str) -> ZkResult<Option<String>> {
        let raw = self.properties.get(Self::key(scope, key)).map_err(db_err)?;
        raw.map(|v| {
            String::from_utf8(v.to_vec())
                .map_err(|e| ZkError::Storage(format!("property {} is not UTF-8: {}", key, e)))
        })
        .transpose()
    }

    async fn set_property(&self, scope: &PropertyScope, key: &str, value: &str) -> ZkResult<()> {
        self.properties
            .insert(Self::key(scope, key), value.as_bytes())
            .map_err(db_err)?;
        self.store.flush().await
    }

    async fn delete_property(&self, scope: &PropertyScope, key: &str) -> ZkResult<()> {
        self.properties.remove(Self::key(scope, key)).map_err(db_err)?;
        self.store.flush().await
    }
}
