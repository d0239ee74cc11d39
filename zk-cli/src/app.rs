// SPDX-License-Identifier: AGPL-3.0-or-later
//! Wiring of the service from configuration

use std::path::PathBuf;
use std::sync::Arc;
use zk_core::{CardService, ZkResult};
use zk_integrations::CommandPdfConverter;
use zk_providers::{LocalStorage, SledStore};

use crate::config::AppConfig;

pub struct App {
    pub config: AppConfig,
    pub service: Arc<CardService>,
    pub store: SledStore,
    pub data_dir: PathBuf,
    pub converter: Arc<CommandPdfConverter>,
}

impl App {
    pub async fn open(config: AppConfig) -> ZkResult<Self> {
        let storage = LocalStorage::open(config.data_dir(), config.public_url()).await?;
        let converter = Arc::new(CommandPdfConverter::new(config.pdf.clone()));

        let service = CardService::new(
            Arc::new(storage.files),
            Arc::new(storage.settings),
            converter.clone(),
        )
        .with_config(config.service_config());

        Ok(Self {
            config,
            service: Arc::new(service),
            store: storage.store,
            data_dir: storage.data_dir,
            converter,
        })
    }
}
