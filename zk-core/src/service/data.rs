// SPDX-License-Identifier: AGPL-3.0-or-later
//! Card data export and import

use bytes::Bytes;
use serde_json::Value;

use super::{CardService, SavedFile};
use crate::{
    error::ZkResult,
    file::{FileNameTemplate, MIME_JSON},
};

impl CardService {
    /// Writes the payload as pretty-printed JSON
    pub async fn export_cards_data(&self, payload: &Value) -> ZkResult<SavedFile> {
        let json = serde_json::to_vec_pretty(payload)?;
        self.save_file(Bytes::from(json), MIME_JSON, FileNameTemplate::Data).await
    }

    /// Parses a stored file back into JSON
    pub async fn import_cards_data(&self, id: &str) -> ZkResult<Value> {
        let content = self.files.read_file(id).await?;
        Ok(serde_json::from_slice(&content)?)
    }
}
