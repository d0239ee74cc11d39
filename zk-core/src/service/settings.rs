// SPDX-License-Identifier: AGPL-3.0-or-later
//! Per-user settings operations

use tracing::{debug, info};

use super::CardService;
use crate::{
    backend::PropertyScope,
    error::{ZkError, ZkResult},
    settings::{Settings, SETTINGS_KEY},
};

impl CardService {
    /// Stored settings of a user, or the defaults when none were saved
    pub async fn get_user_settings(&self, user: &str) -> ZkResult<Settings> {
        let scope = PropertyScope::User(user.to_string());
        match self.settings.get_property(&scope, SETTINGS_KEY).await? {
            Some(raw) => {
                let value = serde_json::from_str(&raw)
                    .map_err(|e| ZkError::Storage(format!("stored settings are unreadable: {}", e)))?;
                Settings::from_value(value)
            }
            None => {
                debug!(user = %user, "no stored settings, using defaults");
                Ok(Settings::default())
            }
        }
    }

    /// Overwrites a user's settings as a whole
    pub async fn save_user_settings(&self, user: &str, settings: &Settings) -> ZkResult<()> {
        settings.validate()?;
        let raw = serde_json::to_string(settings)?;
        let scope = PropertyScope::User(user.to_string());
        self.settings.set_property(&scope, SETTINGS_KEY, &raw).await?;
        info!(user = %user, "saved settings");
        Ok(())
    }

    /// Drops a user's settings so the defaults apply again
    pub async fn reset_user_settings(&self, user: &str) -> ZkResult<()> {
        let scope = PropertyScope::User(user.to_string());
        self.settings.delete_property(&scope, SETTINGS_KEY).await?;
        info!(user = %user, "reset settings");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::SettingsRepository;
    use crate::service::testing::fixture;
    use serde_json::json;

    fn custom() -> Settings {
        Settings::from_value(json!({
            "defaultCategory": "lit",
            "cardsPerPage": 6,
            "showInstructions": false,
            "autoSave": true,
            "categories": {
                "lit": {"name": "Books", "color": "#abcdef", "subcategories": ["Novels"]}
            }
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_defaults_without_save() {
        let fx = fixture();
        assert_eq!(fx.service.get_user_settings("anna").await.unwrap(), Settings::default());
    }

    #[tokio::test]
    async fn test_save_then_get_returns_same() {
        let fx = fixture();
        let settings = custom();
        fx.service.save_user_settings("anna", &settings).await.unwrap();
        assert_eq!(fx.service.get_user_settings("anna").await.unwrap(), settings);

        // no merge with the defaults
        let loaded = fx.service.get_user_settings("anna").await.unwrap();
        assert_eq!(loaded.category_count(), 1);
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let fx = fixture();
        fx.service.save_user_settings("anna", &custom()).await.unwrap();
        fx.service.save_user_settings("anna", &Settings::default()).await.unwrap();
        assert_eq!(fx.service.get_user_settings("anna").await.unwrap(), Settings::default());
    }

    #[tokio::test]
    async fn test_settings_are_per_user() {
        let fx = fixture();
        fx.service.save_user_settings("anna", &custom()).await.unwrap();
        assert_eq!(fx.service.get_user_settings("boris").await.unwrap(), Settings::default());
    }

    #[tokio::test]
    async fn test_reset() {
        let fx = fixture();
        fx.service.save_user_settings("anna", &custom()).await.unwrap();
        fx.service.reset_user_settings("anna").await.unwrap();
        assert_eq!(fx.service.get_user_settings("anna").await.unwrap(), Settings::default());
    }

    #[tokio::test]
    async fn test_rejects_invalid_settings() {
        let fx = fixture();
        let mut settings = custom();
        settings.cards_per_page = Some(0);
        let err = fx.service.save_user_settings("anna", &settings).await.unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidInput);
    }

    #[tokio::test]
    async fn test_corrupt_blob() {
        let fx = fixture();
        fx.settings
            .set_property(&PropertyScope::User("anna".into()), SETTINGS_KEY, "{not json")
            .await
            .unwrap();
        let err = fx.service.get_user_settings("anna").await.unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::BackendUnavailable);
    }
}
