// SPDX-License-Identifier: AGPL-3.0-or-later
//! Retention sweep

use chrono::Duration;
use tracing::info;

use super::{CardService, CleanupReport};
use crate::error::{ZkError, ZkResult};

impl CardService {
    /// Trashes every file created before the retention cutoff
    pub async fn clean_old_files(&self) -> ZkResult<CleanupReport> {
        let days = self.config.retention_days;
        let cutoff = Duration::try_days(days)
            .and_then(|window| self.clock.now().checked_sub_signed(window))
            .ok_or_else(|| ZkError::Config(format!("retention of {} days is out of range", days)))?;
        let mut deleted_count = 0;

        for file in self.list_files().await? {
            if file.created < cutoff {
                self.files.trash_file(&file.id).await?;
                deleted_count += 1;
            }
        }

        info!(deleted_count, %cutoff, "retention sweep finished");
        Ok(CleanupReport {
            deleted_count,
            message: format!("Удалено файлов: {}", deleted_count),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::testing::fixture;

    #[tokio::test]
    async fn test_removes_only_old_files() {
        let fx = fixture();
        let old = fx.service.save_html_file("old").await.unwrap();
        fx.clock.advance(Duration::days(10));
        let recent = fx.service.save_html_file("recent").await.unwrap();
        fx.clock.advance(Duration::days(25));

        let report = fx.service.clean_old_files().await.unwrap();
        assert_eq!(report.deleted_count, 1);
        assert_eq!(report.message, "Удалено файлов: 1");

        let remaining: Vec<String> = fx.service.list_files().await.unwrap().into_iter().map(|f| f.id).collect();
        assert_eq!(remaining, vec![recent.file_id]);
        assert!(!remaining.contains(&old.file_id));
    }

    #[tokio::test]
    async fn test_cutoff_is_strict() {
        let fx = fixture();
        fx.service.save_html_file("edge").await.unwrap();
        fx.clock.advance(Duration::days(30));

        assert_eq!(fx.service.clean_old_files().await.unwrap().deleted_count, 0);

        fx.clock.advance(Duration::seconds(1));
        assert_eq!(fx.service.clean_old_files().await.unwrap().deleted_count, 1);
    }

    #[tokio::test]
    async fn test_idempotent() {
        let fx = fixture();
        fx.service.save_html_file("a").await.unwrap();
        fx.service.export_cards_data(&serde_json::json!({})).await.unwrap();
        fx.clock.advance(Duration::days(31));

        assert_eq!(fx.service.clean_old_files().await.unwrap().deleted_count, 2);
        assert_eq!(fx.service.clean_old_files().await.unwrap().deleted_count, 0);
        assert_eq!(fx.files.file_count().await, 2);
    }

    #[tokio::test]
    async fn test_out_of_range_retention() {
        let mut fx = fixture();
        fx.service = fx.service.with_config(crate::ServiceConfig {
            retention_days: 100_000_000,
            ..crate::ServiceConfig::default()
        });
        fx.service.save_html_file("kept").await.unwrap();

        let err = fx.service.clean_old_files().await.unwrap_err();
        assert!(matches!(err, ZkError::Config(_)));
        assert_eq!(fx.service.list_files().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_folder() {
        let fx = fixture();
        let report = fx.service.clean_old_files().await.unwrap();
        assert_eq!(report.deleted_count, 0);
    }
}
