// SPDX-License-Identifier: AGPL-3.0-or-later
//! TOML configuration

use serde::Deserialize;
use std::path::{Path, PathBuf};
use zk_core::{ServiceConfig, ZkError, ZkResult};
use zk_integrations::PdfToolConfig;

/// Longest retention the sweep accepts, in days
pub const MAX_RETENTION_DAYS: i64 = 36_500;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub pdf: PdfToolConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    /// Prefix of the file URLs handed to the front end; defaults to `http://<bind>`
    pub public_url: Option<String>,
    /// User whose settings apply when a request names none
    pub default_user: String,
    /// Front-end markup; the bundled page is used when unset
    pub template: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
            public_url: None,
            default_user: "default".to_string(),
            template: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: Option<PathBuf>,
    pub folder_name: String,
    pub retention_days: i64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        let service = ServiceConfig::default();
        Self {
            data_dir: None,
            folder_name: service.folder_name,
            retention_days: service.retention_days,
        }
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("dev", "hyperpolymath", "zettel-cards")
}

impl AppConfig {
    /// Reads the given file, else the per-user config file if present, else defaults
    pub fn load(path: Option<&Path>) -> ZkResult<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match project_dirs().map(|d| d.config_dir().join("config.toml")) {
                Some(p) if p.is_file() => p,
                _ => return Ok(Self::default()),
            },
        };

        let text = std::fs::read_to_string(&path)
            .map_err(|e| ZkError::Config(format!("{}: {}", path.display(), e)))?;
        let config = Self::parse(&text)?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    pub fn parse(text: &str) -> ZkResult<Self> {
        let mut config: Self = toml::from_str(text).map_err(|e| ZkError::Config(e.to_string()))?;
        config.pdf = config.pdf.resolved();
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> ZkResult<()> {
        if !(1..=MAX_RETENTION_DAYS).contains(&self.storage.retention_days) {
            return Err(ZkError::Config(format!(
                "storage.retention_days must be between 1 and {}",
                MAX_RETENTION_DAYS
            )));
        }
        if self.storage.folder_name.trim().is_empty() {
            return Err(ZkError::Config("storage.folder_name must not be empty".into()));
        }
        if self.pdf.program.trim().is_empty() {
            return Err(ZkError::Config("pdf.program must not be empty".into()));
        }
        Ok(())
    }

    pub fn data_dir(&self) -> PathBuf {
        self.storage
            .data_dir
            .clone()
            .or_else(|| project_dirs().map(|d| d.data_dir().to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("zk-data"))
    }

    pub fn public_url(&self) -> String {
        self.server
            .public_url
            .clone()
            .unwrap_or_else(|| format!("http://{}", self.server.bind))
    }

    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            folder_name: self.storage.folder_name.clone(),
            retention_days: self.storage.retention_days,
            ..ServiceConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::parse("").unwrap();
        assert_eq!(config.server.bind, "127.0.0.1:8080");
        assert_eq!(config.public_url(), "http://127.0.0.1:8080");
        assert_eq!(config.server.default_user, "default");
        assert_eq!(config.storage.folder_name, "Zettelkasten_Cards");
        assert_eq!(config.storage.retention_days, 30);
        assert_eq!(config.pdf, PdfToolConfig::wkhtmltopdf());
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::parse(
            r#"
            [server]
            bind = "0.0.0.0:9000"
            public_url = "https://cards.zettel.test"

            [storage]
            data_dir = "/var/lib/zettel-cards"
            retention_days = 7

            [pdf]
            program = "pandoc"
            args = ["-f", "html", "-o", "-"]
            "#,
        )
        .unwrap();

        assert_eq!(config.public_url(), "https://cards.zettel.test");
        assert_eq!(config.data_dir(), PathBuf::from("/var/lib/zettel-cards"));
        assert_eq!(config.pdf.program, "pandoc");
        assert_eq!(config.pdf.args.len(), 4);

        let service = config.service_config();
        assert_eq!(service.retention_days, 7);
        assert_eq!(service.folder_name, "Zettelkasten_Cards");
    }

    #[test]
    fn test_pdf_preset_by_name() {
        let config = AppConfig::parse("[pdf]\nprogram = \"pandoc\"\n").unwrap();
        assert_eq!(config.pdf, PdfToolConfig::pandoc());
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(AppConfig::parse("[storage]\nretention_days = 0").is_err());
        assert!(AppConfig::parse("[storage]\nretention_days = 100000000").is_err());
        assert!(AppConfig::parse("[storage]\nretention_days = 36500").is_ok());
        assert!(AppConfig::parse("[storage]\nfolder_name = \"  \"").is_err());
        assert!(AppConfig::parse("[server]\nbind = 5").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\ndefault_user = \"nikolai\"\n").unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.server.default_user, "nikolai");

        let err = AppConfig::load(Some(&dir.path().join("missing.toml"))).unwrap_err();
        assert_eq!(err.kind(), zk_core::ErrorKind::InvalidInput);
    }
}
