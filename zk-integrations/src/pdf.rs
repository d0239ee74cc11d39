// SPDX-License-Identifier: AGPL-3.0-or-later
//! Command-line HTML to PDF conversion
//!
//! The converter pipes the markup to the tool's stdin and takes the PDF
//! from its stdout.

use async_trait::async_trait;
use bytes::Bytes;
use serde::Deserialize;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;
use zk_core::{PdfConverter, ZkError, ZkResult};

use crate::{check_tool, run_command};

/// Program and arguments of the converter.
///
/// When `args` is left empty for a known program (`wkhtmltopdf`, `pandoc`)
/// the preset arguments for that program apply.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PdfToolConfig {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl PdfToolConfig {
    pub fn wkhtmltopdf() -> Self {
        Self {
            program: "wkhtmltopdf".to_string(),
            args: vec!["--quiet".into(), "--encoding".into(), "utf-8".into(), "-".into(), "-".into()],
        }
    }

    pub fn pandoc() -> Self {
        Self {
            program: "pandoc".to_string(),
            args: vec!["-f".into(), "html".into(), "-t".into(), "pdf".into(), "-o".into(), "-".into()],
        }
    }

    /// Preset for a known program name
    pub fn preset(program: &str) -> Option<Self> {
        match program {
            "wkhtmltopdf" => Some(Self::wkhtmltopdf()),
            "pandoc" => Some(Self::pandoc()),
            _ => None,
        }
    }

    /// Fills in preset arguments when none were given
    pub fn resolved(self) -> Self {
        if !self.args.is_empty() {
            return self;
        }
        Self::preset(&self.program).unwrap_or(self)
    }
}

impl Default for PdfToolConfig {
    fn default() -> Self {
        Self::wkhtmltopdf()
    }
}

pub struct CommandPdfConverter {
    config: PdfToolConfig,
}

impl CommandPdfConverter {
    pub fn new(config: PdfToolConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PdfToolConfig {
        &self.config
    }

    pub async fn is_available(&self) -> bool {
        check_tool(&self.config.program).await
    }

    /// First line of `<program> --version`
    pub async fn version(&self) -> ZkResult<String> {
        let output = run_command(&self.config.program, &["--version"]).await?;
        if !output.status.success() {
            return Err(self.failure(format!("--version exited with {}", output.status)));
        }
        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .next()
            .unwrap_or_default()
            .trim()
            .to_string())
    }

    fn failure(&self, message: impl Into<String>) -> ZkError {
        ZkError::Conversion {
            tool: self.config.program.clone(),
            message: message.into(),
        }
    }
}

#[async_trait]
impl PdfConverter for CommandPdfConverter {
    fn name(&self) -> &str {
        &self.config.program
    }

    async fn html_to_pdf(&self, html: &str) -> ZkResult<Bytes> {
        let mut child = Command::new(&self.config.program)
            .args(&self.config.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| self.failure(format!("failed to start: {}", e)))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| self.failure("stdin unavailable"))?;
        let input = html.as_bytes().to_vec();

        // write stdin concurrently with draining stdout
        let writer = async move {
            stdin.write_all(&input).await?;
            stdin.shutdown().await
        };
        let (written, output) = tokio::join!(writer, child.wait_with_output());

        let output = output.map_err(|e| self.failure(e.to_string()))?;
        if !output.status.success() {
            return Err(self.failure(format!(
                "exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        written.map_err(|e| self.failure(format!("failed to write input: {}", e)))?;

        if output.stdout.is_empty() {
            return Err(self.failure("produced no output"));
        }

        debug!(tool = %self.config.program, bytes = output.stdout.len(), "converted html to pdf");
        Ok(Bytes::from(output.stdout))
    }
}
