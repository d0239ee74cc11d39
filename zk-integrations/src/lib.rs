// SPDX-License-Identifier: AGPL-3.0-or-later
//! External tool integrations
//!
//! HTML to PDF rendering through a command-line converter such as
//! wkhtmltopdf or pandoc.

pub mod pdf;

pub use pdf::{CommandPdfConverter, PdfToolConfig};

use std::process::Output;
use tokio::process::Command;
use zk_core::{ZkError, ZkResult};

/// Check if an external tool is available
pub async fn check_tool(name: &str) -> bool {
    Command::new("which")
        .arg(name)
        .output()
        .await
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Run an external command and get output
pub async fn run_command(program: &str, args: &[&str]) -> ZkResult<Output> {
    Command::new(program)
        .args(args)
        .output()
        .await
        .map_err(|e| ZkError::Conversion {
            tool: program.to_string(),
            message: format!("failed to run: {}", e),
        })
}
