// SPDX-License-Identifier: AGPL-3.0-or-later
//! Zettelkasten cards core
//!
//! Types, storage traits and the card service shared by every front end.

pub mod backend;
pub mod clock;
pub mod error;
pub mod file;
pub mod format;
pub mod memory;
pub mod page;
pub mod service;
pub mod settings;
pub mod stats;

pub use backend::{FileRepository, PdfConverter, PropertyScope, SettingsRepository};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{ErrorKind, ZkError, ZkResult};
pub use file::{FileKind, FileNameTemplate, Folder, NewFile, StoredFile};
pub use page::{Page, PageMode};
pub use service::{CardService, CleanupReport, SavedFile, ServiceConfig};
pub use settings::{Category, Settings};
pub use stats::UsageStats;
