// SPDX-License-Identifier: AGPL-3.0-or-later
//! CLI command implementations

use bytesize::ByteSize;
use chrono::{DateTime, Utc};
use console::style;
use std::path::Path;
use tabled::{Table, Tabled};
use zk_core::{FileKind, StoredFile, ZkError, ZkResult};

use crate::api::{self, AppState, DEFAULT_TEMPLATE};
use crate::app::App;

fn format_time(dt: DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M").to_string()
}

fn format_size(size: u64, human: bool) -> String {
    if human {
        ByteSize(size).to_string()
    } else {
        size.to_string()
    }
}

fn format_kind(file: &StoredFile) -> String {
    match file.kind() {
        FileKind::Pdf => style("pdf").red().to_string(),
        FileKind::Html => style("html").cyan().to_string(),
        FileKind::Json => style("json").yellow().to_string(),
        FileKind::Other => "?".to_string(),
    }
}

#[derive(Tabled)]
struct LsEntry {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Size")]
    size: String,
    #[tabled(rename = "Created")]
    created: String,
    #[tabled(rename = "Name")]
    name: String,
}

/// Serve the page and API until interrupted
pub async fn serve(app: &App, bind: Option<&str>) -> ZkResult<()> {
    let template = match &app.config.server.template {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| ZkError::Config(format!("{}: {}", path.display(), e)))?,
        None => DEFAULT_TEMPLATE.to_string(),
    };

    let bind = bind.unwrap_or(&app.config.server.bind);
    let state = AppState::new(app.service.clone(), template, app.config.server.default_user.clone());
    api::serve(state, bind).await?;
    app.store.flush().await
}

/// List files in the storage folder, newest first
pub async fn ls(app: &App, long: bool, human: bool, verbose: bool) -> ZkResult<()> {
    let files = app.service.list_files().await?;

    if verbose {
        eprintln!("{} file(s) in {}", files.len(), app.service.config().folder_name);
    }

    if files.is_empty() {
        println!("(no files)");
        return Ok(());
    }

    if long {
        let entries: Vec<LsEntry> = files
            .iter()
            .map(|f| LsEntry {
                id: f.id.clone(),
                kind: format_kind(f),
                size: format_size(f.size, human),
                created: format_time(f.created),
                name: f.name.clone(),
            })
            .collect();
        println!("{}", Table::new(entries));
    } else {
        for file in &files {
            println!("{}\t{}", file.id, file.name);
        }
    }

    Ok(())
}

/// Move files to the trash
pub async fn rm(app: &App, ids: &[String], verbose: bool) -> ZkResult<()> {
    for id in ids {
        app.service.delete_file(id).await?;
        if verbose {
            eprintln!("Trashed: {}", id);
        }
    }
    app.store.flush().await
}

pub async fn stats(app: &App) -> ZkResult<()> {
    let stats = app.service.usage_stats().await?;

    println!("{}", style("Storage usage").bold());
    println!("  Files:        {}", stats.total_files);
    println!("  PDF:          {}", stats.pdf_files);
    println!("  HTML:         {}", stats.html_files);
    println!("  JSON:         {}", stats.json_files);
    println!("  Total size:   {}", stats.total_size_formatted);
    println!("  Last created: {}", stats.last_created_formatted);
    Ok(())
}

/// Trash files older than the retention period
pub async fn clean(app: &App) -> ZkResult<()> {
    let report = app.service.clean_old_files().await?;
    println!("{}", report.message);
    app.store.flush().await
}

/// Store a JSON file as a data export
pub async fn export(app: &App, path: &Path) -> ZkResult<()> {
    let text = std::fs::read_to_string(path)?;
    let payload: serde_json::Value = serde_json::from_str(&text)?;
    let saved = app.service.export_cards_data(&payload).await?;
    app.store.flush().await?;

    println!("{} {} ({})", style("Saved").green(), saved.file_name, saved.file_id);
    println!("{}", saved.url);
    Ok(())
}

/// Print a stored data export
pub async fn import(app: &App, id: &str) -> ZkResult<()> {
    let data = app.service.import_cards_data(id).await?;
    println!("{}", serde_json::to_string_pretty(&data)?);
    Ok(())
}

pub async fn settings_show(app: &App, user: &str) -> ZkResult<()> {
    let settings = app.service.get_user_settings(user).await?;
    println!("{}", serde_json::to_string_pretty(&settings)?);
    Ok(())
}

pub async fn settings_reset(app: &App, user: &str) -> ZkResult<()> {
    app.service.reset_user_settings(user).await?;
    app.store.flush().await?;
    println!("Settings reset for {}", user);
    Ok(())
}

pub fn card_id(app: &App) -> ZkResult<()> {
    println!("{}", app.service.generate_card_id());
    Ok(())
}

/// Show storage and converter information
pub async fn info(app: &App) -> ZkResult<()> {
    let backend = app.service.file_repository();
    let converter = app.converter.config();
    let available = if app.converter.is_available().await {
        match app.converter.version().await {
            Ok(version) if !version.is_empty() => style(version).green(),
            _ => style("available".to_string()).green(),
        }
    } else {
        style("not found".to_string()).red()
    };

    println!("{}", style("Zettelkasten cards").bold());
    println!("  Backend:    {} ({})", backend.display_name(), backend.id());
    println!("  Data dir:   {}", app.data_dir.display());
    println!("  Database:   {}", ByteSize(app.store.size_on_disk()?));
    println!("  Folder:     {}", app.service.config().folder_name);
    println!("  Retention:  {} days", app.service.config().retention_days);
    println!("  Converter:  {} {} [{}]", converter.program, converter.args.join(" "), available);
    println!("  Public URL: {}", app.config.public_url());
    Ok(())
}
