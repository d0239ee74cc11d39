// SPDX-License-Identifier: AGPL-3.0-or-later
//! Request handlers

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, HeaderMap, HeaderValue},
    response::{Html, IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use zk_core::{CleanupReport, Page, SavedFile, Settings, StoredFile, UsageStats};

use super::response::{ok, ApiError, ApiResult, JsonBody, Message};
use super::AppState;

/// Header naming the user whose settings a request touches
pub const USER_HEADER: &str = "x-zk-user";

fn user(headers: &HeaderMap, state: &AppState) -> String {
    headers
        .get(USER_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
        .unwrap_or_else(|| state.default_user.clone())
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    action: Option<String>,
}

type FileId = Result<Path<String>, PathRejection>;

pub async fn index(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Html<String>, ApiError> {
    let Query(query) = query?;
    let page = Page::for_action(query.action.as_deref());
    Ok(Html(page.render(&state.template)))
}

pub async fn health(State(state): State<AppState>) -> Result<&'static str, ApiError> {
    let backend = state.service.file_repository();
    let available = backend.is_available().await;
    let settings = state.service.get_user_settings(&state.default_user).await?;
    tracing::info!(
        backend = backend.id(),
        available,
        converter = state.service.converter().name(),
        categories = settings.category_count(),
        "health check"
    );
    Ok("OK")
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HtmlContent {
    html_content: String,
}

pub async fn generate_pdf(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<HtmlContent>,
) -> ApiResult<SavedFile> {
    Ok(ok(state.service.generate_pdf(&request.html_content).await?))
}

pub async fn save_html(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<HtmlContent>,
) -> ApiResult<SavedFile> {
    Ok(ok(state.service.save_html_file(&request.html_content).await?))
}

#[derive(Debug, Serialize)]
pub struct FileList {
    files: Vec<StoredFile>,
}

pub async fn list_files(State(state): State<AppState>) -> ApiResult<FileList> {
    let files = state.service.list_files().await?;
    Ok(ok(FileList { files }))
}

pub async fn delete_file(State(state): State<AppState>, id: FileId) -> ApiResult<Message> {
    let Path(id) = id?;
    state.service.delete_file(&id).await?;
    Ok(ok(Message::new("Файл перемещен в корзину")))
}

async fn file_response(state: &AppState, id: &str, disposition: &str) -> Result<Response, ApiError> {
    let (file, content) = state.service.open_file(id).await?;
    let content_type = HeaderValue::from_str(&file.mime_type)
        .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));
    let disposition = HeaderValue::from_str(&format!("{}; filename=\"{}\"", disposition, file.name))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"));

    Ok((
        [(header::CONTENT_TYPE, content_type), (header::CONTENT_DISPOSITION, disposition)],
        content,
    )
        .into_response())
}

pub async fn view_file(State(state): State<AppState>, id: FileId) -> Result<Response, ApiError> {
    let Path(id) = id?;
    file_response(&state, &id, "inline").await
}

pub async fn download_file(State(state): State<AppState>, id: FileId) -> Result<Response, ApiError> {
    let Path(id) = id?;
    file_response(&state, &id, "attachment").await
}

#[derive(Debug, Serialize)]
pub struct SettingsBody {
    settings: Settings,
}

pub async fn get_settings(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<SettingsBody> {
    let settings = state.service.get_user_settings(&user(&headers, &state)).await?;
    Ok(ok(SettingsBody { settings }))
}

pub async fn save_settings(
    State(state): State<AppState>,
    headers: HeaderMap,
    JsonBody(value): JsonBody<Value>,
) -> ApiResult<Message> {
    let settings = Settings::from_value(value)?;
    state.service.save_user_settings(&user(&headers, &state), &settings).await?;
    Ok(ok(Message::new("Настройки сохранены")))
}

pub async fn reset_settings(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<Message> {
    state.service.reset_user_settings(&user(&headers, &state)).await?;
    Ok(ok(Message::new("Настройки сброшены")))
}

pub async fn export_data(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<Value>,
) -> ApiResult<SavedFile> {
    Ok(ok(state.service.export_cards_data(&payload).await?))
}

#[derive(Debug, Serialize)]
pub struct DataBody {
    data: Value,
}

pub async fn import_data(State(state): State<AppState>, id: FileId) -> ApiResult<DataBody> {
    let Path(id) = id?;
    let data = state.service.import_cards_data(&id).await?;
    Ok(ok(DataBody { data }))
}

#[derive(Debug, Serialize)]
pub struct StatsBody {
    stats: UsageStats,
}

pub async fn usage_stats(State(state): State<AppState>) -> ApiResult<StatsBody> {
    let stats = state.service.usage_stats().await?;
    Ok(ok(StatsBody { stats }))
}

pub async fn clean_old_files(State(state): State<AppState>) -> ApiResult<CleanupReport> {
    Ok(ok(state.service.clean_old_files().await?))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardIdBody {
    card_id: String,
}

pub async fn card_id(State(state): State<AppState>) -> ApiResult<CardIdBody> {
    Ok(ok(CardIdBody { card_id: state.service.generate_card_id() }))
}
