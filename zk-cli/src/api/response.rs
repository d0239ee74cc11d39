// SPDX-License-Identifier: AGPL-3.0-or-later
//! Uniform JSON envelope

use axum::{
    async_trait,
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection, QueryRejection},
        FromRequest, Request,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::json;
use zk_core::{ErrorKind, ZkError};

/// `{"success": true, ...body}`
#[derive(Debug, Serialize)]
pub struct Success<T> {
    success: bool,
    #[serde(flatten)]
    body: T,
}

pub fn ok<T: Serialize>(body: T) -> Json<Success<T>> {
    Json(Success { success: true, body })
}

pub type ApiResult<T> = Result<Json<Success<T>>, ApiError>;

/// `{"success": false, "error": ..., "errorKind": ...}`
#[derive(Debug)]
pub enum ApiError {
    Service(ZkError),
    /// Request the framework refused before a handler ran
    Rejected { status: StatusCode, message: String },
}

impl From<ZkError> for ApiError {
    fn from(err: ZkError) -> Self {
        ApiError::Service(err)
    }
}

macro_rules! from_rejection {
    ($($rejection:ty),*) => {
        $(impl From<$rejection> for ApiError {
            fn from(rejection: $rejection) -> Self {
                ApiError::Rejected {
                    status: rejection.status(),
                    message: rejection.body_text(),
                }
            }
        })*
    };
}

from_rejection!(BytesRejection, PathRejection, QueryRejection);

fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
        ErrorKind::BackendUnavailable => StatusCode::SERVICE_UNAVAILABLE,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match self {
            ApiError::Service(err) => {
                let kind = err.kind();
                (status_for(kind), kind, err.to_string())
            }
            ApiError::Rejected { status, message } => (status, ErrorKind::InvalidInput, message),
        };

        if status.is_server_error() {
            tracing::error!(error = %message, "request failed");
        } else {
            tracing::debug!(error = %message, %status, "request rejected");
        }

        let body = Json(json!({
            "success": false,
            "error": message,
            "errorKind": kind,
        }));
        (status, body).into_response()
    }
}

/// Parses a request body, reporting malformed JSON in the envelope
pub fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::Service(ZkError::InvalidInput(e.to_string())))
}

/// JSON request body whose failures use the envelope
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await?;
        Ok(JsonBody(parse_body(&bytes)?))
    }
}

#[derive(Debug, Serialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
