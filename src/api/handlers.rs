//! API request handlers

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::server::AppState;
use crate::export::ExportRequest;

/// Standard API response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            request_id: Uuid::new_v4().to_string(),
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            request_id: Uuid::new_v4().to_string(),
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Root endpoint response
#[derive(Serialize)]
pub struct RootResponse {
    pub name: String,
    pub version: String,
    pub endpoints: Vec<EndpointInfo>,
}

#[derive(Serialize)]
pub struct EndpointInfo {
    pub path: String,
    pub method: String,
    pub description: String,
}

impl EndpointInfo {
    fn new(path: &str, method: &str, description: &str) -> Self {
        Self {
            path: path.to_string(),
            method: method.to_string(),
            description: description.to_string(),
        }
    }
}

/// GET / - The dashboard `index.html` when a static directory is configured,
/// otherwise the endpoint listing
pub async fn root(State(state): State<Arc<AppState>>) -> Response {
    if let Some(dir) = &state.static_dir {
        let index = dir.join("index.html");
        match tokio::fs::read_to_string(&index).await {
            Ok(html) => return Html(html).into_response(),
            Err(e) => warn!(path = %index.display(), error = %e, "dashboard index not readable"),
        }
    }

    Json(ApiResponse::ok(RootResponse {
        name: "Site Split API Server".to_string(),
        version: state.version.clone(),
        endpoints: vec![
            EndpointInfo::new("/health", "GET", "Health check endpoint"),
            EndpointInfo::new("/api/ping", "GET", "Status and template presence"),
            EndpointInfo::new(
                "/api/download-template",
                "POST",
                "Fill the attendance template and download it",
            ),
        ],
    }))
    .into_response()
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// GET /health - Health check
pub async fn health() -> impl IntoResponse {
    Json(ApiResponse::ok(HealthResponse {
        status: "healthy".to_string(),
    }))
}

/// Ping response
#[derive(Serialize)]
pub struct PingResponse {
    pub status: String,
    pub template_exists: bool,
}

/// GET /api/ping - Status and whether the template is on disk
pub async fn ping(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(PingResponse {
        status: "ok".to_string(),
        template_exists: state.exporter.template_exists(),
    })
}

/// POST /api/download-template - Fill the template and return the workbook.
///
/// A missing or unparsable body is treated as an empty request.
pub async fn download_template(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let request: ExportRequest = if body.is_empty() {
        ExportRequest::default()
    } else {
        serde_json::from_slice(&body).unwrap_or_else(|e| {
            warn!(error = %e, "request body is not a valid export request, using defaults");
            ExportRequest::default()
        })
    };

    let result =
        tokio::task::spawn_blocking(move || state.exporter.export(&request)).await;

    match result {
        Ok(Ok(workbook)) => {
            info!(
                filename = workbook.filename.as_str(),
                bytes = workbook.bytes.len(),
                written = workbook.report.written,
                "template filled"
            );
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, workbook.mime_type().to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", workbook.filename),
                    ),
                ],
                workbook.bytes,
            )
                .into_response()
        }
        Ok(Err(e)) if e.is_not_found() => {
            (StatusCode::NOT_FOUND, Json(json!({ "error": e.to_string() }))).into_response()
        }
        Ok(Err(e)) => {
            error!(error = %e, "export failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::err(e.to_string())),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "export task panicked");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::err("export task failed")),
            )
                .into_response()
        }
    }
}
