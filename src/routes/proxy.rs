//! Same-origin forwarder for the REST backend.
//!
//! The browser only ever calls `/api/v1/*` on the console's own origin. Each
//! request is replayed against `BACKEND_URL` with its method, query string,
//! body, and content headers intact; the backend's status, content type,
//! download filename, and body are returned unchanged. Transport failures
//! become `502` with a JSON `{"error": ...}` body, which the client surfaces
//! like any backend error.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, RawQuery, State};
use axum::http::header::{ACCEPT, AUTHORIZATION, CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::state::AppState;

/// Request headers copied onto the upstream call.
const FORWARDED_HEADERS: [axum::http::HeaderName; 3] = [CONTENT_TYPE, ACCEPT, AUTHORIZATION];

/// Response headers copied back to the browser.
const RETURNED_HEADERS: [axum::http::HeaderName; 2] = [CONTENT_TYPE, CONTENT_DISPOSITION];

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("backend request timed out")]
    Timeout,
    #[error("backend unreachable: {0}")]
    Unreachable(String),
    #[error("backend response could not be read: {0}")]
    Body(String),
}

impl From<reqwest::Error> for ProxyError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_body() || err.is_decode() {
            Self::Body(err.to_string())
        } else {
            Self::Unreachable(err.to_string())
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (StatusCode::BAD_GATEWAY, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Upstream URL for a forwarded path and optional raw query.
#[must_use]
pub fn upstream_url(backend_url: &str, path: &str, query: Option<&str>) -> String {
    let mut url = format!("{}/api/v1/{}", backend_url.trim_end_matches('/'), path.trim_start_matches('/'));
    if let Some(query) = query.filter(|q| !q.is_empty()) {
        url.push('?');
        url.push_str(query);
    }
    url
}

/// `ANY /api/v1/{*path}`
///
/// # Errors
///
/// Returns [`ProxyError`] when the backend cannot be reached or its body
/// cannot be read.
pub async fn forward(
    State(state): State<AppState>,
    Path(path): Path<String>,
    RawQuery(query): RawQuery,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ProxyError> {
    let url = upstream_url(&state.config.backend_url, &path, query.as_deref());
    tracing::debug!(%method, %url, bytes = body.len(), "forwarding backend request");

    let mut request = state.http.request(method.clone(), &url);
    for name in FORWARDED_HEADERS {
        if let Some(value) = headers.get(&name) {
            request = request.header(name, value.clone());
        }
    }
    if !body.is_empty() {
        request = request.body(body);
    }

    let upstream = request.send().await.map_err(|err| {
        tracing::warn!(%method, %url, error = %err, "backend request failed");
        ProxyError::from(err)
    })?;

    let status = upstream.status();
    let returned: Vec<_> = RETURNED_HEADERS
        .into_iter()
        .map(|name| {
            let value = upstream.headers().get(&name).cloned();
            (name, value)
        })
        .collect();
    let bytes = upstream.bytes().await?;
    if status.is_server_error() {
        tracing::warn!(%method, %url, %status, "backend returned server error");
    }

    let mut response = (status, bytes).into_response();
    for (name, value) in returned {
        match value {
            Some(value) => {
                response.headers_mut().insert(name, value);
            }
            None => {
                response.headers_mut().remove(name);
            }
        }
    }
    Ok(response)
}

#[cfg(test)]
#[path = "proxy_test.rs"]
mod tests;
