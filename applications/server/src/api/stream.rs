/// Audio streaming proxy API
///
/// Forwards bytes from storage to the caller without buffering whole
/// files; range requests and upstream status codes (including 206) pass
/// through unchanged.
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, HeaderMap},
    response::Response,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct StreamQuery {
    #[serde(rename = "fileName", default)]
    pub file_name: Option<String>,
}

/// GET /api/stream?fileName=...
pub async fn stream(
    State(app_state): State<AppState>,
    Query(query): Query<StreamQuery>,
    headers: HeaderMap,
) -> Result<Response> {
    let file_name = query
        .file_name
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ServerError::BadRequest("fileName is required".to_string()))?;

    let bucket = &app_state.config.storage.bucket_name;
    if bucket.is_empty() {
        return Err(ServerError::Config(
            "storage.bucket_name is required".to_string(),
        ));
    }

    let auth = app_state.broker.download_authorization(&file_name).await?;
    let url = format!(
        "{}/file/{}/{}",
        auth.download_url,
        bucket,
        encode_file_name(&file_name)
    );

    let mut upstream_request = app_state
        .http
        .get(&url)
        .header(header::AUTHORIZATION, &auth.token);
    if let Some(range) = headers.get(header::RANGE) {
        upstream_request = upstream_request.header(header::RANGE, range.clone());
    }

    let upstream = upstream_request.send().await?;
    let status = upstream.status();

    // 2xx (200 full, 206 partial) streams through; anything else is
    // surfaced verbatim.
    if !status.is_success() {
        let body = upstream.text().await.unwrap_or_default();
        return Err(ServerError::Upstream { status, body });
    }

    let mut builder = Response::builder().status(status);
    for name in [
        header::CONTENT_TYPE,
        header::CONTENT_LENGTH,
        header::CONTENT_RANGE,
        header::ACCEPT_RANGES,
    ] {
        if let Some(value) = upstream.headers().get(&name) {
            builder = builder.header(name, value.clone());
        }
    }
    builder = builder.header(header::CACHE_CONTROL, "no-store");

    builder
        .body(Body::from_stream(upstream.bytes_stream()))
        .map_err(|e| ServerError::Internal(format!("failed to build response: {e}")))
}

/// Percent-encode a storage file name per path segment
///
/// Literal `/` separators survive so the name stays a storage path.
pub(crate) fn encode_file_name(name: &str) -> String {
    name.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
