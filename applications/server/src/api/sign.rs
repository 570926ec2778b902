/// Signed download URL API
use crate::{
    api::stream::encode_file_name,
    error::{Result, ServerError},
    services::broker::DOWNLOAD_AUTH_TTL_SECS,
    state::AppState,
};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct SignRequest {
    #[serde(rename = "fileName", default)]
    pub file_name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignResponse {
    pub url: String,
    pub expires_in: u64,
}

/// POST /api/sign - build a direct, time-limited download URL
pub async fn sign(
    State(app_state): State<AppState>,
    Json(request): Json<SignRequest>,
) -> Result<Json<SignResponse>> {
    let file_name = request
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
        "{}/file/{}/{}?Authorization={}",
        auth.download_url,
        bucket,
        encode_file_name(&file_name),
        auth.token
    );

    Ok(Json(SignResponse {
        url,
        expires_in: DOWNLOAD_AUTH_TTL_SECS,
    }))
}
