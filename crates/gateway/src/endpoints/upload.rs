//! # POST /files
//!
//! アップロード用署名付きURLの発行。
//! Gatewayはファイル本体を受け取らず、クライアントは返却されたURLへ直接PUTする。

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{HeaderValue, StatusCode};
use axum::Json;
use blob_gateway_types::{UploadRequest, UploadResponse};

use super::with_sign_timeout;
use crate::config::GatewayState;
use crate::error::GatewayError;
use crate::object_key::build_object_key;
use crate::storage::UPLOAD_URL_EXPIRY_SECS;

/// POST /files — 署名付きアップロードURL発行。
///
/// 1. filenameを検証し、最終パス要素のみに縮約
/// 2. `uploads/<token>/<filename>` 形式のキーを生成
/// 3. Content-Typeを署名に含めたPUT用URLを生成（有効期限900秒）
///
/// PUTが実際に行われたかどうかをGatewayは関知しない。
pub async fn handle_prepare_upload(
    State(state): State<Arc<GatewayState>>,
    body: Result<Json<UploadRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UploadResponse>), GatewayError> {
    let Json(body) = body.map_err(|e| {
        GatewayError::BadRequest(format!("invalid request body: {}", e.body_text()))
    })?;

    let filename = body
        .filename
        .as_deref()
        .filter(|f| !f.trim().is_empty())
        .ok_or_else(|| GatewayError::BadRequest("filename is required".to_string()))?;

    let content_type = body.content_type_or_default();
    if HeaderValue::from_str(content_type).is_err() {
        return Err(GatewayError::BadRequest("contentType is invalid".to_string()));
    }

    let object_key = build_object_key(filename)?;
    tracing::debug!(filename = ?filename, object_key = %object_key, "オブジェクトキーを生成");

    let upload_url = with_sign_timeout(
        state.sign_timeout,
        state
            .storage
            .presign_put(&object_key, content_type, UPLOAD_URL_EXPIRY_SECS),
    )
    .await?;

    tracing::info!(
        object_key = %object_key,
        content_type = %content_type,
        expiry_secs = UPLOAD_URL_EXPIRY_SECS,
        "署名付きアップロードURLを発行"
    );

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            object_key,
            upload_url,
        }),
    ))
}
