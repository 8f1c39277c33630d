//! # GET /files/{*object_key}
//!
//! ダウンロード用署名付きURLへの307リダイレクト。

use std::sync::Arc;

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::response::Redirect;

use super::with_sign_timeout;
use crate::config::GatewayState;
use crate::error::GatewayError;
use crate::storage::DOWNLOAD_URL_EXPIRY_SECS;

/// GET /files/{*object_key} — 署名付きダウンロードURLへリダイレクト。
///
/// `object_key` はURLパスをそのまま使用する（`/` を含みうる）。
/// 307はリダイレクト後もメソッドを保持する。
pub async fn handle_download(
    State(state): State<Arc<GatewayState>>,
    object_key: Result<Path<String>, PathRejection>,
) -> Result<Redirect, GatewayError> {
    let Path(object_key) = object_key
        .map_err(|e| GatewayError::BadRequest(format!("invalid object key: {}", e.body_text())))?;

    let signed_url = with_sign_timeout(state.sign_timeout, async {
        // 署名は存在確認を伴わないため、有効時のみ事前にHEADする
        if state.verify_object_exists && !state.storage.object_exists(&object_key).await? {
            return Err(GatewayError::NotFound(object_key.clone()));
        }
        state
            .storage
            .presign_get(&object_key, DOWNLOAD_URL_EXPIRY_SECS)
            .await
    })
    .await?;

    tracing::info!(
        object_key = %object_key,
        expiry_secs = DOWNLOAD_URL_EXPIRY_SECS,
        "署名付きダウンロードURLへリダイレクト"
    );

    Ok(Redirect::temporary(&signed_url))
}
