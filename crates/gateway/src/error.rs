//! # Gateway エラー型
//!
//! 全エンドポイントで共通のエラー型。
//! ハンドラは `Result<_, GatewayError>` を返し、HTTPステータスへの変換は
//! `IntoResponse` 実装に集約する。

use axum::http::StatusCode;
use axum::Json;
use blob_gateway_types::ErrorResponse;

/// 5xx系で呼び出し元に返す汎用メッセージ。
/// バックエンドの詳細はログにのみ出力する。
pub const SERVER_ERROR_MESSAGE: &str = "Server error";

/// 404で返すメッセージ。
pub const NOT_FOUND_MESSAGE: &str = "File not found";

/// Gatewayエラー型。
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// 不正なリクエスト（filename欠落、JSONパース失敗）
    #[error("不正なリクエスト: {0}")]
    BadRequest(String),
    /// 指定されたオブジェクトが存在しない
    #[error("オブジェクトが存在しません: {0}")]
    NotFound(String),
    /// ストレージ操作に失敗（認証情報、ネットワーク、権限）
    #[error("ストレージ操作に失敗: {0}")]
    Storage(String),
    /// 署名処理がタイムアウト
    #[error("署名処理がタイムアウトしました")]
    Timeout,
    /// 内部エラー
    #[error("内部エラー: {0}")]
    Internal(String),
}

impl GatewayError {
    /// HTTPステータスコード。
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::BadRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::NotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::Storage(_) | GatewayError::Timeout | GatewayError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// 呼び出し元に見せるメッセージ。
    /// BadRequestのみ詳細を返し、それ以外は固定文言。
    pub fn public_message(&self) -> String {
        match self {
            GatewayError::BadRequest(msg) => msg.clone(),
            GatewayError::NotFound(_) => NOT_FOUND_MESSAGE.to_string(),
            GatewayError::Storage(_) | GatewayError::Timeout | GatewayError::Internal(_) => {
                SERVER_ERROR_MESSAGE.to_string()
            }
        }
    }
}

impl axum::response::IntoResponse for GatewayError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "リクエスト処理に失敗");
        } else {
            tracing::debug!(error = %self, status = %status, "リクエストを拒否");
        }
        let body = ErrorResponse {
            error: self.public_message(),
        };
        (status, Json(body)).into_response()
    }
}
