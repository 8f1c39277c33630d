//! # ルート不一致時の応答

use axum::http::Uri;

use crate::error::GatewayError;

/// どのルートにも一致しないリクエスト（空キーの `GET /files/` を含む）。
/// 他のエラーと同じJSON形式の404を返す。
pub async fn handle_fallback(uri: Uri) -> GatewayError {
    GatewayError::NotFound(uri.path().to_string())
}
