//! # Gatewayエンドポイント
//!
//! - `POST /files` — アップロード用署名付きURL発行
//! - `GET /files/{*object_key}` — ダウンロード用署名付きURLへのリダイレクト
//! - `GET /health` — 死活監視
//! - その他 — JSON形式の404

pub mod download;
pub mod fallback;
pub mod health;
pub mod upload;


pub use download::handle_download;
pub use fallback::handle_fallback;
pub use health::handle_health;
pub use upload::handle_prepare_upload;

use std::future::Future;
use std::time::Duration;

use crate::error::GatewayError;

/// ストレージ呼び出しをタイムアウト付きで実行する。
///
/// 署名自体はローカル計算だが、認証情報の初回取得・更新時に
/// ネットワーク待ちが発生しうる。
pub(crate) async fn with_sign_timeout<T, F>(timeout: Duration, fut: F) -> Result<T, GatewayError>
where
    F: Future<Output = Result<T, GatewayError>>,
{
    tokio::time::timeout(timeout, fut)
        .await
        .map_err(|_| GatewayError::Timeout)?
}
