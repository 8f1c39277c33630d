//! # オブジェクトストレージ
//!
//! 署名付きURLを発行するストレージバックエンドの抽象インターフェース。
//! S3互換ストレージ実装は `s3` サブモジュールを参照。
//!
//! 署名はバックエンドのクライアントライブラリがローカルで計算する。
//! オブジェクトの存在確認は行わないため、存在しないキーに対しても
//! 形式上有効なURLが返る。

#[cfg(feature = "vendor-aws")]
pub mod s3;

#[cfg(feature = "vendor-aws")]
pub use s3::S3Storage;

use crate::error::GatewayError;

/// アップロード用署名付きURLの有効期限（秒）。
pub const UPLOAD_URL_EXPIRY_SECS: u32 = 900;

/// ダウンロード用署名付きURLの有効期限（秒）。
pub const DOWNLOAD_URL_EXPIRY_SECS: u32 = 3600;

/// 署名付きURLを発行するストレージの抽象インターフェース。
///
/// 実装はリクエスト間で共有されるため、`&self` のみで動作しなければならない。
/// Gateway運用者はS3互換ストレージ（AWS S3, MinIO, Cloudflare R2等）や
/// その他のバックエンドを実装として選択できる。
#[async_trait::async_trait]
pub trait ObjectStorage: Send + Sync {
    /// `object_key` への1回のPUTを許可する署名付きURLを生成する。
    ///
    /// `content_type` は署名対象ヘッダに含まれるため、実際のアップロードでは
    /// 同じ `Content-Type` ヘッダを送らなければ署名検証に失敗する。
    async fn presign_put(
        &self,
        object_key: &str,
        content_type: &str,
        expiry_secs: u32,
    ) -> Result<String, GatewayError>;

    /// `object_key` へのGETを許可する署名付きURLを生成する。
    ///
    /// 実装がオブジェクトの不在を検出した場合は `GatewayError::NotFound` を返す。
    async fn presign_get(&self, object_key: &str, expiry_secs: u32)
        -> Result<String, GatewayError>;

    /// オブジェクトが存在するかをバックエンドに問い合わせる。
    /// `VERIFY_OBJECT_EXISTS` 有効時のみダウンロード前に呼ばれる。
    async fn object_exists(&self, object_key: &str) -> Result<bool, GatewayError>;
}
