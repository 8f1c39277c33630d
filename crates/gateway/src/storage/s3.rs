//! # S3互換ストレージ実装
//!
//! AWS S3, MinIO, Cloudflare R2 等のS3互換APIを使用する
//! `ObjectStorage` 実装。署名付きURLの生成はrust-s3がローカルで行う。

use http::header::CONTENT_TYPE;
use http::{HeaderMap, HeaderValue};

use super::ObjectStorage;
use crate::config::S3Config;
use crate::error::GatewayError;

/// エンドポイントからリージョンを推定できない場合のフォールバック
const FALLBACK_REGION: &str = "us-east-1";

/// S3互換ストレージによる `ObjectStorage` 実装。
pub struct S3Storage {
    bucket: s3::Bucket,
}

impl S3Storage {
    /// S3互換バケットから構築する。
    pub fn new(bucket: s3::Bucket) -> Self {
        Self { bucket }
    }

    /// 設定からバケットを初期化する。
    ///
    /// カスタムエンドポイント指定時はパススタイル、AWS S3では
    /// 仮想ホストスタイルのURLを生成する。
    pub fn from_config(config: &S3Config) -> anyhow::Result<Self> {
        let credentials = s3::creds::Credentials::new(
            config.access_key.as_deref(),
            config.secret_key.as_deref(),
            None,
            None,
            None,
        )?;

        let bucket = match &config.endpoint {
            Some(endpoint) => {
                let region = s3::Region::Custom {
                    region: resolve_region(config.region.as_deref(), Some(endpoint)),
                    endpoint: endpoint.clone(),
                };
                tracing::info!(
                    s3_endpoint = %endpoint,
                    bucket = %config.bucket_name,
                    "S3互換エンドポイントを設定"
                );
                s3::Bucket::new(&config.bucket_name, region, credentials)?.with_path_style()
            }
            None => {
                let region: s3::Region = resolve_region(config.region.as_deref(), None)
                    .parse()
                    .map_err(|e| anyhow::anyhow!("リージョンの解析に失敗: {e}"))?;
                tracing::info!(bucket = %config.bucket_name, region = %region, "AWS S3を使用");
                s3::Bucket::new(&config.bucket_name, region, credentials)?
            }
        };

        Ok(Self::new(*bucket))
    }
}

/// 署名リージョンを決定する。
///
/// 明示指定 > AWSエンドポイント（`s3.REGION.amazonaws.com`）からの推定 > `us-east-1`。
fn resolve_region(explicit: Option<&str>, endpoint: Option<&str>) -> String {
    if let Some(region) = explicit {
        return region.to_string();
    }
    endpoint
        .and_then(|ep| {
            let start = ep.find("s3.")?;
            let rest = &ep[start + 3..];
            let end = rest.find(".amazonaws.com")?;
            Some(rest[..end].to_string())
        })
        .filter(|r| !r.is_empty())
        .unwrap_or_else(|| FALLBACK_REGION.to_string())
}

/// rust-s3のエラーをGatewayエラーに変換する。
fn storage_error(context: &str, err: s3::error::S3Error) -> GatewayError {
    match err {
        s3::error::S3Error::HttpFailWithBody(404, _) => GatewayError::NotFound(context.to_string()),
        other => GatewayError::Storage(format!("{context}: {other}")),
    }
}

/// HEADのステータスコードから存在有無を判定する。
fn classify_head_status(object_key: &str, code: u16) -> Result<bool, GatewayError> {
    match code {
        200..=299 => Ok(true),
        404 => Ok(false),
        code => Err(GatewayError::Storage(format!(
            "HEAD {object_key} がHTTP {code} を返しました"
        ))),
    }
}

#[async_trait::async_trait]
impl ObjectStorage for S3Storage {
    async fn presign_put(
        &self,
        object_key: &str,
        content_type: &str,
        expiry_secs: u32,
    ) -> Result<String, GatewayError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_str(content_type)
                .map_err(|e| GatewayError::Internal(format!("Content-Typeが不正: {e}")))?,
        );

        self.bucket
            .presign_put(object_key, expiry_secs, Some(headers), None)
            .await
            .map_err(|e| storage_error("署名付きアップロードURL生成失敗", e))
    }

    async fn presign_get(
        &self,
        object_key: &str,
        expiry_secs: u32,
    ) -> Result<String, GatewayError> {
        self.bucket
            .presign_get(object_key, expiry_secs, None)
            .await
            .map_err(|e| storage_error("署名付きダウンロードURL生成失敗", e))
    }

    async fn object_exists(&self, object_key: &str) -> Result<bool, GatewayError> {
        match self.bucket.head_object(object_key).await {
            Ok((_, code)) => classify_head_status(object_key, code),
            Err(e) => match storage_error("存在確認に失敗", e) {
                GatewayError::NotFound(_) => Ok(false),
                other => Err(other),
            },
        }
    }
}
