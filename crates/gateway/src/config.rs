//! # Gateway設定・共有状態
//!
//! 環境変数からの設定読み込みとGatewayの共有状態の定義。
//! 設定は起動時に一度だけ読み込み、以降は変更しない。

use std::time::Duration;

use anyhow::Context;

use crate::storage::ObjectStorage;

/// デフォルトの待ち受けアドレス
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";

/// 署名処理のデフォルトタイムアウト（秒）
pub const DEFAULT_SIGN_TIMEOUT_SECS: u64 = 5;

/// S3互換ストレージの接続設定。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct S3Config {
    /// 対象バケット名
    pub bucket_name: String,
    /// カスタムエンドポイント（MinIO, R2等）。Noneの場合はAWS S3。
    pub endpoint: Option<String>,
    /// 署名リージョン。Noneの場合はエンドポイントから推定する。
    pub region: Option<String>,
    /// 静的アクセスキー。Noneの場合は環境変数・プロファイル・インスタンスメタデータから解決する。
    pub access_key: Option<String>,
    /// 静的シークレットキー
    pub secret_key: Option<String>,
}

/// Gateway起動設定。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// 待ち受けアドレス
    pub listen_addr: String,
    /// ストレージ接続設定
    pub s3: S3Config,
    /// 署名処理のタイムアウト
    pub sign_timeout: Duration,
    /// ダウンロード前にオブジェクトの存在確認を行うか
    pub verify_object_exists: bool,
}

impl GatewayConfig {
    /// プロセス環境変数から構築する。
    /// `BUCKET_NAME` が未設定の場合は起動エラー。
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 任意のキー検索関数から構築する。
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // 空文字は未設定として扱う
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bucket_name = get("BUCKET_NAME").context("BUCKET_NAMEが未設定です")?;

        let sign_timeout_secs = match get("SIGN_TIMEOUT_SECS") {
            Some(v) => v
                .trim()
                .parse::<u64>()
                .with_context(|| format!("SIGN_TIMEOUT_SECSが不正です: {v}"))?,
            None => DEFAULT_SIGN_TIMEOUT_SECS,
        };
        if sign_timeout_secs == 0 {
            anyhow::bail!("SIGN_TIMEOUT_SECSは1以上である必要があります");
        }

        let verify_object_exists = match get("VERIFY_OBJECT_EXISTS") {
            Some(v) => parse_bool(&v)
                .with_context(|| format!("VERIFY_OBJECT_EXISTSが不正です: {v}"))?,
            None => false,
        };

        Ok(Self {
            listen_addr: get("LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string()),
            s3: S3Config {
                bucket_name,
                endpoint: get("S3_ENDPOINT"),
                region: get("S3_REGION").or_else(|| get("AWS_REGION")),
                access_key: get("S3_ACCESS_KEY"),
                secret_key: get("S3_SECRET_KEY"),
            },
            sign_timeout: Duration::from_secs(sign_timeout_secs),
            verify_object_exists,
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Gatewayの共有状態。
/// 全リクエストから読み取り専用で共有される。
pub struct GatewayState {
    /// 署名付きURLを発行するストレージ（S3互換等、トレイトで抽象化）
    pub storage: Box<dyn ObjectStorage>,
    /// 署名処理のタイムアウト
    pub sign_timeout: Duration,
    /// ダウンロード前にオブジェクトの存在確認を行うか
    pub verify_object_exists: bool,
}

impl GatewayState {
    pub fn new(storage: Box<dyn ObjectStorage>, config: &GatewayConfig) -> Self {
        Self {
            storage,
            sign_timeout: config.sign_timeout,
            verify_object_exists: config.verify_object_exists,
        }
    }
}
