//! # Blob Gateway
//!
//! S3互換オブジェクトストレージへの一時的なアクセスを仲介するGateway。
//! ファイル本体はGatewayを経由せず、クライアントが署名付きURLで直接送受信する。
//!
//! ## 役割
//! - アップロード用オブジェクトキーの生成（パストラバーサル対策を含む）
//! - 署名付きPUT/GET URLの発行
//!
//! ## API エンドポイント
//! - `POST /files` — 署名付きアップロードURL発行
//! - `GET /files/{*object_key}` — 署名付きダウンロードURLへ307リダイレクト
//! - `GET /health` — 死活監視
//!
//! 呼び出し元の認証は前段のレイヤーで行う前提とする。

mod config;
mod endpoints;
mod error;
mod object_key;
mod storage;

use std::sync::Arc;

use config::{GatewayConfig, GatewayState};
use storage::ObjectStorage;

/// axumルーターを構築する。
fn build_router(state: Arc<GatewayState>) -> axum::Router {
    axum::Router::new()
        .route("/files", axum::routing::post(endpoints::handle_prepare_upload))
        .route(
            "/files/{*object_key}",
            axum::routing::get(endpoints::handle_download),
        )
        .route("/health", axum::routing::get(endpoints::handle_health))
        .fallback(endpoints::handle_fallback)
        .with_state(state)
}

/// 設定に応じたストレージ実装を構築する。
#[cfg(feature = "vendor-aws")]
fn build_storage(config: &GatewayConfig) -> anyhow::Result<Box<dyn ObjectStorage>> {
    Ok(Box::new(storage::S3Storage::from_config(&config.s3)?))
}

#[cfg(not(feature = "vendor-aws"))]
fn build_storage(_config: &GatewayConfig) -> anyhow::Result<Box<dyn ObjectStorage>> {
    anyhow::bail!("ストレージ実装が有効化されていません（vendor-aws featureが必要です）")
}

/// SIGINT / SIGTERM を待つ。
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Ctrl+Cハンドラの登録に失敗");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "SIGTERMハンドラの登録に失敗");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Ctrl+Cを受信しました"),
        _ = terminate => tracing::info!("SIGTERMを受信しました"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    // BUCKET_NAME未設定はここで起動失敗とする
    let config = GatewayConfig::from_env()?;
    tracing::info!(
        bucket = %config.s3.bucket_name,
        sign_timeout_secs = config.sign_timeout.as_secs(),
        verify_object_exists = config.verify_object_exists,
        "設定を読み込みました"
    );

    let storage = build_storage(&config)?;
    let state = Arc::new(GatewayState::new(storage, &config));
    let app = build_router(state);

    tracing::info!("Gatewayを {} で起動します", config.listen_addr);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Gatewayを停止しました");
    Ok(())
}
