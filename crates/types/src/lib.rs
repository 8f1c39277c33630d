//! # Blob Gateway 共有型定義
//!
//! Gatewayの HTTP API で送受信するデータ構造をRust構造体として提供する。
//! クライアント実装からも同じ型を利用できるよう、Gateway本体とは別crateにしている。
//!
//! ## エンコーディング規則
//! - JSONフィールド名は camelCase（`objectKey`, `uploadUrl`, `contentType`）

use serde::{Deserialize, Serialize};

/// `contentType` 省略時に使用するMIMEタイプ。
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

// ---------------------------------------------------------------------------
// POST /files
// ---------------------------------------------------------------------------

/// POST /files リクエスト。
///
/// `filename` はクライアントが自由に指定する文字列であり、
/// パスとして信頼してはならない。必須チェックはハンドラ側で行うため
/// ここでは `Option` として受け取る。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    /// 論理ファイル名
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// アップロード時に使用するContent-Type（省略時 `application/octet-stream`）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl UploadRequest {
    /// 署名に含めるContent-Typeを返す。未指定・空文字の場合はデフォルト値。
    pub fn content_type_or_default(&self) -> &str {
        match self.content_type.as_deref() {
            Some(ct) if !ct.trim().is_empty() => ct,
            _ => DEFAULT_CONTENT_TYPE,
        }
    }
}

/// POST /files レスポンス（201 Created）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    /// 生成されたオブジェクトキー（`uploads/<token>/<filename>`）
    pub object_key: String,
    /// 1回のPUTを許可する署名付きURL
    pub upload_url: String,
}

// ---------------------------------------------------------------------------
// エラー / ヘルスチェック
// ---------------------------------------------------------------------------

/// 2xx以外のレスポンスボディ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// 呼び出し元に返すメッセージ
    pub error: String,
}

/// GET /health レスポンス。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_request_camel_case() {
        let req: UploadRequest = serde_json::from_str(
            r#"{"filename": "report.pdf", "contentType": "application/pdf"}"#,
        )
        .unwrap();
        assert_eq!(req.filename.as_deref(), Some("report.pdf"));
        assert_eq!(req.content_type_or_default(), "application/pdf");
    }

    #[test]
    fn test_upload_request_default_content_type() {
        let req: UploadRequest = serde_json::from_str(r#"{"filename": "a.bin"}"#).unwrap();
        assert_eq!(req.content_type_or_default(), DEFAULT_CONTENT_TYPE);

        let req: UploadRequest =
            serde_json::from_str(r#"{"filename": "a.bin", "contentType": "  "}"#).unwrap();
        assert_eq!(req.content_type_or_default(), DEFAULT_CONTENT_TYPE);
    }

    #[test]
    fn test_upload_request_missing_filename() {
        let req: UploadRequest = serde_json::from_str("{}").unwrap();
        assert!(req.filename.is_none());
    }

    #[test]
    fn test_upload_response_field_names() {
        let json = serde_json::to_value(UploadResponse {
            object_key: "uploads/abc/a.txt".to_string(),
            upload_url: "https://example.com/put".to_string(),
        })
        .unwrap();
        assert_eq!(json["objectKey"], "uploads/abc/a.txt");
        assert_eq!(json["uploadUrl"], "https://example.com/put");
    }
}
