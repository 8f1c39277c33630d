//! # オブジェクトキー生成
//!
//! アップロード用オブジェクトキー `uploads/<token>/<filename>` の組み立て。
//!
//! キーはストレージ側やキー一覧ツールでパスとして解釈されるため、
//! クライアント指定のファイル名は最終パス要素のみに縮約する。

use crate::error::GatewayError;

/// アップロード用キーのプレフィックス。
pub const UPLOAD_PREFIX: &str = "uploads";

/// ランダムトークンのバイト長（128bit）。
pub const TOKEN_BYTES: usize = 16;

/// クライアント指定のファイル名から最終パス要素のみを取り出す。
///
/// - 制御文字（NULを含む）は除去する
/// - `/` と `\` の両方を区切り文字として扱う
/// - 結果が空、`.`、`..` の場合はエラー
pub fn sanitize_filename(filename: &str) -> Result<String, GatewayError> {
    let cleaned: String = filename.chars().filter(|c| !c.is_control()).collect();

    let last = cleaned.rsplit(['/', '\\']).next().unwrap_or_default();

    match last {
        "" | "." | ".." => Err(GatewayError::BadRequest(
            "filename must name a file".to_string(),
        )),
        name => Ok(name.to_string()),
    }
}

/// 128bitのランダム値を16進文字列（32文字）で返す。
pub fn generate_token() -> String {
    let bytes: [u8; TOKEN_BYTES] = rand::random();
    hex::encode(bytes)
}

/// ファイル名をサニタイズし、新しいトークンでオブジェクトキーを組み立てる。
pub fn build_object_key(filename: &str) -> Result<String, GatewayError> {
    let safe_name = sanitize_filename(filename)?;
    Ok(format!("{UPLOAD_PREFIX}/{}/{safe_name}", generate_token()))
}
