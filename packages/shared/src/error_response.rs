//! # エラーレスポンス
//!
//! 全エンドポイントで共通のエラーレスポンス構造体を提供する。
//!
//! ## 設計
//!
//! - `ErrorResponse` は純粋なデータ構造（`Serialize` / `Deserialize` のみ）
//! - axum の `IntoResponse` 変換は API クレートの責務（shared に axum 依存を入れない）
//! - `error` はクライアントが分岐に使う機械可読なコード、`message` は人間向けの説明
//! - よく使うエラー種別は便利コンストラクタで提供し、コード文字列のハードコードを排除

use serde::{Deserialize, Serialize};

/// エラーレスポンス
///
/// すべてのエンドポイントで統一されたエラーレスポンス形式。
///
/// ```json
/// { "error": "not_found", "message": "item not found" }
/// ```
///
/// Bearer 認証の失敗では `msg` にも同じメッセージを入れる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// 機械可読なエラーコード（例: `"token_expired"`）
    pub error:   String,
    /// 人間可読なメッセージ
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg:     Option<String>,
}

impl ErrorResponse {
    /// 汎用コンストラクタ
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error:   code.into(),
            message: message.into(),
            msg:     None,
        }
    }

    /// `message` を `msg` にも複製する
    pub fn with_msg(mut self) -> Self {
        self.msg = Some(self.message.clone());
        self
    }

    /// 400 入力値エラー
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("validation_error", message)
    }

    /// 400 リソース重複
    pub fn duplicate_resource(message: impl Into<String>) -> Self {
        Self::new("duplicate_resource", message)
    }

    /// 404 Not Found
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("not_found", message)
    }

    /// 500 外部サイト取得エラー
    ///
    /// 原因となったメッセージをそのままクライアントに返す。
    pub fn upstream_fetch_error(message: impl Into<String>) -> Self {
        Self::new("upstream_fetch_error", message)
    }

    /// 500 Internal Server Error
    ///
    /// message は固定値（内部情報を漏らさないため）。
    pub fn internal_error() -> Self {
        Self::new("internal_error", "Internal server error")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_new_で全フィールドが正しく設定される() {
        let error = ErrorResponse::new("token_missing", "Missing Authorization Header");

        assert_eq!(error.error, "token_missing");
        assert_eq!(error.message, "Missing Authorization Header");
    }

    #[test]
    fn test_internal_error_は固定メッセージを返す() {
        let error = ErrorResponse::internal_error();

        assert_eq!(error.error, "internal_error");
        assert_eq!(error.message, "Internal server error");
    }

    #[test]
    fn test_便利コンストラクタのエラーコードが正しい() {
        assert_eq!(ErrorResponse::validation_error("").error, "validation_error");
        assert_eq!(
            ErrorResponse::duplicate_resource("").error,
            "duplicate_resource"
        );
        assert_eq!(ErrorResponse::not_found("").error, "not_found");
        assert_eq!(
            ErrorResponse::upstream_fetch_error("").error,
            "upstream_fetch_error"
        );
    }

    #[test]
    fn test_with_msgでmsgキーが出力される() {
        let error =
            ErrorResponse::new("token_missing", "Missing Authorization Header").with_msg();
        let json = serde_json::to_value(&error).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "error": "token_missing",
                "message": "Missing Authorization Header",
                "msg": "Missing Authorization Header"
            })
        );
    }

    #[test]
    fn test_jsonシリアライズの形状が正しい() {
        let error = ErrorResponse::not_found("item not found");
        let json = serde_json::to_value(&error).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "error": "not_found", "message": "item not found" })
        );
    }
}
