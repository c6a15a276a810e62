//! # ドメイン層エラー定義
//!
//! 値オブジェクトの生成時に検出される入力ルール違反を表現する。
//!
//! API 層はこのエラーを 400 Bad Request（`validation_error`）に変換する。
//! メッセージはそのままクライアントに返るため、英語で記述する。

use thiserror::Error;

/// ドメイン層で発生するエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// - 必須フィールドが空
    /// - 文字数制限の超過
    /// - JSON オブジェクト以外のアイテム本体
    #[error("{0}")]
    Validation(String),
}

impl DomainError {
    /// バリデーションエラーを作成する
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
