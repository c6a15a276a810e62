//! # パスワード
//!
//! | 型 | 用途 |
//! |---|------|
//! | [`PlainPassword`] | 登録・ログイン時の入力値 |
//! | [`PasswordHash`] | 永続化・メモリ保持用の Argon2id PHC 文字列 |
//! | [`PasswordVerifyResult`] | 検証の成否 |
//!
//! 平文は保存しない。ハッシュ化と検証はインフラ層の `PasswordChecker` が担う。

use crate::DomainError;

/// 平文パスワード
///
/// 空文字列は受け付けない。前後の空白は意味を持つ値として保持する。
/// Debug 出力では値をマスクする。
#[derive(Clone)]
pub struct PlainPassword(String);

impl std::fmt::Debug for PlainPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PlainPassword(\"[REDACTED]\")")
    }
}

impl PlainPassword {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        if value.is_empty() {
            return Err(DomainError::validation("password is required"));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// パスワードハッシュ（PHC 文字列形式）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// DB やハッシュ関数の出力から復元する
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// パスワード検証結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordVerifyResult {
    Match,
    Mismatch,
}

impl PasswordVerifyResult {
    pub fn is_match(self) -> bool {
        self == Self::Match
    }
}

impl From<bool> for PasswordVerifyResult {
    fn from(matched: bool) -> Self {
        if matched { Self::Match } else { Self::Mismatch }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_空のパスワードはバリデーションエラー() {
        let err = PlainPassword::new("").unwrap_err();

        assert_eq!(err, DomainError::validation("password is required"));
    }

    #[rstest]
    fn test_空白を含むパスワードはそのまま保持される() {
        let password = PlainPassword::new(" p w ").unwrap();

        assert_eq!(password.as_str(), " p w ");
    }

    #[rstest]
    fn test_debug出力はマスクされる() {
        let password = PlainPassword::new("hunter2").unwrap();
        let debug = format!("{password:?}");

        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("hunter2"));
    }

    #[rstest]
    #[case(true, PasswordVerifyResult::Match)]
    #[case(false, PasswordVerifyResult::Mismatch)]
    fn test_boolから検証結果に変換できる(
        #[case] input: bool,
        #[case] expected: PasswordVerifyResult,
    ) {
        let result = PasswordVerifyResult::from(input);

        assert_eq!(result, expected);
        assert_eq!(result.is_match(), input);
    }
}
