//! # API エラー定義
//!
//! ユースケース・ミドルウェア・抽出器で発生するエラーと、HTTP レスポンスへの変換。
//!
//! ## ステータスとエラーコード
//!
//! | バリアント | ステータス | `error` |
//! |-----------|-----------|---------|
//! | `Validation` | 400 | `validation_error` |
//! | `Duplicate` | 400 | `duplicate_resource` |
//! | `Unauthenticated` | 401 | `token_missing` / `token_invalid` / `token_expired` / `invalid_credentials` |
//! | `NotFound` | 404 | `not_found` |
//! | `Upstream` | 500 | `upstream_fetch_error` |
//! | `Internal` | 500 | `internal_error` |
//!
//! レスポンス本体は常に [`ErrorResponse`]（`{"error": ..., "message": ...}`）。

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use gourmet_domain::DomainError;
use gourmet_infra::{InfraError, token::TokenError};
use gourmet_shared::ErrorResponse;
use thiserror::Error;

/// Basic 認証のチャレンジ
pub const BASIC_CHALLENGE: &str = r#"Basic realm="gourmet", charset="UTF-8""#;

/// 認証失敗の理由
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    /// Bearer トークンが送られていない
    TokenMissing,
    /// Bearer トークンが不正
    TokenInvalid,
    /// Bearer トークンの有効期限切れ
    TokenExpired,
    /// `/login` のユーザー名またはパスワードが誤り
    InvalidCredentials,
    /// Basic 認証の資格情報がない、または誤り
    BasicRejected,
}

impl AuthFailure {
    pub fn code(self) -> &'static str {
        match self {
            Self::TokenMissing => "token_missing",
            Self::TokenInvalid => "token_invalid",
            Self::TokenExpired => "token_expired",
            Self::InvalidCredentials | Self::BasicRejected => "invalid_credentials",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::TokenMissing => "Missing Authorization Header",
            Self::TokenInvalid => "Invalid token",
            Self::TokenExpired => "Token has expired",
            Self::InvalidCredentials | Self::BasicRejected => "Invalid credentials",
        }
    }

    /// Bearer トークンの検証で発生した失敗か
    pub fn is_bearer(self) -> bool {
        matches!(self, Self::TokenMissing | Self::TokenInvalid | Self::TokenExpired)
    }

    /// `WWW-Authenticate` ヘッダーの値
    fn challenge(self) -> Option<&'static str> {
        match self {
            Self::TokenMissing => Some("Bearer"),
            Self::TokenInvalid | Self::TokenExpired => Some(r#"Bearer error="invalid_token""#),
            Self::BasicRejected => Some(BASIC_CHALLENGE),
            Self::InvalidCredentials => None,
        }
    }
}

/// API で発生するエラー
#[derive(Debug, Error)]
pub enum ApiError {
    /// リクエストの形式・値が不正
    #[error("{0}")]
    Validation(String),

    /// 一意であるべきリソースが既に存在する
    #[error("{0}")]
    Duplicate(String),

    /// 認証失敗
    #[error("{}", .0.message())]
    Unauthenticated(AuthFailure),

    /// 対象が存在しない
    #[error("{0}")]
    NotFound(String),

    /// 外部サイトの取得失敗（メッセージはクライアントに返す）
    #[error("{0}")]
    Upstream(String),

    /// インフラ層のエラー（詳細はログのみ）
    #[error("内部エラー: {0}")]
    Internal(#[from] InfraError),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Invalid => Self::Unauthenticated(AuthFailure::TokenInvalid),
            TokenError::Expired => Self::Unauthenticated(AuthFailure::TokenExpired),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body, challenge) = match &self {
            ApiError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::validation_error(msg),
                None,
            ),
            ApiError::Duplicate(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::duplicate_resource(msg),
                None,
            ),
            ApiError::Unauthenticated(reason) => {
                let body = ErrorResponse::new(reason.code(), reason.message());
                // Bearer 認証の失敗は `msg` も持つ
                let body = if reason.is_bearer() { body.with_msg() } else { body };
                (StatusCode::UNAUTHORIZED, body, reason.challenge())
            }
            ApiError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorResponse::not_found(msg),
                None,
            ),
            ApiError::Upstream(msg) => {
                tracing::warn!(error.message = %msg, "外部サイトの取得に失敗しました");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::upstream_fetch_error(msg),
                    None,
                )
            }
            ApiError::Internal(e) => {
                tracing::error!(
                    error.kind = "internal",
                    error.message = %e,
                    span_trace = %e.span_trace(),
                    "内部エラーが発生しました"
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::internal_error(),
                    None,
                )
            }
        };

        let mut response = (status, Json(body)).into_response();
        if let Some(challenge) = challenge {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static(challenge));
        }
        response
    }
}
