//! # Bearer トークン認証
//!
//! `Authorization: Bearer <token>` を検証し、[`AuthenticatedUser`] を拡張に格納する。
//!
//! | 状態 | エラーコード |
//! |------|------------|
//! | ヘッダーなし・Bearer 以外のスキーム・空トークン | `token_missing` |
//! | 署名不一致・形式不正 | `token_invalid` |
//! | 有効期限切れ | `token_expired` |

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use gourmet_domain::user::UserId;
use gourmet_infra::token::TokenService;

use crate::error::{ApiError, AuthFailure};

/// Bearer 認証ミドルウェアの状態
#[derive(Clone)]
pub struct BearerAuthState {
    pub token_service: Arc<dyn TokenService>,
}

/// 認証済みユーザー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser(pub UserId);

/// Bearer トークンを要求するミドルウェア
pub async fn require_bearer(
    State(state): State<BearerAuthState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user_id = {
        let token = bearer_token(request.headers())
            .ok_or(ApiError::Unauthenticated(AuthFailure::TokenMissing))?;
        state.token_service.validate(token)?
    };

    tracing::debug!(user_id = %user_id, "Bearer 認証に成功しました");
    request.extensions_mut().insert(AuthenticatedUser(user_id));
    Ok(next.run(request).await)
}

/// `Authorization` ヘッダーから Bearer トークンを取り出す
///
/// スキーム名は大文字小文字を区別しない。
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
