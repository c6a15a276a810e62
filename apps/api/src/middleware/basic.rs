//! # Basic 認証
//!
//! `Authorization: Basic base64(user:password)` を設定済みユーザーと照合し、
//! [`BasicPrincipal`] を拡張に格納する。失敗時は 401 と
//! `WWW-Authenticate: Basic realm="gourmet"` を返す。

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use gourmet_domain::user::Username;

use crate::{
    error::{ApiError, AuthFailure},
    usecase::BasicAuthUseCaseImpl,
};

/// Basic 認証ミドルウェアの状態
#[derive(Clone)]
pub struct BasicAuthState {
    pub usecase: Arc<BasicAuthUseCaseImpl>,
}

/// Basic 認証済みの主体
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicPrincipal(pub Username);

/// Basic 認証を要求するミドルウェア
pub async fn require_basic(
    State(state): State<BasicAuthState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let (username, password) = basic_credentials(request.headers())
        .ok_or(ApiError::Unauthenticated(AuthFailure::BasicRejected))?;

    let principal = state.usecase.authenticate(&username, &password).await?;

    request.extensions_mut().insert(BasicPrincipal(principal));
    Ok(next.run(request).await)
}

/// `Authorization` ヘッダーからユーザー名とパスワードを取り出す
fn basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}
