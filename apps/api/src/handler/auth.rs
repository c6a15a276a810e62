//! # 認証ハンドラ
//!
//! ## エンドポイント
//!
//! - `POST /register` - ユーザー登録
//! - `POST /login` - アクセストークン発行
//! - `GET /protected` - Bearer 認証の確認用

use std::sync::Arc;

use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};

use crate::{
    error::ApiError,
    extract::ApiJson,
    middleware::AuthenticatedUser,
    usecase::AuthUseCase,
};

/// 認証ハンドラの共有状態
pub struct AuthState {
    pub usecase: Arc<dyn AuthUseCase>,
}

// --- リクエスト/レスポンス型 ---

/// 登録・ログイン共通のリクエスト
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

/// `{"msg": ...}` 形式のレスポンス
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub msg: String,
}

/// ログインレスポンス
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
}

// --- ハンドラ ---

/// POST /register
pub async fn register(
    State(state): State<Arc<AuthState>>,
    ApiJson(req): ApiJson<CredentialsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state.usecase.register(&req.username, &req.password).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            msg: "User created".to_string(),
        }),
    ))
}

/// POST /login
///
/// ユーザー不在とパスワード不一致は同じ 401 になる。
pub async fn login(
    State(state): State<Arc<AuthState>>,
    ApiJson(req): ApiJson<CredentialsRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let access_token = state.usecase.login(&req.username, &req.password).await?;
    Ok(Json(LoginResponse { access_token }))
}

/// GET /protected
pub async fn protected(
    Extension(AuthenticatedUser(user_id)): Extension<AuthenticatedUser>,
) -> Json<MessageResponse> {
    Json(MessageResponse {
        msg: format!("User with ID {user_id} accessed the protected route."),
    })
}
