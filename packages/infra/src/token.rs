//! # アクセストークン
//!
//! HS256 署名の JWT を発行・検証する。
//!
//! ## クレーム
//!
//! | クレーム | 内容 |
//! |---------|------|
//! | `sub` | ユーザー ID（10 進文字列） |
//! | `iat` | 発行時刻（UNIX 秒） |
//! | `exp` | 有効期限（UNIX 秒） |
//! | `jti` | トークン ID（UUID v7） |
//!
//! 有効期限は注入された [`Clock`] で判定し、猶予（leeway）は設けない。
//! サーバー側には状態を持たないため、失効・リフレッシュは扱わない。

use std::{collections::HashSet, sync::Arc};

use gourmet_domain::{clock::Clock, user::UserId};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::InfraError;

/// デフォルトの有効期間（15 分）
pub const DEFAULT_TOKEN_TTL_SECONDS: i64 = 900;

/// トークン検証の失敗理由
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// 署名不一致・形式不正・クレーム不足
    #[error("Invalid token")]
    Invalid,
    /// 有効期限切れ
    #[error("Token has expired")]
    Expired,
}

/// トークンの発行と検証を担当するトレイト
pub trait TokenService: Send + Sync {
    /// ユーザーに対するアクセストークンを発行する
    fn issue(&self, user_id: UserId) -> Result<String, InfraError>;

    /// トークンを検証し、埋め込まれたユーザー ID を返す
    fn validate(&self, token: &str) -> Result<UserId, TokenError>;
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
    jti: String,
}

/// HS256 JWT 実装
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation:   Validation,
    ttl_seconds:  i64,
    clock:        Arc<dyn Clock>,
}

impl JwtTokenService {
    pub fn new(secret: &[u8], ttl_seconds: i64, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // exp は Clock で判定する
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.required_spec_claims =
            HashSet::from(["sub".to_string(), "exp".to_string(), "iat".to_string()]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl_seconds,
            clock,
        }
    }
}

impl TokenService for JwtTokenService {
    #[tracing::instrument(skip(self), level = "debug")]
    fn issue(&self, user_id: UserId) -> Result<String, InfraError> {
        let now = self.clock.unix_timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now,
            exp: now.saturating_add(self.ttl_seconds),
            jti: uuid::Uuid::now_v7().to_string(),
        };

        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        Ok(token)
    }

    fn validate(&self, token: &str) -> Result<UserId, TokenError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "トークンの検証に失敗しました");
                TokenError::Invalid
            })?;

        if self.clock.unix_timestamp() >= data.claims.exp {
            return Err(TokenError::Expired);
        }

        data.claims
            .sub
            .parse::<i64>()
            .map(UserId::from_i64)
            .map_err(|_| TokenError::Invalid)
    }
}
