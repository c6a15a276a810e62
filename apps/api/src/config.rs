//! # API サーバー設定
//!
//! 環境変数から設定を読み込む。`.env` は `main` で `dotenvy` により読み込み済みの前提。
//!
//! 読み取りは [`ApiConfig::from_lookup`] に集約し、テストではプロセス環境を
//! 触らずに任意の値を与えられるようにしている。

use std::time::Duration;

use gourmet_domain::{password::PlainPassword, user::Username};
use gourmet_infra::token::DEFAULT_TOKEN_TTL_SECONDS;
use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_DATABASE_URL: &str = "sqlite://recipes.db";
const DEFAULT_SCRAPE_TIMEOUT_SECONDS: u64 = 10;

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} が設定されていません")]
    Missing(&'static str),

    #[error("{name} の値が不正です ({value:?}): {reason}")]
    Invalid {
        name:   &'static str,
        value:  String,
        reason: String,
    },
}

/// API サーバーの設定
#[derive(Clone)]
pub struct ApiConfig {
    /// バインドアドレス
    pub host:             String,
    /// ポート番号
    pub port:             u16,
    /// SQLite 接続 URL
    pub database_url:     String,
    /// JWT 署名鍵
    pub jwt_secret:       String,
    /// アクセストークンの有効期間（秒）
    pub jwt_ttl_seconds:  i64,
    /// Basic 認証で受け付けるユーザー
    pub basic_auth_users: Vec<(Username, PlainPassword)>,
    /// ページタイトル取得のタイムアウト
    pub scrape_timeout:   Duration,
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let users: Vec<&str> = self
            .basic_auth_users
            .iter()
            .map(|(name, _)| name.as_str())
            .collect();
        f.debug_struct("ApiConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database_url", &self.database_url)
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_ttl_seconds", &self.jwt_ttl_seconds)
            .field("basic_auth_users", &users)
            .field("scrape_timeout", &self.scrape_timeout)
            .finish()
    }
}

impl ApiConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 名前から値を引く関数を使って設定を組み立てる
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let jwt_ttl_seconds = parse_or("JWT_TTL_SECONDS", &lookup, DEFAULT_TOKEN_TTL_SECONDS)?;
        if jwt_ttl_seconds <= 0 {
            return Err(ConfigError::Invalid {
                name:   "JWT_TTL_SECONDS",
                value:  jwt_ttl_seconds.to_string(),
                reason: "1 以上である必要があります".to_string(),
            });
        }

        let scrape_timeout_seconds = parse_or(
            "SCRAPE_TIMEOUT_SECONDS",
            &lookup,
            DEFAULT_SCRAPE_TIMEOUT_SECONDS,
        )?;

        let basic_auth_users = match lookup("BASIC_AUTH_USERS") {
            Some(raw) => parse_basic_auth_users(&raw)?,
            None => Vec::new(),
        };

        Ok(Self {
            host: lookup("API_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse_or("API_PORT", &lookup, DEFAULT_PORT)?,
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            jwt_secret,
            jwt_ttl_seconds,
            basic_auth_users,
            scrape_timeout: Duration::from_secs(scrape_timeout_seconds),
        })
    }
}

fn parse_or<T>(
    name: &'static str,
    lookup: &impl Fn(&str) -> Option<String>,
    default: T,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            reason: e.to_string(),
            value,
        }),
    }
}

/// `user:password,user2:password2` 形式をパースする
///
/// 空の要素は無視する。パスワードには `:` を含められる（最初の `:` で分割）。
pub fn parse_basic_auth_users(raw: &str) -> Result<Vec<(Username, PlainPassword)>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let invalid = |reason: String| ConfigError::Invalid {
                name: "BASIC_AUTH_USERS",
                value: entry.to_string(),
                reason,
            };
            let (user, password) = entry
                .split_once(':')
                .ok_or_else(|| invalid("user:password 形式で指定してください".to_string()))?;
            let user = Username::new(user).map_err(|e| invalid(e.to_string()))?;
            let password = PlainPassword::new(password).map_err(|e| invalid(e.to_string()))?;
            Ok((user, password))
        })
        .collect()
}
