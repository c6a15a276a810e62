//! # UserRepository
//!
//! 登録ユーザーの永続化を担当する。
//!
//! ユーザー名の一意性は `users.username` の UNIQUE 制約で保証し、
//! 違反は [`InfraError::conflict`] に変換する。事前の存在確認は行わないため、
//! 同時登録でも重複は発生しない。

use async_trait::async_trait;
use gourmet_domain::{
    password::PasswordHash,
    user::{User, UserId, Username},
};
use sqlx::SqlitePool;

use crate::error::InfraError;

/// ユーザーリポジトリトレイト
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// ユーザーを作成する
    ///
    /// # 戻り値
    ///
    /// - `Ok(id)`: 採番されたユーザー ID
    /// - `Err(e)` かつ `e.is_conflict()`: 同名のユーザーが既に存在する
    async fn insert(
        &self,
        username: &Username,
        password_hash: &PasswordHash,
    ) -> Result<UserId, InfraError>;

    /// ユーザー名で検索する
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, InfraError>;
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id:            i64,
    username:      String,
    password_hash: String,
}

impl TryFrom<UserRow> for User {
    type Error = InfraError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let username = Username::new(row.username)
            .map_err(|e| InfraError::unexpected(format!("不正なユーザー名が保存されています: {e}")))?;
        Ok(User::from_db(
            UserId::from_i64(row.id),
            username,
            PasswordHash::new(row.password_hash),
        ))
    }
}

/// SQLite 実装の UserRepository
#[derive(Debug, Clone)]
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(%username))]
    async fn insert(
        &self,
        username: &Username,
        password_hash: &PasswordHash,
    ) -> Result<UserId, InfraError> {
        let result = sqlx::query("INSERT INTO users (username, password_hash) VALUES (?1, ?2)")
            .bind(username.as_str())
            .bind(password_hash.as_str())
            .execute(&self.pool)
            .await;

        match result {
            Ok(done) => Ok(UserId::from_i64(done.last_insert_rowid())),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(InfraError::conflict("User", username.as_str()))
            }
            Err(e) => Err(e.into()),
        }
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%username))]
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, InfraError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, password_hash FROM users WHERE username = ?1",
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }
}
