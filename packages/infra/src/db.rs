//! # SQLite データベース接続管理
//!
//! 接続プールの作成、埋め込みマイグレーションの適用、
//! Readiness Check 用の疎通確認を提供する。
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use gourmet_infra::db;
//!
//! let pool = db::create_pool("sqlite://recipes.db").await?;
//! db::run_migrations(&pool).await?;
//! ```

use std::{str::FromStr, time::Duration};

use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

use crate::error::InfraError;

/// 接続プールを作成する
///
/// ファイルが存在しない場合は作成する。
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, InfraError> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// インメモリ DB の接続プールを作成する
///
/// インメモリ DB は接続ごとに独立するため、接続数を 1 に固定し、
/// アイドル切断・寿命切れで DB が消えないようにする。テスト用。
pub async fn create_in_memory_pool() -> Result<SqlitePool, InfraError> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// 埋め込みマイグレーションを適用する
///
/// 適用済みのマイグレーションはスキップされる。
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), InfraError> {
    sqlx::migrate!("../../migrations").run(pool).await?;
    Ok(())
}

/// DB への疎通を確認する
pub async fn check_connection(pool: &SqlitePool) -> bool {
    sqlx::query("SELECT 1").execute(pool).await.is_ok()
}
