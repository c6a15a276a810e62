//! テスト共通フィクスチャ
//!
//! マイグレーション済みのインメモリ SQLite とエンティティ生成ヘルパー。

// 各テストファイルが独立したクレートとしてコンパイルされるため、
// 使用しない関数に dead_code 警告が出る。モジュール全体で抑制する。
#![allow(dead_code)]

use gourmet_domain::recipe::{Ingredients, NewRecipe, RecipeTitle};
use gourmet_infra::db;
use sqlx::SqlitePool;

/// マイグレーション済みのインメモリ DB を用意する
pub async fn setup_pool() -> SqlitePool {
    let pool = db::create_in_memory_pool().await.unwrap();
    db::run_migrations(&pool).await.unwrap();
    pool
}

/// レシピ作成入力を組み立てる
pub fn new_recipe(title: &str, ingredients: &str, time_minutes: i32) -> NewRecipe {
    NewRecipe {
        title:        RecipeTitle::new(title).unwrap(),
        ingredients:  Ingredients::new(ingredients).unwrap(),
        time_minutes,
    }
}
