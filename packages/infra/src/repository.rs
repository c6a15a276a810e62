//! # リポジトリ実装
//!
//! ユースケース層が依存するリポジトリトレイトと、その実装を提供する。
//!
//! - ユーザー・レシピ: SQLite（`sqlx`）
//! - アイテム: プロセスメモリ（`tokio::sync::RwLock`）

pub mod item_repository;
pub mod recipe_repository;
pub mod user_repository;

pub use item_repository::{InMemoryItemRepository, ItemRepository};
pub use recipe_repository::{RecipeRepository, SqliteRecipeRepository};
pub use user_repository::{SqliteUserRepository, UserRepository};
