//! # HTTP リクエストハンドラ
//!
//! ハンドラは抽出・ユースケース呼び出し・ステータス変換のみを行う。
//! 認証はルートグループ単位のミドルウェアで済ませ、主体は拡張から受け取る。
//!
//! ```text
//! handler.rs
//! └── handler/
//!     ├── health.rs   # GET /health, GET /health/ready
//!     ├── auth.rs     # POST /register, POST /login, GET /protected
//!     ├── item.rs     # /items（Basic 認証）
//!     ├── recipe.rs   # /recipes（Bearer 認証）
//!     └── scrape.rs   # GET /scrape/title（Basic 認証）
//! ```

pub mod auth;
pub mod health;
pub mod item;
pub mod recipe;
pub mod scrape;

pub use auth::{AuthState, login, protected, register};
pub use health::{ReadinessState, health_check, readiness_check};
pub use item::{ItemState, create_item, delete_item, list_items, update_item};
pub use recipe::{RecipeState, create_recipe, delete_recipe, list_recipes, update_recipe};
pub use scrape::{ScrapeState, scrape_title};
