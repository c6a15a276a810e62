//! # ユースケース層
//!
//! ハンドラとリポジトリの間でビジネスルールを適用する。

pub mod auth;
pub mod item;
pub mod recipe;
pub mod scrape;

pub use auth::{AuthUseCase, AuthUseCaseImpl, BasicAuthUseCaseImpl};
pub use item::ItemUseCaseImpl;
pub use recipe::{CreateRecipeInput, RecipeUseCaseImpl, UpdateRecipeInput};
pub use scrape::ScrapeUseCaseImpl;
