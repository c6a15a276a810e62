//! # Gourmet ドメイン層
//!
//! ユーザー・レシピ・アイテムのドメインモデルと、それらが守るべき
//! 入力ルールを定義する。
//!
//! ## 依存関係の方向
//!
//! ```text
//! api → infra → domain
//! ```
//!
//! ドメイン層は DB や HTTP クライアントに依存しない。永続化やトークン発行は
//! インフラ層がトレイト実装として提供する。
//!
//! ## モジュール構成
//!
//! - [`clock`] - 時刻プロバイダ（トークン有効期限の判定に使用）
//! - [`error`] - ドメイン層のエラー
//! - [`item`] - インメモリで管理する任意 JSON オブジェクト
//! - [`password`] - 平文パスワード・ハッシュ・検証結果
//! - [`recipe`] - レシピと一覧フィルタ
//! - [`user`] - 登録ユーザー
//!
//! ## 使用例
//!
//! ```rust
//! use gourmet_domain::{DomainError, user::Username};
//!
//! let name = Username::new("  alice  ").unwrap();
//! assert_eq!(name.as_str(), "alice");
//!
//! let err = Username::new("   ").unwrap_err();
//! assert!(matches!(err, DomainError::Validation(_)));
//! ```

#[macro_use]
mod macros;

pub mod clock;
pub mod error;
pub mod item;
pub mod password;
pub mod recipe;
pub mod user;

pub use error::DomainError;
