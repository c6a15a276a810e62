//! # Gourmet インフラ層
//!
//! 外部システム（SQLite、HTTP、暗号ライブラリ）との接続を担う。
//!
//! ## モジュール構成
//!
//! - [`db`] - SQLite 接続プールとマイグレーション
//! - [`error`] - インフラ層のエラー
//! - [`credential_store`] - Basic 認証用の資格情報
//! - [`page_title`] - Web ページのタイトル取得
//! - [`password`] - Argon2id によるハッシュ化と検証
//! - [`repository`] - ユーザー・レシピ・アイテムのリポジトリ
//! - [`token`] - JWT アクセストークン

pub mod credential_store;
pub mod db;
pub mod error;
pub mod page_title;
pub mod password;
pub mod repository;
pub mod token;

pub use error::{InfraError, InfraErrorKind};
