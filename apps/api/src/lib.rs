//! # Gourmet API サーバー
//!
//! ユーザー登録・JWT 認証、Basic 認証付きのアイテム管理、
//! レシピ CRUD、ページタイトル取得を提供する REST API。
//!
//! ## レイヤー構成
//!
//! ```text
//! handler ──▶ usecase ──▶ gourmet_infra（SQLite / reqwest / JWT / Argon2）
//!    ▲                          │
//! middleware（Bearer / Basic）   ▼
//!                         gourmet_domain（値オブジェクト）
//! ```
//!
//! ## モジュール構成
//!
//! - [`app_builder`] - 依存注入とルーター構築
//! - [`config`] - 環境変数からの設定読み込み
//! - [`error`] - API エラーと HTTP レスポンスへの変換
//! - [`extract`] - エラー形式を統一したリクエスト抽出器
//! - [`handler`] - HTTP リクエストハンドラ
//! - [`middleware`] - 認証ガード
//! - [`usecase`] - ユースケース

pub mod app_builder;
pub mod config;
pub mod error;
pub mod extract;
pub mod handler;
pub mod middleware;
pub mod usecase;

pub use app_builder::{AppDependencies, build_app};
