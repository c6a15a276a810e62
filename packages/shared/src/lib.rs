//! # Gourmet 共有ユーティリティ
//!
//! domain / infra / api のいずれからも使う、ビジネスロジックを含まない部品。
//! ログ基盤と tower Layer は `observability` feature で有効になる。

#[cfg(feature = "observability")]
pub mod canonical_log;
pub mod error_response;
pub mod health;
pub mod observability;

pub use error_response::ErrorResponse;
pub use health::{CheckStatus, HealthResponse, ReadinessResponse, ReadinessStatus};
