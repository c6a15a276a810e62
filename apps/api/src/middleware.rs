//! # 認証ミドルウェア
//!
//! ルートグループごとに `route_layer(from_fn_with_state(..))` で適用するガード。
//! ハンドラより先に実行され、認証済みの主体をリクエスト拡張に格納する。
//!
//! ```rust,ignore
//! Router::new()
//!     .route("/protected", get(protected))
//!     .route_layer(from_fn_with_state(bearer_state, require_bearer))
//! ```

pub mod basic;
pub mod bearer;

pub use basic::{BasicAuthState, BasicPrincipal, require_basic};
pub use bearer::{AuthenticatedUser, BearerAuthState, require_bearer};
