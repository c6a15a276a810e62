//! # ヘルスチェックハンドラ
//!
//! ## エンドポイント
//!
//! ```text
//! GET /health         # プロセスの稼働確認（常に 200）
//! GET /health/ready   # データベース接続を含む準備状態（200 / 503）
//! ```

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use gourmet_infra::db;
use gourmet_shared::{CheckStatus, HealthResponse, ReadinessResponse};
use sqlx::SqlitePool;

/// Readiness Check の共有状態
pub struct ReadinessState {
    pub pool: SqlitePool,
}

/// ヘルスチェックエンドポイント
///
/// データベースには触れず、アプリケーション自体の起動状態のみを返す。
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy(env!("CARGO_PKG_VERSION")))
}

/// Readiness Check エンドポイント
///
/// 1 つでも依存先が利用できなければ 503 を返す。
pub async fn readiness_check(
    State(state): State<Arc<ReadinessState>>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let database = CheckStatus::from(db::check_connection(&state.pool).await);

    let response = ReadinessResponse::from_checks([("database", database)]);
    let status = if response.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::Request,
        routing::get,
    };
    use gourmet_infra::db::create_in_memory_pool;
    use pretty_assertions::assert_eq;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_health_checkはバージョンを返す() {
        let app = Router::new().route("/health", get(health_check));

        let (status, json) = get_json(app, "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_接続できればreadyを返す() {
        let pool = create_in_memory_pool().await.unwrap();
        let app = Router::new()
            .route("/health/ready", get(readiness_check))
            .with_state(Arc::new(ReadinessState { pool }));

        let (status, json) = get_json(app, "/health/ready").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ready");
        assert_eq!(json["checks"]["database"], "ok");
    }

    #[tokio::test]
    async fn test_プールが閉じていれば503を返す() {
        let pool = create_in_memory_pool().await.unwrap();
        pool.close().await;
        let app = Router::new()
            .route("/health/ready", get(readiness_check))
            .with_state(Arc::new(ReadinessState { pool }));

        let (status, json) = get_json(app, "/health/ready").await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json["status"], "not_ready");
    }
}
