//! # スクレイピングハンドラ
//!
//! `GET /scrape/title?url=` で指定ページの `<title>` を返す。

use std::sync::Arc;

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, extract::ApiQuery, usecase::ScrapeUseCaseImpl};

/// スクレイピングハンドラの共有状態
pub struct ScrapeState {
    pub usecase: Arc<ScrapeUseCaseImpl>,
}

#[derive(Debug, Deserialize)]
pub struct ScrapeQuery {
    pub url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TitleResponse {
    pub title: String,
}

/// GET /scrape/title
pub async fn scrape_title(
    State(state): State<Arc<ScrapeState>>,
    ApiQuery(query): ApiQuery<ScrapeQuery>,
) -> Result<Json<TitleResponse>, ApiError> {
    let title = state.usecase.page_title(query.url.as_deref()).await?;
    Ok(Json(TitleResponse { title }))
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Request, StatusCode},
        routing::get,
    };
    use gourmet_infra::page_title::{FetchTitleError, PageTitleFetcher};
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};
    use tower::ServiceExt;
    use url::Url;

    use super::*;

    /// ホストが "example.com" のときだけタイトルを返す
    struct StubFetcher;

    #[async_trait]
    impl PageTitleFetcher for StubFetcher {
        async fn fetch_title(&self, url: &Url) -> Result<String, FetchTitleError> {
            match url.host_str() {
                Some("example.com") => Ok("Example Domain".to_string()),
                _ => Err(FetchTitleError::TitleNotFound(url.to_string())),
            }
        }
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let state = Arc::new(ScrapeState {
            usecase: Arc::new(ScrapeUseCaseImpl::new(Arc::new(StubFetcher))),
        });
        let app = Router::new()
            .route("/scrape/title", get(scrape_title))
            .with_state(state);
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_タイトルを返す() {
        let (status, json) = get_json("/scrape/title?url=https://example.com").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!({"title": "Example Domain"}));
    }

    #[tokio::test]
    async fn test_urlがなければ400() {
        let (status, json) = get_json("/scrape/title").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "URL is required");
    }

    #[tokio::test]
    async fn test_取得失敗は500で原因を返す() {
        let (status, json) = get_json("/scrape/title?url=http://other.test/").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "upstream_fetch_error");
        assert_eq!(json["message"], "no title found at http://other.test/");
    }
}
