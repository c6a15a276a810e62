//! # ページタイトル取得
//!
//! 指定 URL の HTML を取得し、`<title>` 要素のテキストを返す。
//!
//! 取得先のステータスコードは検査しない（エラーページでもタイトルがあれば返す）。

use std::time::Duration;

use async_trait::async_trait;
use scraper::{Html, Selector};
use thiserror::Error;
use url::Url;

use crate::InfraError;

/// タイトル取得の失敗理由
///
/// メッセージはそのままクライアントに返る。
#[derive(Debug, Error)]
pub enum FetchTitleError {
    /// 接続失敗・タイムアウト・本文の読み取り失敗
    #[error("failed to fetch {url}: {source}")]
    Request {
        url:    String,
        #[source]
        source: reqwest::Error,
    },
    /// `<title>` がない、または空
    #[error("no title found at {0}")]
    TitleNotFound(String),
}

/// ページタイトルを取得するトレイト
#[async_trait]
pub trait PageTitleFetcher: Send + Sync {
    async fn fetch_title(&self, url: &Url) -> Result<String, FetchTitleError>;
}

/// reqwest による実装
#[derive(Debug, Clone)]
pub struct HttpPageTitleFetcher {
    client: reqwest::Client,
}

impl HttpPageTitleFetcher {
    /// タイムアウトを指定して作成する
    pub fn new(timeout: Duration) -> Result<Self, InfraError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("gourmet/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageTitleFetcher for HttpPageTitleFetcher {
    #[tracing::instrument(skip(self), fields(url = %url), level = "debug")]
    async fn fetch_title(&self, url: &Url) -> Result<String, FetchTitleError> {
        let request_error = |source| FetchTitleError::Request {
            url: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(request_error)?;
        tracing::debug!(status = %response.status(), "ページを取得しました");

        let body = response.text().await.map_err(request_error)?;

        extract_title(&body).ok_or_else(|| FetchTitleError::TitleNotFound(url.to_string()))
    }
}

/// HTML から最初の `<title>` のテキストを取り出す
///
/// 前後空白を除去し、空なら `None`。
pub fn extract_title(html: &str) -> Option<String> {
    let selector = Selector::parse("title").ok()?;
    let document = Html::parse_document(html);
    let title = document
        .select(&selector)
        .next()?
        .text()
        .collect::<String>();
    let title = title.trim();
    (!title.is_empty()).then(|| title.to_string())
}
