//! # ページタイトル取得ユースケース
//!
//! URL を検証してから取得する。取得やタイトル抽出の失敗は
//! 原因メッセージ付きの 500（`upstream_fetch_error`）になる。

use std::sync::Arc;

use gourmet_infra::page_title::PageTitleFetcher;
use url::Url;

use crate::error::ApiError;

pub struct ScrapeUseCaseImpl {
    fetcher: Arc<dyn PageTitleFetcher>,
}

impl ScrapeUseCaseImpl {
    pub fn new(fetcher: Arc<dyn PageTitleFetcher>) -> Self {
        Self { fetcher }
    }

    #[tracing::instrument(skip(self))]
    pub async fn page_title(&self, url: Option<&str>) -> Result<String, ApiError> {
        let url = parse_target(url)?;

        self.fetcher
            .fetch_title(&url)
            .await
            .map_err(|e| ApiError::Upstream(e.to_string()))
    }
}

/// 取得対象の URL を検証する
///
/// 未指定・空白のみ・http(s) 以外はバリデーションエラー。
fn parse_target(raw: Option<&str>) -> Result<Url, ApiError> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::validation("URL is required"))?;

    let url = Url::parse(raw).map_err(|e| ApiError::validation(format!("invalid URL: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ApiError::validation(format!(
            "unsupported URL scheme: {other}"
        ))),
    }
}
