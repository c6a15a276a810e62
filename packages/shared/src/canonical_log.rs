//! # Canonical Log Line ミドルウェア
//!
//! HTTP リクエスト完了時に、メソッド・パス・ステータス・レイテンシを
//! 1 行に集約したサマリログを出力する tower Layer。
//!
//! TraceLayer のスパン内に配置すると、スパンフィールド（request_id 等）が
//! JSON ログに自動的に含まれる:
//!
//! ```text
//! SetRequestIdLayer → TraceLayer → CanonicalLogLineLayer → handler
//! ```
//!
//! 5xx レスポンスは WARN、Service 自体のエラーは ERROR で出力する。

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
    time::Instant,
};

use http::{Request, Response};
use tower::{Layer, Service};

/// ヘルスチェックパスかどうかを判定する
fn is_health_check_path(path: &str) -> bool {
    path == "/health" || path.starts_with("/health/")
}

/// Canonical Log Line を出力する Layer
#[derive(Clone, Debug)]
pub struct CanonicalLogLineLayer;

impl<S> Layer<S> for CanonicalLogLineLayer {
    type Service = CanonicalLogLineService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CanonicalLogLineService { inner }
    }
}

/// [`CanonicalLogLineLayer`] が生成する Service 実装
#[derive(Clone, Debug)]
pub struct CanonicalLogLineService<S> {
    inner: S,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for CanonicalLogLineService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: std::fmt::Display + 'static,
    ReqBody: Send + 'static,
    ResBody: Send + 'static,
{
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;
    type Response = S::Response;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        // poll_ready 済みの inner を使い、代わりにクローンを残す
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        let Some(summary) = RequestSummary::start(&req) else {
            return Box::pin(async move { inner.call(req).await });
        };

        Box::pin(async move {
            let result = inner.call(req).await;
            summary.emit(&result);
            result
        })
    }
}

/// 1 リクエスト分のサマリ
struct RequestSummary {
    method:  String,
    path:    String,
    started: Instant,
}

impl RequestSummary {
    /// 計測を開始する。ヘルスチェックは `None`。
    fn start<B>(req: &Request<B>) -> Option<Self> {
        let path = req.uri().path();
        if is_health_check_path(path) {
            return None;
        }
        Some(Self {
            method:  req.method().to_string(),
            path:    path.to_owned(),
            started: Instant::now(),
        })
    }

    fn emit<B, E: std::fmt::Display>(&self, result: &Result<Response<B>, E>) {
        let latency_ms = u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX);
        let (method, path) = (&self.method, &self.path);

        match result {
            Ok(response) => {
                let status = response.status().as_u16();
                if response.status().is_server_error() {
                    tracing::warn!(
                        log.r#type = "canonical",
                        http.method = %method,
                        http.path = %path,
                        http.status_code = status,
                        http.latency_ms = latency_ms,
                        "リクエスト完了（サーバーエラー）"
                    );
                } else {
                    tracing::info!(
                        log.r#type = "canonical",
                        http.method = %method,
                        http.path = %path,
                        http.status_code = status,
                        http.latency_ms = latency_ms,
                        "リクエスト完了"
                    );
                }
            }
            Err(err) => {
                tracing::error!(
                    log.r#type = "canonical",
                    http.method = %method,
                    http.path = %path,
                    http.latency_ms = latency_ms,
                    error.message = %err,
                    "リクエスト処理エラー"
                );
            }
        }
    }
}
