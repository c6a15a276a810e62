//! # Observability 基盤
//!
//! トレーシングの初期化と、HTTP リクエストごとのスパン・Request ID 生成。
//!
//! | 変数 | 値 | デフォルト |
//! |------|----|-----------|
//! | `LOG_FORMAT` | `json` / `pretty` | `pretty` |
//! | `RUST_LOG` | EnvFilter 構文 | `info,gourmet=debug` |

/// Request ID を伝播する HTTP ヘッダー名
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// `RUST_LOG` 未設定時のフィルタ
pub const DEFAULT_LOG_FILTER: &str = "info,gourmet=debug";

/// ログ出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 1 行 1 JSON（本番向け）
    Json,
    #[default]
    Pretty,
}

impl LogFormat {
    /// `LOG_FORMAT` の値を解釈する
    ///
    /// 未設定は `Pretty`。不明な値も `Pretty` にして stderr に警告する
    /// （subscriber 初期化前のため tracing は使えない）。
    pub fn from_value(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") => Self::default(),
            Some(v) if v.eq_ignore_ascii_case("json") => Self::Json,
            Some(v) if v.eq_ignore_ascii_case("pretty") => Self::Pretty,
            Some(other) => {
                eprintln!("WARNING: unknown LOG_FORMAT={other:?}, using pretty");
                Self::Pretty
            }
        }
    }
}

/// トレーシング初期化設定
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// `app` スパンに載せるサービス名
    pub service_name: String,
    pub log_format:   LogFormat,
}

impl TracingConfig {
    pub fn new(service_name: impl Into<String>, log_format: LogFormat) -> Self {
        Self {
            service_name: service_name.into(),
            log_format,
        }
    }

    /// `LOG_FORMAT` から形式を決める
    pub fn from_env(service_name: impl Into<String>) -> Self {
        let format = std::env::var("LOG_FORMAT").ok();
        Self::new(service_name, LogFormat::from_value(format.as_deref()))
    }
}

/// グローバル subscriber を登録する
///
/// `tracing_error::ErrorLayer` を含むため、`InfraError` の `SpanTrace` に
/// 発生時点のスパン経路が残る。
#[cfg(feature = "observability")]
pub fn init_tracing(config: &TracingConfig) {
    use tracing_subscriber::{EnvFilter, Layer as _, layer::SubscriberExt, util::SubscriberInitExt};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let fmt_layer = match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_span_list(false)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer().with_target(false).boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(tracing_error::ErrorLayer::default())
        .init();
}

/// `TraceLayer::make_span_with` 用のリクエストスパン
///
/// `SetRequestIdLayer` より内側で呼ばれるので Request ID は設定済み。
#[cfg(feature = "observability")]
pub fn make_request_span<B>(request: &http::Request<B>) -> tracing::Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");

    tracing::info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id,
    )
}

/// UUID v7（時系列順）の Request ID を生成する
#[cfg(feature = "observability")]
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV7;

#[cfg(feature = "observability")]
impl tower_http::request_id::MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(
        &mut self,
        _request: &http::Request<B>,
    ) -> Option<tower_http::request_id::RequestId> {
        let id = uuid::Uuid::now_v7().to_string();
        http::HeaderValue::from_str(&id)
            .ok()
            .map(tower_http::request_id::RequestId::new)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_log_formatの解釈() {
        assert_eq!(LogFormat::from_value(Some("json")), LogFormat::Json);
        assert_eq!(LogFormat::from_value(Some("JSON")), LogFormat::Json);
        assert_eq!(LogFormat::from_value(Some(" pretty ")), LogFormat::Pretty);
    }

    #[test]
    fn test_未設定や不明な値はpretty() {
        assert_eq!(LogFormat::from_value(None), LogFormat::Pretty);
        assert_eq!(LogFormat::from_value(Some("")), LogFormat::Pretty);
        assert_eq!(LogFormat::from_value(Some("xml")), LogFormat::Pretty);
    }

    #[cfg(feature = "observability")]
    #[test]
    fn test_request_idはuuid_v7() {
        use tower_http::request_id::MakeRequestId as _;

        let request = http::Request::builder().uri("/items").body(()).unwrap();
        let id = MakeRequestUuidV7.make_request_id(&request).unwrap();

        let parsed = uuid::Uuid::parse_str(id.header_value().to_str().unwrap()).unwrap();
        assert_eq!(parsed.get_version_num(), 7);
    }

    #[cfg(feature = "observability")]
    #[test]
    fn test_リクエストスパンはパスを持つ() {
        let request = http::Request::builder()
            .uri("/recipes?max_time=30")
            .header(REQUEST_ID_HEADER, "abc")
            .body(())
            .unwrap();

        let name = tracing::subscriber::with_default(tracing_subscriber::registry(), || {
            make_request_span(&request).metadata().map(|m| m.name())
        });

        assert_eq!(name, Some("request"));
    }
}
