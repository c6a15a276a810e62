//! # Gourmet API サーバー
//!
//! ## 環境変数
//!
//! `.env` ファイルがあれば読み込む。
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `API_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `API_PORT` | No | ポート番号（デフォルト: `5000`） |
//! | `DATABASE_URL` | No | SQLite URL（デフォルト: `sqlite://recipes.db`） |
//! | `JWT_SECRET` | **Yes** | トークン署名鍵 |
//! | `JWT_TTL_SECONDS` | No | トークン有効期間（デフォルト: `900`） |
//! | `BASIC_AUTH_USERS` | No | `user:password,user2:password2` |
//! | `SCRAPE_TIMEOUT_SECONDS` | No | 外部取得のタイムアウト（デフォルト: `10`） |
//!
//! ## 起動方法
//!
//! ```bash
//! JWT_SECRET=change-me cargo run -p gourmet-api
//! ```

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context as _;
use gourmet_api::{AppDependencies, build_app, config::ApiConfig};
use gourmet_domain::clock::SystemClock;
use gourmet_infra::{
    credential_store::InMemoryCredentialStore,
    db,
    page_title::HttpPageTitleFetcher,
    password::{Argon2PasswordChecker, PasswordChecker},
    repository::{InMemoryItemRepository, SqliteRecipeRepository, SqliteUserRepository},
    token::JwtTokenService,
};
use gourmet_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

/// API サーバーのエントリーポイント
///
/// 1. 環境変数の読み込み（.env ファイル）
/// 2. トレーシングの初期化
/// 3. 設定の読み込み
/// 4. データベース接続とマイグレーション
/// 5. 依存の初期化とルーター構築
/// 6. HTTP サーバーの起動（Ctrl-C / SIGTERM で停止）
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let tracing_config = TracingConfig::from_env("gourmet-api");
    init_tracing(&tracing_config);
    let _tracing_guard =
        tracing::info_span!("app", service = %tracing_config.service_name).entered();

    let config = ApiConfig::from_env().context("設定の読み込みに失敗しました")?;
    tracing::info!("API サーバーを起動します: {}:{}", config.host, config.port);

    let pool = db::create_pool(&config.database_url)
        .await
        .context("データベースへの接続に失敗しました")?;
    db::run_migrations(&pool)
        .await
        .context("マイグレーションの実行に失敗しました")?;
    tracing::info!("マイグレーションを適用しました");

    let password_checker: Arc<dyn PasswordChecker> = Arc::new(
        Argon2PasswordChecker::new().context("パスワードハッシャーの初期化に失敗しました")?,
    );
    let credential_store = InMemoryCredentialStore::from_pairs(
        &config.basic_auth_users,
        password_checker.as_ref(),
    )
    .context("Basic 認証ユーザーの初期化に失敗しました")?;
    if credential_store.is_empty() {
        tracing::warn!("BASIC_AUTH_USERS が空のため、Basic 認証のルートはすべて 401 になります");
    } else {
        tracing::info!(count = credential_store.len(), "Basic 認証ユーザーを読み込みました");
    }

    let deps = AppDependencies {
        pool:               pool.clone(),
        user_repository:    Arc::new(SqliteUserRepository::new(pool.clone())),
        recipe_repository:  Arc::new(SqliteRecipeRepository::new(pool.clone())),
        item_repository:    Arc::new(InMemoryItemRepository::new()),
        password_checker,
        token_service:      Arc::new(JwtTokenService::new(
            config.jwt_secret.as_bytes(),
            config.jwt_ttl_seconds,
            Arc::new(SystemClock),
        )),
        credential_store:   Arc::new(credential_store),
        page_title_fetcher: Arc::new(
            HttpPageTitleFetcher::new(config.scrape_timeout)
                .context("HTTP クライアントの初期化に失敗しました")?,
        ),
    };
    let app = build_app(deps);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("アドレスのパースに失敗しました")?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("API サーバーが起動しました: {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("API サーバーを停止しました");
    Ok(())
}

/// Ctrl-C または SIGTERM を待つ
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Ctrl-C ハンドラの登録に失敗しました: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("SIGTERM ハンドラの登録に失敗しました: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("停止シグナルを受信しました");
}
