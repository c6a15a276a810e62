//! # アプリケーション構築
//!
//! 依存の注入（リポジトリ → ユースケース → State）とルーター構築を担当する。
//! `main.rs` はインフラ初期化とサーバー起動に集中し、テストは任意の依存で
//! 独立したアプリケーションを組み立てる。
//!
//! ## ルートグループ
//!
//! | グループ | 認証 | ルート |
//! |---------|------|-------|
//! | 公開 | なし | `/health`, `/health/ready`, `/register`, `/login` |
//! | Bearer | JWT | `/protected`, `/recipes`, `/recipes/{id}` |
//! | Basic | 設定済みユーザー | `/items`, `/items/{id}`, `/scrape/title` |

use std::sync::Arc;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post, put},
};
use gourmet_infra::{
    credential_store::InMemoryCredentialStore,
    page_title::PageTitleFetcher,
    password::PasswordChecker,
    repository::{ItemRepository, RecipeRepository, UserRepository},
    token::TokenService,
};
use gourmet_shared::{
    canonical_log::CanonicalLogLineLayer,
    observability::{MakeRequestUuidV7, make_request_span},
};
use sqlx::SqlitePool;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    error::ApiError,
    handler::{
        AuthState,
        ItemState,
        ReadinessState,
        RecipeState,
        ScrapeState,
        create_item,
        create_recipe,
        delete_item,
        delete_recipe,
        health_check,
        list_items,
        list_recipes,
        login,
        protected,
        readiness_check,
        register,
        scrape_title,
        update_item,
        update_recipe,
    },
    middleware::{BasicAuthState, BearerAuthState, require_basic, require_bearer},
    usecase::{
        AuthUseCaseImpl,
        BasicAuthUseCaseImpl,
        ItemUseCaseImpl,
        RecipeUseCaseImpl,
        ScrapeUseCaseImpl,
    },
};

/// アプリケーションが必要とする依存一式
///
/// プロセス全体で共有する状態はすべてここを経由して注入する。
#[derive(Clone)]
pub struct AppDependencies {
    pub pool:               SqlitePool,
    pub user_repository:    Arc<dyn UserRepository>,
    pub recipe_repository:  Arc<dyn RecipeRepository>,
    pub item_repository:    Arc<dyn ItemRepository>,
    pub password_checker:   Arc<dyn PasswordChecker>,
    pub token_service:      Arc<dyn TokenService>,
    pub credential_store:   Arc<InMemoryCredentialStore>,
    pub page_title_fetcher: Arc<dyn PageTitleFetcher>,
}

/// ルーターを構築する
pub fn build_app(deps: AppDependencies) -> Router {
    // ユースケース
    let auth_usecase = Arc::new(AuthUseCaseImpl::new(
        deps.user_repository,
        deps.password_checker.clone(),
        deps.token_service.clone(),
    ));
    let basic_auth_usecase = Arc::new(BasicAuthUseCaseImpl::new(
        deps.credential_store,
        deps.password_checker,
    ));

    // ハンドラ用の State
    let readiness_state = Arc::new(ReadinessState { pool: deps.pool });
    let auth_state = Arc::new(AuthState {
        usecase: auth_usecase,
    });
    let item_state = Arc::new(ItemState {
        usecase: Arc::new(ItemUseCaseImpl::new(deps.item_repository)),
    });
    let recipe_state = Arc::new(RecipeState {
        usecase: Arc::new(RecipeUseCaseImpl::new(deps.recipe_repository)),
    });
    let scrape_state = Arc::new(ScrapeState {
        usecase: Arc::new(ScrapeUseCaseImpl::new(deps.page_title_fetcher)),
    });

    // ガード用の State
    let bearer_state = BearerAuthState {
        token_service: deps.token_service,
    };
    let basic_state = BasicAuthState {
        usecase: basic_auth_usecase,
    };

    // ルーター構築
    // route_layer のガードはルートが一致した場合のみ実行される
    Router::new()
        .route("/health", get(health_check))
        .merge(
            Router::new()
                .route("/health/ready", get(readiness_check))
                .with_state(readiness_state),
        )
        .merge(
            Router::new()
                .route("/register", post(register))
                .route("/login", post(login))
                .with_state(auth_state),
        )
        // Bearer 認証
        .merge(
            Router::new()
                .route("/protected", get(protected))
                .route_layer(from_fn_with_state(bearer_state.clone(), require_bearer)),
        )
        .merge(
            Router::new()
                .route("/recipes", get(list_recipes).post(create_recipe))
                .route("/recipes/{id}", put(update_recipe).delete(delete_recipe))
                .route_layer(from_fn_with_state(bearer_state, require_bearer))
                .with_state(recipe_state),
        )
        // Basic 認証
        .merge(
            Router::new()
                .route("/items", get(list_items).post(create_item))
                .route("/items/{id}", put(update_item).delete(delete_item))
                .route_layer(from_fn_with_state(basic_state.clone(), require_basic))
                .with_state(item_state),
        )
        .merge(
            Router::new()
                .route("/scrape/title", get(scrape_title))
                .route_layer(from_fn_with_state(basic_state, require_basic))
                .with_state(scrape_state),
        )
        .fallback(|| async { ApiError::not_found("resource not found") })
        // レイヤー順序: 下に書いたものが外側
        // 1. SetRequestIdLayer（最外）: UUID v7 を生成（クライアント提供値があればそれを使用）
        // 2. TraceLayer: request_id を含むスパンを作成
        // 3. CanonicalLogLineLayer: スパン内で 1 行サマリを出力
        // 4. PropagateRequestIdLayer: レスポンスヘッダーに X-Request-Id をコピー
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(CanonicalLogLineLayer)
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}
