//! # レシピハンドラ
//!
//! ## エンドポイント
//!
//! - `POST /recipes` - 作成（201 `{msg, id}`）
//! - `GET /recipes?ingredient=&max_time=` - 絞り込み一覧
//! - `PUT /recipes/{id}` - 部分更新
//! - `DELETE /recipes/{id}` - 削除
//!
//! 一覧の `ingredients` はカンマで分割した配列として返す。

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use gourmet_domain::recipe::{Recipe, RecipeFilter};
use serde::{Deserialize, Serialize};

use crate::{
    error::ApiError,
    extract::{ApiJson, ApiPath, ApiQuery},
    usecase::{CreateRecipeInput, RecipeUseCaseImpl, UpdateRecipeInput},
};

/// レシピハンドラの共有状態
pub struct RecipeState {
    pub usecase: Arc<RecipeUseCaseImpl>,
}

// --- リクエスト/レスポンス型 ---

#[derive(Debug, Deserialize)]
pub struct CreateRecipeRequest {
    pub title:        String,
    pub ingredients:  String,
    pub time_minutes: i32,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRecipeRequest {
    pub title:        Option<String>,
    pub ingredients:  Option<String>,
    pub time_minutes: Option<i32>,
}

/// 一覧のクエリ
///
/// 空文字や整数でない `max_time` は未指定として扱うため、文字列のまま受け取る。
#[derive(Debug, Default, Deserialize)]
pub struct ListRecipesQuery {
    pub ingredient: Option<String>,
    pub max_time:   Option<String>,
}

impl ListRecipesQuery {
    fn into_filter(self) -> RecipeFilter {
        let max_time = match self.max_time.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => raw
                .parse::<i32>()
                .inspect_err(|_| {
                    tracing::debug!(max_time = %raw, "整数でない max_time を無視します");
                })
                .ok(),
        };
        RecipeFilter::new(self.ingredient, max_time)
    }
}

#[derive(Debug, Serialize)]
pub struct CreateRecipeResponse {
    pub msg: String,
    pub id:  i64,
}

#[derive(Debug, Serialize)]
pub struct RecipeResponse {
    pub id:           i64,
    pub title:        String,
    pub ingredients:  Vec<String>,
    pub time_minutes: i32,
}

impl From<&Recipe> for RecipeResponse {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id:           recipe.id().as_i64(),
            title:        recipe.title().as_str().to_string(),
            ingredients:  recipe
                .ingredients()
                .items()
                .into_iter()
                .map(str::to_string)
                .collect(),
            time_minutes: recipe.time_minutes(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecipeMessageResponse {
    pub message: String,
}

impl RecipeMessageResponse {
    fn json(message: &str) -> Json<Self> {
        Json(Self {
            message: message.to_string(),
        })
    }
}

// --- ハンドラ ---

/// POST /recipes
pub async fn create_recipe(
    State(state): State<Arc<RecipeState>>,
    ApiJson(req): ApiJson<CreateRecipeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id = state
        .usecase
        .create(CreateRecipeInput {
            title:        req.title,
            ingredients:  req.ingredients,
            time_minutes: req.time_minutes,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateRecipeResponse {
            msg: "Recipe created".to_string(),
            id:  id.as_i64(),
        }),
    ))
}

/// GET /recipes
pub async fn list_recipes(
    State(state): State<Arc<RecipeState>>,
    ApiQuery(query): ApiQuery<ListRecipesQuery>,
) -> Result<Json<Vec<RecipeResponse>>, ApiError> {
    let recipes = state.usecase.list(query.into_filter()).await?;
    Ok(Json(recipes.iter().map(RecipeResponse::from).collect()))
}

/// PUT /recipes/{id}
///
/// 指定されたフィールドのみ更新する。存在しない ID で行は作成されない。
pub async fn update_recipe(
    State(state): State<Arc<RecipeState>>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(req): ApiJson<UpdateRecipeRequest>,
) -> Result<Json<RecipeMessageResponse>, ApiError> {
    state
        .usecase
        .update(
            id,
            UpdateRecipeInput {
                title:        req.title,
                ingredients:  req.ingredients,
                time_minutes: req.time_minutes,
            },
        )
        .await?;

    Ok(RecipeMessageResponse::json("Recipe updated"))
}

/// DELETE /recipes/{id}
pub async fn delete_recipe(
    State(state): State<Arc<RecipeState>>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<RecipeMessageResponse>, ApiError> {
    state.usecase.delete(id).await?;
    Ok(RecipeMessageResponse::json("Recipe deleted"))
}

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Method, Request, header},
        routing::{get, put},
    };
    use gourmet_infra::{db, repository::SqliteRecipeRepository};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;

    async fn app() -> Router {
        let pool = db::create_in_memory_pool().await.unwrap();
        db::run_migrations(&pool).await.unwrap();
        let state = Arc::new(RecipeState {
            usecase: Arc::new(RecipeUseCaseImpl::new(Arc::new(
                SqliteRecipeRepository::new(pool),
            ))),
        });
        Router::new()
            .route("/recipes", get(list_recipes).post(create_recipe))
            .route("/recipes/{id}", put(update_recipe).delete(delete_recipe))
            .with_state(state)
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[rstest]
    #[case(ListRecipesQuery::default(), None)]
    #[case(ListRecipesQuery { ingredient: None, max_time: Some("".to_string()) }, None)]
    #[case(ListRecipesQuery { ingredient: None, max_time: Some(" 30 ".to_string()) }, Some(30))]
    #[case(ListRecipesQuery { ingredient: None, max_time: Some("meia hora".to_string()) }, None)]
    #[case(ListRecipesQuery { ingredient: None, max_time: Some("2.5".to_string()) }, None)]
    fn test_into_filterは空や整数でないmax_timeを未指定とみなす(
        #[case] query: ListRecipesQuery,
        #[case] expected: Option<i32>,
    ) {
        assert_eq!(query.into_filter().max_time(), expected);
    }

    #[tokio::test]
    async fn test_作成したレシピが配列の材料で一覧に出る() {
        // Given
        let app = app().await;

        // When
        let (status, created) = send(
            &app,
            Method::POST,
            "/recipes",
            Some(json!({
                "title": "Bolo de cenoura",
                "ingredients": "cenoura, farinha ,ovos",
                "time_minutes": 50
            })),
        )
        .await;

        // Then
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created, json!({"msg": "Recipe created", "id": 1}));

        let (status, listed) = send(&app, Method::GET, "/recipes", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            listed,
            json!([{
                "id": 1,
                "title": "Bolo de cenoura",
                "ingredients": ["cenoura", "farinha", "ovos"],
                "time_minutes": 50
            }])
        );
    }

    #[tokio::test]
    async fn test_部分更新と削除() {
        let app = app().await;
        send(
            &app,
            Method::POST,
            "/recipes",
            Some(json!({"title": "Omelete", "ingredients": "ovos", "time_minutes": 10})),
        )
        .await;

        let (status, json) = send(
            &app,
            Method::PUT,
            "/recipes/1",
            Some(json!({"time_minutes": 12})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!({"message": "Recipe updated"}));

        let (_, listed) = send(&app, Method::GET, "/recipes", None).await;
        assert_eq!(listed[0]["title"], "Omelete");
        assert_eq!(listed[0]["time_minutes"], 12);

        let (status, json) = send(&app, Method::DELETE, "/recipes/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!({"message": "Recipe deleted"}));

        let (status, _) = send(&app, Method::DELETE, "/recipes/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_存在しないレシピの更新は404で行を作らない() {
        let app = app().await;

        let (status, json) = send(
            &app,
            Method::PUT,
            "/recipes/7",
            Some(json!({"title": "Fantasma"})),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["message"], "Recipe not found");
        let (_, listed) = send(&app, Method::GET, "/recipes", None).await;
        assert_eq!(listed, json!([]));
    }

    #[rstest]
    #[case(json!({"ingredients": "ovos", "time_minutes": 10}))]
    #[case(json!({"title": "", "ingredients": "ovos", "time_minutes": 10}))]
    #[case(json!({"title": "Omelete", "ingredients": " ", "time_minutes": 10}))]
    #[case(json!({"title": "Omelete", "ingredients": "ovos", "time_minutes": "dez"}))]
    #[tokio::test]
    async fn test_不正な作成は400(#[case] body: Value) {
        let app = app().await;

        let (status, json) = send(&app, Method::POST, "/recipes", Some(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "validation_error");
    }

    #[tokio::test]
    async fn test_max_timeが整数でなければ絞り込まずに返す() {
        // Given
        let app = app().await;
        send(
            &app,
            Method::POST,
            "/recipes",
            Some(json!({"title": "Bolo de cenoura", "ingredients": "cenoura", "time_minutes": 50})),
        )
        .await;

        // When
        let (status, json) = send(&app, Method::GET, "/recipes?max_time=abc", None).await;

        // Then
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json.as_array().unwrap().len(), 1);
        assert_eq!(json[0]["title"], "Bolo de cenoura");
    }
}
