//! # RecipeRepository
//!
//! レシピの永続化を担当する。
//!
//! ## 一覧フィルタ
//!
//! - `max_time` は SQL の `WHERE` で絞り込む
//! - `ingredient` は Rust 側で [`RecipeFilter::matches`] により判定する
//!   （SQLite の `LOWER` / `LIKE` は ASCII 以外の大文字小文字を同一視しないため）
//!
//! ## 更新
//!
//! 部分更新は `COALESCE` を使った単一の `UPDATE` 文で行う。
//! 対象行がなければ何も作成せず `false` を返す。

use async_trait::async_trait;
use gourmet_domain::recipe::{
    Ingredients,
    NewRecipe,
    Recipe,
    RecipeFilter,
    RecipeId,
    RecipePatch,
    RecipeTitle,
};
use sqlx::SqlitePool;

use crate::error::InfraError;

/// レシピリポジトリトレイト
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// レシピを作成し、採番された ID を返す
    async fn insert(&self, recipe: &NewRecipe) -> Result<RecipeId, InfraError>;

    /// フィルタに一致するレシピを ID 順で返す
    async fn find_all(&self, filter: &RecipeFilter) -> Result<Vec<Recipe>, InfraError>;

    /// 部分更新する
    ///
    /// 対象が存在すれば `true`、存在しなければ `false`。
    async fn update(&self, id: RecipeId, patch: &RecipePatch) -> Result<bool, InfraError>;

    /// 削除する
    ///
    /// 対象が存在すれば `true`、存在しなければ `false`。
    async fn delete(&self, id: RecipeId) -> Result<bool, InfraError>;
}

#[derive(sqlx::FromRow)]
struct RecipeRow {
    id:           i64,
    title:        String,
    ingredients:  String,
    time_minutes: i64,
}

impl TryFrom<RecipeRow> for Recipe {
    type Error = InfraError;

    fn try_from(row: RecipeRow) -> Result<Self, Self::Error> {
        let id = row.id;
        let corrupted = |field: &str, e: &dyn std::fmt::Display| {
            InfraError::unexpected(format!("recipes.{field} が不正です (id={id}): {e}"))
        };

        let title = RecipeTitle::new(row.title).map_err(|e| corrupted("title", &e))?;
        let ingredients =
            Ingredients::new(row.ingredients).map_err(|e| corrupted("ingredients", &e))?;
        let time_minutes =
            i32::try_from(row.time_minutes).map_err(|e| corrupted("time_minutes", &e))?;

        Ok(Recipe::from_db(
            RecipeId::from_i64(id),
            title,
            ingredients,
            time_minutes,
        ))
    }
}

/// SQLite 実装の RecipeRepository
#[derive(Debug, Clone)]
pub struct SqliteRecipeRepository {
    pool: SqlitePool,
}

impl SqliteRecipeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecipeRepository for SqliteRecipeRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn insert(&self, recipe: &NewRecipe) -> Result<RecipeId, InfraError> {
        let done = sqlx::query(
            "INSERT INTO recipes (title, ingredients, time_minutes) VALUES (?1, ?2, ?3)",
        )
        .bind(recipe.title.as_str())
        .bind(recipe.ingredients.as_str())
        .bind(recipe.time_minutes)
        .execute(&self.pool)
        .await?;

        Ok(RecipeId::from_i64(done.last_insert_rowid()))
    }

    #[tracing::instrument(
        skip_all,
        level = "debug",
        fields(ingredient = ?filter.ingredient(), max_time = ?filter.max_time())
    )]
    async fn find_all(&self, filter: &RecipeFilter) -> Result<Vec<Recipe>, InfraError> {
        let rows = sqlx::query_as::<_, RecipeRow>(
            r#"
            SELECT id, title, ingredients, time_minutes
            FROM recipes
            WHERE ?1 IS NULL OR time_minutes <= ?1
            ORDER BY id
            "#,
        )
        .bind(filter.max_time())
        .fetch_all(&self.pool)
        .await?;

        let recipes = rows
            .into_iter()
            .map(Recipe::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(recipes.into_iter().filter(|r| filter.matches(r)).collect())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn update(&self, id: RecipeId, patch: &RecipePatch) -> Result<bool, InfraError> {
        let done = sqlx::query(
            r#"
            UPDATE recipes
            SET title        = COALESCE(?1, title),
                ingredients  = COALESCE(?2, ingredients),
                time_minutes = COALESCE(?3, time_minutes)
            WHERE id = ?4
            "#,
        )
        .bind(patch.title.as_ref().map(RecipeTitle::as_str))
        .bind(patch.ingredients.as_ref().map(Ingredients::as_str))
        .bind(patch.time_minutes)
        .bind(id.as_i64())
        .execute(&self.pool)
        .await?;

        Ok(done.rows_affected() > 0)
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn delete(&self, id: RecipeId) -> Result<bool, InfraError> {
        let done = sqlx::query("DELETE FROM recipes WHERE id = ?1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await?;

        Ok(done.rows_affected() > 0)
    }
}
