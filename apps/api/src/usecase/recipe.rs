//! # レシピユースケース
//!
//! 入力を値オブジェクトに変換してリポジトリに渡す。
//! 更新・削除の対象が存在しない場合は 404 を返し、行は作成しない。

use std::sync::Arc;

use gourmet_domain::recipe::{
    Ingredients,
    NewRecipe,
    Recipe,
    RecipeFilter,
    RecipeId,
    RecipePatch,
    RecipeTitle,
};
use gourmet_infra::repository::RecipeRepository;

use crate::error::ApiError;

const RECIPE_NOT_FOUND: &str = "Recipe not found";

/// 作成入力
#[derive(Debug, Clone)]
pub struct CreateRecipeInput {
    pub title:        String,
    pub ingredients:  String,
    pub time_minutes: i32,
}

/// 部分更新入力
#[derive(Debug, Clone, Default)]
pub struct UpdateRecipeInput {
    pub title:        Option<String>,
    pub ingredients:  Option<String>,
    pub time_minutes: Option<i32>,
}

pub struct RecipeUseCaseImpl {
    recipe_repository: Arc<dyn RecipeRepository>,
}

impl RecipeUseCaseImpl {
    pub fn new(recipe_repository: Arc<dyn RecipeRepository>) -> Self {
        Self { recipe_repository }
    }

    #[tracing::instrument(skip_all)]
    pub async fn create(&self, input: CreateRecipeInput) -> Result<RecipeId, ApiError> {
        let recipe = NewRecipe {
            title:        RecipeTitle::new(input.title)?,
            ingredients:  Ingredients::new(input.ingredients)?,
            time_minutes: input.time_minutes,
        };

        let id = self.recipe_repository.insert(&recipe).await?;
        tracing::info!(recipe_id = %id, "レシピを作成しました");
        Ok(id)
    }

    pub async fn list(&self, filter: RecipeFilter) -> Result<Vec<Recipe>, ApiError> {
        Ok(self.recipe_repository.find_all(&filter).await?)
    }

    #[tracing::instrument(skip(self, input))]
    pub async fn update(&self, id: i64, input: UpdateRecipeInput) -> Result<(), ApiError> {
        let patch = RecipePatch {
            title:        input.title.map(RecipeTitle::new).transpose()?,
            ingredients:  input.ingredients.map(Ingredients::new).transpose()?,
            time_minutes: input.time_minutes,
        };

        if self
            .recipe_repository
            .update(RecipeId::from_i64(id), &patch)
            .await?
        {
            Ok(())
        } else {
            Err(ApiError::not_found(RECIPE_NOT_FOUND))
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        if self.recipe_repository.delete(RecipeId::from_i64(id)).await? {
            Ok(())
        } else {
            Err(ApiError::not_found(RECIPE_NOT_FOUND))
        }
    }
}
