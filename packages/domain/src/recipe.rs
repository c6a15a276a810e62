//! # レシピ
//!
//! SQLite に永続化されるレシピと、その一覧取得フィルタを定義する。
//!
//! ## 材料の表現
//!
//! 材料はカンマ区切りの 1 つの文字列として保存する（例: `"farinha, ovos, leite"`）。
//! 一覧レスポンスでは [`Ingredients::items`] でカンマ分割した配列として返す。
//!
//! ## フィルタ
//!
//! - `ingredient`: 材料文字列に対する大文字小文字を区別しない部分一致（Unicode 対応）
//! - `max_time`: 調理時間の上限（その値を含む）
//!
//! 両方指定された場合は AND で合成する。

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// レシピ ID（`recipes.id` の自動採番値）
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[display("{_0}")]
pub struct RecipeId(i64);

impl RecipeId {
    pub fn from_i64(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(self) -> i64 {
        self.0
    }
}

define_validated_string! {
    /// レシピ名（1〜100 文字）
    pub struct RecipeTitle {
        label: "title",
        max_length: 100,
    }
}

/// 材料（カンマ区切り文字列、空白のみは不可）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Ingredients(String);

impl Ingredients {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into().trim().to_string();
        if value.is_empty() {
            return Err(DomainError::validation("ingredients is required"));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// カンマで分割し、前後空白を除いた材料の一覧
    ///
    /// 空の要素（`"a,,b"` の中央など）は含めない。
    pub fn items(&self) -> Vec<&str> {
        self.0
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// 指定語を大文字小文字を区別せずに含むか
    ///
    /// `needle` は小文字化済みであること。
    fn contains_lowercase(&self, needle: &str) -> bool {
        self.0.to_lowercase().contains(needle)
    }
}

/// 永続化済みのレシピ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    id:           RecipeId,
    title:        RecipeTitle,
    ingredients:  Ingredients,
    time_minutes: i32,
}

impl Recipe {
    pub fn from_db(
        id: RecipeId,
        title: RecipeTitle,
        ingredients: Ingredients,
        time_minutes: i32,
    ) -> Self {
        Self {
            id,
            title,
            ingredients,
            time_minutes,
        }
    }

    pub fn id(&self) -> RecipeId {
        self.id
    }

    pub fn title(&self) -> &RecipeTitle {
        &self.title
    }

    pub fn ingredients(&self) -> &Ingredients {
        &self.ingredients
    }

    pub fn time_minutes(&self) -> i32 {
        self.time_minutes
    }
}

/// 作成用の入力
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecipe {
    pub title:        RecipeTitle,
    pub ingredients:  Ingredients,
    pub time_minutes: i32,
}

/// 部分更新の入力
///
/// `None` のフィールドは既存値を維持する。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipePatch {
    pub title:        Option<RecipeTitle>,
    pub ingredients:  Option<Ingredients>,
    pub time_minutes: Option<i32>,
}

/// 一覧取得フィルタ
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeFilter {
    ingredient: Option<String>,
    max_time:   Option<i32>,
}

impl RecipeFilter {
    /// フィルタを作成する
    ///
    /// 空白のみの `ingredient` は指定なしとして扱う。
    pub fn new(ingredient: Option<String>, max_time: Option<i32>) -> Self {
        let ingredient = ingredient
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());
        Self {
            ingredient,
            max_time,
        }
    }

    /// 小文字化済みの材料フィルタ
    pub fn ingredient(&self) -> Option<&str> {
        self.ingredient.as_deref()
    }

    pub fn max_time(&self) -> Option<i32> {
        self.max_time
    }

    /// レシピがすべての条件を満たすか
    pub fn matches(&self, recipe: &Recipe) -> bool {
        let within_time = self
            .max_time
            .is_none_or(|max| recipe.time_minutes() <= max);
        let has_ingredient = self
            .ingredient
            .as_deref()
            .is_none_or(|needle| recipe.ingredients().contains_lowercase(needle));
        within_time && has_ingredient
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    use super::*;

    fn recipe(id: i64, ingredients: &str, time_minutes: i32) -> Recipe {
        Recipe::from_db(
            RecipeId::from_i64(id),
            RecipeTitle::new(format!("Receita {id}")).unwrap(),
            Ingredients::new(ingredients).unwrap(),
            time_minutes,
        )
    }

    #[fixture]
    fn bolo() -> Recipe {
        recipe(1, "Farinha, ovos, leite", 45)
    }

    #[rstest]
    fn test_レシピ名は100文字まで() {
        assert!(RecipeTitle::new("あ".repeat(100)).is_ok());
        assert_eq!(
            RecipeTitle::new("あ".repeat(101)).unwrap_err(),
            DomainError::validation("title must be at most 100 characters")
        );
    }

    #[rstest]
    fn test_空白のみの材料はエラー() {
        assert_eq!(
            Ingredients::new("  ").unwrap_err(),
            DomainError::validation("ingredients is required")
        );
    }

    #[rstest]
    #[case("farinha,ovos", vec!["farinha", "ovos"])]
    #[case("farinha , ovos ,leite", vec!["farinha", "ovos", "leite"])]
    #[case("farinha,,ovos,", vec!["farinha", "ovos"])]
    #[case("sal", vec!["sal"])]
    fn test_材料はカンマで分割され空白が除去される(
        #[case] input: &str,
        #[case] expected: Vec<&str>,
    ) {
        let ingredients = Ingredients::new(input).unwrap();

        assert_eq!(ingredients.items(), expected);
    }

    #[rstest]
    fn test_フィルタなしは全件一致(bolo: Recipe) {
        assert!(RecipeFilter::default().matches(&bolo));
    }

    #[rstest]
    #[case(Some("farinha"), true)]
    #[case(Some("FARINHA"), true)]
    #[case(Some("ovo"), true)]
    #[case(Some("açúcar"), false)]
    #[case(Some(""), true)]
    #[case(Some("   "), true)]
    fn test_材料フィルタは大文字小文字を区別しない部分一致(
        bolo: Recipe,
        #[case] ingredient: Option<&str>,
        #[case] expected: bool,
    ) {
        let filter = RecipeFilter::new(ingredient.map(str::to_string), None);

        assert_eq!(filter.matches(&bolo), expected);
    }

    #[rstest]
    fn test_材料フィルタはunicodeの大文字小文字も区別しない() {
        let pao = recipe(2, "PÃO, manteiga", 5);
        let filter = RecipeFilter::new(Some("pão".to_string()), None);

        assert!(filter.matches(&pao));
    }

    #[rstest]
    #[case(44, false)]
    #[case(45, true)]
    #[case(46, true)]
    fn test_調理時間フィルタは上限を含む(
        bolo: Recipe,
        #[case] max_time: i32,
        #[case] expected: bool,
    ) {
        let filter = RecipeFilter::new(None, Some(max_time));

        assert_eq!(filter.matches(&bolo), expected);
    }

    #[rstest]
    fn test_両方のフィルタはandで合成される(bolo: Recipe) {
        let both_ok = RecipeFilter::new(Some("leite".to_string()), Some(60));
        let time_ng = RecipeFilter::new(Some("leite".to_string()), Some(30));
        let ingredient_ng = RecipeFilter::new(Some("queijo".to_string()), Some(60));

        assert!(both_ok.matches(&bolo));
        assert!(!time_ng.matches(&bolo));
        assert!(!ingredient_ng.matches(&bolo));
    }
}
