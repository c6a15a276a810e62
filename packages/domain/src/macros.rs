/// バリデーション付き String Newtype を定義する宣言型マクロ
///
/// 以下を一括生成する:
/// - Newtype 構造体（`String` をラップ、`Serialize` は文字列として出力）
/// - `new()`: 前後空白の除去 + 空チェック + 最大長チェック
/// - `as_str()` / `into_string()`
/// - `Display`
///
/// 最大長は `chars().count()` で数えるため、マルチバイト文字も 1 文字として扱う。
///
/// # 使用例
///
/// ```rust
/// use gourmet_domain::recipe::RecipeTitle;
///
/// let title = RecipeTitle::new(" Bolo de cenoura ").unwrap();
/// assert_eq!(title.as_str(), "Bolo de cenoura");
/// assert!(RecipeTitle::new("").is_err());
/// ```
macro_rules! define_validated_string {
    (
        $(#[$meta:meta])*
        $vis:vis struct $Name:ident {
            label: $label:expr,
            max_length: $max_length:expr $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
        #[serde(transparent)]
        $vis struct $Name(String);

        impl $Name {
            /// 最大文字数
            pub const MAX_LENGTH: usize = $max_length;

            pub fn new(value: impl Into<String>) -> Result<Self, $crate::DomainError> {
                let value = value.into().trim().to_string();

                if value.is_empty() {
                    return Err($crate::DomainError::validation(format!(
                        "{} is required",
                        $label
                    )));
                }

                if value.chars().count() > Self::MAX_LENGTH {
                    return Err($crate::DomainError::validation(format!(
                        "{} must be at most {} characters",
                        $label,
                        Self::MAX_LENGTH
                    )));
                }

                Ok(Self(value))
            }

            /// 文字列参照を取得する
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// 所有権を持つ文字列に変換する
            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl std::fmt::Display for $Name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}
