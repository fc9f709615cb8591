//! Brand form body.

use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct BrandForm {
    #[validate(length(min = 1, max = 128, message = "ブランド名は1文字以上128文字以下で入力してください"))]
    #[serde(default)]
    pub name: String,
}
