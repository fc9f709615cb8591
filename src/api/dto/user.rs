//! User form body.

use serde::Deserialize;
use validator::Validate;

use crate::error::ValidationFieldError;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UserForm {
    #[validate(email(message = "メールアドレスの形式が正しくありません"))]
    #[serde(default)]
    pub email: String,

    /// Plain text; empty on edit keeps the stored password.
    #[validate(length(max = 128, message = "パスワードは128文字以下で入力してください"))]
    #[serde(default)]
    pub password: String,

    #[validate(length(min = 1, max = 128, message = "氏名は1文字以上128文字以下で入力してください"))]
    #[serde(default)]
    pub name: String,

    /// Checkbox value; absent when unchecked.
    #[serde(default)]
    pub enabled: Option<String>,

    /// Comma-separated role ids.
    #[serde(default)]
    pub roles: String,
}

impl UserForm {
    pub fn is_enabled(&self) -> bool {
        matches!(
            self.enabled.as_deref().map(str::trim),
            Some("on" | "true" | "1")
        )
    }

    /// Parses the role id list. A malformed id yields a `roles` field error.
    pub fn role_ids(&self) -> Result<Vec<i64>, ValidationFieldError> {
        let mut ids = Vec::new();
        for part in self.roles.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let id = part.parse().map_err(|_| {
                ValidationFieldError::new("roles", "ロールの指定が正しくありません")
            })?;
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        Ok(ids)
    }
}
