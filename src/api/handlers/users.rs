//! User screens.
//!
//! Role ids are resolved against the role table and the password is hashed
//! before the entity reaches the service. A new user must supply a password;
//! an edit with an empty password keeps the stored one.

use async_trait::async_trait;
use serde_json::{Map, Value};

use super::resource::AdminResource;
use crate::api::dto::UserForm;
use crate::error::{AppResult, ValidationFieldError};
use crate::models::User;
use crate::services::UserService;
use crate::state::AppState;
use crate::utils::password::hash_submitted;

#[async_trait]
impl AdminResource for User {
    type Form = UserForm;

    const ROUTE: &'static str = "users";
    const LIST_KEY: &'static str = "listUsers";
    const DUPLICATE_MESSAGE: &'static str = "このメールアドレスは既に使用されています";

    fn service(state: &AppState) -> &UserService {
        &state.services.users
    }

    async fn bind(
        state: &AppState,
        form: UserForm,
        id: Option<i64>,
        errors: &mut Vec<ValidationFieldError>,
    ) -> AppResult<Self> {
        let enabled = form.is_enabled();

        let roles = match form.role_ids() {
            Ok(ids) => {
                let roles = state.services.roles.resolve(&ids).await?;
                if roles.len() != ids.len() {
                    errors.push(ValidationFieldError::new(
                        "roles",
                        "存在しないロールが含まれています",
                    ));
                }
                roles
            }
            Err(error) => {
                errors.push(error);
                Vec::new()
            }
        };

        if id.is_none() && form.password.is_empty() {
            errors.push(ValidationFieldError::new(
                "password",
                "パスワードを入力してください",
            ));
        }

        Ok(User::new(
            id,
            form.email.trim(),
            hash_submitted(&form.password)?,
            form.name.trim(),
            enabled,
            roles,
        ))
    }

    async fn form_model(state: &AppState) -> AppResult<Map<String, Value>> {
        let roles = state.services.roles.list_all().await?;

        let mut model = Map::new();
        model.insert("listRoles".into(), serde_json::to_value(roles)?);
        Ok(model)
    }
}
