//! Category screens.

use async_trait::async_trait;

use super::resource::AdminResource;
use crate::api::dto::CategoryForm;
use crate::error::{AppResult, ValidationFieldError};
use crate::models::Category;
use crate::services::CategoryService;
use crate::state::AppState;

#[async_trait]
impl AdminResource for Category {
    type Form = CategoryForm;

    const ROUTE: &'static str = "categories";
    const LIST_KEY: &'static str = "listCategories";
    const DUPLICATE_MESSAGE: &'static str = "このカテゴリ名は既に登録されています";

    fn service(state: &AppState) -> &CategoryService {
        &state.services.categories
    }

    async fn bind(
        _state: &AppState,
        form: CategoryForm,
        id: Option<i64>,
        _errors: &mut Vec<ValidationFieldError>,
    ) -> AppResult<Self> {
        Ok(Category::new(id, form.name.trim()))
    }
}
