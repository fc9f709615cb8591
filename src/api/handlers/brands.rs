//! Brand screens.

use async_trait::async_trait;

use super::resource::AdminResource;
use crate::api::dto::BrandForm;
use crate::error::{AppResult, ValidationFieldError};
use crate::models::Brand;
use crate::services::BrandService;
use crate::state::AppState;

#[async_trait]
impl AdminResource for Brand {
    type Form = BrandForm;

    const ROUTE: &'static str = "brands";
    const LIST_KEY: &'static str = "listBrands";
    const DUPLICATE_MESSAGE: &'static str = "このブランド名は既に登録されています";

    fn service(state: &AppState) -> &BrandService {
        &state.services.brands
    }

    async fn bind(
        _state: &AppState,
        form: BrandForm,
        id: Option<i64>,
        _errors: &mut Vec<ValidationFieldError>,
    ) -> AppResult<Self> {
        Ok(Brand::new(id, form.name.trim()))
    }
}
