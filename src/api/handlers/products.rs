//! Product screens.
//!
//! Besides the shared flow, a product submission checks that its category and
//! brand exist and that the image path has an allowed extension. The form views
//! carry the category and brand choices.

use async_trait::async_trait;
use serde_json::{Map, Value};

use super::resource::AdminResource;
use crate::api::dto::ProductForm;
use crate::error::{AppError, AppResult, ValidationFieldError};
use crate::models::Product;
use crate::services::ProductService;
use crate::state::AppState;
use crate::utils::validate::{parse_decimal, parse_optional};

#[async_trait]
impl AdminResource for Product {
    type Form = ProductForm;

    const ROUTE: &'static str = "products";
    const LIST_KEY: &'static str = "listProducts";
    const DUPLICATE_MESSAGE: &'static str = "この商品名は既に登録されています";

    fn service(state: &AppState) -> &ProductService {
        &state.services.products
    }

    async fn bind(
        state: &AppState,
        form: ProductForm,
        id: Option<i64>,
        errors: &mut Vec<ValidationFieldError>,
    ) -> AppResult<Self> {
        let in_stock =
            parse_optional::<i32>("in_stock", &form.in_stock, errors).unwrap_or_default();
        if in_stock < 0 {
            errors.push(ValidationFieldError::new(
                "in_stock",
                "在庫数は0以上で入力してください",
            ));
        }

        let category_id = parse_optional::<i64>("category_id", &form.category_id, errors);
        if let Some(category_id) = category_id {
            if !exists(state.services.categories.get(category_id).await)? {
                errors.push(ValidationFieldError::new(
                    "category_id",
                    "カテゴリが存在しません",
                ));
            }
        }
        let brand_id = parse_optional::<i64>("brand_id", &form.brand_id, errors);
        if let Some(brand_id) = brand_id {
            if !exists(state.services.brands.get(brand_id).await)? {
                errors.push(ValidationFieldError::new("brand_id", "ブランドが存在しません"));
            }
        }

        Ok(Product {
            id,
            name: form.name.trim().to_string(),
            description: form.description,
            in_stock,
            image_path: form.image_path.filter(|p| !p.trim().is_empty()),
            cost: parse_decimal("cost", &form.cost, errors),
            list_price: parse_decimal("list_price", &form.list_price, errors),
            price: parse_decimal("price", &form.price, errors),
            sale_price: parse_decimal("sale_price", &form.sale_price, errors),
            category_id,
            brand_id,
        })
    }

    fn check(state: &AppState, product: &Self) -> Vec<ValidationFieldError> {
        let mut errors = Vec::new();
        if !state
            .services
            .product_images
            .is_valid(product.image_path.as_deref())
        {
            errors.push(ValidationFieldError::new(
                "image_path",
                "画像ファイルの形式が正しくありません",
            ));
        }
        errors
    }

    async fn form_model(state: &AppState) -> AppResult<Map<String, Value>> {
        let categories = state.services.categories.list_all(None).await?;
        let brands = state.services.brands.list_all(None).await?;

        let mut model = Map::new();
        model.insert("listCategories".into(), serde_json::to_value(categories)?);
        model.insert("listBrands".into(), serde_json::to_value(brands)?);
        Ok(model)
    }
}

/// Folds `NotFound` into `false`; other failures still end the request.
fn exists<T>(lookup: AppResult<T>) -> AppResult<bool> {
    match lookup {
        Ok(_) => Ok(true),
        Err(AppError::NotFound { .. }) => Ok(false),
        Err(error) => Err(error),
    }
}
