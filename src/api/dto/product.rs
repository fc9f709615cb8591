//! Product form body.
//!
//! Numeric fields arrive as raw strings and are parsed while binding so that a
//! malformed number becomes a field error instead of a rejected request.

use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ProductForm {
    #[validate(length(min = 1, max = 256, message = "商品名は1文字以上256文字以下で入力してください"))]
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub in_stock: String,

    #[serde(default)]
    pub image_path: Option<String>,

    #[serde(default)]
    pub cost: String,
    #[serde(default)]
    pub list_price: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub sale_price: String,

    #[serde(default)]
    pub category_id: String,
    #[serde(default)]
    pub brand_id: String,
}
