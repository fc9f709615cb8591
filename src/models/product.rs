use bigdecimal::BigDecimal;
use serde::Serialize;

use super::Entity;

/// Catalog product.
///
/// `category_id` and `brand_id` reference [`Category`](super::Category) and
/// [`Brand`](super::Brand) records; the four decimal fields are the price tiers
/// shown on the product screens.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Product {
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
    pub in_stock: i32,
    pub image_path: Option<String>,
    pub cost: BigDecimal,
    pub list_price: BigDecimal,
    pub price: BigDecimal,
    pub sale_price: BigDecimal,
    pub category_id: Option<i64>,
    pub brand_id: Option<i64>,
}

impl Entity for Product {
    const ENTITY: &'static str = "product";
    const KEY_FIELD: &'static str = "name";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn natural_key(&self) -> &str {
        &self.name
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.description]
    }
}
