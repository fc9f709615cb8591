//! Product repository for async database operations.

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use super::contains_pattern;
use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{Entity, Product};
use crate::repositories::Repository;
use crate::schema::products;

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
struct ProductRow {
    id: i64,
    name: String,
    description: String,
    in_stock: i32,
    image_path: Option<String>,
    cost: BigDecimal,
    list_price: BigDecimal,
    price: BigDecimal,
    sale_price: BigDecimal,
    category_id: Option<i64>,
    brand_id: Option<i64>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: Some(row.id),
            name: row.name,
            description: row.description,
            in_stock: row.in_stock,
            image_path: row.image_path,
            cost: row.cost,
            list_price: row.list_price,
            price: row.price,
            sale_price: row.sale_price,
            category_id: row.category_id,
            brand_id: row.brand_id,
        }
    }
}

/// Column values written on insert and update. `None` clears the column.
#[derive(Insertable, AsChangeset)]
#[diesel(table_name = products)]
#[diesel(treat_none_as_null = true)]
struct ProductChanges<'a> {
    name: &'a str,
    description: &'a str,
    in_stock: i32,
    image_path: Option<&'a str>,
    cost: &'a BigDecimal,
    list_price: &'a BigDecimal,
    price: &'a BigDecimal,
    sale_price: &'a BigDecimal,
    category_id: Option<i64>,
    brand_id: Option<i64>,
}

impl<'a> From<&'a Product> for ProductChanges<'a> {
    fn from(product: &'a Product) -> Self {
        Self {
            name: &product.name,
            description: &product.description,
            in_stock: product.in_stock,
            image_path: product.image_path.as_deref(),
            cost: &product.cost,
            list_price: &product.list_price,
            price: &product.price,
            sale_price: &product.sale_price,
            category_id: product.category_id,
            brand_id: product.brand_id,
        }
    }
}

/// Product repository holding an async connection pool.
#[derive(Clone)]
pub struct PgProductRepository {
    pool: AsyncDbPool,
}

impl PgProductRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<Product> for PgProductRepository {
    async fn find_all(&self) -> AppResult<Vec<Product>> {
        let mut conn = self.pool.get().await?;

        let rows = products::table
            .order(products::id.asc())
            .select(ProductRow::as_select())
            .load(&mut conn)
            .await?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Matches the keyword against name and description.
    async fn search(&self, keyword: &str) -> AppResult<Vec<Product>> {
        use crate::schema::products::dsl::*;
        let mut conn = self.pool.get().await?;
        let pattern = contains_pattern(keyword);

        let rows = products
            .filter(name.ilike(&pattern).or(description.ilike(&pattern)))
            .order(id.asc())
            .select(ProductRow::as_select())
            .load(&mut conn)
            .await?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn find_by_key(&self, key: &str) -> AppResult<Option<Product>> {
        let mut conn = self.pool.get().await?;

        let row = products::table
            .filter(products::name.eq(key))
            .select(ProductRow::as_select())
            .first(&mut conn)
            .await
            .optional()?;
        Ok(row.map(Product::from))
    }

    async fn find_by_id(&self, product_id: i64) -> AppResult<Option<Product>> {
        let mut conn = self.pool.get().await?;

        let row = products::table
            .find(product_id)
            .select(ProductRow::as_select())
            .first(&mut conn)
            .await
            .optional()?;
        Ok(row.map(Product::from))
    }

    async fn save(&self, entity: Product) -> AppResult<Product> {
        let mut conn = self.pool.get().await?;
        let changes = ProductChanges::from(&entity);

        let row = match entity.id {
            None => {
                diesel::insert_into(products::table)
                    .values(&changes)
                    .returning(ProductRow::as_returning())
                    .get_result(&mut conn)
                    .await?
            }
            Some(product_id) => diesel::update(products::table.find(product_id))
                .set(&changes)
                .returning(ProductRow::as_returning())
                .get_result(&mut conn)
                .await
                .optional()?
                .ok_or_else(|| AppError::not_found(Product::ENTITY, product_id))?,
        };
        Ok(row.into())
    }

    async fn delete(&self, product_id: i64) -> AppResult<()> {
        let mut conn = self.pool.get().await?;

        diesel::delete(products::table.find(product_id))
            .execute(&mut conn)
            .await?;
        Ok(())
    }
}
