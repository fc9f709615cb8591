//! Brand repository for async database operations.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use super::contains_pattern;
use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{Brand, Entity};
use crate::repositories::Repository;
use crate::schema::brands;

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = brands)]
#[diesel(check_for_backend(diesel::pg::Pg))]
struct BrandRow {
    id: i64,
    name: String,
}

impl From<BrandRow> for Brand {
    fn from(row: BrandRow) -> Self {
        Brand::new(row.id, row.name)
    }
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = brands)]
struct BrandChanges<'a> {
    name: &'a str,
}

/// Brand repository holding an async connection pool.
#[derive(Clone)]
pub struct PgBrandRepository {
    pool: AsyncDbPool,
}

impl PgBrandRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<Brand> for PgBrandRepository {
    async fn find_all(&self) -> AppResult<Vec<Brand>> {
        use crate::schema::brands::dsl::*;
        let mut conn = self.pool.get().await?;

        let rows = brands
            .order(id.asc())
            .select(BrandRow::as_select())
            .load(&mut conn)
            .await?;
        Ok(rows.into_iter().map(Brand::from).collect())
    }

    async fn search(&self, keyword: &str) -> AppResult<Vec<Brand>> {
        use crate::schema::brands::dsl::*;
        let mut conn = self.pool.get().await?;

        let rows = brands
            .filter(name.ilike(contains_pattern(keyword)))
            .order(id.asc())
            .select(BrandRow::as_select())
            .load(&mut conn)
            .await?;
        Ok(rows.into_iter().map(Brand::from).collect())
    }

    async fn find_by_key(&self, key: &str) -> AppResult<Option<Brand>> {
        use crate::schema::brands::dsl::*;
        let mut conn = self.pool.get().await?;

        let row = brands
            .filter(name.eq(key))
            .select(BrandRow::as_select())
            .first(&mut conn)
            .await
            .optional()?;
        Ok(row.map(Brand::from))
    }

    async fn find_by_id(&self, brand_id: i64) -> AppResult<Option<Brand>> {
        let mut conn = self.pool.get().await?;

        let row = brands::table
            .find(brand_id)
            .select(BrandRow::as_select())
            .first(&mut conn)
            .await
            .optional()?;
        Ok(row.map(Brand::from))
    }

    async fn save(&self, entity: Brand) -> AppResult<Brand> {
        let mut conn = self.pool.get().await?;
        let changes = BrandChanges { name: &entity.name };

        let row = match entity.id {
            None => {
                diesel::insert_into(brands::table)
                    .values(&changes)
                    .returning(BrandRow::as_returning())
                    .get_result(&mut conn)
                    .await?
            }
            Some(brand_id) => diesel::update(brands::table.find(brand_id))
                .set(&changes)
                .returning(BrandRow::as_returning())
                .get_result(&mut conn)
                .await
                .optional()?
                .ok_or_else(|| AppError::not_found(Brand::ENTITY, brand_id))?,
        };
        Ok(row.into())
    }

    async fn delete(&self, brand_id: i64) -> AppResult<()> {
        let mut conn = self.pool.get().await?;

        diesel::delete(brands::table.find(brand_id))
            .execute(&mut conn)
            .await?;
        Ok(())
    }
}
