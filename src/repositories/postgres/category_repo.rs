//! Category repository for async database operations.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use super::contains_pattern;
use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{Category, Entity};
use crate::repositories::Repository;
use crate::schema::categories;

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
struct CategoryRow {
    id: i64,
    name: String,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category::new(row.id, row.name)
    }
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = categories)]
struct CategoryChanges<'a> {
    name: &'a str,
}

/// Category repository holding an async connection pool.
#[derive(Clone)]
pub struct PgCategoryRepository {
    pool: AsyncDbPool,
}

impl PgCategoryRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<Category> for PgCategoryRepository {
    async fn find_all(&self) -> AppResult<Vec<Category>> {
        use crate::schema::categories::dsl::*;
        let mut conn = self.pool.get().await?;

        let rows = categories
            .order(id.asc())
            .select(CategoryRow::as_select())
            .load(&mut conn)
            .await?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn search(&self, keyword: &str) -> AppResult<Vec<Category>> {
        use crate::schema::categories::dsl::*;
        let mut conn = self.pool.get().await?;

        let rows = categories
            .filter(name.ilike(contains_pattern(keyword)))
            .order(id.asc())
            .select(CategoryRow::as_select())
            .load(&mut conn)
            .await?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn find_by_key(&self, key: &str) -> AppResult<Option<Category>> {
        use crate::schema::categories::dsl::*;
        let mut conn = self.pool.get().await?;

        let row = categories
            .filter(name.eq(key))
            .select(CategoryRow::as_select())
            .first(&mut conn)
            .await
            .optional()?;
        Ok(row.map(Category::from))
    }

    async fn find_by_id(&self, category_id: i64) -> AppResult<Option<Category>> {
        let mut conn = self.pool.get().await?;

        let row = categories::table
            .find(category_id)
            .select(CategoryRow::as_select())
            .first(&mut conn)
            .await
            .optional()?;
        Ok(row.map(Category::from))
    }

    async fn save(&self, entity: Category) -> AppResult<Category> {
        let mut conn = self.pool.get().await?;
        let changes = CategoryChanges { name: &entity.name };

        let row = match entity.id {
            None => {
                diesel::insert_into(categories::table)
                    .values(&changes)
                    .returning(CategoryRow::as_returning())
                    .get_result(&mut conn)
                    .await?
            }
            Some(category_id) => diesel::update(categories::table.find(category_id))
                .set(&changes)
                .returning(CategoryRow::as_returning())
                .get_result(&mut conn)
                .await
                .optional()?
                .ok_or_else(|| AppError::not_found(Category::ENTITY, category_id))?,
        };
        Ok(row.into())
    }

    async fn delete(&self, category_id: i64) -> AppResult<()> {
        let mut conn = self.pool.get().await?;

        diesel::delete(categories::table.find(category_id))
            .execute(&mut conn)
            .await?;
        Ok(())
    }
}
