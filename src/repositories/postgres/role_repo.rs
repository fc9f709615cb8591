//! Role lookups against the seeded `roles` table.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::AppResult;
use crate::models::Role;
use crate::repositories::RoleRepository;
use crate::schema::roles;

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = roles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(super) struct RoleRow {
    id: i64,
    code: String,
    display_name: String,
}

impl From<RoleRow> for Role {
    fn from(row: RoleRow) -> Self {
        Role::new(row.id, row.code, row.display_name)
    }
}

#[derive(Clone)]
pub struct PgRoleRepository {
    pool: AsyncDbPool,
}

impl PgRoleRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleRepository for PgRoleRepository {
    async fn find_all(&self) -> AppResult<Vec<Role>> {
        let mut conn = self.pool.get().await?;

        let rows = roles::table
            .order(roles::id.asc())
            .select(RoleRow::as_select())
            .load(&mut conn)
            .await?;
        Ok(rows.into_iter().map(Role::from).collect())
    }

    async fn find_by_ids(&self, ids: &[i64]) -> AppResult<Vec<Role>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await?;

        let rows = roles::table
            .filter(roles::id.eq_any(ids))
            .order(roles::id.asc())
            .select(RoleRow::as_select())
            .load(&mut conn)
            .await?;
        Ok(rows.into_iter().map(Role::from).collect())
    }
}
