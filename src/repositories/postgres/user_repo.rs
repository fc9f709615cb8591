//! User repository for async database operations.
//!
//! Role assignments live in `users_roles`; they are loaded with the users and
//! replaced wholesale on every save.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};

use super::contains_pattern;
use super::role_repo::RoleRow;
use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{Entity, Role, User};
use crate::repositories::Repository;
use crate::schema::{roles, users, users_roles};

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
struct UserRow {
    id: i64,
    email: String,
    password: String,
    name: String,
    enabled: bool,
}

impl UserRow {
    fn into_user(self, roles: Vec<Role>) -> User {
        User::new(
            self.id,
            self.email,
            self.password,
            self.name,
            self.enabled,
            roles,
        )
    }
}

/// `password: None` leaves the stored hash untouched on update.
#[derive(Insertable, AsChangeset)]
#[diesel(table_name = users)]
struct UserChanges<'a> {
    email: &'a str,
    password: Option<&'a str>,
    name: &'a str,
    enabled: bool,
}

impl<'a> From<&'a User> for UserChanges<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            email: &user.email,
            password: (!user.password.is_empty()).then_some(user.password.as_str()),
            name: &user.name,
            enabled: user.enabled,
        }
    }
}

/// Loads the roles of every row in one query and builds the users.
async fn with_roles(conn: &mut AsyncPgConnection, rows: Vec<UserRow>) -> AppResult<Vec<User>> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();

    let links: Vec<(i64, RoleRow)> = users_roles::table
        .inner_join(roles::table)
        .filter(users_roles::user_id.eq_any(&ids))
        .select((users_roles::user_id, RoleRow::as_select()))
        .load(conn)
        .await?;

    let mut by_user: HashMap<i64, Vec<Role>> = HashMap::new();
    for (user_id, role) in links {
        by_user.entry(user_id).or_default().push(role.into());
    }

    Ok(rows
        .into_iter()
        .map(|row| {
            let roles = by_user.remove(&row.id).unwrap_or_default();
            row.into_user(roles)
        })
        .collect())
}

/// User repository holding an async connection pool.
#[derive(Clone)]
pub struct PgUserRepository {
    pool: AsyncDbPool,
}

impl PgUserRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<User> for PgUserRepository {
    async fn find_all(&self) -> AppResult<Vec<User>> {
        let mut pooled = self.pool.get().await?;
        let conn: &mut AsyncPgConnection = &mut pooled;

        let rows = users::table
            .order(users::id.asc())
            .select(UserRow::as_select())
            .load(conn)
            .await?;
        with_roles(conn, rows).await
    }

    /// Matches the keyword against email and name.
    async fn search(&self, keyword: &str) -> AppResult<Vec<User>> {
        let mut pooled = self.pool.get().await?;
        let conn: &mut AsyncPgConnection = &mut pooled;
        let pattern = contains_pattern(keyword);

        let rows = users::table
            .filter(users::email.ilike(&pattern).or(users::name.ilike(&pattern)))
            .order(users::id.asc())
            .select(UserRow::as_select())
            .load(conn)
            .await?;
        with_roles(conn, rows).await
    }

    async fn find_by_key(&self, key: &str) -> AppResult<Option<User>> {
        let mut pooled = self.pool.get().await?;
        let conn: &mut AsyncPgConnection = &mut pooled;

        let rows = users::table
            .filter(users::email.eq(key))
            .select(UserRow::as_select())
            .limit(1)
            .load(conn)
            .await?;
        Ok(with_roles(conn, rows).await?.pop())
    }

    async fn find_by_id(&self, user_id: i64) -> AppResult<Option<User>> {
        let mut pooled = self.pool.get().await?;
        let conn: &mut AsyncPgConnection = &mut pooled;

        let rows = users::table
            .filter(users::id.eq(user_id))
            .select(UserRow::as_select())
            .load(conn)
            .await?;
        Ok(with_roles(conn, rows).await?.pop())
    }

    async fn save(&self, entity: User) -> AppResult<User> {
        let mut pooled = self.pool.get().await?;
        let conn: &mut AsyncPgConnection = &mut pooled;
        let role_ids = entity.role_ids();
        let roles = entity.roles.clone();

        let row = conn
            .transaction::<_, AppError, _>(|conn| {
                async move {
                    let changes = UserChanges::from(&entity);
                    let row = match entity.id {
                        None => {
                            diesel::insert_into(users::table)
                                .values(&changes)
                                .returning(UserRow::as_returning())
                                .get_result(conn)
                                .await?
                        }
                        Some(user_id) => diesel::update(users::table.find(user_id))
                            .set(&changes)
                            .returning(UserRow::as_returning())
                            .get_result(conn)
                            .await
                            .optional()?
                            .ok_or_else(|| AppError::not_found(User::ENTITY, user_id))?,
                    };

                    diesel::delete(users_roles::table.filter(users_roles::user_id.eq(row.id)))
                        .execute(conn)
                        .await?;

                    let links: Vec<_> = role_ids
                        .iter()
                        .map(|role_id| {
                            (
                                users_roles::user_id.eq(row.id),
                                users_roles::role_id.eq(*role_id),
                            )
                        })
                        .collect();
                    if !links.is_empty() {
                        diesel::insert_into(users_roles::table)
                            .values(&links)
                            .execute(conn)
                            .await?;
                    }

                    Ok(row)
                }
                .scope_boxed()
            })
            .await?;

        Ok(row.into_user(roles.into_iter().collect()))
    }

    async fn delete(&self, user_id: i64) -> AppResult<()> {
        let mut pooled = self.pool.get().await?;
        let conn: &mut AsyncPgConnection = &mut pooled;

        diesel::delete(users_roles::table.filter(users_roles::user_id.eq(user_id)))
            .execute(conn)
            .await?;
        diesel::delete(users::table.find(user_id))
            .execute(conn)
            .await?;
        Ok(())
    }
}
