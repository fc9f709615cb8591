//! Repository layer for data access operations.
//!
//! [`Repository`] is the storage contract the services depend on. Two
//! backends implement it: [`memory`] keeps records in process and
//! [`postgres`] goes through diesel_async.

pub mod memory;
pub mod postgres;
mod traits;

pub use traits::{Repository, RoleRepository};

use std::sync::Arc;

use crate::db::AsyncDbPool;
use crate::models::{Brand, Category, Product, User};
use memory::{MemoryRepository, MemoryRoleRepository};
use postgres::{
    PgBrandRepository, PgCategoryRepository, PgProductRepository, PgRoleRepository,
    PgUserRepository,
};

/// Aggregates one repository per entity family behind trait objects.
///
/// Cloning only bumps reference counts.
#[derive(Clone)]
pub struct Repositories {
    pub categories: Arc<dyn Repository<Category>>,
    pub brands: Arc<dyn Repository<Brand>>,
    pub products: Arc<dyn Repository<Product>>,
    pub users: Arc<dyn Repository<User>>,
    pub roles: Arc<dyn RoleRepository>,
}

impl Repositories {
    /// Empty in-process storage with the default roles seeded.
    pub fn in_memory() -> Self {
        Self {
            categories: Arc::new(MemoryRepository::<Category>::new()),
            brands: Arc::new(MemoryRepository::<Brand>::new()),
            products: Arc::new(MemoryRepository::<Product>::new()),
            users: Arc::new(MemoryRepository::<User>::new()),
            roles: Arc::new(MemoryRoleRepository::seeded()),
        }
    }

    /// PostgreSQL-backed storage sharing one connection pool.
    pub fn postgres(pool: AsyncDbPool) -> Self {
        Self {
            categories: Arc::new(PgCategoryRepository::new(pool.clone())),
            brands: Arc::new(PgBrandRepository::new(pool.clone())),
            products: Arc::new(PgProductRepository::new(pool.clone())),
            users: Arc::new(PgUserRepository::new(pool.clone())),
            roles: Arc::new(PgRoleRepository::new(pool)),
        }
    }
}
