//! Storage contracts consumed by the service layer.

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{Entity, Role};

/// Storage collaborator for one entity family.
///
/// Ordering and match semantics of [`find_all`](Repository::find_all) and
/// [`search`](Repository::search) belong to the implementation; callers pass
/// results through untouched.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Every stored record.
    async fn find_all(&self) -> AppResult<Vec<T>>;

    /// Records whose searchable text contains `keyword`.
    async fn search(&self, keyword: &str) -> AppResult<Vec<T>>;

    /// Lookup by natural key (name or email).
    async fn find_by_key(&self, key: &str) -> AppResult<Option<T>>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<T>>;

    /// Inserts a record without an id or overwrites the stored one with the
    /// same id, returning the stored version (with its assigned id). An id
    /// that is not stored is `NotFound`.
    async fn save(&self, entity: T) -> AppResult<T>;

    /// Removes the record if present. Missing ids are not an error.
    async fn delete(&self, id: i64) -> AppResult<()>;
}

/// Read-only access to the role reference table.
#[async_trait]
pub trait RoleRepository: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<Role>>;

    /// Roles matching `ids`; unknown ids are silently skipped.
    async fn find_by_ids(&self, ids: &[i64]) -> AppResult<Vec<Role>>;
}
