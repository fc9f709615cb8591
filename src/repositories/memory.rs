//! In-process storage backend.
//!
//! Used when `storage.backend = "memory"` and by the handler tests. Records are
//! kept ordered by id, so `find_all` and `search` return ascending ids.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{AppError, AppResult};
use crate::models::{Entity, Role};
use crate::repositories::{Repository, RoleRepository};

/// Map-backed [`Repository`] for any entity family.
pub struct MemoryRepository<T> {
    records: RwLock<BTreeMap<i64, T>>,
    sequence: AtomicI64,
}

impl<T: Entity> MemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
            sequence: AtomicI64::new(0),
        }
    }

    /// Creates a repository pre-filled with `records`, assigning ids to new ones.
    pub fn with_records(records: impl IntoIterator<Item = T>) -> Self {
        let mut map = BTreeMap::new();
        let mut last = 0;
        for mut record in records {
            let id = match record.id() {
                Some(id) => id,
                None => {
                    let id = last + 1;
                    record.set_id(id);
                    id
                }
            };
            last = last.max(id);
            map.insert(id, record);
        }

        Self {
            records: RwLock::new(map),
            sequence: AtomicI64::new(last),
        }
    }

    fn next_id(&self) -> i64 {
        self.sequence.fetch_add(1, Ordering::SeqCst) + 1
    }
}

impl<T: Entity> Default for MemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for MemoryRepository<T> {
    async fn find_all(&self) -> AppResult<Vec<T>> {
        Ok(self.records.read().await.values().cloned().collect())
    }

    async fn search(&self, keyword: &str) -> AppResult<Vec<T>> {
        let needle = keyword.to_lowercase();
        let records = self.records.read().await;

        Ok(records
            .values()
            .filter(|record| {
                record
                    .search_fields()
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect())
    }

    async fn find_by_key(&self, key: &str) -> AppResult<Option<T>> {
        let records = self.records.read().await;
        Ok(records.values().find(|r| r.natural_key() == key).cloned())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<T>> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn save(&self, mut entity: T) -> AppResult<T> {
        let mut records = self.records.write().await;

        let id = match entity.id() {
            Some(id) => {
                let stored = records
                    .get(&id)
                    .ok_or_else(|| AppError::not_found(T::ENTITY, id))?;
                entity.carry_over(stored);
                id
            }
            None => {
                let id = self.next_id();
                entity.set_id(id);
                id
            }
        };

        records.insert(id, entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        self.records.write().await.remove(&id);
        Ok(())
    }
}

/// Fixed role table for the memory backend.
pub struct MemoryRoleRepository {
    roles: Vec<Role>,
}

impl MemoryRoleRepository {
    pub fn new(roles: Vec<Role>) -> Self {
        Self { roles }
    }

    /// The same roles the database migration seeds.
    pub fn seeded() -> Self {
        Self::new(vec![
            Role::new(1, "Admin", "管理者"),
            Role::new(2, "Staff", "一般"),
        ])
    }
}

#[async_trait]
impl RoleRepository for MemoryRoleRepository {
    async fn find_all(&self) -> AppResult<Vec<Role>> {
        Ok(self.roles.clone())
    }

    async fn find_by_ids(&self, ids: &[i64]) -> AppResult<Vec<Role>> {
        Ok(self
            .roles
            .iter()
            .filter(|role| ids.contains(&role.id))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, User};

    #[tokio::test]
    async fn test_save_assigns_sequential_ids() {
        let repo = MemoryRepository::<Category>::new();

        let first = repo.save(Category::new(None, "categoryA")).await.unwrap();
        let second = repo.save(Category::new(None, "categoryB")).await.unwrap();

        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));
    }

    #[tokio::test]
    async fn test_save_with_id_overwrites() {
        let repo = MemoryRepository::with_records([Category::new(None, "categoryA")]);

        repo.save(Category::new(1, "renamed")).await.unwrap();

        let all = repo.find_all().await.unwrap();
        assert_eq!(all, vec![Category::new(1, "renamed")]);
    }

    #[tokio::test]
    async fn test_save_with_unknown_id_is_not_found() {
        let repo = MemoryRepository::with_records([Category::new(None, "categoryA")]);

        let result = repo.save(Category::new(7, "ghost")).await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
        let next = repo.save(Category::new(None, "categoryB")).await.unwrap();
        assert_eq!(next.id, Some(2));
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_substring() {
        let repo = MemoryRepository::with_records([
            Category::new(None, "Kitchen"),
            Category::new(None, "Garden"),
            Category::new(None, "kitchenware"),
        ]);

        let found = repo.search("KITCHEN").await.unwrap();
        let names: Vec<_> = found.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Kitchen", "kitchenware"]);
    }

    #[tokio::test]
    async fn test_find_by_key_exact_match() {
        let repo = MemoryRepository::with_records([Category::new(None, "categoryA")]);

        assert!(repo.find_by_key("categoryA").await.unwrap().is_some());
        assert!(repo.find_by_key("category").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_id_is_ok() {
        let repo = MemoryRepository::<Category>::new();
        assert!(repo.delete(42).await.is_ok());
    }

    #[tokio::test]
    async fn test_user_update_without_password_keeps_stored_one() {
        let repo = MemoryRepository::with_records([User::new(
            None,
            "aaa@example.com",
            "$argon2id$stored",
            "userA",
            true,
            [],
        )]);

        let saved = repo
            .save(User::new(1, "aaa@example.com", "", "renamed", true, []))
            .await
            .unwrap();

        assert_eq!(saved.password, "$argon2id$stored");
        assert_eq!(saved.name, "renamed");
    }

    #[tokio::test]
    async fn test_role_lookup_skips_unknown_ids() {
        let repo = MemoryRoleRepository::seeded();
        let roles = repo.find_by_ids(&[1, 99]).await.unwrap();
        assert_eq!(roles, vec![Role::new(1, "Admin", "管理者")]);
    }
}
