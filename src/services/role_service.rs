//! Role lookups for the user screens.

use std::sync::Arc;

use crate::error::AppResult;
use crate::models::Role;
use crate::repositories::RoleRepository;

#[derive(Clone)]
pub struct RoleService {
    repo: Arc<dyn RoleRepository>,
}

impl RoleService {
    pub fn new(repo: Arc<dyn RoleRepository>) -> Self {
        Self { repo }
    }

    /// Every assignable role, for the user form's checkbox list.
    pub async fn list_all(&self) -> AppResult<Vec<Role>> {
        self.repo.find_all().await
    }

    /// Resolves submitted role ids; unknown ids are dropped.
    pub async fn resolve(&self, ids: &[i64]) -> AppResult<Vec<Role>> {
        self.repo.find_by_ids(ids).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::memory::MemoryRoleRepository;

    #[tokio::test]
    async fn test_resolve_drops_unknown_ids() {
        let service = RoleService::new(Arc::new(MemoryRoleRepository::seeded()));

        let roles = service.resolve(&[2, 5]).await.unwrap();
        assert_eq!(roles, vec![Role::new(2, "Staff", "一般")]);
    }

    #[tokio::test]
    async fn test_list_all_returns_seeded_roles() {
        let service = RoleService::new(Arc::new(MemoryRoleRepository::seeded()));
        assert_eq!(service.list_all().await.unwrap().len(), 2);
    }
}
