//! Catalog service shared by every entity family.
//!
//! The console manages categories, brands, products and users through the
//! same six operations; only the storage collaborator differs.

use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::{Brand, Category, Entity, Product, User};
use crate::repositories::Repository;

pub type CategoryService = EntityService<Category>;
pub type BrandService = EntityService<Brand>;
pub type ProductService = EntityService<Product>;
pub type UserService = EntityService<User>;

/// Listing, uniqueness checks and CRUD for one entity family.
///
/// Cloning only bumps the repository reference count.
pub struct EntityService<T: Entity> {
    repo: Arc<dyn Repository<T>>,
}

impl<T: Entity> Clone for EntityService<T> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

impl<T: Entity> EntityService<T> {
    pub fn new(repo: Arc<dyn Repository<T>>) -> Self {
        Self { repo }
    }

    /// Lists every record, or only those matching `keyword` when it is non-empty.
    ///
    /// An empty keyword is treated exactly like no keyword. Results come back
    /// in whatever order the repository returns them.
    pub async fn list_all(&self, keyword: Option<&str>) -> AppResult<Vec<T>> {
        match keyword {
            Some(keyword) if !keyword.is_empty() => self.repo.search(keyword).await,
            _ => self.repo.find_all().await,
        }
    }

    /// `true` when no stored record has the same natural key as `entity`.
    ///
    /// The stored record is not excluded by id: resubmitting an existing
    /// record with an unchanged key reports a conflict.
    pub async fn check_unique(&self, entity: &T) -> AppResult<bool> {
        let existing = self.repo.find_by_key(entity.natural_key()).await?;
        Ok(existing.is_none())
    }

    /// Fetches one record, failing with `NotFound` when the id is unknown.
    pub async fn get(&self, id: i64) -> AppResult<T> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(T::ENTITY, id))
    }

    pub async fn save(&self, entity: T) -> AppResult<T> {
        self.repo.save(entity).await
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.repo.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mockall::mock;
    use mockall::predicate::eq;
    use proptest::prelude::*;

    mock! {
        pub CategoryRepo {}

        #[async_trait]
        impl Repository<Category> for CategoryRepo {
            async fn find_all(&self) -> AppResult<Vec<Category>>;
            async fn search(&self, keyword: &str) -> AppResult<Vec<Category>>;
            async fn find_by_key(&self, key: &str) -> AppResult<Option<Category>>;
            async fn find_by_id(&self, id: i64) -> AppResult<Option<Category>>;
            async fn save(&self, entity: Category) -> AppResult<Category>;
            async fn delete(&self, id: i64) -> AppResult<()>;
        }
    }

    fn service(repo: MockCategoryRepo) -> CategoryService {
        EntityService::new(Arc::new(repo))
    }

    fn sample() -> Vec<Category> {
        vec![Category::new(1, "categoryA"), Category::new(2, "categoryB")]
    }

    #[tokio::test]
    async fn test_list_all_without_keyword_returns_everything() {
        let mut repo = MockCategoryRepo::new();
        repo.expect_find_all().times(1).returning(|| Ok(sample()));
        repo.expect_search().never();

        let result = service(repo).list_all(None).await.unwrap();
        assert_eq!(result, sample());
    }

    #[tokio::test]
    async fn test_list_all_empty_keyword_behaves_like_none() {
        let mut repo = MockCategoryRepo::new();
        repo.expect_find_all().times(1).returning(|| Ok(sample()));
        repo.expect_search().never();

        let result = service(repo).list_all(Some("")).await.unwrap();
        assert_eq!(result.len(), 2);
    }

    #[tokio::test]
    async fn test_list_all_with_keyword_delegates_to_search() {
        let mut repo = MockCategoryRepo::new();
        repo.expect_find_all().never();
        repo.expect_search()
            .withf(|keyword| keyword == "B")
            .times(1)
            .returning(|_| Ok(vec![Category::new(2, "categoryB")]));

        let result = service(repo).list_all(Some("B")).await.unwrap();
        assert_eq!(result, vec![Category::new(2, "categoryB")]);
    }

    #[tokio::test]
    async fn test_list_all_passes_repository_errors_through() {
        let mut repo = MockCategoryRepo::new();
        repo.expect_find_all()
            .returning(|| {
                Err(AppError::ConnectionPool {
                    source: anyhow::anyhow!("pool exhausted"),
                })
            });

        let err = service(repo).list_all(None).await.unwrap_err();
        assert!(matches!(err, AppError::ConnectionPool { .. }));
    }

    #[tokio::test]
    async fn test_check_unique_true_when_key_unused() {
        let mut repo = MockCategoryRepo::new();
        repo.expect_find_by_key()
            .withf(|key| key == "categoryA")
            .returning(|_| Ok(None));

        let unique = service(repo)
            .check_unique(&Category::new(None, "categoryA"))
            .await
            .unwrap();
        assert!(unique);
    }

    #[tokio::test]
    async fn test_check_unique_false_when_key_taken() {
        let mut repo = MockCategoryRepo::new();
        repo.expect_find_by_key()
            .returning(|_| Ok(Some(Category::new(1, "categoryA"))));

        let unique = service(repo)
            .check_unique(&Category::new(None, "categoryA"))
            .await
            .unwrap();
        assert!(!unique);
    }

    #[tokio::test]
    async fn test_check_unique_does_not_exclude_same_record() {
        let mut repo = MockCategoryRepo::new();
        repo.expect_find_by_key()
            .returning(|_| Ok(Some(Category::new(1, "categoryA"))));

        let unique = service(repo)
            .check_unique(&Category::new(1, "categoryA"))
            .await
            .unwrap();
        assert!(!unique);
    }

    #[tokio::test]
    async fn test_get_returns_record() {
        let mut repo = MockCategoryRepo::new();
        repo.expect_find_by_id()
            .with(eq(1))
            .returning(|_| Ok(Some(Category::new(1, "categoryA"))));

        let category = service(repo).get(1).await.unwrap();
        assert_eq!(category.name, "categoryA");
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_not_found() {
        let mut repo = MockCategoryRepo::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let err = service(repo).get(99).await.unwrap_err();
        match err {
            AppError::NotFound { entity, value, .. } => {
                assert_eq!(entity, "category");
                assert_eq!(value, "99");
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_save_returns_stored_record() {
        let mut repo = MockCategoryRepo::new();
        repo.expect_save()
            .withf(|c| c.id.is_none() && c.name == "categoryA")
            .times(1)
            .returning(|mut c| {
                c.id = Some(7);
                Ok(c)
            });

        let saved = service(repo)
            .save(Category::new(None, "categoryA"))
            .await
            .unwrap();
        assert_eq!(saved.id, Some(7));
    }

    #[tokio::test]
    async fn test_delete_delegates_once() {
        let mut repo = MockCategoryRepo::new();
        repo.expect_delete().with(eq(3)).times(1).returning(|_| Ok(()));

        service(repo).delete(3).await.unwrap();
    }

    fn block_on<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
            .block_on(future)
    }

    proptest! {
        #[test]
        fn prop_non_empty_keyword_always_searches(keyword in "[a-zA-Z0-9]{1,16}") {
            let expected = keyword.clone();
            let mut repo = MockCategoryRepo::new();
            repo.expect_find_all().never();
            repo.expect_search()
                .withf(move |k| k == expected)
                .times(1)
                .returning(|_| Ok(Vec::new()));

            let result = block_on(service(repo).list_all(Some(&keyword))).unwrap();
            prop_assert!(result.is_empty());
        }

        #[test]
        fn prop_check_unique_mirrors_key_lookup(name in "[a-z]{1,12}", taken in any::<bool>()) {
            let mut repo = MockCategoryRepo::new();
            repo.expect_find_by_key().returning(move |key| {
                Ok(taken.then(|| Category::new(1, key)))
            });

            let unique = block_on(service(repo).check_unique(&Category::new(None, name))).unwrap();
            prop_assert_eq!(unique, !taken);
        }
    }
}
