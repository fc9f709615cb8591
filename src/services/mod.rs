//! Service layer for business logic operations.
//!
//! Services encapsulate business logic and coordinate between
//! repositories and handlers.

mod entity_service;
mod product_image_service;
mod role_service;

pub use entity_service::{
    BrandService, CategoryService, EntityService, ProductService, UserService,
};
pub use product_image_service::ProductImageService;
pub use role_service::RoleService;

use crate::repositories::Repositories;

/// Aggregates all services for convenient access.
///
/// This struct is designed to be used as Axum application state.
/// Cloning only bumps reference counts.
#[derive(Clone)]
pub struct Services {
    pub categories: CategoryService,
    pub brands: BrandService,
    pub products: ProductService,
    pub users: UserService,
    pub roles: RoleService,
    pub product_images: ProductImageService,
}

impl Services {
    /// Wires one service per repository.
    pub fn new(repos: Repositories, product_images: ProductImageService) -> Self {
        Self {
            categories: EntityService::new(repos.categories),
            brands: EntityService::new(repos.brands),
            products: EntityService::new(repos.products),
            users: EntityService::new(repos.users),
            roles: RoleService::new(repos.roles),
            product_images,
        }
    }
}
