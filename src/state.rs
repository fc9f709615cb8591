//! Application state for Axum web framework.
//!
//! Contains shared services and resources that are accessible
//! across all request handlers.

use std::time::Duration;

use crate::api::flash::FlashStore;
use crate::config::{Settings, StorageBackend};
use crate::repositories::Repositories;
use crate::services::{ProductImageService, Services};

/// Application state containing all shared services and resources.
///
/// Cloning is cheap: services and the flash store only hold `Arc`s.
#[derive(Clone)]
pub struct AppState {
    /// All business logic services
    pub services: Services,
    /// Pending one-shot redirect messages
    pub flash: FlashStore,
    /// Backend the repositories were built for, reported by `/health`
    pub storage: StorageBackend,
}

impl AppState {
    /// Wires services over `repos` using the flash and upload settings.
    pub fn new(repos: Repositories, settings: &Settings) -> Self {
        let product_images =
            ProductImageService::new(settings.upload.allowed_image_extensions.iter());

        Self {
            services: Services::new(repos, product_images),
            flash: FlashStore::new(Duration::from_secs(settings.flash.ttl_seconds)),
            storage: settings.storage.backend,
        }
    }

    /// Fresh in-memory state with default settings.
    pub fn in_memory() -> Self {
        Self::new(Repositories::in_memory(), &Settings::default())
    }
}
