//! HTTP request handlers.
//!
//! [`resource`] holds the CRUD flow shared by every entity family; the
//! per-family modules only describe how a form becomes an entity.

pub mod brands;
pub mod categories;
pub mod health;
pub mod products;
pub mod resource;
pub mod users;
