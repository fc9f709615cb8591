//! Request and response bodies.

mod brand;
mod category;
mod error;
mod health;
mod product;
mod user;

pub use brand::BrandForm;
pub use category::CategoryForm;
pub use error::ErrorResponse;
pub use health::{HealthResponse, HealthStatus};
pub use product::ProductForm;
pub use user::UserForm;
