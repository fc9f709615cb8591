//! Catalog domain records.
//!
//! Every record managed by the console implements [`Entity`], which exposes
//! the surrogate id and the natural key the service layer keeps unique.

mod brand;
mod category;
mod product;
mod role;
mod user;

pub use brand::Brand;
pub use category::Category;
pub use product::Product;
pub use role::Role;
pub use user::User;

/// A persisted catalog record with a surrogate id and a unique natural key.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Singular entity name used in errors and logs (`"category"`).
    const ENTITY: &'static str;

    /// Name of the natural-key field (`"name"` or `"email"`).
    const KEY_FIELD: &'static str;

    /// Surrogate id; `None` until the record has been persisted.
    fn id(&self) -> Option<i64>;

    fn set_id(&mut self, id: i64);

    /// Value of the natural-key field.
    fn natural_key(&self) -> &str;

    /// Text fields a keyword search matches against.
    fn search_fields(&self) -> Vec<&str>;

    /// `true` while the record has not been persisted.
    fn is_new(&self) -> bool {
        self.id().is_none()
    }

    /// Called by storage when `self` overwrites `stored`; copies over any
    /// field the submission left blank on purpose.
    fn carry_over(&mut self, _stored: &Self) {}
}
