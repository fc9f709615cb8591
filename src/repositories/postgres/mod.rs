//! PostgreSQL storage backend built on diesel_async.
//!
//! Each repository holds a clone of the bb8 pool and checks a connection out
//! per call.

mod brand_repo;
mod category_repo;
mod product_repo;
mod role_repo;
mod user_repo;

pub use brand_repo::PgBrandRepository;
pub use category_repo::PgCategoryRepository;
pub use product_repo::PgProductRepository;
pub use role_repo::PgRoleRepository;
pub use user_repo::PgUserRepository;

/// Builds an `ILIKE` pattern matching `keyword` anywhere in the column.
///
/// `%`, `_` and `\` in the keyword are matched literally.
pub(crate) fn contains_pattern(keyword: &str) -> String {
    let mut pattern = String::with_capacity(keyword.len() + 2);
    pattern.push('%');
    for ch in keyword.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
