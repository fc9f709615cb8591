use crate::error::AppError;
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// Utility for converting database errors to structured AppError variants.
///
/// Constraint names follow the PostgreSQL defaults used by the bundled
/// migrations: `{table}_{column}_key` for unique constraints and
/// `{table}_{column}_fkey` for foreign keys.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    /// Converts a Diesel error to an appropriate AppError variant.
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
        match error {
            DieselError::DatabaseError(kind, info) => {
                Self::convert_database_error(kind, info.as_ref(), operation)
            }
            DieselError::NotFound => AppError::NotFound {
                entity: "resource".to_string(),
                field: "id".to_string(),
                value: "unknown".to_string(),
            },
            other => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::from(other),
            },
        }
    }

    fn convert_database_error(
        kind: DatabaseErrorKind,
        info: &(dyn DatabaseErrorInformation + Send + Sync),
        operation: &str,
    ) -> AppError {
        let parsed = Self::split_constraint(info);

        match (kind, parsed) {
            (DatabaseErrorKind::UniqueViolation, Some((table, column))) => AppError::Duplicate {
                entity: table,
                field: column,
                value: info.details().unwrap_or_default().to_string(),
            },
            (DatabaseErrorKind::ForeignKeyViolation, Some((table, column))) => {
                AppError::Validation {
                    field: column,
                    reason: format!("Invalid reference from {}", table),
                }
            }
            _ => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::msg(format!("Database error: {}", info.message())),
            },
        }
    }

    /// Splits `{table}_{column}_key` / `{table}_{column}_fkey` into its parts.
    fn split_constraint(info: &(dyn DatabaseErrorInformation + Send + Sync)) -> Option<(String, String)> {
        let table = info.table_name()?;
        let constraint = info.constraint_name()?;
        let rest = constraint.strip_prefix(table)?.strip_prefix('_')?;
        let column = rest
            .strip_suffix("_fkey")
            .or_else(|| rest.strip_suffix("_key"))?;
        Some((table.to_string(), column.to_string()))
    }
}
