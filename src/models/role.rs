use serde::Serialize;

/// Authorisation role attached to users.
///
/// Roles are reference data: the console assigns them but never edits them.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Role {
    pub id: i64,
    pub code: String,
    pub display_name: String,
}

impl Role {
    pub fn new(id: i64, code: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id,
            code: code.into(),
            display_name: display_name.into(),
        }
    }
}
