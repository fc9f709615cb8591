use std::collections::BTreeSet;

use serde::Serialize;

use super::{Entity, Role};

/// Console operator account.
///
/// `email` is the login identifier. The password is an opaque (hashed)
/// credential: it is never compared here and never serialized into a view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: Option<i64>,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub name: String,
    pub enabled: bool,
    pub roles: BTreeSet<Role>,
}

impl User {
    pub fn new(
        id: impl Into<Option<i64>>,
        email: impl Into<String>,
        password: impl Into<String>,
        name: impl Into<String>,
        enabled: bool,
        roles: impl IntoIterator<Item = Role>,
    ) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            password: password.into(),
            name: name.into(),
            enabled,
            roles: roles.into_iter().collect(),
        }
    }

    /// Ids of the assigned roles, ascending.
    pub fn role_ids(&self) -> Vec<i64> {
        self.roles.iter().map(|r| r.id).collect()
    }
}

impl Entity for User {
    const ENTITY: &'static str = "user";
    const KEY_FIELD: &'static str = "email";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn natural_key(&self) -> &str {
        &self.email
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.email, &self.name]
    }

    // An edit form submitted without a password keeps the stored one.
    fn carry_over(&mut self, stored: &Self) {
        if self.password.is_empty() {
            self.password = stored.password.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_is_not_serialized() {
        let user = User::new(1, "aaa@example.com", "secret-hash", "userA", true, []);
        let json = serde_json::to_value(&user).unwrap();

        assert!(json.get("password").is_none());
        assert_eq!(json["email"], "aaa@example.com");
    }

    #[test]
    fn test_role_ids_are_sorted() {
        let user = User::new(
            1,
            "aaa@example.com",
            "",
            "userA",
            false,
            [Role::new(2, "User", "一般"), Role::new(1, "Admin", "管理者")],
        );

        assert_eq!(user.role_ids(), vec![1, 2]);
    }

    #[test]
    fn test_default_user_is_new() {
        assert!(User::default().is_new());
    }
}
