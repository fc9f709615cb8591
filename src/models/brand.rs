use serde::Serialize;

use super::Entity;

/// Product brand (manufacturer).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Brand {
    pub id: Option<i64>,
    pub name: String,
}

impl Brand {
    pub fn new(id: impl Into<Option<i64>>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl Entity for Brand {
    const ENTITY: &'static str = "brand";
    const KEY_FIELD: &'static str = "name";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn natural_key(&self) -> &str {
        &self.name
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name]
    }
}
