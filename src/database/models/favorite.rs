use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    pub item_id: String,
    pub item_type: String,
    pub added_at: DateTime<Utc>,
}

impl Favorite {
    pub fn new(item_id: impl Into<String>, item_type: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            item_type: item_type.into(),
            added_at: Utc::now(),
        }
    }

    pub fn matches(&self, item_id: &str, item_type: &str) -> bool {
        self.item_id == item_id && self.item_type == item_type
    }
}
