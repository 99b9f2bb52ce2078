use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Staff contact entry shown on the public contact page, ordered by `position`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AdminContact {
    pub id: Uuid,
    pub name: String,
    pub title: String,
    pub email: String,
    pub position: i32,
    #[sqlx(rename = "user_id")]
    pub user: Option<Uuid>,
    /// Filled from the matching user at read time, never stored.
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewContact {
    pub name: String,
    pub title: String,
    pub email: String,
    pub user: Option<Uuid>,
}

impl NewContact {
    pub fn into_contact(self) -> AdminContact {
        let now = Utc::now();
        AdminContact {
            id: Uuid::new_v4(),
            name: self.name,
            title: self.title,
            email: self.email,
            position: 0,
            user: self.user,
            avatar_url: None,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ContactUpdate {
    pub name: Option<String>,
    pub title: Option<String>,
    pub email: Option<String>,
    pub position: Option<i32>,
    /// `Some(link)` replaces the linked user, `Some(None)` clears it.
    pub user: Option<Option<Uuid>>,
}

impl ContactUpdate {
    pub fn apply(&self, contact: &mut AdminContact) {
        if let Some(name) = &self.name {
            contact.name = name.clone();
        }
        if let Some(title) = &self.title {
            contact.title = title.clone();
        }
        if let Some(email) = &self.email {
            contact.email = email.clone();
        }
        if let Some(position) = self.position {
            contact.position = position;
        }
        if let Some(user) = self.user {
            contact.user = user;
        }
        contact.updated_at = Utc::now();
    }
}
