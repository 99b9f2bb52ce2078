use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

use super::favorite::Favorite;

/// A user account. Provisioned elsewhere; this service only edits the
/// profile fields and the favorites list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub user_name: String,
    pub email: String,
    pub bio: Option<String>,
    pub preferences: Value,
    pub avatar_url: Option<String>,
    pub user_level_id: i32,
    pub favorites: Vec<Favorite>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(user_name: impl Into<String>, email: impl Into<String>, user_level_id: i32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_name: user_name.into(),
            email: email.into(),
            bio: None,
            preferences: Value::Object(Default::default()),
            avatar_url: None,
            user_level_id,
            favorites: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_avatar(mut self, avatar_url: impl Into<String>) -> Self {
        self.avatar_url = Some(avatar_url.into());
        self
    }
}

/// Row shape of the `users` table; favorites live in `user_favorites`.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub user_name: String,
    pub email: String,
    pub bio: Option<String>,
    pub preferences: sqlx::types::Json<Value>,
    pub avatar_url: Option<String>,
    pub user_level_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRow {
    pub fn into_user(self, favorites: Vec<Favorite>) -> User {
        User {
            id: self.id,
            user_name: self.user_name,
            email: self.email,
            bio: self.bio,
            preferences: self.preferences.0,
            avatar_url: self.avatar_url,
            user_level_id: self.user_level_id,
            favorites,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Partial profile update. `None` leaves the stored value untouched;
/// `bio: Some(None)` clears the bio.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub user_name: Option<String>,
    pub email: Option<String>,
    pub bio: Option<Option<String>>,
    pub preferences: Option<Value>,
}

impl ProfileUpdate {
    pub fn apply(&self, user: &mut User) {
        if let Some(user_name) = &self.user_name {
            user.user_name = user_name.clone();
        }
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        if let Some(bio) = &self.bio {
            user.bio = bio.clone();
        }
        if let Some(preferences) = &self.preferences {
            user.preferences = preferences.clone();
        }
        user.updated_at = Utc::now();
    }
}
