use async_trait::async_trait;
use uuid::Uuid;

use super::manager::DatabaseError;
use super::models::{AdminContact, ContactUpdate, Favorite, NewContact, ProfileUpdate, User};

/// Persistence operations used by the services. Implemented by `PgStore`
/// for Postgres and `MemoryStore` for tests and local runs.
#[async_trait]
pub trait Store: Send + Sync {
    /// Cheap connectivity probe for `/health`
    async fn ping(&self) -> Result<(), DatabaseError>;

    // Users

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, DatabaseError>;

    /// Users whose email matches any of `emails`, compared case-insensitively.
    async fn find_users_by_emails(&self, emails: &[String]) -> Result<Vec<User>, DatabaseError>;

    async fn find_users_by_levels(&self, levels: &[i32]) -> Result<Vec<User>, DatabaseError>;

    /// Returns `None` when the user does not exist.
    async fn update_profile(&self, id: Uuid, update: &ProfileUpdate) -> Result<Option<User>, DatabaseError>;

    // Favorites

    async fn list_favorites(&self, user_id: Uuid) -> Result<Vec<Favorite>, DatabaseError>;

    async fn add_favorite(&self, user_id: Uuid, favorite: &Favorite) -> Result<(), DatabaseError>;

    /// Removes the most recently added matching favorite. Returns false when none matched.
    async fn remove_favorite(&self, user_id: Uuid, item_id: &str, item_type: &str) -> Result<bool, DatabaseError>;

    // Admin contacts

    /// All contacts ordered by position, then creation time, then id.
    async fn list_contacts(&self) -> Result<Vec<AdminContact>, DatabaseError>;

    async fn create_contact(&self, contact: NewContact) -> Result<AdminContact, DatabaseError>;

    async fn update_contact(&self, id: Uuid, update: &ContactUpdate) -> Result<Option<AdminContact>, DatabaseError>;

    async fn delete_contact(&self, id: Uuid) -> Result<bool, DatabaseError>;

    /// Sets `position = index` for every id, all or nothing. Returns the ids
    /// that matched no contact.
    async fn reorder_contacts(&self, ordered_ids: &[Uuid]) -> Result<Vec<Uuid>, DatabaseError>;
}
