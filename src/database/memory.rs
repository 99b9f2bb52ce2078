use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::manager::DatabaseError;
use super::models::{AdminContact, ContactUpdate, Favorite, NewContact, ProfileUpdate, User};
use super::store::Store;

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    contacts: HashMap<Uuid, AdminContact>,
}

/// In-process `Store` used by the test suite and for running without Postgres.
/// One lock guards every table, so multi-row writes are atomic.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user row. Users are provisioned outside this service.
    pub async fn insert_user(&self, user: User) {
        self.tables.write().await.users.insert(user.id, user);
    }

    pub async fn insert_contact(&self, contact: AdminContact) {
        self.tables.write().await.contacts.insert(contact.id, contact);
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_users_by_emails(&self, emails: &[String]) -> Result<Vec<User>, DatabaseError> {
        let wanted: HashSet<String> = emails.iter().map(|e| e.to_lowercase()).collect();
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .filter(|u| wanted.contains(&u.email.to_lowercase()))
            .cloned()
            .collect())
    }

    async fn find_users_by_levels(&self, levels: &[i32]) -> Result<Vec<User>, DatabaseError> {
        let tables = self.tables.read().await;
        let mut users: Vec<User> = tables
            .users
            .values()
            .filter(|u| levels.contains(&u.user_level_id))
            .cloned()
            .collect();
        users.sort_by(|a, b| a.email.cmp(&b.email));
        Ok(users)
    }

    async fn update_profile(&self, id: Uuid, update: &ProfileUpdate) -> Result<Option<User>, DatabaseError> {
        let mut tables = self.tables.write().await;

        if let Some(email) = &update.email {
            let email = email.to_lowercase();
            let taken = tables
                .users
                .values()
                .any(|u| u.id != id && u.email.to_lowercase() == email);
            if taken {
                return Err(DatabaseError::Conflict("Email already in use".to_string()));
            }
        }

        Ok(tables.users.get_mut(&id).map(|user| {
            update.apply(user);
            user.clone()
        }))
    }

    async fn list_favorites(&self, user_id: Uuid) -> Result<Vec<Favorite>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.users.get(&user_id).map(|u| u.favorites.clone()).unwrap_or_default())
    }

    async fn add_favorite(&self, user_id: Uuid, favorite: &Favorite) -> Result<(), DatabaseError> {
        let mut tables = self.tables.write().await;
        if let Some(user) = tables.users.get_mut(&user_id) {
            user.favorites.push(favorite.clone());
        }
        Ok(())
    }

    async fn remove_favorite(&self, user_id: Uuid, item_id: &str, item_type: &str) -> Result<bool, DatabaseError> {
        let mut tables = self.tables.write().await;
        let Some(user) = tables.users.get_mut(&user_id) else {
            return Ok(false);
        };
        match user.favorites.iter().rposition(|f| f.matches(item_id, item_type)) {
            Some(index) => {
                user.favorites.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_contacts(&self) -> Result<Vec<AdminContact>, DatabaseError> {
        let tables = self.tables.read().await;
        let mut contacts: Vec<AdminContact> = tables.contacts.values().cloned().collect();
        contacts.sort_by(|a, b| {
            a.position
                .cmp(&b.position)
                .then(a.created_at.cmp(&b.created_at))
                .then(a.id.cmp(&b.id))
        });
        Ok(contacts)
    }

    async fn create_contact(&self, contact: NewContact) -> Result<AdminContact, DatabaseError> {
        let contact = contact.into_contact();
        self.tables.write().await.contacts.insert(contact.id, contact.clone());
        Ok(contact)
    }

    async fn update_contact(&self, id: Uuid, update: &ContactUpdate) -> Result<Option<AdminContact>, DatabaseError> {
        let mut tables = self.tables.write().await;
        Ok(tables.contacts.get_mut(&id).map(|contact| {
            update.apply(contact);
            contact.clone()
        }))
    }

    async fn delete_contact(&self, id: Uuid) -> Result<bool, DatabaseError> {
        Ok(self.tables.write().await.contacts.remove(&id).is_some())
    }

    async fn reorder_contacts(&self, ordered_ids: &[Uuid]) -> Result<Vec<Uuid>, DatabaseError> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let mut missing = Vec::new();

        for (index, id) in ordered_ids.iter().enumerate() {
            match tables.contacts.get_mut(id) {
                Some(contact) => {
                    contact.position = index as i32;
                    contact.updated_at = now;
                }
                None => missing.push(*id),
            }
        }
        Ok(missing)
    }
}
