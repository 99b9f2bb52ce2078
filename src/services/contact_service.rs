use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use uuid::Uuid;

use super::{optional_text, required_text, ServiceError};
use crate::database::models::{AdminContact, ContactUpdate, NewContact};
use crate::database::Store;
use crate::middleware::CurrentUser;
use crate::policy;

/// Fields accepted when creating a contact, before validation
#[derive(Debug, Default)]
pub struct ContactDraft {
    pub name: Option<String>,
    pub title: Option<String>,
    pub email: Option<String>,
}

pub struct ContactService {
    store: Arc<dyn Store>,
}

impl ContactService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// All contacts by ascending position, each decorated with the avatar of
    /// the user sharing its email (or `None`).
    pub async fn list_contacts(&self) -> Result<Vec<AdminContact>, ServiceError> {
        let mut contacts = self.store.list_contacts().await?;

        let emails: Vec<String> = contacts
            .iter()
            .map(|c| c.email.to_lowercase())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let avatars: HashMap<String, Option<String>> = self
            .store
            .find_users_by_emails(&emails)
            .await?
            .into_iter()
            .map(|u| (u.email.to_lowercase(), u.avatar_url))
            .collect();

        for contact in &mut contacts {
            contact.avatar_url = avatars.get(&contact.email.to_lowercase()).cloned().flatten();
        }
        Ok(contacts)
    }

    pub async fn add_contact(
        &self,
        user: Option<&CurrentUser>,
        draft: ContactDraft,
    ) -> Result<AdminContact, ServiceError> {
        let admin = policy::require_admin(user)?;

        let (Some(name), Some(title), Some(email)) = (
            required_text(draft.name.as_deref()),
            required_text(draft.title.as_deref()),
            required_text(draft.email.as_deref()),
        ) else {
            return Err(ServiceError::Validation("Name, title and email are required".to_string()));
        };

        let linked_user = self.linked_user(&email).await?;

        let contact = self
            .store
            .create_contact(NewContact {
                name,
                title,
                email,
                user: linked_user,
            })
            .await?;

        tracing::info!("Admin {} created contact {}", admin.id, contact.id);
        Ok(contact)
    }

    pub async fn update_contact(
        &self,
        user: Option<&CurrentUser>,
        id: &str,
        changes: ContactUpdate,
    ) -> Result<AdminContact, ServiceError> {
        let admin = policy::require_admin(user)?;
        let id = parse_contact_id(id)?;

        if matches!(changes.position, Some(p) if p < 0) {
            return Err(ServiceError::Validation("position cannot be negative".to_string()));
        }
        let email = optional_text(changes.email, "email")?;
        // A new address re-links the contact to whichever user owns it now
        let user = match &email {
            Some(email) => Some(self.linked_user(email).await?),
            None => None,
        };
        let update = ContactUpdate {
            name: optional_text(changes.name, "name")?,
            title: optional_text(changes.title, "title")?,
            email,
            position: changes.position,
            user,
        };

        let contact = self
            .store
            .update_contact(id, &update)
            .await?
            .ok_or_else(contact_not_found)?;

        tracing::info!("Admin {} updated contact {}", admin.id, contact.id);
        Ok(contact)
    }

    pub async fn delete_contact(&self, user: Option<&CurrentUser>, id: &str) -> Result<(), ServiceError> {
        let admin = policy::require_admin(user)?;
        let id = parse_contact_id(id)?;

        if !self.store.delete_contact(id).await? {
            return Err(contact_not_found());
        }

        tracing::info!("Admin {} deleted contact {}", admin.id, id);
        Ok(())
    }

    /// Assign `position = index` following the given order
    pub async fn reorder_contacts(
        &self,
        user: Option<&CurrentUser>,
        ordered_ids: Option<Vec<String>>,
    ) -> Result<(), ServiceError> {
        let admin = policy::require_admin(user)?;

        let ordered_ids = ordered_ids.unwrap_or_default();
        if ordered_ids.is_empty() {
            return Err(ServiceError::Validation("orderedIds must be a non-empty array".to_string()));
        }
        let ids = ordered_ids
            .iter()
            .map(|raw| {
                Uuid::parse_str(raw).map_err(|_| ServiceError::Validation(format!("Invalid contact id: {raw}")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let missing = self.store.reorder_contacts(&ids).await?;
        if !missing.is_empty() {
            tracing::warn!("Reorder skipped {} unknown contact id(s): {:?}", missing.len(), missing);
        }

        tracing::info!("Admin {} reordered {} contacts", admin.id, ids.len() - missing.len());
        Ok(())
    }

    async fn linked_user(&self, email: &str) -> Result<Option<Uuid>, ServiceError> {
        let users = self.store.find_users_by_emails(&[email.to_string()]).await?;
        Ok(users.first().map(|u| u.id))
    }

    /// Email addresses of every admin-level user
    pub async fn admin_emails(&self) -> Result<Vec<String>, ServiceError> {
        let users = self.store.find_users_by_levels(&policy::ADMIN_LEVELS).await?;
        Ok(users.into_iter().map(|u| u.email).collect())
    }
}

fn contact_not_found() -> ServiceError {
    ServiceError::NotFound("Contact not found".to_string())
}

fn parse_contact_id(raw: &str) -> Result<Uuid, ServiceError> {
    Uuid::parse_str(raw).map_err(|_| contact_not_found())
}
