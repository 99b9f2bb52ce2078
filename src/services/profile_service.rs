use std::sync::Arc;

use serde_json::Value;
use uuid::Uuid;

use super::{optional_text, required_text, ServiceError};
use crate::database::models::{Favorite, ProfileUpdate, User};
use crate::database::Store;
use crate::middleware::CurrentUser;
use crate::policy;

pub struct ProfileService {
    store: Arc<dyn Store>,
}

impl ProfileService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn list_favorites(&self, user: &CurrentUser) -> Result<Vec<Favorite>, ServiceError> {
        Ok(self.store.list_favorites(user.id).await?)
    }

    /// Append a favorite stamped with the current time
    pub async fn add_favorite(
        &self,
        user: &CurrentUser,
        item_id: Option<&str>,
        item_type: Option<&str>,
    ) -> Result<Favorite, ServiceError> {
        let (Some(item_id), Some(item_type)) = (required_text(item_id), required_text(item_type)) else {
            return Err(ServiceError::Validation("itemId and itemType are required".to_string()));
        };

        let favorite = Favorite::new(item_id, item_type);
        self.store.add_favorite(user.id, &favorite).await?;

        tracing::info!("User {} favorited {} {}", user.id, favorite.item_type, favorite.item_id);
        Ok(favorite)
    }

    /// Remove one matching favorite. Missing fields never match anything.
    pub async fn remove_favorite(
        &self,
        user: &CurrentUser,
        item_id: Option<&str>,
        item_type: Option<&str>,
    ) -> Result<(), ServiceError> {
        let not_found = || ServiceError::NotFound("Favorite not found".to_string());
        let (Some(item_id), Some(item_type)) = (item_id, item_type) else {
            return Err(not_found());
        };

        if !self.store.remove_favorite(user.id, item_id, item_type).await? {
            return Err(not_found());
        }
        Ok(())
    }

    pub async fn update_profile(
        &self,
        user: &CurrentUser,
        target_id: &str,
        changes: ProfileUpdate,
    ) -> Result<User, ServiceError> {
        // An id that does not parse can never be the caller's own
        let Some(target_id) = Uuid::parse_str(target_id).ok().filter(|id| policy::owns(user, *id)) else {
            tracing::warn!("User {} tried to update profile {}", user.id, target_id);
            return Err(ServiceError::Forbidden(
                "Forbidden, you can only update your own profile".to_string(),
            ));
        };

        let update = validate_profile(changes)?;

        self.store
            .update_profile(target_id, &update)
            .await?
            .ok_or_else(|| ServiceError::NotFound("User not found".to_string()))
    }
}

fn validate_profile(changes: ProfileUpdate) -> Result<ProfileUpdate, ServiceError> {
    let email = optional_text(changes.email, "email")?;
    if let Some(email) = &email {
        if !email.contains('@') {
            return Err(ServiceError::Validation("email must be a valid address".to_string()));
        }
    }
    if let Some(preferences) = &changes.preferences {
        if !matches!(preferences, Value::Object(_)) {
            return Err(ServiceError::Validation("preferences must be an object".to_string()));
        }
    }

    Ok(ProfileUpdate {
        user_name: optional_text(changes.user_name, "userName")?,
        email,
        bio: changes.bio,
        preferences: changes.preferences,
    })
}
