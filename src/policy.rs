//! Authorization predicates shared by every handler.

use uuid::Uuid;

use crate::middleware::CurrentUser;
use crate::services::ServiceError;

/// Role levels with admin rights
pub const ADMIN_LEVELS: [i32; 2] = [2, 3];

pub const NOT_ADMIN: &str = "Forbidden, not an admin";

pub fn is_admin(user_level_id: i32) -> bool {
    ADMIN_LEVELS.contains(&user_level_id)
}

pub fn owns(user: &CurrentUser, target_id: Uuid) -> bool {
    user.id == target_id
}

/// Gate for admin-only mutations: no caller is 401, a non-admin caller is 403.
pub fn require_admin(user: Option<&CurrentUser>) -> Result<&CurrentUser, ServiceError> {
    let user = user.ok_or_else(|| ServiceError::Unauthorized("Unauthorized".to_string()))?;
    if !is_admin(user.user_level_id) {
        tracing::warn!("Admin check failed for user {} (level {})", user.id, user.user_level_id);
        return Err(ServiceError::Forbidden(NOT_ADMIN.to_string()));
    }
    Ok(user)
}
