use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use super::auth::AuthUser;
use crate::database::models::User;
use crate::error::ApiError;
use crate::state::AppState;

/// The caller, as currently stored. Role level is read from the store on every
/// request so demotions take effect without reissuing tokens.
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
    pub user_level_id: i32,
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            user_level_id: user.user_level_id,
        }
    }
}

/// Middleware that resolves the JWT subject to a stored user.
/// Must run after `jwt_auth_middleware`.
pub async fn current_user_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_user = request
        .extensions()
        .get::<AuthUser>()
        .cloned()
        .ok_or_else(|| ApiError::unauthorized("Unauthorized, no token"))?;

    let user = state.store.find_user(auth_user.user_id).await?.ok_or_else(|| {
        tracing::warn!("Token subject {} ({}) no longer exists", auth_user.user_id, auth_user.email);
        ApiError::unauthorized("Unauthorized, user not found")
    })?;

    tracing::debug!("Request by user {} (level {})", user.id, user.user_level_id);
    request.extensions_mut().insert(CurrentUser::from(&user));

    Ok(next.run(request).await)
}
