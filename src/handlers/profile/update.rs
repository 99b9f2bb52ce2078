// handlers/profile/update.rs - PUT /profile/:id

use axum::{
    extract::{Extension, Path, State},
    response::Json,
};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::database::models::{ProfileUpdate, User};
use crate::error::ApiResult;
use crate::handlers::ApiJson;
use crate::middleware::CurrentUser;
use crate::services::ProfileService;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRequest {
    pub user_name: Option<String>,
    pub email: Option<String>,
    /// Absent keeps the bio, `null` clears it
    #[serde(default, deserialize_with = "present")]
    pub bio: Option<Option<String>>,
    pub preferences: Option<Value>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl From<ProfileRequest> for ProfileUpdate {
    fn from(req: ProfileRequest) -> Self {
        Self {
            user_name: req.user_name,
            email: req.email,
            bio: req.bio,
            preferences: req.preferences,
        }
    }
}

/// PUT /profile/:id - owner-only partial profile update
pub async fn profile_update(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<ProfileRequest>,
) -> ApiResult<Json<User>> {
    let updated = ProfileService::new(state.store)
        .update_profile(&user, &id, body.into())
        .await?;
    Ok(Json(updated))
}
