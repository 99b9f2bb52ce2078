// handlers/profile/favorites.rs - /profile/favorites

use axum::{
    extract::{Extension, State},
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::models::Favorite;
use crate::error::ApiResult;
use crate::handlers::ApiJson;
use crate::middleware::CurrentUser;
use crate::services::ProfileService;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteRequest {
    pub item_id: Option<String>,
    pub item_type: Option<String>,
}

/// GET /profile/favorites
pub async fn favorite_list(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<Favorite>>> {
    let favorites = ProfileService::new(state.store).list_favorites(&user).await?;
    Ok(Json(favorites))
}

/// POST /profile/favorites - `{"itemId": "...", "itemType": "..."}`
pub async fn favorite_add(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ApiJson(body): ApiJson<FavoriteRequest>,
) -> ApiResult<Json<Favorite>> {
    let favorite = ProfileService::new(state.store)
        .add_favorite(&user, body.item_id.as_deref(), body.item_type.as_deref())
        .await?;
    Ok(Json(favorite))
}

/// DELETE /profile/favorites - same body as POST. A missing or unreadable
/// body matches nothing and ends up as 404.
pub async fn favorite_remove(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    body: Option<ApiJson<FavoriteRequest>>,
) -> ApiResult<Json<Value>> {
    let body = body.map(|ApiJson(body)| body).unwrap_or_default();
    ProfileService::new(state.store)
        .remove_favorite(&user, body.item_id.as_deref(), body.item_type.as_deref())
        .await?;
    Ok(Json(json!({ "message": "Favorite removed" })))
}
