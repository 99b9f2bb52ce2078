// handlers/contact/reorder.rs - PUT|POST /contact/contacts/reorder

use axum::{
    extract::{Extension, State},
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiResult;
use crate::handlers::ApiJson;
use crate::middleware::CurrentUser;
use crate::services::ContactService;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderRequest {
    pub ordered_ids: Option<Vec<String>>,
}

/// Body: `{"orderedIds": ["<id>", ...]}`; each contact gets its index as position
pub async fn contacts_reorder(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
    ApiJson(body): ApiJson<ReorderRequest>,
) -> ApiResult<Json<Value>> {
    ContactService::new(state.store)
        .reorder_contacts(user.as_deref(), body.ordered_ids)
        .await?;
    Ok(Json(json!({ "message": "Contacts reordered" })))
}
