// handlers/contact/contacts.rs - /contact/contacts and /contact/contacts/:id

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::models::{AdminContact, ContactUpdate};
use crate::error::ApiResult;
use crate::handlers::ApiJson;
use crate::middleware::CurrentUser;
use crate::services::contact_service::ContactDraft;
use crate::services::ContactService;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    pub name: Option<String>,
    pub title: Option<String>,
    pub email: Option<String>,
    pub position: Option<i32>,
}

/// GET /contact/contacts - every contact, by position, with `avatarUrl`
pub async fn contact_list(State(state): State<AppState>) -> ApiResult<Json<Vec<AdminContact>>> {
    let contacts = ContactService::new(state.store).list_contacts().await?;
    Ok(Json(contacts))
}

/// POST /contact/contacts - admin only; `name`, `title`, `email` required
pub async fn contact_create(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
    ApiJson(body): ApiJson<ContactRequest>,
) -> ApiResult<(StatusCode, Json<AdminContact>)> {
    let draft = ContactDraft {
        name: body.name,
        title: body.title,
        email: body.email,
    };
    let contact = ContactService::new(state.store)
        .add_contact(user.as_deref(), draft)
        .await?;
    Ok((StatusCode::CREATED, Json(contact)))
}

/// PUT /contact/contacts/:id - admin only; partial update
pub async fn contact_update(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<ContactRequest>,
) -> ApiResult<Json<AdminContact>> {
    let changes = ContactUpdate {
        name: body.name,
        title: body.title,
        email: body.email,
        position: body.position,
        user: None,
    };
    let contact = ContactService::new(state.store)
        .update_contact(user.as_deref(), &id, changes)
        .await?;
    Ok(Json(contact))
}

/// DELETE /contact/contacts/:id - admin only
pub async fn contact_delete(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    ContactService::new(state.store)
        .delete_contact(user.as_deref(), &id)
        .await?;
    Ok(Json(json!({ "success": true, "message": "Contact deleted" })))
}
