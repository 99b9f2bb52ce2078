// handlers/contact/admin_emails.rs - GET /contact/admin-emails

use axum::{extract::State, response::Json};

use crate::error::ApiResult;
use crate::services::ContactService;
use crate::state::AppState;

pub async fn admin_emails_get(State(state): State<AppState>) -> ApiResult<Json<Vec<String>>> {
    let emails = ContactService::new(state.store).admin_emails().await?;
    Ok(Json(emails))
}
