// handlers/mod.rs - HTTP handlers grouped by route prefix
//
// public   → no authentication (/, /health)
// profile  → JWT + current user (/profile/*)
// contact  → JWT + current user, admin checks inside (/contact/*)

pub mod contact;
pub mod profile;
pub mod public;

use axum::extract::FromRequest;

use crate::error::ApiError;

/// `Json` extractor whose rejections render as `{"message": ...}` 400s
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
