#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use roster_api_rust::auth::{generate_jwt, Claims};
use roster_api_rust::config::AppConfig;
use roster_api_rust::database::models::User;
use roster_api_rust::database::MemoryStore;
use roster_api_rust::{app, AppState};

pub const SECRET: &str = "integration-test-secret";

/// Router over a fresh in-memory store, seeded with one admin and one member
pub struct TestApp {
    pub router: Router,
    pub store: MemoryStore,
    pub admin: User,
    pub member: User,
}

impl TestApp {
    pub async fn new() -> Self {
        let store = MemoryStore::new();

        let admin = User::new("Ada Admin", "ada@example.com", 2).with_avatar("https://cdn.example.com/ada.png");
        let member = User::new("Mo Member", "mo@example.com", 1);
        store.insert_user(admin.clone()).await;
        store.insert_user(member.clone()).await;

        let mut config = AppConfig::development();
        config.security.jwt_secret = SECRET.to_string();
        config.api.enable_request_logging = false;

        let router = app(AppState::new(Arc::new(store.clone()), config));

        Self {
            router,
            store,
            admin,
            member,
        }
    }

    pub fn token_for(&self, user: &User) -> String {
        let claims = Claims::new(user.id, user.email.clone(), 1);
        generate_jwt(&claims, SECRET).expect("token")
    }

    pub fn admin_token(&self) -> String {
        self.token_for(&self.admin)
    }

    pub fn member_token(&self) -> String {
        self.token_for(&self.member)
    }

    /// Send a request through the router and decode the JSON body (Null when empty)
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Result<(StatusCode, Value)> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&json)?))?,
            None => builder.body(Body::empty())?,
        };

        let response = self.router.clone().oneshot(request).await.context("router call failed")?;
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).context("response body is not JSON")?
        };
        Ok((status, json))
    }

    /// Send a raw, possibly malformed, JSON body
    pub async fn send_raw(&self, method: Method, uri: &str, token: &str, body: &str) -> Result<(StatusCode, Value)> {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))?;

        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        Ok((status, serde_json::from_slice(&bytes)?))
    }
}
