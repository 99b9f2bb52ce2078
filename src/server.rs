use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware::from_fn_with_state,
    routing::{get, put},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{AppConfig, Environment};
use crate::database::{DatabaseManager, MemoryStore, PgStore, Store};
use crate::handlers::{contact, profile, public};
use crate::middleware::{current_user_middleware, jwt_auth_middleware};
use crate::state::AppState;

/// Full application router
pub fn app(state: AppState) -> Router {
    // Every route here sees the JWT layer first, then the current-user layer
    let protected = Router::new()
        .merge(profile_routes())
        .merge(contact_routes())
        .layer(from_fn_with_state(state.clone(), current_user_middleware))
        .layer(from_fn_with_state(state.clone(), jwt_auth_middleware));

    let mut router = Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        .merge(protected)
        .layer(DefaultBodyLimit::max(state.config.api.max_request_size_bytes));

    if state.config.security.enable_cors {
        router = router.layer(cors_layer(&state.config));
    }
    if state.config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router.with_state(state)
}

fn profile_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/profile/favorites",
            get(profile::favorite_list)
                .post(profile::favorite_add)
                .delete(profile::favorite_remove),
        )
        .route("/profile/:id", put(profile::profile_update))
}

fn contact_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/contact/contacts",
            get(contact::contact_list).post(contact::contact_create),
        )
        // Static segment wins over `:id`
        .route(
            "/contact/contacts/reorder",
            put(contact::contacts_reorder).post(contact::contacts_reorder),
        )
        .route(
            "/contact/contacts/:id",
            put(contact::contact_update).delete(contact::contact_delete),
        )
        .route("/contact/admin-emails", get(contact::admin_emails_get))
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    if config.environment == Environment::Development {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Pick the store for this process: Postgres when DATABASE_URL is set,
/// in-memory only for development runs without one.
pub async fn build_store(config: &AppConfig) -> anyhow::Result<Arc<dyn Store>> {
    if config.database.url.is_empty() {
        if config.environment != Environment::Development {
            anyhow::bail!("DATABASE_URL is required outside development");
        }
        tracing::warn!("DATABASE_URL not set; using in-memory store (data is lost on exit)");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to database")?;
    if config.database.auto_migrate {
        DatabaseManager::ensure_schema(&pool)
            .await
            .context("failed to apply database schema")?;
    }
    Ok(Arc::new(PgStore::new(pool)))
}

/// Bind, serve until Ctrl-C, then drain
pub async fn serve(config: AppConfig) -> anyhow::Result<()> {
    if config.security.jwt_secret.is_empty() {
        anyhow::bail!("JWT_SECRET must be set");
    }

    let store = build_store(&config).await?;
    let bind_addr = config.bind_addr();
    tracing::info!("Starting Roster API in {:?} mode", config.environment);

    let app = app(AppState::new(store, config));
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;

    tracing::info!("Roster API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutdown signal received");
        })
        .await
        .context("server error")
}

/// Install the global tracing subscriber. `RUST_LOG` wins over the defaults.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let default_filter = if crate::is_development!() {
        "info,roster_api_rust=debug,tower_http=debug"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
