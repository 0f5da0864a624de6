//! HTTP transport: router, CORS and shared state.

pub mod articles;

use crate::error::AppError;
use crate::infra::DbPool;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

pub const WELCOME_MESSAGE: &str = "Welcome to Tutorial Site API";

/// State handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub pool: Arc<DbPool>,
}

impl AppState {
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WelcomeResp {
    pub message: &'static str,
}

/// Full application router: `/`, `/articles` and `/api/v1/articles`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(read_root))
        .merge(articles::routes("/articles"))
        .merge(articles::routes("/api/v1/articles"))
        .layer(cors_layer())
        .with_state(state)
}

/// Every origin, method and header allowed, credentials included.
///
/// Wildcards cannot be combined with credentials, so the request's own
/// values are mirrored back.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

async fn read_root() -> Json<WelcomeResp> {
    Json(WelcomeResp {
        message: WELCOME_MESSAGE,
    })
}

/// Run a store operation on the blocking pool.
pub(crate) async fn run_blocking<T, F>(state: &AppState, f: F) -> Result<T, AppError>
where
    F: FnOnce(&DbPool) -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    let pool = Arc::clone(&state.pool);
    tokio::task::spawn_blocking(move || f(&pool))
        .await
        .map_err(|e| AppError::Db(format!("store task failed: {}", e)))?
}
