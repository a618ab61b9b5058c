// Billionaire Dashboard - Web Server
// Serves the precomputed dashboard page and its chart data with Axum

use crate::charts::Dashboard;
use crate::error::Result;
use crate::page::render_page;
use axum::{
    extract::State,
    response::{Html, IntoResponse, Json},
    routing::get,
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared application state. Everything is computed before the server
/// starts, so handlers only read.
#[derive(Clone)]
pub struct AppState {
    dashboard: Arc<Dashboard>,
    page: Arc<String>,
}

impl AppState {
    /// Render the page once up front; a chart that cannot be drawn fails here.
    pub fn new(dashboard: Dashboard) -> Result<Self> {
        let page = render_page(&dashboard)?;
        Ok(Self {
            dashboard: Arc::new(dashboard),
            page: Arc::new(page),
        })
    }
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: T,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/charts - The four chart models behind the page
async fn get_charts(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(state.dashboard.as_ref().clone()))
}

/// GET / - Dashboard page
async fn serve_index(State(state): State<AppState>) -> impl IntoResponse {
    Html(state.page.as_ref().clone())
}

// ============================================================================
// Router / Server
// ============================================================================

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/charts", get(get_charts))
        .with_state(state.clone());

    Router::new()
        .route("/", get(serve_index))
        .with_state(state)
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Bind `addr` and serve the dashboard until the process is stopped.
pub async fn serve(addr: &str, state: AppState) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(addr = %listener.local_addr()?, "dashboard listening");
    axum::serve(listener, app).await
}
