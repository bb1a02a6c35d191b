//! Web page and JSON API serving the reservation view

use std::sync::Arc;

use axum::extract::State;
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::Router;

use crate::config::DisplayConfig;
use crate::render;
use crate::view::ReservationListView;

/// Dashboard application state
#[derive(Clone)]
pub struct DashboardState {
    pub view: Arc<ReservationListView>,
    pub display: Arc<DisplayConfig>,
}

/// Build the dashboard axum router
pub fn build_router(view: Arc<ReservationListView>, display: DisplayConfig) -> Router {
    let dashboard_state = DashboardState {
        view,
        display: Arc::new(display),
    };

    Router::new()
        .route("/", get(index_handler))
        .route("/api/reservations", get(reservations_handler))
        .route("/health", get(health_handler))
        .with_state(dashboard_state)
}

async fn index_handler(State(dashboard): State<DashboardState>) -> impl IntoResponse {
    let fragment = dashboard.view.render(&dashboard.display).await;
    Html(render::render_page(&fragment))
}

async fn reservations_handler(State(dashboard): State<DashboardState>) -> impl IntoResponse {
    let state = dashboard.view.read().await;

    axum::Json(serde_json::json!({
        "phase": state.phase(),
        "reservations": state.reservations(),
        "error": state.error(),
    }))
}

async fn health_handler() -> impl IntoResponse {
    "OK"
}
