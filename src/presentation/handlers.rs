// HTTP request handlers
use crate::domain::card::{DashboardView, LocationCard};
use crate::presentation::app_state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct CongestionResponse {
    pub last_updated: String,
    pub locations: Vec<LocationCard>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Render the dashboard page from the current view
pub async fn index(State(state): State<Arc<AppState>>) -> Response {
    let view = state.dashboard.view();
    let refresh_secs = state.dashboard.refresh_interval().as_secs();

    match &*view {
        DashboardView::Ready(snapshot) => {
            let cards = state.dashboard.cards(snapshot).await;
            match state
                .renderer
                .dashboard(&cards, &snapshot.last_updated, refresh_secs)
            {
                Ok(html) => Html(html).into_response(),
                Err(e) => {
                    tracing::error!("failed to render dashboard: {e}");
                    StatusCode::INTERNAL_SERVER_ERROR.into_response()
                }
            }
        }
        DashboardView::Failed { error, at } => {
            match state.renderer.failure(error, at, refresh_secs) {
                Ok(html) => (StatusCode::BAD_GATEWAY, Html(html)).into_response(),
                Err(e) => {
                    tracing::error!("failed to render error page: {e}");
                    StatusCode::BAD_GATEWAY.into_response()
                }
            }
        }
    }
}

/// Current cards as JSON
pub async fn congestion(State(state): State<Arc<AppState>>) -> Response {
    let view = state.dashboard.view();

    match &*view {
        DashboardView::Ready(snapshot) => Json(CongestionResponse {
            last_updated: snapshot.last_updated.clone(),
            locations: state.dashboard.cards(snapshot).await,
        })
        .into_response(),
        DashboardView::Failed { error, at } => (
            StatusCode::BAD_GATEWAY,
            Json(json!({ "error": error, "at": at })),
        )
            .into_response(),
    }
}
