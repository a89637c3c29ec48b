//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/pomodoro", get(pomodoro_handler))
        .route("/pomodoro/duration", put(duration_handler))
        .route("/pomodoro/cycle", put(cycle_handler))
        .route("/pomodoro/start", post(start_handler))
        .route("/pomodoro/reset", post(reset_handler))
        .route("/pomodoro/suggestions/:index", post(suggestion_handler))
        .route("/pomodoro/alarm/stop", post(stop_alarm_handler))
        .route("/pomodoro/display/open", post(open_display_handler))
        .route("/pomodoro/display/click", post(click_display_handler))
        .route("/pomodoro/celebration/finish", post(finish_celebration_handler))
        .route("/water", get(water_handler))
        .route("/water/acknowledge", post(acknowledge_water_handler))
        .route("/clock", get(clock_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
