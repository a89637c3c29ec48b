//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::{debug, error, info};

use crate::state::{ActionError, AppState, ClockFace};
use super::responses::{
    ClickRequest, ClockResponse, CycleRequest, DurationRequest, HealthResponse, PomodoroResponse,
    StatusResponse, WaterResponse,
};

/// Turn the outcome of a Pomodoro action into a response carrying the fresh snapshot
fn pomodoro_reply(
    state: &AppState,
    outcome: Result<String, ActionError>,
) -> Result<Json<PomodoroResponse>, StatusCode> {
    let (ok, message) = match outcome {
        Ok(message) => (true, message),
        Err(ActionError::Rejected(reason)) => {
            debug!("Pomodoro action ignored: {}", reason);
            (false, reason)
        }
        Err(ActionError::Internal(e)) => {
            error!("Pomodoro action failed: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let snapshot = state.pomodoro_snapshot().map_err(|e| {
        error!("Failed to get pomodoro state: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(if ok {
        PomodoroResponse::ok(message, snapshot)
    } else {
        PomodoroResponse::ignored(message, snapshot)
    }))
}

/// Handle GET /pomodoro - Current widget state
pub async fn pomodoro_handler(State(state): State<Arc<AppState>>) -> Result<Json<PomodoroResponse>, StatusCode> {
    pomodoro_reply(&state, Ok("Current pomodoro state".to_string()))
}

/// Handle PUT /pomodoro/duration - Raw minutes field text
pub async fn duration_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DurationRequest>,
) -> Result<Json<PomodoroResponse>, StatusCode> {
    let outcome = state.set_duration_input(&request.input).and_then(|accepted| {
        if accepted {
            Ok("Duration updated".to_string())
        } else {
            Err(ActionError::Rejected(format!("Invalid duration {:?}", request.input)))
        }
    });
    pomodoro_reply(&state, outcome)
}

/// Handle PUT /pomodoro/cycle - Select the cycle kind for the next start
pub async fn cycle_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CycleRequest>,
) -> Result<Json<PomodoroResponse>, StatusCode> {
    let outcome = state
        .select_cycle(request.cycle)
        .map(|()| format!("Selected {} cycle", request.cycle.label()));
    pomodoro_reply(&state, outcome)
}

/// Handle POST /pomodoro/start - Start the configured timer
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<PomodoroResponse>, StatusCode> {
    let outcome = state.start_pomodoro().map(|timer| {
        info!("Start endpoint called - {} cycle running", timer.cycle.label());
        format!(
            "Started {} cycle for {} minutes",
            timer.cycle.label(),
            timer.total_duration_seconds / 60
        )
    });
    pomodoro_reply(&state, outcome)
}

/// Handle POST /pomodoro/reset - Back to idle
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<PomodoroResponse>, StatusCode> {
    let outcome = state.reset_pomodoro().and_then(|changed| {
        if changed {
            Ok("Timer reset".to_string())
        } else {
            Err(ActionError::Rejected("No timer configured".to_string()))
        }
    });
    pomodoro_reply(&state, outcome)
}

/// Handle POST /pomodoro/suggestions/:index - Start a suggested next cycle
pub async fn suggestion_handler(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> Result<Json<PomodoroResponse>, StatusCode> {
    let outcome = state.accept_suggestion(index).map(|suggestion| {
        info!("Suggestion endpoint called - starting {}", suggestion.caption());
        format!("Started {}", suggestion.caption())
    });
    pomodoro_reply(&state, outcome)
}

/// Handle POST /pomodoro/alarm/stop - Silence the completion alarm
pub async fn stop_alarm_handler(State(state): State<Arc<AppState>>) -> Result<Json<PomodoroResponse>, StatusCode> {
    let outcome = state.stop_alarm().map(|()| "Alarm stopped".to_string());
    pomodoro_reply(&state, outcome)
}

/// Handle POST /pomodoro/display/open - Widget clicked
pub async fn open_display_handler(State(state): State<Arc<AppState>>) -> Result<Json<PomodoroResponse>, StatusCode> {
    let outcome = state.open_display().map(|()| "Display opened".to_string());
    pomodoro_reply(&state, outcome)
}

/// Handle POST /pomodoro/display/click - Click on the open display
pub async fn click_display_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ClickRequest>,
) -> Result<Json<PomodoroResponse>, StatusCode> {
    let outcome = state.click_display(request.target).and_then(|dismissed| {
        if dismissed {
            Ok("Display dismissed".to_string())
        } else {
            Err(ActionError::Rejected("Click did not dismiss the display".to_string()))
        }
    });
    pomodoro_reply(&state, outcome)
}

/// Handle POST /pomodoro/celebration/finish - Celebration effect played out
pub async fn finish_celebration_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PomodoroResponse>, StatusCode> {
    let outcome = state.finish_celebration().map(|()| "Celebration finished".to_string());
    pomodoro_reply(&state, outcome)
}

fn water_reply(state: &AppState, status: &str, message: String) -> Result<Json<WaterResponse>, StatusCode> {
    match state.water_snapshot() {
        Ok((reminder, cue_playing)) => Ok(Json(WaterResponse::new(status, message, reminder, cue_playing))),
        Err(e) => {
            error!("Failed to get water reminder: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /water - Water reminder state
pub async fn water_handler(State(state): State<Arc<AppState>>) -> Result<Json<WaterResponse>, StatusCode> {
    water_reply(&state, "ok", "Current water reminder".to_string())
}

/// Handle POST /water/acknowledge - Notification action pressed
pub async fn acknowledge_water_handler(State(state): State<Arc<AppState>>) -> Result<Json<WaterResponse>, StatusCode> {
    match state.acknowledge_water() {
        Ok(true) => {
            info!("Water reminder acknowledged");
            water_reply(&state, "ok", "Water reminder acknowledged".to_string())
        }
        Ok(false) => water_reply(&state, "ignored", "Water reminder is not showing".to_string()),
        Err(e) => {
            error!("Failed to acknowledge water reminder: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /clock - Local time and date
pub async fn clock_handler() -> Json<ClockResponse> {
    Json(ClockResponse {
        face: ClockFace::now(),
        timestamp: chrono::Utc::now(),
    })
}

/// Handle GET /status - Return current service status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let pomodoro = match state.pomodoro_snapshot() {
        Ok(p) => p,
        Err(e) => {
            error!("Failed to get pomodoro state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let water = match state.water_snapshot() {
        Ok((w, _)) => w,
        Err(e) => {
            error!("Failed to get water reminder: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        pomodoro,
        countdown_armed: state.countdown_armed(),
        water,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
