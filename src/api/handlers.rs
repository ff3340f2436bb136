//! HTTP endpoint handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Json};
use tracing::{error, info};

use crate::state::AppState;

use super::responses::{ApiResponse, HealthResponse, StatusResponse};

/// Handle POST /increase - Add one minute to the duration
pub async fn increase_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.increase_duration() {
        Ok((timer, true)) => {
            info!("Increase endpoint called - duration now {}", timer.display());
            Ok(Json(ApiResponse::accepted(
                format!("Duration increased to {}", timer.display()),
                timer,
            )))
        }
        Ok((timer, false)) => Ok(Json(ApiResponse::ignored(
            "Duration unchanged (countdown running or already at one hour)".to_string(),
            timer,
        ))),
        Err(e) => {
            error!("Failed to increase duration: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /decrease - Remove one minute from the duration
pub async fn decrease_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.decrease_duration() {
        Ok((timer, true)) => {
            info!("Decrease endpoint called - duration now {}", timer.display());
            Ok(Json(ApiResponse::accepted(
                format!("Duration decreased to {}", timer.display()),
                timer,
            )))
        }
        Ok((timer, false)) => Ok(Json(ApiResponse::ignored(
            "Duration unchanged (countdown running or already at zero)".to_string(),
            timer,
        ))),
        Err(e) => {
            error!("Failed to decrease duration: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /start - Start the countdown
pub async fn start_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.start() {
        Ok((timer, true)) => {
            info!(
                "Start endpoint called - counting down from {}",
                timer.display()
            );
            Ok(Json(ApiResponse::accepted(
                format!("Countdown started at {}", timer.display()),
                timer,
            )))
        }
        Ok((timer, false)) => Ok(Json(ApiResponse::ignored(
            "Start ignored (no duration set or already running)".to_string(),
            timer,
        ))),
        Err(e) => {
            error!("Failed to start countdown: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /cancel - Cancel the running countdown
pub async fn cancel_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.cancel() {
        Ok((timer, true)) => {
            info!(
                "Cancel endpoint called - {} left on the clock",
                timer.display()
            );
            Ok(Json(ApiResponse::accepted(
                format!("Countdown cancelled with {} remaining", timer.display()),
                timer,
            )))
        }
        Ok((timer, false)) => Ok(Json(ApiResponse::ignored(
            "Cancel ignored (no countdown running)".to_string(),
            timer,
        ))),
        Err(e) => {
            error!("Failed to cancel countdown: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /tap - Tap on the running screen (double tap dismisses)
pub async fn tap_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.tap() {
        Ok((timer, true)) => {
            if timer.running {
                Ok(Json(ApiResponse::accepted(
                    "Tap registered, tap again to dismiss".to_string(),
                    timer,
                )))
            } else {
                info!("Tap endpoint called - running screen dismissed");
                Ok(Json(ApiResponse::accepted(
                    "Running screen dismissed".to_string(),
                    timer,
                )))
            }
        }
        Ok((timer, false)) => Ok(Json(ApiResponse::ignored(
            "Tap ignored (no countdown running)".to_string(),
            timer,
        ))),
        Err(e) => {
            error!("Failed to register tap: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /status - Return the full timer observation
pub async fn status_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatusResponse>, StatusCode> {
    let timer = match state.timer() {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to get timer state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.last_action();

    Ok(Json(StatusResponse {
        display: timer.display(),
        progress: timer.progress(),
        timer,
        style: state.style,
        uptime: state.uptime(),
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
