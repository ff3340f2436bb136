//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{config::TimerStyle, state::TimerState};

/// API response structure for intent endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerState,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, timer: TimerState) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            timer,
        }
    }

    /// Create a response for an intent that changed the timer
    pub fn accepted(message: String, timer: TimerState) -> Self {
        Self::new("accepted".to_string(), message, timer)
    }

    /// Create a response for an intent that was a no-op in the current state
    pub fn ignored(message: String, timer: TimerState) -> Self {
        Self::new("ignored".to_string(), message, timer)
    }
}

/// Full observation for the display's poll loop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerState,
    /// Remaining time rendered as MM:SS
    pub display: String,
    /// Sand animation progress in [0.11, 0.50]
    pub progress: f32,
    /// Visualization the display should run
    pub style: TimerStyle,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
