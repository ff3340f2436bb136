//! Hourglass - a state-managed HTTP service driving a sand-timer countdown
//!
//! The countdown engine lives in [`state::timer_state`]; everything else is
//! the plumbing that feeds it: an HTTP intent surface for the wearable
//! display, a background tick driver, and CLI configuration.

pub mod api;
pub mod config;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use state::AppState;
pub use utils::signals::shutdown_signal;
