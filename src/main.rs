//! Hourglass - a state-managed HTTP service driving a sand-timer countdown
//!
//! This is the main entry point for the hourglass application.

use std::{sync::Arc, time::Duration};

use tokio::net::TcpListener;
use tracing::info;

use hourglass::{
    api::create_router, config::Config, state::AppState, tasks::countdown_tick_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "hourglass={},tower_http=info",
            config.log_level()
        ))
        .init();

    info!("Starting hourglass server v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: host={}, port={}, tick={}ms, style={:?}",
        config.host, config.port, config.tick_millis, config.style
    );

    // Create application state
    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        config.style,
        Duration::from_millis(config.tick_millis),
    ));

    // Start the countdown tick driver
    let driver_state = Arc::clone(&state);
    tokio::spawn(async move {
        countdown_tick_task(driver_state).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /increase - add one minute to the duration");
    info!("  POST /decrease - remove one minute from the duration");
    info!("  POST /start    - start the countdown");
    info!("  POST /cancel   - cancel the countdown");
    info!("  POST /tap      - tap the running screen (double tap dismisses)");
    info!("  GET  /status   - timer state, display text and animation progress");
    info!("  GET  /health   - health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
