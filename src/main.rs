//! Pomodesk - desk widgets served over HTTP
//!
//! This is the main entry point for the pomodesk application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use pomodesk::{
    config::Config,
    state::AppState,
    api::create_router,
    services::check_player_available,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("pomodesk={},tower_http=info", config.log_level()))
        .init();

    info!("Starting pomodesk server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, audio_dir={}, water_interval={}min",
          config.host, config.port, config.audio_dir.display(), config.water_interval);

    // Sound is best effort, a missing player only silences the alarms
    if !config.no_sound {
        if let Err(e) = check_player_available(&config.player).await {
            warn!("{}", e);
        }
    }

    // Create application state
    let state = Arc::new(AppState::new(&config));

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /pomodoro                      - Pomodoro state");
    info!("  PUT  /pomodoro/duration             - Set minutes");
    info!("  PUT  /pomodoro/cycle                - Select cycle");
    info!("  POST /pomodoro/start                - Start timer");
    info!("  POST /pomodoro/reset                - Reset timer");
    info!("  POST /pomodoro/suggestions/:index   - Start a suggested cycle");
    info!("  POST /pomodoro/alarm/stop           - Stop the alarm");
    info!("  POST /pomodoro/display/open         - Open the display");
    info!("  POST /pomodoro/display/click        - Click the display");
    info!("  POST /pomodoro/celebration/finish   - End the celebration");
    info!("  GET  /water                         - Water reminder");
    info!("  POST /water/acknowledge             - Acknowledge water reminder");
    info!("  GET  /clock                         - Time and date");
    info!("  GET  /status                        - Service status");
    info!("  GET  /health                        - Health check");

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
