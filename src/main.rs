//! Reaction Nano - A reaction-time mini-game served over HTTP
//!
//! This is the main entry point for the reaction-nano server.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use reaction_nano::{
    api::create_router,
    config::Config,
    state::AppState,
    tasks::delay_timer_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("reaction_nano={},tower_http=info", config.log_level()))
        .init();

    config.validate()?;

    info!("Starting reaction-nano server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, delay={}..{}ms, page={}",
          config.host, config.port, config.min_delay_ms, config.max_delay_ms, config.page_url());

    // Create the game session
    let (state, fired_rx) = AppState::new(
        config.port,
        config.host.clone(),
        config.delay_range()?,
        config.share_target(),
    );
    let state = Arc::new(state);

    // Start the delay timer background task
    let timer_state = Arc::clone(&state);
    tokio::spawn(async move {
        delay_timer_task(timer_state, fired_rx).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /        - Game page");
    info!("  POST /start   - Start a round");
    info!("  POST /click   - Click on the play surface");
    info!("  POST /retry   - Back to instructions");
    info!("  POST /share   - Build a share intent for the result");
    info!("  GET  /status  - Current game and session status");
    info!("  GET  /events  - View updates (Server-Sent Events)");
    info!("  GET  /health  - Health check");

    // Setup graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
