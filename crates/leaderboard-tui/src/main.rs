// Leaderboard dashboard entry point.
//
// Startup sequence:
// 1. Load config
// 2. Initialize tracing (log to file, not terminal)
// 3. Build the backend client
// 4. Create mpsc channels and the application state
// 5. Spawn the orchestrator task
// 6. Run the TUI until the user quits
// 7. Cleanup on exit

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use leaderboard_core::api::HttpBackend;
use leaderboard_core::app;
use leaderboard_core::config;
use leaderboard_tui::tui;
use tokio::sync::mpsc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load config. Failures go to stderr; the terminal is still ours.
    let config = config::load_config().context("failed to load configuration")?;

    // 2. Initialize tracing
    init_tracing(&config.logging.filter)?;
    info!("Leaderboard dashboard starting up");
    info!(
        "Config loaded: backend={}, marker={:?}, host={:?}",
        config.api.base_url,
        config.competition.your_article_marker,
        config.competition.host_author
    );

    // 3. Backend client
    let api = Arc::new(HttpBackend::new(config.api.base_url.clone()));

    // 4. Channels and state
    let (task_tx, task_rx) = mpsc::channel(64);
    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (ui_tx, ui_rx) = mpsc::channel(256);

    let title = config.competition.title.clone();
    let app_state = app::AppState::new(config, api, task_tx);

    // 5. Orchestrator
    let app_handle = tokio::spawn(async move {
        if let Err(e) = app::run(cmd_rx, task_rx, ui_tx, app_state).await {
            error!("Application loop error: {}", e);
        }
    });

    // 6. TUI; blocks until 'q' or Ctrl+C.
    if let Err(e) = tui::run(ui_rx, cmd_tx, title).await {
        error!("TUI error: {}", e);
    }

    // 7. Cleanup: give the orchestrator a moment to wind down. In-flight
    //    requests are abandoned with the runtime.
    let _ = tokio::time::timeout(Duration::from_secs(2), app_handle).await;

    info!("Leaderboard dashboard shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (not the terminal, which is used by the TUI).
fn init_tracing(default_filter: &str) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir).context("failed to create log directory")?;

    let log_file = std::fs::File::create(log_dir.join("leaderboard.log"))
        .context("failed to create log file")?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
