// Secret gift exchange entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config
// 3. Create the game session
// 4. Create mpsc channels
// 5. Spawn app logic task
// 6. Run the TUI until the exit is confirmed
// 7. Cleanup on exit

use secret_gift::app;
use secret_gift::config;
use secret_gift::game::GameSession;
use secret_gift::tui;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing (log to file, not terminal)
    init_tracing()?;
    info!("Secret gift exchange starting up");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: title={:?}, frame interval {}ms",
        config.game.title, config.display.frame_interval_ms
    );

    // 3. Create the game session
    let session = match config.game.seed {
        Some(seed) => {
            warn!("Using fixed shuffle seed {}; draws are reproducible", seed);
            GameSession::seeded(seed)
        }
        None => GameSession::from_entropy(),
    };
    let app_state = app::AppState::new(session);

    // 4. Create mpsc channels
    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (ui_tx, ui_rx) = mpsc::channel(64);

    // 5. Spawn app logic task
    let app_handle = tokio::spawn(async move {
        if let Err(e) = app::run(cmd_rx, ui_tx, app_state).await {
            error!("Application loop error: {}", e);
        }
    });

    // 6. Run the TUI (blocks until the operator confirms exit)
    let view_state = tui::ViewState::new(config.game.title.clone(), config.exit.confirmation.clone());
    let tui_result = tui::run(ui_rx, cmd_tx, view_state, config.display.frame_interval()).await;
    if let Err(e) = &tui_result {
        error!("TUI error: {}", e);
    }

    // 7. Cleanup: the command channel is closed now, so the app task winds down
    let _ = tokio::time::timeout(std::time::Duration::from_secs(2), app_handle).await;

    info!("Secret gift exchange shut down");
    tui_result
}

/// Initialize tracing to log to a file (not the terminal, which is used by the TUI).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("secret-gift.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("secret_gift=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
