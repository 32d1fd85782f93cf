// Draft room companion entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config
// 3. Open database, resolve the draft id, replay saved picks
// 4. Load the player pool
// 5. Bind the feed listener
// 6. Spawn the app loop
// 7. Run the TUI until the user quits
// 8. Cleanup on exit

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{error, info};

use draftroom_core::config;
use draftroom_core::db::Database;
use draftroom_core::feed::ws_server;
use draftroom_core::players;
use draftroom_tui::app;
use draftroom_tui::tui;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;
    info!("draftroom starting up");

    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: draft={}, {} rounds, {:?} order",
        config.draft.name, config.draft.total_rounds, config.draft.order
    );

    let db = Database::open(&config.db_path).context("failed to open database")?;
    let draft_id = db
        .get_or_create_draft_id()
        .context("failed to resolve draft id")?;
    info!("Database opened at {} (draft_id={})", config.db_path, draft_id);

    let pool = players::load_players_or_empty(Path::new(&config.data_paths.players))
        .context("failed to load player projections")?;
    info!("Loaded {} projected players", pool.len());

    let card_width = config.display.card_width;
    let card_gap = config.display.card_gap;
    let ws_port = config.ws_port;

    let mut app_state = app::AppState::new(config, pool, db, draft_id);
    match app::recover_from_db(&mut app_state) {
        Ok(true) => info!("Draft state restored from previous session"),
        Ok(false) => info!("Starting fresh draft session"),
        Err(e) => {
            error!("Crash recovery failed: {:#}", e);
            return Err(e.context("crash recovery failed"));
        }
    }

    let (feed_rx, ws_handle) = ws_server::spawn(ws_port)
        .await
        .with_context(|| format!("failed to bind feed listener on port {ws_port}"))?;
    info!("Feed listener ready on 127.0.0.1:{}", ws_port);

    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (ui_tx, ui_rx) = mpsc::channel(256);

    let app_handle = tokio::spawn(async move {
        if let Err(e) = app::run(feed_rx, cmd_rx, ui_tx, app_state).await {
            error!("Application loop error: {:#}", e);
        }
    });

    let view_state = tui::ViewState::new(card_width, card_gap);
    if let Err(e) = tui::run(ui_rx, cmd_tx, view_state).await {
        error!("TUI error: {:#}", e);
    }

    // The app loop exits once the TUI drops the command channel.
    let _ = tokio::time::timeout(Duration::from_secs(5), app_handle).await;

    // The listener loops on accept forever.
    ws_handle.abort();

    info!("draftroom shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (the terminal belongs to the TUI).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let cwd = std::env::current_dir()?;
    let log_dir = config::log_dir(&cwd).context("no writable log directory")?;
    let log_file = std::fs::File::create(log_dir.join("draftroom.log"))
        .context("failed to create log file")?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("draftroom=info,warn")),
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
