// League table editor entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config and seed the league
// 3. Create mpsc channels
// 4. Spawn the app task
// 5. Run the TUI until the user quits
// 6. Optionally print the final table as JSON

use std::time::Duration;

use matchgrid_tui::app;
use matchgrid_tui::config;
use matchgrid_tui::tui;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{error, info};

/// Print the final table to stdout after the terminal is restored.
const PRINT_JSON_FLAG: &str = "--print-json";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let print_json = std::env::args().skip(1).any(|arg| arg == PRINT_JSON_FLAG);

    // 1. Initialize tracing
    init_tracing()?;
    info!("matchgrid starting up");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: title={:?}, {} players, {} seeded results",
        config.league.title,
        config.league.players.len(),
        config.league.results.len()
    );
    let render_interval = Duration::from_millis(config.ui.render_interval_ms);

    let app_state = app::AppState::new(config).context("failed to seed league")?;

    // 3. Create mpsc channels
    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (ui_tx, ui_rx) = mpsc::channel(256);

    // 4. Spawn app task
    let app_handle = tokio::spawn(app::run(cmd_rx, ui_tx, app_state));

    // 5. Run the TUI event loop (blocks until the user quits)
    if let Err(e) = tui::run(ui_rx, cmd_tx, render_interval).await {
        error!("TUI error: {}", e);
    }

    // 6. Wait for the app task to hand back the final state
    let final_state = match tokio::time::timeout(Duration::from_secs(5), app_handle).await {
        Ok(Ok(Ok(state))) => Some(state),
        Ok(Ok(Err(e))) => {
            error!("Application loop error: {}", e);
            None
        }
        Ok(Err(e)) => {
            error!("Application task panicked: {}", e);
            None
        }
        Err(_) => {
            error!("Application task did not stop in time");
            None
        }
    };

    if print_json {
        if let Some(state) = final_state {
            let json = serde_json::to_string_pretty(&state.league.export())
                .context("failed to serialize league")?;
            println!("{json}");
        }
    }

    info!("matchgrid shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (not the terminal, which is used by the TUI).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("matchgrid.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("matchgrid=info,matchgrid_tui=info,matchgrid_core=info,warn")
        }))
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
