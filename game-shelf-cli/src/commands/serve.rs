use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use game_shelf_web::{AppState, Templates, router};

use crate::CliError;

use super::{load_lookups, open_db};

/// Open the database, seed lookups and serve the web interface until Ctrl-C.
pub(crate) fn run_serve(
    db_path: &Path,
    lookups_path: Option<&Path>,
    host: &str,
    port: u16,
) -> Result<(), CliError> {
    let lookups = load_lookups(lookups_path)?;
    let conn = open_db(db_path)?;
    game_shelf_db::seed_lookups(&conn, &lookups)
        .map_err(|e| CliError::database(format!("Failed to seed lookup tables: {}", e)))?;

    let templates =
        Templates::new().map_err(|e| CliError::config(format!("Bad template: {}", e)))?;
    let app = router(AppState::new(conn, templates));

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::runtime(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        let addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| CliError::runtime(format!("Failed to bind {}: {}", addr, e)))?;

        log::info!(
            "{} Serving {} at http://{}",
            "\u{25B6}".if_supports_color(Stdout, |t| t.green()),
            db_path.display(),
            addr,
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| CliError::runtime(format!("HTTP server error: {}", e)))
    })?;

    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutting down");
}
