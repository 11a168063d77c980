//! # Depot Library
//!
//! Controller and terminal front end for the Depot inventory manager.
//!
//! ## Module Organization
//! ```text
//! depot/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── cli.rs          ◄─── clap subcommands, dispatch
//! ├── view.rs         ◄─── Tables and JSON output
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── db.rs       ◄─── Database state wrapper
//! │   └── config.rs   ◄─── depot.toml + DEPOT_* overrides
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── refresh.rs  ◄─── Reload tables + low-stock alert
//! │   ├── product.rs  ◄─── Product CRUD
//! │   ├── stock.rs    ◄─── Stock-in / stock-out
//! │   ├── supplier.rs ◄─── Supplier CRUD
//! │   ├── category.rs ◄─── Category CRUD
//! │   └── report.rs   ◄─── Low stock, history, audit, status
//! └── error.rs        ◄─── Alerts and config errors
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod state;
pub mod view;

use clap::Parser;
use directories::ProjectDirs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use depot_db::{Database, DbConfig};
use error::{Alert, ConfigError};
use state::{AppConfig, DbState};
use view::View;

/// Runs one CLI invocation.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Parse arguments (clap) ───────────────────────────────────────────► │
/// │  2. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │  3. Load Config ──────────────────────────────────────────────────────► │
/// │     • depot.toml, then DEPOT_* environment variables                    │
/// │  4. Determine Database Path ──────────────────────────────────────────► │
/// │     • --db, else config, else platform data dir / depot.db              │
/// │  5. Connect to Database ──────────────────────────────────────────────► │
/// │     • SQLite with WAL mode, pending migrations applied                  │
/// │  6. Execute Command & Render ─────────────────────────────────────────► │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// Exits non-zero only for ERROR alerts; a WARNING (nothing selected) is
/// reported but is not a failure.
pub async fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    let config = AppConfig::load_or_default(cli.config.clone());

    let db_path = match cli.db.clone().map(Ok).unwrap_or_else(|| get_database_path(&config)) {
        Ok(path) => path,
        Err(e) => return report(&Alert::error(e.to_string())),
    };
    info!(?db_path, "Database path determined");

    let db = match Database::new(DbConfig::new(db_path)).await {
        Ok(db) => DbState::new(db),
        Err(e) => return report(&Alert::from(e)),
    };

    let result = cli::execute(cli.command, &db, &config).await;
    db.inner().close().await;

    match result {
        Ok(output) => match View::render(&output, cli.json) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => report(&Alert::error(format!("Could not write output: {}", e))),
        },
        Err(alert) => report(&alert),
    }
}

fn report(alert: &Alert) -> ExitCode {
    View::alert(alert);
    if alert.is_error() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=depot=trace` - Show trace for depot crates only
/// - Default: WARN, INFO for depot crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,depot=info,sqlx=warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Determines the database file path.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.depot.depot/depot.db`
/// - **Windows**: `%APPDATA%\depot\depot\data\depot.db`
/// - **Linux**: `~/.local/share/depot/depot.db`
///
/// `database_path` from config (or `DEPOT_DB_PATH`) wins when set.
fn get_database_path(config: &AppConfig) -> Result<PathBuf, ConfigError> {
    if let Some(path) = &config.database_path {
        return Ok(path.clone());
    }

    let proj_dirs = ProjectDirs::from("com", "depot", "depot").ok_or(ConfigError::NoDataDir)?;
    let data_dir = proj_dirs.data_dir();

    std::fs::create_dir_all(data_dir)?;

    Ok(data_dir.join("depot.db"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_path_wins() {
        let config = AppConfig {
            database_path: Some(PathBuf::from("/tmp/depot-configured.db")),
            ..AppConfig::default()
        };
        assert_eq!(
            get_database_path(&config).unwrap(),
            PathBuf::from("/tmp/depot-configured.db")
        );
    }
}
