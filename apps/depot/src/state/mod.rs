//! # State Module
//!
//! State handed to controller commands.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  depot::run()                                                          │
//! │     ├── AppConfig::load_or_default(None)                               │
//! │     └── DbState::new(Database::new(..).await?)                         │
//! │                              │                                          │
//! │          ┌───────────────────┴──────────────┐                          │
//! │          ▼                                  ▼                           │
//! │  ┌──────────────┐                  ┌──────────────────┐                │
//! │  │   DbState    │                  │    AppConfig     │                │
//! │  │  Database    │                  │  database_path   │                │
//! │  │  (SQLite     │                  │  allow_negative  │                │
//! │  │   pool)      │                  │  low_stock_alerts│                │
//! │  └──────────────┘                  └──────────────────┘                │
//! │                                                                         │
//! │  Each command declares only the state it needs.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod db;

pub use config::AppConfig;
pub use db::DbState;
