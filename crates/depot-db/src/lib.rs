//! # depot-db: Database Layer for Depot
//!
//! This crate provides database access for Depot.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Depot Data Flow                                │
//! │                                                                         │
//! │  Controller command (add_product, stock_in, ...)                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     depot-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐   ┌──────────────┐   │   │
//! │  │   │   Database    │    │  Repositories  │   │  Migrations  │   │   │
//! │  │   │   (pool.rs)   │    │                │   │  (embedded)  │   │   │
//! │  │   │               │    │ ProductRepo    │   │              │   │   │
//! │  │   │ SqlitePool    │◄───│ SupplierRepo   │   │ 001_initial  │   │   │
//! │  │   │ Connection    │    │ CategoryRepo   │   │  _schema.sql │   │   │
//! │  │   │ Management    │    │ TransactionRepo│   │              │   │   │
//! │  │   └───────────────┘    └────────────────┘   └──────────────┘   │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database (depot.db)                                            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! use depot_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./depot.db")).await?;
//!
//! let products = db.products().get_all().await?;
//! let history = db.transactions().list_for_product(1).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use migrations::MigrationStatus;
pub use pool::{Database, DbConfig};

pub use repository::category::CategoryRepository;
pub use repository::product::ProductRepository;
pub use repository::supplier::SupplierRepository;
pub use repository::transaction::TransactionRepository;
