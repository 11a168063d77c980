//! # Database State
//!
//! Wraps the `Database` handle passed to every controller command.
//!
//! The `Database` from `depot-db` holds a `SqlitePool`, which is cheap to
//! clone and safe to share; commands only ever borrow it.

use depot_db::Database;

/// Wrapper around `Database` for controller commands.
#[derive(Debug, Clone)]
pub struct DbState {
    db: Database,
}

impl DbState {
    /// Creates a new DbState wrapping the database connection.
    pub fn new(db: Database) -> Self {
        DbState { db }
    }

    /// Returns a reference to the inner Database.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let products = db_state.inner().products().get_all().await?;
    /// ```
    pub fn inner(&self) -> &Database {
        &self.db
    }
}
