//! # Report Commands
//!
//! Read-only views: low stock, transaction history, ledger audit and
//! database status.

use serde::Serialize;
use tracing::{debug, warn};

use depot_core::forms::Selection;
use depot_core::stock::{find_drift, StockDrift};
use depot_core::{Product, Transaction};
use depot_db::MigrationStatus;

use crate::error::Alert;
use crate::state::DbState;

/// Products at or below their reorder level.
pub async fn low_stock(db: &DbState) -> Result<Vec<Product>, Alert> {
    Ok(db.inner().products().low_stock().await?)
}

/// Transactions for the selected product, newest first.
pub async fn transaction_history(
    db: &DbState,
    selection: Selection,
) -> Result<Vec<Transaction>, Alert> {
    let Some(id) = selection.id() else {
        return Err(Alert::warning("No product selected for history."));
    };
    Ok(db.inner().transactions().list_for_product(id).await?)
}

/// Every transaction, newest first.
pub async fn all_transactions(db: &DbState) -> Result<Vec<Transaction>, Alert> {
    Ok(db.inner().transactions().list_all().await?)
}

/// Products whose stored stock disagrees with their transaction ledger.
pub async fn audit(db: &DbState) -> Result<Vec<StockDrift>, Alert> {
    let products = db.inner().products().get_all().await?;
    let balances = db.inner().products().ledger_balances().await?;
    let drift = find_drift(&products, &balances);

    if drift.is_empty() {
        debug!(products = products.len(), "Stock matches ledger");
    } else {
        warn!(count = drift.len(), "Stock differs from ledger");
    }
    Ok(drift)
}

/// Database health snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct Status {
    pub healthy: bool,
    pub migrations: MigrationStatus,
    pub products: i64,
}

pub async fn status(db: &DbState) -> Result<Status, Alert> {
    let healthy = db.inner().health_check().await;
    let migrations = db.inner().migration_status().await?;
    let products = db.inner().products().count().await?;

    Ok(Status {
        healthy,
        migrations,
        products,
    })
}
