//! # Refresh
//!
//! Reloads every table after a successful action and rebuilds the
//! low-stock warning.

use serde::Serialize;
use tracing::{debug, warn};

use depot_core::stock::low_stock_report;
use depot_core::{Category, Product, Supplier};

use crate::error::Alert;
use crate::state::{AppConfig, DbState};

/// Fresh contents of all three tables, plus the low-stock warning if any
/// product is at or below its reorder level.
#[derive(Debug, Clone, Serialize)]
pub struct Refresh {
    pub products: Vec<Product>,
    pub suppliers: Vec<Supplier>,
    pub categories: Vec<Category>,
    pub low_stock: Option<Alert>,
}

/// Reloads products, suppliers and categories.
///
/// The warning lists every low product in one message and is skipped when
/// `low_stock_alerts` is off.
pub async fn refresh_all(db: &DbState, config: &AppConfig) -> Result<Refresh, Alert> {
    let products = db.inner().products().get_all().await?;
    let suppliers = db.inner().suppliers().get_all().await?;
    let categories = db.inner().categories().get_all().await?;

    debug!(
        products = products.len(),
        suppliers = suppliers.len(),
        categories = categories.len(),
        "Tables refreshed"
    );

    let low_stock = if config.low_stock_alerts {
        low_stock_report(&products).map(|report| {
            warn!(
                count = products.iter().filter(|p| p.is_low_stock()).count(),
                "Products at or below reorder level"
            );
            Alert::warning(report)
        })
    } else {
        None
    };

    Ok(Refresh {
        products,
        suppliers,
        categories,
        low_stock,
    })
}
