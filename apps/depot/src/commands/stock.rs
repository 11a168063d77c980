//! # Stock Commands
//!
//! Stock-in and stock-out for the selected product.
//!
//! ## Flow
//! ```text
//! selection ──► quantity parse ──► StockMovement ──► record (one DB tx)
//!    │               │                   │               │
//!    ▼               ▼                   ▼               ▼
//! WARNING        ERROR "Invalid      ERROR "Quantity   ERROR insufficient
//! no product     quantity for ..."   must be > 0."     stock / not found
//! ```

use tracing::{debug, info};

use depot_core::forms::Selection;
use depot_core::stock::StockForm;
use depot_core::{TransactionType, ValidationError};

use crate::commands::refresh::{refresh_all, Refresh};
use crate::error::Alert;
use crate::state::{AppConfig, DbState};

/// Records an IN movement for the selected product.
pub async fn stock_in(
    db: &DbState,
    config: &AppConfig,
    selection: Selection,
    form: &StockForm,
) -> Result<Refresh, Alert> {
    record_movement(db, config, selection, form, TransactionType::In).await
}

/// Records an OUT movement for the selected product.
///
/// Stock may not drop below zero unless `allow_negative_stock` is set.
pub async fn stock_out(
    db: &DbState,
    config: &AppConfig,
    selection: Selection,
    form: &StockForm,
) -> Result<Refresh, Alert> {
    record_movement(db, config, selection, form, TransactionType::Out).await
}

fn action(kind: TransactionType) -> &'static str {
    match kind {
        TransactionType::In => "stock-in",
        TransactionType::Out => "stock-out",
    }
}

async fn record_movement(
    db: &DbState,
    config: &AppConfig,
    selection: Selection,
    form: &StockForm,
    kind: TransactionType,
) -> Result<Refresh, Alert> {
    let Some(product_id) = selection.id() else {
        return Err(Alert::warning(format!("No product selected for {}.", action(kind))));
    };
    debug!(product_id, kind = %kind, quantity = %form.quantity, "stock command");

    let movement = form
        .parse(product_id, kind)
        .map_err(|e| quantity_alert(e, kind))?;

    let transaction = db
        .inner()
        .transactions()
        .record(&movement, config.allow_negative_stock)
        .await
        .map_err(|e| Alert::storage(&format!("Error recording {}", action(kind)), e))?;

    info!(
        transaction_id = transaction.id,
        product_id,
        kind = %kind,
        quantity = transaction.quantity,
        "Stock moved"
    );
    refresh_all(db, config).await
}

fn quantity_alert(err: ValidationError, kind: TransactionType) -> Alert {
    match err {
        e if e.is_numeric() => Alert::error(format!("Invalid quantity for {}.", action(kind))),
        ValidationError::MustBePositive { .. } => Alert::error("Quantity must be > 0."),
        other => Alert::from(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{seed_refs, setup};
    use crate::commands::{add_product, all_transactions, transaction_history};
    use crate::error::Severity;
    use depot_core::forms::ProductForm;

    /// Asserts no movement was recorded and stock is still `stock`.
    async fn assert_untouched(db: &DbState, config: &AppConfig, stock: i64) {
        assert!(all_transactions(db).await.unwrap().is_empty());
        let refresh = refresh_all(db, config).await.unwrap();
        assert_eq!(refresh.products[0].current_stock, stock);
    }

    fn qty(text: &str) -> StockForm {
        StockForm {
            quantity: text.into(),
            remarks: None,
        }
    }

    async fn with_product(reorder: &str) -> (DbState, AppConfig, i64) {
        let (db, config) = setup().await;
        let (supplier_id, category_id) = seed_refs(&db, &config).await;
        let form = ProductForm {
            name: "Bolt".into(),
            description: String::new(),
            category_id: category_id.to_string(),
            supplier_id: supplier_id.to_string(),
            cost_price: "0.10".into(),
            selling_price: "0.25".into(),
            reorder_level: reorder.into(),
        };
        let refresh = add_product(&db, &config, &form).await.unwrap();
        let id = refresh.products[0].id;
        (db, config, id)
    }

    #[tokio::test]
    async fn test_stock_in_then_out() {
        let (db, config, id) = with_product("5").await;

        let refresh = stock_in(&db, &config, Selection::of(id), &qty("20")).await.unwrap();
        assert_eq!(refresh.products[0].current_stock, 20);
        assert!(refresh.low_stock.is_none());

        let refresh = stock_out(&db, &config, Selection::of(id), &qty("16")).await.unwrap();
        assert_eq!(refresh.products[0].current_stock, 4);
        assert!(refresh.low_stock.is_some());

        let history = transaction_history(&db, Selection::of(id)).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].transaction_type, TransactionType::Out);
        assert_eq!(history[0].remarks, "Stock Out");
        assert_eq!(history[1].remarks, "Stock In");
    }

    #[tokio::test]
    async fn test_custom_remarks() {
        let (db, config, id) = with_product("0").await;
        let form = StockForm {
            quantity: "3".into(),
            remarks: Some("Delivery #42".into()),
        };
        stock_in(&db, &config, Selection::of(id), &form).await.unwrap();

        let history = transaction_history(&db, Selection::of(id)).await.unwrap();
        assert_eq!(history[0].remarks, "Delivery #42");
    }

    #[tokio::test]
    async fn test_quantity_alerts() {
        let (db, config, id) = with_product("0").await;

        let alert = stock_in(&db, &config, Selection::of(id), &qty("ten")).await.unwrap_err();
        assert_eq!(alert.message, "Invalid quantity for stock-in.");

        let alert = stock_out(&db, &config, Selection::of(id), &qty("")).await.unwrap_err();
        assert_eq!(alert.message, "Invalid quantity for stock-out.");

        let alert = stock_in(&db, &config, Selection::of(id), &qty("0")).await.unwrap_err();
        assert_eq!(alert.message, "Quantity must be > 0.");
        assert_eq!(alert.severity, Severity::Error);

        let alert = stock_out(&db, &config, Selection::of(id), &qty("-3")).await.unwrap_err();
        assert_eq!(alert.message, "Quantity must be > 0.");
        assert!(alert.is_error());

        assert_untouched(&db, &config, 0).await;
    }

    #[tokio::test]
    async fn test_requires_selection() {
        let (db, config, _) = with_product("0").await;

        let alert = stock_in(&db, &config, Selection::none(), &qty("1")).await.unwrap_err();
        assert_eq!(alert.severity, Severity::Warning);
        assert_eq!(alert.message, "No product selected for stock-in.");

        let alert = stock_out(&db, &config, Selection::none(), &qty("1")).await.unwrap_err();
        assert_eq!(alert.message, "No product selected for stock-out.");

        assert_untouched(&db, &config, 0).await;
    }

    #[tokio::test]
    async fn test_cannot_go_negative_by_default() {
        let (db, config, id) = with_product("0").await;
        stock_in(&db, &config, Selection::of(id), &qty("2")).await.unwrap();

        let alert = stock_out(&db, &config, Selection::of(id), &qty("3")).await.unwrap_err();
        assert!(alert.is_error());
        assert!(alert.message.starts_with("Insufficient stock"));

        let refresh = refresh_all(&db, &config).await.unwrap();
        assert_eq!(refresh.products[0].current_stock, 2);
        assert_eq!(all_transactions(&db).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_negative_allowed_by_config() {
        let (db, mut config, id) = with_product("0").await;
        config.allow_negative_stock = true;

        let refresh = stock_out(&db, &config, Selection::of(id), &qty("3")).await.unwrap();
        assert_eq!(refresh.products[0].current_stock, -3);
    }

    #[tokio::test]
    async fn test_missing_product() {
        let (db, config, _) = with_product("0").await;
        let alert = stock_in(&db, &config, Selection::of(404), &qty("1")).await.unwrap_err();
        assert_eq!(alert.message, "Product not found: 404");
    }
}
