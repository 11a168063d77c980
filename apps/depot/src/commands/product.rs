//! # Product Commands
//!
//! Add, update and delete products from the product form.
//!
//! ## Alerts
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Condition                          Alert                               │
//! │  ─────────────────────────────────  ──────────────────────────────────  │
//! │  Non-numeric id / price / level     ERROR   Invalid numeric input for   │
//! │                                             Product.                    │
//! │  Blank name, negative price, ...    ERROR   <validation message>        │
//! │  Update with nothing selected       WARNING No product selected for     │
//! │                                             update.                     │
//! │  Delete with nothing selected       WARNING No product selected for     │
//! │                                             deletion.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, info};

use depot_core::forms::{ProductForm, Selection};
use depot_core::ValidationError;

use crate::commands::refresh::{refresh_all, Refresh};
use crate::error::Alert;
use crate::state::{AppConfig, DbState};

const INVALID_NUMERIC_INPUT: &str = "Invalid numeric input for Product.";

/// Maps a form parse failure to its alert.
fn input_alert(err: ValidationError) -> Alert {
    if err.is_numeric() {
        Alert::error(INVALID_NUMERIC_INPUT)
    } else {
        Alert::from(err)
    }
}

/// Adds a product. Stock starts at zero.
pub async fn add_product(
    db: &DbState,
    config: &AppConfig,
    form: &ProductForm,
) -> Result<Refresh, Alert> {
    debug!(name = %form.name, "add_product command");

    let input = form.parse().map_err(input_alert)?;
    let product = db
        .inner()
        .products()
        .insert(&input.into_new_product())
        .await
        .map_err(|e| Alert::storage("Error adding product", e))?;

    info!(id = product.id, name = %product.name, "Product added");
    refresh_all(db, config).await
}

/// Overwrites the selected product's editable fields.
///
/// Stock is untouched; it only moves through stock-in and stock-out.
pub async fn update_product(
    db: &DbState,
    config: &AppConfig,
    selection: Selection,
    form: &ProductForm,
) -> Result<Refresh, Alert> {
    let Some(id) = selection.id() else {
        return Err(Alert::warning("No product selected for update."));
    };
    debug!(id, "update_product command");

    let mut product = db
        .inner()
        .products()
        .get_by_id(id)
        .await
        .map_err(|e| Alert::storage("Error updating product", e))?
        .ok_or_else(|| Alert::error(format!("Product not found: {}", id)))?;
    let input = form.parse().map_err(input_alert)?;

    input.apply_to(&mut product);
    db.inner()
        .products()
        .update(&product)
        .await
        .map_err(|e| Alert::storage("Error updating product", e))?;

    info!(id, "Product updated");
    refresh_all(db, config).await
}

/// Deletes the selected product along with its transaction history.
pub async fn delete_product(
    db: &DbState,
    config: &AppConfig,
    selection: Selection,
) -> Result<Refresh, Alert> {
    let Some(id) = selection.id() else {
        return Err(Alert::warning("No product selected for deletion."));
    };
    debug!(id, "delete_product command");

    db.inner()
        .products()
        .delete(id)
        .await
        .map_err(|e| Alert::storage("Error deleting product", e))?;

    info!(id, "Product deleted");
    refresh_all(db, config).await
}

/// Pre-fills a product form from the selected row.
///
/// Returns `None` when nothing is selected or the product no longer exists.
pub async fn product_form(db: &DbState, selection: Selection) -> Result<Option<ProductForm>, Alert> {
    let Some(id) = selection.id() else {
        return Ok(None);
    };
    let product = db.inner().products().get_by_id(id).await?;
    Ok(product.as_ref().map(ProductForm::from_product))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{seed_refs, setup};
    use crate::error::Severity;

    fn form(supplier_id: i64, category_id: i64) -> ProductForm {
        ProductForm {
            name: "Hammer".into(),
            description: "Claw hammer".into(),
            category_id: category_id.to_string(),
            supplier_id: supplier_id.to_string(),
            cost_price: "4.50".into(),
            selling_price: "9.99".into(),
            reorder_level: "3".into(),
        }
    }

    #[tokio::test]
    async fn test_add_product() {
        let (db, config) = setup().await;
        let (supplier_id, category_id) = seed_refs(&db, &config).await;

        let refresh = add_product(&db, &config, &form(supplier_id, category_id))
            .await
            .unwrap();

        assert_eq!(refresh.products.len(), 1);
        let product = &refresh.products[0];
        assert_eq!(product.name, "Hammer");
        assert_eq!(product.selling_cents, 999);
        assert_eq!(product.current_stock, 0);
    }

    #[tokio::test]
    async fn test_non_numeric_field_is_one_alert() {
        let (db, config) = setup().await;
        let (supplier_id, category_id) = seed_refs(&db, &config).await;

        let mut bad = form(supplier_id, category_id);
        bad.cost_price = "abc".into();

        let alert = add_product(&db, &config, &bad).await.unwrap_err();
        assert_eq!(alert.severity, Severity::Error);
        assert_eq!(alert.message, "Invalid numeric input for Product.");

        let refresh = refresh_all(&db, &config).await.unwrap();
        assert!(refresh.products.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_category_is_rejected() {
        let (db, config) = setup().await;
        let (supplier_id, _) = seed_refs(&db, &config).await;

        let alert = add_product(&db, &config, &form(supplier_id, 999))
            .await
            .unwrap_err();
        assert!(alert.is_error());
        assert!(alert.message.starts_with("Error adding product"));
    }

    #[tokio::test]
    async fn test_update_requires_selection() {
        let (db, config) = setup().await;
        let (supplier_id, category_id) = seed_refs(&db, &config).await;

        let alert = update_product(&db, &config, Selection::none(), &form(supplier_id, category_id))
            .await
            .unwrap_err();
        assert_eq!(alert.severity, Severity::Warning);
        assert_eq!(alert.message, "No product selected for update.");
    }

    #[tokio::test]
    async fn test_update_keeps_stock() {
        let (db, config) = setup().await;
        let (supplier_id, category_id) = seed_refs(&db, &config).await;
        let refresh = add_product(&db, &config, &form(supplier_id, category_id))
            .await
            .unwrap();
        let id = refresh.products[0].id;

        crate::commands::stock_in(
            &db,
            &config,
            Selection::of(id),
            &depot_core::stock::StockForm {
                quantity: "7".into(),
                remarks: None,
            },
        )
        .await
        .unwrap();

        let mut edited = product_form(&db, Selection::of(id)).await.unwrap().unwrap();
        edited.name = "Framing Hammer".into();
        edited.selling_price = "12.00".into();

        let refresh = update_product(&db, &config, Selection::of(id), &edited)
            .await
            .unwrap();
        let product = &refresh.products[0];
        assert_eq!(product.name, "Framing Hammer");
        assert_eq!(product.selling_cents, 1200);
        assert_eq!(product.current_stock, 7);
    }

    #[tokio::test]
    async fn test_delete() {
        let (db, config) = setup().await;
        let (supplier_id, category_id) = seed_refs(&db, &config).await;
        let refresh = add_product(&db, &config, &form(supplier_id, category_id))
            .await
            .unwrap();
        let id = refresh.products[0].id;

        let alert = delete_product(&db, &config, Selection::none()).await.unwrap_err();
        assert_eq!(alert.message, "No product selected for deletion.");

        let refresh = delete_product(&db, &config, Selection::of(id)).await.unwrap();
        assert!(refresh.products.is_empty());

        let alert = delete_product(&db, &config, Selection::of(id)).await.unwrap_err();
        assert!(alert.is_error());
    }

    #[tokio::test]
    async fn test_update_storage_failure_is_prefixed() {
        let (db, config) = setup().await;
        let (supplier_id, category_id) = seed_refs(&db, &config).await;
        db.inner().close().await;

        let alert = update_product(&db, &config, Selection::of(1), &form(supplier_id, category_id))
            .await
            .unwrap_err();
        assert!(alert.is_error());
        assert!(alert.message.starts_with("Error updating product: "));
    }

    #[tokio::test]
    async fn test_update_missing_product_before_parsing() {
        let (db, config) = setup().await;

        let alert = update_product(&db, &config, Selection::of(42), &ProductForm::default())
            .await
            .unwrap_err();
        assert_eq!(alert.message, "Product not found: 42");
    }
}
