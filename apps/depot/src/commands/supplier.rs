//! # Supplier Commands

use tracing::{debug, info};

use depot_core::forms::{Selection, SupplierForm};

use crate::commands::refresh::{refresh_all, Refresh};
use crate::error::Alert;
use crate::state::{AppConfig, DbState};

pub async fn add_supplier(
    db: &DbState,
    config: &AppConfig,
    form: &SupplierForm,
) -> Result<Refresh, Alert> {
    debug!(name = %form.name, "add_supplier command");

    let input = form
        .parse()
        .map_err(|e| Alert::error(format!("Error adding supplier: {}", e)))?;
    let supplier = db
        .inner()
        .suppliers()
        .insert(&input.into_new_supplier())
        .await
        .map_err(|e| Alert::storage("Error adding supplier", e))?;

    info!(id = supplier.id, name = %supplier.name, "Supplier added");
    refresh_all(db, config).await
}

pub async fn update_supplier(
    db: &DbState,
    config: &AppConfig,
    selection: Selection,
    form: &SupplierForm,
) -> Result<Refresh, Alert> {
    let Some(id) = selection.id() else {
        return Err(Alert::warning("No supplier selected for update."));
    };
    debug!(id, "update_supplier command");

    let mut supplier = db
        .inner()
        .suppliers()
        .get_by_id(id)
        .await
        .map_err(|e| Alert::storage("Error updating supplier", e))?
        .ok_or_else(|| Alert::error(format!("Error updating supplier: Supplier not found: {}", id)))?;
    let input = form
        .parse()
        .map_err(|e| Alert::error(format!("Error updating supplier: {}", e)))?;

    input.apply_to(&mut supplier);
    db.inner()
        .suppliers()
        .update(&supplier)
        .await
        .map_err(|e| Alert::storage("Error updating supplier", e))?;

    info!(id, "Supplier updated");
    refresh_all(db, config).await
}

/// Deletes the selected supplier. Fails while products still reference it.
pub async fn delete_supplier(
    db: &DbState,
    config: &AppConfig,
    selection: Selection,
) -> Result<Refresh, Alert> {
    let Some(id) = selection.id() else {
        return Err(Alert::warning("No supplier selected for deletion."));
    };
    debug!(id, "delete_supplier command");

    db.inner()
        .suppliers()
        .delete(id)
        .await
        .map_err(|e| Alert::storage("Error deleting supplier", e))?;

    info!(id, "Supplier deleted");
    refresh_all(db, config).await
}

/// Pre-fills a supplier form from the selected row.
pub async fn supplier_form(db: &DbState, selection: Selection) -> Result<Option<SupplierForm>, Alert> {
    let Some(id) = selection.id() else {
        return Ok(None);
    };
    let supplier = db.inner().suppliers().get_by_id(id).await?;
    Ok(supplier.as_ref().map(SupplierForm::from_supplier))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::add_product;
    use crate::commands::testing::{seed_refs, setup};
    use crate::error::Severity;
    use depot_core::forms::ProductForm;

    fn form(name: &str) -> SupplierForm {
        SupplierForm {
            name: name.into(),
            contact_person: "Sam".into(),
            phone: "555-0199".into(),
            email: "sam@example.test".into(),
            address: "9 Quay".into(),
        }
    }

    #[tokio::test]
    async fn test_add_and_update() {
        let (db, config) = setup().await;

        let refresh = add_supplier(&db, &config, &form("Initech")).await.unwrap();
        assert_eq!(refresh.suppliers.len(), 1);
        let id = refresh.suppliers[0].id;

        let mut edited = form("Initech Ltd");
        edited.phone = "555-0200".into();
        let refresh = update_supplier(&db, &config, Selection::of(id), &edited)
            .await
            .unwrap();
        assert_eq!(refresh.suppliers[0].name, "Initech Ltd");
        assert_eq!(refresh.suppliers[0].phone, "555-0200");
    }

    #[tokio::test]
    async fn test_blank_name() {
        let (db, config) = setup().await;
        let alert = add_supplier(&db, &config, &form("  ")).await.unwrap_err();
        assert_eq!(alert.severity, Severity::Error);
        assert!(alert.message.starts_with("Error adding supplier: "));
    }

    #[tokio::test]
    async fn test_missing_selection() {
        let (db, config) = setup().await;

        let alert = update_supplier(&db, &config, Selection::none(), &form("X"))
            .await
            .unwrap_err();
        assert_eq!(alert.message, "No supplier selected for update.");
        assert_eq!(alert.severity, Severity::Warning);

        let alert = delete_supplier(&db, &config, Selection::none()).await.unwrap_err();
        assert_eq!(alert.message, "No supplier selected for deletion.");
    }

    #[tokio::test]
    async fn test_delete_in_use_supplier_fails() {
        let (db, config) = setup().await;
        let (supplier_id, category_id) = seed_refs(&db, &config).await;
        let product = ProductForm {
            name: "Rope".into(),
            description: String::new(),
            category_id: category_id.to_string(),
            supplier_id: supplier_id.to_string(),
            cost_price: "1".into(),
            selling_price: "2".into(),
            reorder_level: "0".into(),
        };
        add_product(&db, &config, &product).await.unwrap();

        let alert = delete_supplier(&db, &config, Selection::of(supplier_id))
            .await
            .unwrap_err();
        assert!(alert.is_error());
        assert!(alert.message.starts_with("Error deleting supplier"));

        let refresh = refresh_all(&db, &config).await.unwrap();
        assert_eq!(refresh.suppliers.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_unused_supplier() {
        let (db, config) = setup().await;
        let refresh = add_supplier(&db, &config, &form("Globex")).await.unwrap();
        let id = refresh.suppliers[0].id;

        let refresh = delete_supplier(&db, &config, Selection::of(id)).await.unwrap();
        assert!(refresh.suppliers.is_empty());
    }
}
