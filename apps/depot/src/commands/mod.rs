//! # Controller Commands
//!
//! One function per form button. The CLI calls these; nothing here prints.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── refresh.rs   ◄─── Reload all tables + low-stock alert
//! ├── product.rs   ◄─── Product add / update / delete
//! ├── stock.rs     ◄─── Stock-in / stock-out
//! ├── supplier.rs  ◄─── Supplier add / update / delete
//! ├── category.rs  ◄─── Category add / update / delete
//! └── report.rs    ◄─── Low stock, history, audit, status
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  depot product stock-in --id 4 --quantity 10                           │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  stock_in(&db, &config, Selection::of(4), &StockForm { .. })           │
//! │         │                                                               │
//! │         ├── nothing selected ──► Err(Alert::warning(..))               │
//! │         ├── bad input ─────────► Err(Alert::error(..))                 │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  repository call ──► refresh_all() ──► Ok(Refresh { tables, alert })   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every successful mutation ends with [`refresh_all`], so the caller always
//! renders tables that match the database.

pub mod category;
pub mod product;
pub mod refresh;
pub mod report;
pub mod stock;
pub mod supplier;

pub use category::{add_category, category_form, delete_category, update_category};
pub use product::{add_product, delete_product, product_form, update_product};
pub use refresh::{refresh_all, Refresh};
pub use report::{all_transactions, audit, low_stock, status, transaction_history, Status};
pub use stock::{stock_in, stock_out};
pub use supplier::{add_supplier, delete_supplier, supplier_form, update_supplier};

#[cfg(test)]
pub(crate) mod testing {
    use depot_core::forms::{CategoryForm, SupplierForm};
    use depot_db::{Database, DbConfig};

    use crate::state::{AppConfig, DbState};

    /// Fresh in-memory database with default config.
    pub async fn setup() -> (DbState, AppConfig) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        (DbState::new(db), AppConfig::default())
    }

    /// Adds one supplier and one category; returns their ids.
    pub async fn seed_refs(db: &DbState, config: &AppConfig) -> (i64, i64) {
        let supplier = SupplierForm {
            name: "Acme".into(),
            contact_person: "Jo".into(),
            phone: "555".into(),
            email: "jo@acme.test".into(),
            address: "1 Road".into(),
        };
        let refresh = super::add_supplier(db, config, &supplier).await.unwrap();
        let supplier_id = refresh.suppliers[0].id;

        let category = CategoryForm {
            name: "Tools".into(),
            description: "Hand tools".into(),
        };
        let refresh = super::add_category(db, config, &category).await.unwrap();
        let category_id = refresh.categories[0].id;

        (supplier_id, category_id)
    }
}
