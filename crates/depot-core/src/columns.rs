//! # Table Columns
//!
//! Each table is an ordered list of `(label, accessor)` pairs. Renderers
//! walk the list; nothing is looked up by property name at runtime.
//!
//! ```rust
//! use depot_core::columns::{header, product_columns, row};
//! use depot_core::Product;
//!
//! let columns = product_columns();
//! assert_eq!(header(&columns)[0], "ID");
//!
//! let widget = Product {
//!     id: 1,
//!     name: "Widget".into(),
//!     description: String::new(),
//!     category_id: 1,
//!     supplier_id: 1,
//!     cost_cents: 200,
//!     selling_cents: 500,
//!     reorder_level: 10,
//!     current_stock: 0,
//! };
//! assert_eq!(row(&columns, &widget)[1], "Widget");
//! ```

use crate::types::{Category, Product, Supplier, Transaction};

/// One table column.
pub struct Column<T> {
    /// Header text.
    pub label: &'static str,
    /// Renders the cell for a record.
    pub accessor: fn(&T) -> String,
    /// When set and true for a record, the cell is highlighted.
    pub highlight: Option<fn(&T) -> bool>,
}

impl<T> Column<T> {
    pub fn new(label: &'static str, accessor: fn(&T) -> String) -> Self {
        Column {
            label,
            accessor,
            highlight: None,
        }
    }

    /// Same column, highlighted whenever `rule` holds.
    pub fn highlighted(mut self, rule: fn(&T) -> bool) -> Self {
        self.highlight = Some(rule);
        self
    }

    pub fn value(&self, record: &T) -> String {
        (self.accessor)(record)
    }

    pub fn is_highlighted(&self, record: &T) -> bool {
        self.highlight.map_or(false, |rule| rule(record))
    }
}

/// Header labels in column order.
pub fn header<T>(columns: &[Column<T>]) -> Vec<&'static str> {
    columns.iter().map(|c| c.label).collect()
}

/// Cell values for one record in column order.
pub fn row<T>(columns: &[Column<T>], record: &T) -> Vec<String> {
    columns.iter().map(|c| c.value(record)).collect()
}

// =============================================================================
// Column Sets
// =============================================================================

/// Product table. The stock cell is highlighted for low-stock products.
pub fn product_columns() -> Vec<Column<Product>> {
    vec![
        Column::new("ID", |p: &Product| p.id.to_string()),
        Column::new("Name", |p: &Product| p.name.clone()),
        Column::new("Category", |p: &Product| p.category_id.to_string()),
        Column::new("Supplier", |p: &Product| p.supplier_id.to_string()),
        Column::new("Cost", |p: &Product| p.cost().to_string()),
        Column::new("Price", |p: &Product| p.selling_price().to_string()),
        Column::new("Current Stock", |p: &Product| p.current_stock.to_string())
            .highlighted(Product::is_low_stock),
        Column::new("Reorder Level", |p: &Product| p.reorder_level.to_string()),
    ]
}

pub fn supplier_columns() -> Vec<Column<Supplier>> {
    vec![
        Column::new("ID", |s: &Supplier| s.id.to_string()),
        Column::new("Name", |s: &Supplier| s.name.clone()),
        Column::new("Contact Person", |s: &Supplier| s.contact_person.clone()),
        Column::new("Phone", |s: &Supplier| s.phone.clone()),
        Column::new("Email", |s: &Supplier| s.email.clone()),
        Column::new("Address", |s: &Supplier| s.address.clone()),
    ]
}

pub fn category_columns() -> Vec<Column<Category>> {
    vec![
        Column::new("ID", |c: &Category| c.id.to_string()),
        Column::new("Name", |c: &Category| c.name.clone()),
        Column::new("Description", |c: &Category| c.description.clone()),
    ]
}

pub fn transaction_columns() -> Vec<Column<Transaction>> {
    vec![
        Column::new("ID", |t: &Transaction| t.id.to_string()),
        Column::new("Product", |t: &Transaction| t.product_id.to_string()),
        Column::new("Type", |t: &Transaction| t.transaction_type.to_string()),
        Column::new("Quantity", |t: &Transaction| t.quantity.to_string()),
        Column::new("Remarks", |t: &Transaction| t.remarks.clone()),
        Column::new("Date", |t: &Transaction| {
            t.created_at.format("%Y-%m-%d %H:%M:%S").to_string()
        }),
    ]
}
