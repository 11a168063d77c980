//! # Terminal View
//!
//! Renders command results as tables (prettytable) or JSON (serde_json).
//!
//! Tables come from the column definitions in `depot_core::columns`; cells
//! the column marks as highlighted (low stock) are printed in red.

use prettytable::{row, Cell, Row, Table};
use serde::Serialize;

use depot_core::columns::{
    category_columns, product_columns, supplier_columns, transaction_columns, Column,
};
use depot_core::stock::StockDrift;
use depot_core::{Product, Transaction};

use crate::commands::{Refresh, Status};
use crate::error::Alert;

/// Which table a mutation's refresh should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Products,
    Suppliers,
    Categories,
}

/// Result of one CLI invocation, ready to render.
#[derive(Debug, Clone)]
pub enum Output {
    Products(Vec<Product>),
    Transactions(Vec<Transaction>),
    Drift(Vec<StockDrift>),
    Status(Status),
    Refreshed { focus: Focus, refresh: Refresh },
}

pub struct View;

impl View {
    /// Prints `output` to stdout.
    pub fn render(output: &Output, json: bool) -> Result<(), serde_json::Error> {
        if json {
            return match output {
                Output::Products(p) => Self::json(p),
                Output::Transactions(t) => Self::json(t),
                Output::Drift(d) => Self::json(d),
                Output::Status(s) => Self::json(s),
                Output::Refreshed { refresh, .. } => Self::json(refresh),
            };
        }

        match output {
            Output::Products(p) => {
                Self::records(&product_columns(), p).printstd();
            }
            Output::Transactions(t) => {
                Self::records(&transaction_columns(), t).printstd();
            }
            Output::Drift(d) if d.is_empty() => {
                println!("Stock matches the transaction ledger.");
            }
            Output::Drift(d) => {
                Self::drift(d).printstd();
            }
            Output::Status(s) => {
                Self::status(s).printstd();
            }
            Output::Refreshed { focus, refresh } => {
                let table = match focus {
                    Focus::Products => Self::records(&product_columns(), &refresh.products),
                    Focus::Suppliers => Self::records(&supplier_columns(), &refresh.suppliers),
                    Focus::Categories => Self::records(&category_columns(), &refresh.categories),
                };
                table.printstd();
                if let Some(alert) = &refresh.low_stock {
                    Self::alert(alert);
                }
            }
        }
        Ok(())
    }

    /// Prints an alert to stderr.
    pub fn alert(alert: &Alert) {
        eprintln!("{}", alert);
    }

    fn json<T: Serialize + ?Sized>(value: &T) -> Result<(), serde_json::Error> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    /// One header row, then one row per record.
    pub fn records<T>(columns: &[Column<T>], records: &[T]) -> Table {
        let mut table = Table::new();
        table.set_titles(Row::new(
            columns
                .iter()
                .map(|c| Cell::new(c.label).style_spec("b"))
                .collect(),
        ));

        for record in records {
            let cells = columns
                .iter()
                .map(|column| {
                    let cell = Cell::new(&column.value(record));
                    if column.is_highlighted(record) {
                        cell.style_spec("Fr")
                    } else {
                        cell
                    }
                })
                .collect();
            table.add_row(Row::new(cells));
        }
        table
    }

    fn drift(drift: &[StockDrift]) -> Table {
        let mut table = Table::new();
        table.set_titles(row![b => "ID", "Name", "Recorded", "Ledger", "Difference"]);
        for d in drift {
            table.add_row(row![d.product_id, d.name, d.recorded, d.ledger, d.recorded - d.ledger]);
        }
        table
    }

    fn status(status: &Status) -> Table {
        let mut table = Table::new();
        table.add_row(row!["Database", if status.healthy { "ok" } else { "unreachable" }]);
        table.add_row(row![
            "Migrations",
            format!("{}/{} applied", status.migrations.applied, status.migrations.total)
        ]);
        table.add_row(row!["Products", status.products]);
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use depot_core::Supplier;

    fn product(id: i64, stock: i64, reorder: i64) -> Product {
        Product {
            id,
            name: format!("Item {}", id),
            description: String::new(),
            category_id: 1,
            supplier_id: 1,
            cost_cents: 150,
            selling_cents: 299,
            reorder_level: reorder,
            current_stock: stock,
        }
    }

    #[test]
    fn test_records_table_has_one_row_per_record() {
        let products = vec![product(1, 10, 2), product(2, 1, 2)];
        let table = View::records(&product_columns(), &products);

        assert_eq!(table.len(), 2);
        let row = table.get_row(1).unwrap();
        assert_eq!(row.get_cell(0).unwrap().get_content(), "2");
        assert_eq!(row.get_cell(5).unwrap().get_content(), "2.99");
        assert_eq!(row.get_cell(6).unwrap().get_content(), "1");
    }

    #[test]
    fn test_rendered_text_contains_headers() {
        let table = View::records(&supplier_columns(), &Vec::<Supplier>::new());
        let text = table.to_string();
        assert!(text.contains("Contact Person"));
        assert_eq!(table.len(), 0);
    }

    #[test]
    fn test_drift_difference() {
        let table = View::drift(&[StockDrift {
            product_id: 3,
            name: "Bolt".into(),
            recorded: 4,
            ledger: 10,
        }]);
        assert_eq!(table.get_row(0).unwrap().get_cell(4).unwrap().get_content(), "-6");
    }
}
