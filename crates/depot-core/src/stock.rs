//! # Stock Module
//!
//! Stock movements (IN / OUT) and low-stock evaluation.
//!
//! ## Stock Movement
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Recording a Stock Movement                           │
//! │                                                                         │
//! │  StockForm { quantity: "5" } + selected product 7 + IN                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StockMovement::new() ← quantity parsed, must be > 0                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  apply_movement(current_stock, &movement, allow_negative)             │
//! │       │   IN  → stock + qty                                            │
//! │       │   OUT → stock - qty (InsufficientStock if it would go < 0)     │
//! │       ▼                                                                 │
//! │  depot-db: INSERT transaction + UPDATE stock (one DB transaction)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Low Stock
//! A product is low when `current_stock <= reorder_level`. The list is
//! recomputed from whatever products are passed in; nothing is cached.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::{Product, TransactionType};
use crate::validation::{parse_integer, validate_quantity, validate_text, ValidationResult};

// =============================================================================
// Stock Form
// =============================================================================

/// Raw stock movement fields: the quantity box plus optional remarks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockForm {
    pub quantity: String,
    pub remarks: Option<String>,
}

impl StockForm {
    /// Parses the form into a movement of `transaction_type` for `product_id`.
    pub fn parse(
        &self,
        product_id: i64,
        transaction_type: TransactionType,
    ) -> ValidationResult<StockMovement> {
        let quantity = parse_integer("quantity", &self.quantity)?;
        StockMovement::new(product_id, transaction_type, quantity, self.remarks.as_deref())
    }
}

// =============================================================================
// Stock Movement
// =============================================================================

/// A validated request to move stock for one product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockMovement {
    pub product_id: i64,
    pub transaction_type: TransactionType,
    pub quantity: i64,
    pub remarks: String,
}

impl StockMovement {
    /// Validates the quantity and fills default remarks.
    ///
    /// ## Example
    /// ```rust
    /// use depot_core::stock::StockMovement;
    /// use depot_core::TransactionType;
    ///
    /// let movement = StockMovement::new(1, TransactionType::In, 5, None).unwrap();
    /// assert_eq!(movement.remarks, "Stock In");
    ///
    /// assert!(StockMovement::new(1, TransactionType::Out, -3, None).is_err());
    /// ```
    pub fn new(
        product_id: i64,
        transaction_type: TransactionType,
        quantity: i64,
        remarks: Option<&str>,
    ) -> ValidationResult<Self> {
        validate_quantity(quantity)?;

        let remarks = match remarks.map(str::trim) {
            Some(text) if !text.is_empty() => validate_text("remarks", text)?,
            _ => transaction_type.default_remarks().to_string(),
        };

        Ok(StockMovement {
            product_id,
            transaction_type,
            quantity,
            remarks,
        })
    }

    /// Signed change to apply to the product's stock.
    pub fn delta(&self) -> i64 {
        self.transaction_type.signed(self.quantity)
    }
}

/// Computes the stock level after `movement`.
///
/// ## Rules
/// - IN always succeeds
/// - OUT fails with [`CoreError::InsufficientStock`] when the result would
///   be negative, unless `allow_negative` is set
pub fn apply_movement(
    current_stock: i64,
    movement: &StockMovement,
    allow_negative: bool,
) -> CoreResult<i64> {
    let next = current_stock
        .checked_add(movement.delta())
        .ok_or(CoreError::InsufficientStock {
            product_id: movement.product_id,
            available: current_stock,
            requested: movement.quantity,
        })?;

    if next < 0 && !allow_negative {
        return Err(CoreError::InsufficientStock {
            product_id: movement.product_id,
            available: current_stock,
            requested: movement.quantity,
        });
    }

    Ok(next)
}

// =============================================================================
// Low Stock Evaluation
// =============================================================================

/// True when `current_stock` is at or below `reorder_level`.
#[inline]
pub const fn is_low_stock(current_stock: i64, reorder_level: i64) -> bool {
    current_stock <= reorder_level
}

/// Lazily yields the products that need reordering, in input order.
pub fn low_stock(products: &[Product]) -> impl Iterator<Item = &Product> {
    products.iter().filter(|p| p.is_low_stock())
}

/// Builds the aggregated low-stock warning, or `None` when nothing is low.
///
/// ## Format
/// ```text
/// Low Stock Warning:
/// ID 1 - Widget (Stock: 0, Reorder Level: 10)
/// ID 4 - Bolt (Stock: 2, Reorder Level: 5)
/// ```
pub fn low_stock_report(products: &[Product]) -> Option<String> {
    let mut flagged = low_stock(products).peekable();
    flagged.peek()?;

    let mut report = String::from("Low Stock Warning:\n");
    for p in flagged {
        report.push_str(&format!(
            "ID {} - {} (Stock: {}, Reorder Level: {})\n",
            p.id, p.name, p.current_stock, p.reorder_level
        ));
    }
    Some(report)
}

// =============================================================================
// Ledger Audit
// =============================================================================

/// A product whose stored stock disagrees with its transaction ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockDrift {
    pub product_id: i64,
    pub name: String,
    pub recorded: i64,
    pub ledger: i64,
}

/// Compares each product's stock with the summed ledger balance.
///
/// `balances` maps product id to the signed sum of its transactions;
/// products without transactions have a ledger balance of zero.
pub fn find_drift(products: &[Product], balances: &HashMap<i64, i64>) -> Vec<StockDrift> {
    products
        .iter()
        .filter_map(|p| {
            let ledger = balances.get(&p.id).copied().unwrap_or(0);
            (ledger != p.current_stock).then(|| StockDrift {
                product_id: p.id,
                name: p.name.clone(),
                recorded: p.current_stock,
                ledger,
            })
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
