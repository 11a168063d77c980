//! # Domain Types
//!
//! The four inventory records used throughout Depot.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐        ┌─────────────────┐                        │
//! │  │    Category     │◄───┐   │    Supplier     │                        │
//! │  │  id, name,      │    │   │  id, name,      │                        │
//! │  │  description    │    │   │  contact, phone │                        │
//! │  └─────────────────┘    │   │  email, address │                        │
//! │                         │   └────────▲────────┘                        │
//! │                 category_id          │ supplier_id                      │
//! │                         │   ┌────────┴────────┐                        │
//! │                         └───│     Product     │                        │
//! │                             │  cost / selling │                        │
//! │                             │  reorder_level  │                        │
//! │                             │  current_stock  │                        │
//! │                             └────────▲────────┘                        │
//! │                                      │ product_id                       │
//! │                             ┌────────┴────────┐                        │
//! │                             │   Transaction   │                        │
//! │                             │  IN | OUT, qty  │                        │
//! │                             └─────────────────┘                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Every record carries a numeric `id`. New records hold
//! [`UNASSIGNED_ID`](crate::UNASSIGNED_ID) until the storage layer assigns
//! the row id on insert.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::money::Money;
use crate::stock;

// =============================================================================
// Product
// =============================================================================

/// A stocked product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Row id (0 until stored).
    pub id: i64,

    /// Display name.
    pub name: String,

    /// Free-text description, may be empty.
    pub description: String,

    /// Category this product belongs to.
    pub category_id: i64,

    /// Supplier this product is bought from.
    pub supplier_id: i64,

    /// Purchase cost in cents.
    pub cost_cents: i64,

    /// Selling price in cents.
    pub selling_cents: i64,

    /// Stock level at or below which the product needs reordering.
    pub reorder_level: i64,

    /// Units on hand, maintained by stock transactions.
    pub current_stock: i64,
}

impl Product {
    /// Returns the cost price as Money.
    #[inline]
    pub fn cost(&self) -> Money {
        Money::from_cents(self.cost_cents)
    }

    /// Returns the selling price as Money.
    #[inline]
    pub fn selling_price(&self) -> Money {
        Money::from_cents(self.selling_cents)
    }

    /// True when stock is at or below the reorder level.
    pub fn is_low_stock(&self) -> bool {
        stock::is_low_stock(self.current_stock, self.reorder_level)
    }
}

// =============================================================================
// Supplier
// =============================================================================

/// A supplier products are bought from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Supplier {
    pub id: i64,
    pub name: String,
    pub contact_person: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

// =============================================================================
// Category
// =============================================================================

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: String,
}

// =============================================================================
// Transaction Type
// =============================================================================

/// Direction of a stock movement.
///
/// Stored and displayed as the exact tags `"IN"` and `"OUT"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "UPPERCASE"))]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    /// Goods received; stock goes up.
    In,
    /// Goods issued; stock goes down.
    Out,
}

impl TransactionType {
    /// The storage tag.
    pub const fn as_str(&self) -> &'static str {
        match self {
            TransactionType::In => "IN",
            TransactionType::Out => "OUT",
        }
    }

    /// Signed stock change for `quantity` units in this direction.
    pub const fn signed(&self, quantity: i64) -> i64 {
        match self {
            TransactionType::In => quantity,
            TransactionType::Out => -quantity,
        }
    }

    /// Remarks recorded when the user supplies none.
    pub const fn default_remarks(&self) -> &'static str {
        match self {
            TransactionType::In => "Stock In",
            TransactionType::Out => "Stock Out",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses the exact tags `IN` / `OUT`; anything else is rejected.
impl FromStr for TransactionType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IN" => Ok(TransactionType::In),
            "OUT" => Ok(TransactionType::Out),
            _ => Err(ValidationError::NotAllowed {
                field: "transaction type".to_string(),
                allowed: vec!["IN".to_string(), "OUT".to_string()],
            }),
        }
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// One recorded stock movement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Transaction {
    pub id: i64,
    pub product_id: i64,
    pub transaction_type: TransactionType,
    /// Always strictly positive; direction comes from `transaction_type`.
    pub quantity: i64,
    pub remarks: String,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> Product {
        Product {
            id: 1,
            name: "Widget".to_string(),
            description: String::new(),
            category_id: 1,
            supplier_id: 1,
            cost_cents: 200,
            selling_cents: 500,
            reorder_level: 10,
            current_stock: 12,
        }
    }

    #[test]
    fn test_product_money_helpers() {
        let product = widget();
        assert_eq!(product.cost().cents(), 200);
        assert_eq!(product.selling_price().cents(), 500);
    }

    #[test]
    fn test_product_low_stock_boundary() {
        let mut product = widget();
        assert!(!product.is_low_stock());

        product.current_stock = 10;
        assert!(product.is_low_stock());

        product.current_stock = 0;
        assert!(product.is_low_stock());
    }

    #[test]
    fn test_transaction_type_tags() {
        assert_eq!("IN".parse::<TransactionType>().unwrap(), TransactionType::In);
        assert_eq!("OUT".parse::<TransactionType>().unwrap(), TransactionType::Out);
        assert!("in".parse::<TransactionType>().is_err());
        assert!("TRANSFER".parse::<TransactionType>().is_err());

        assert_eq!(TransactionType::Out.to_string(), "OUT");
        assert_eq!(serde_json::to_string(&TransactionType::In).unwrap(), "\"IN\"");
    }

    #[test]
    fn test_transaction_type_signed() {
        assert_eq!(TransactionType::In.signed(5), 5);
        assert_eq!(TransactionType::Out.signed(5), -5);
        assert_eq!(TransactionType::In.default_remarks(), "Stock In");
        assert_eq!(TransactionType::Out.default_remarks(), "Stock Out");
    }
}
