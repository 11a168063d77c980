//! # depot-core: Pure Business Logic for Depot
//!
//! This crate holds the inventory records and the rules that act on them,
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Depot Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Front End (terminal)                         │   │
//! │  │   Product table ── Supplier table ── Category table ── Alerts   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ forms (raw text) + selection           │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    Controller commands (apps/depot)             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ depot-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌────────────┐ ┌───────┐ ┌─────────┐  │   │
//! │  │   │  types  │ │  money  │ │ validation │ │ forms │ │  stock  │  │   │
//! │  │   │ Product │ │  Money  │ │  parsing   │ │ input │ │ IN/OUT  │  │   │
//! │  │   │ Supplier│ │ (cents) │ │  checks    │ │ types │ │ low stk │  │   │
//! │  │   └─────────┘ └─────────┘ └────────────┘ └───────┘ └─────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO TERMINAL • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    depot-db (Database Layer)                    │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Records (Product, Supplier, Category, Transaction)
//! - [`money`] - Money type with integer arithmetic
//! - [`error`] - Domain error types
//! - [`validation`] - Field parsing and business rule checks
//! - [`forms`] - Raw form requests and their parsed counterparts
//! - [`stock`] - Stock movements and low-stock evaluation
//! - [`columns`] - Ordered `(label, accessor)` table column mappings
//!
//! ## Example Usage
//!
//! ```rust
//! use depot_core::forms::ProductForm;
//!
//! let form = ProductForm {
//!     name: "Widget".into(),
//!     description: "".into(),
//!     category_id: "1".into(),
//!     supplier_id: "1".into(),
//!     cost_price: "2.00".into(),
//!     selling_price: "5.00".into(),
//!     reorder_level: "10".into(),
//! };
//!
//! let input = form.parse().unwrap();
//! let product = input.into_new_product();
//!
//! assert_eq!(product.id, 0);          // storage assigns the real id
//! assert_eq!(product.cost_cents, 200);
//! assert!(product.is_low_stock());    // stock 0 <= reorder level 10
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod columns;
pub mod error;
pub mod forms;
pub mod money;
pub mod stock;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Identity carried by a record that has not been stored yet.
///
/// The storage layer replaces it with the real row id on insert.
pub const UNASSIGNED_ID: i64 = 0;

/// Maximum quantity accepted for a single stock movement.
///
/// ## Business Reason
/// Catches slips such as typing 10000 instead of 100 on the quantity field.
pub const MAX_MOVEMENT_QUANTITY: i64 = 1_000_000;

/// Maximum length of free-text fields (names, descriptions, addresses).
pub const MAX_TEXT_LENGTH: usize = 255;
