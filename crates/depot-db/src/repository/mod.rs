//! # Repository Module
//!
//! Database repository implementations for Depot.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Controller command                                                    │
//! │       │                                                                 │
//! │       │  db.products().insert(&product)                                │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── get_all(&self)          → ordered by id                           │
//! │  ├── insert(&self, record)   → storage assigns the id                  │
//! │  ├── update(&self, record)   → by id                                   │
//! │  └── delete(&self, id)                                                 │
//! │       │                                                                 │
//! │       │  Parameterized SQL                                              │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Product CRUD, low stock, ledger balances
//! - [`SupplierRepository`](supplier::SupplierRepository) - Supplier CRUD
//! - [`CategoryRepository`](category::CategoryRepository) - Category CRUD
//! - [`TransactionRepository`](transaction::TransactionRepository) - Stock movements and history

pub mod category;
pub mod product;
pub mod supplier;
pub mod transaction;
