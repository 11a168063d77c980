//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - CRUD operations (ids assigned by SQLite on insert)
//! - Low-stock query (`current_stock <= reorder_level`)
//! - Ledger balances for the stock audit
//!
//! `current_stock` is never written here except on insert; stock moves only
//! through [`TransactionRepository::record`](super::transaction::TransactionRepository::record).

use std::collections::HashMap;

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use depot_core::Product;

const SELECT_PRODUCT: &str = r#"
    SELECT
        id,
        name,
        description,
        category_id,
        supplier_id,
        cost_cents,
        selling_cents,
        reorder_level,
        current_stock
    FROM products
"#;

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
///
/// let all = repo.get_all().await?;
/// let stored = repo.insert(&new_product).await?;
/// let low = repo.low_stock().await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists every product, ordered by id.
    pub async fn get_all(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!("{SELECT_PRODUCT} ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;

        debug!(count = products.len(), "Loaded products");
        Ok(products)
    }

    /// Gets a product by its id.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!("{SELECT_PRODUCT} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Products at or below their reorder level, ordered by id.
    pub async fn low_stock(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "{SELECT_PRODUCT} WHERE current_stock <= reorder_level ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Low stock products");
        Ok(products)
    }

    /// Inserts a new product.
    ///
    /// The incoming `id` is ignored; the returned product carries the id
    /// SQLite assigned.
    ///
    /// ## Errors
    /// * `DbError::ForeignKeyViolation` - category or supplier doesn't exist
    pub async fn insert(&self, product: &Product) -> DbResult<Product> {
        debug!(name = %product.name, "Inserting product");

        let result = sqlx::query(
            r#"
            INSERT INTO products (
                name, description, category_id, supplier_id,
                cost_cents, selling_cents, reorder_level, current_stock
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.category_id)
        .bind(product.supplier_id)
        .bind(product.cost_cents)
        .bind(product.selling_cents)
        .bind(product.reorder_level)
        .bind(product.current_stock)
        .execute(&self.pool)
        .await?;

        let mut stored = product.clone();
        stored.id = result.last_insert_rowid();

        debug!(id = stored.id, "Product inserted");
        Ok(stored)
    }

    /// Updates the editable fields of an existing product.
    ///
    /// `current_stock` is left untouched.
    ///
    /// ## Errors
    /// * `DbError::NotFound` - Product doesn't exist
    pub async fn update(&self, product: &Product) -> DbResult<()> {
        debug!(id = product.id, "Updating product");

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?2,
                description = ?3,
                category_id = ?4,
                supplier_id = ?5,
                cost_cents = ?6,
                selling_cents = ?7,
                reorder_level = ?8
            WHERE id = ?1
            "#,
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.category_id)
        .bind(product.supplier_id)
        .bind(product.cost_cents)
        .bind(product.selling_cents)
        .bind(product.reorder_level)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", product.id));
        }

        Ok(())
    }

    /// Deletes a product. Its transactions go with it.
    ///
    /// ## Errors
    /// * `DbError::NotFound` - Product doesn't exist
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Number of products.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Signed sum of each product's transactions, keyed by product id.
    ///
    /// Products without transactions are absent from the map.
    pub async fn ledger_balances(&self) -> DbResult<HashMap<i64, i64>> {
        let rows: Vec<(i64, i64)> = sqlx::query_as(
            r#"
            SELECT
                product_id,
                SUM(CASE transaction_type WHEN 'IN' THEN quantity ELSE -quantity END)
            FROM transactions
            GROUP BY product_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().collect())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig, DbError};
    use depot_core::{Category, Product, Supplier};

    async fn setup() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.categories()
            .insert(&Category {
                id: 0,
                name: "Hardware".to_string(),
                description: String::new(),
            })
            .await
            .unwrap();
        db.suppliers()
            .insert(&Supplier {
                id: 0,
                name: "Acme".to_string(),
                contact_person: String::new(),
                phone: String::new(),
                email: String::new(),
                address: String::new(),
            })
            .await
            .unwrap();
        db
    }

    fn product(name: &str, reorder_level: i64) -> Product {
        Product {
            id: 0,
            name: name.to_string(),
            description: String::new(),
            category_id: 1,
            supplier_id: 1,
            cost_cents: 200,
            selling_cents: 500,
            reorder_level,
            current_stock: 0,
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_ids() {
        let db = setup().await;
        let repo = db.products();

        let first = repo.insert(&product("Widget", 10)).await.unwrap();
        let second = repo.insert(&product("Gadget", 10)).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);

        let all = repo.get_all().await.unwrap();
        assert_eq!(all, vec![first, second]);
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_insert_rejects_unknown_category() {
        let db = setup().await;
        let mut orphan = product("Orphan", 0);
        orphan.category_id = 99;

        let err = db.products().insert(&orphan).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
        assert_eq!(db.products().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_keeps_stock() {
        let db = setup().await;
        let repo = db.products();
        let mut stored = repo.insert(&product("Widget", 10)).await.unwrap();
        sqlx::query("UPDATE products SET current_stock = 7 WHERE id = ?1")
            .bind(stored.id)
            .execute(db.pool())
            .await
            .unwrap();

        stored.name = "Widget XL".to_string();
        stored.current_stock = 100;
        repo.update(&stored).await.unwrap();

        let reloaded = repo.get_by_id(stored.id).await.unwrap().unwrap();
        assert_eq!(reloaded.name, "Widget XL");
        assert_eq!(reloaded.current_stock, 7);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing() {
        let db = setup().await;
        let mut ghost = product("Ghost", 0);
        ghost.id = 42;

        assert!(matches!(
            db.products().update(&ghost).await.unwrap_err(),
            DbError::NotFound { .. }
        ));
        assert!(matches!(
            db.products().delete(42).await.unwrap_err(),
            DbError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_delete() {
        let db = setup().await;
        let stored = db.products().insert(&product("Widget", 0)).await.unwrap();

        db.products().delete(stored.id).await.unwrap();
        assert!(db.products().get_by_id(stored.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_low_stock_threshold_is_inclusive() {
        let db = setup().await;
        let repo = db.products();
        repo.insert(&product("At threshold", 0)).await.unwrap();
        repo.insert(&product("Below", 5)).await.unwrap();
        let mut healthy = product("Healthy", 5);
        healthy.current_stock = 6;
        repo.insert(&healthy).await.unwrap();

        let names: Vec<String> = repo
            .low_stock()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["At threshold", "Below"]);
    }

    #[tokio::test]
    async fn test_ledger_balances_empty() {
        let db = setup().await;
        db.products().insert(&product("Widget", 0)).await.unwrap();

        assert!(db.products().ledger_balances().await.unwrap().is_empty());
    }
}
