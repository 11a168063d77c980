//! # Transaction Repository
//!
//! Stock movements (the IN / OUT ledger) and their history.
//!
//! ## Recording a Movement
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  record(&movement, allow_negative)                                     │
//! │                                                                         │
//! │  BEGIN                                                                 │
//! │    SELECT current_stock FROM products WHERE id = ?                     │
//! │       │  missing → ProductNotFound, rollback                           │
//! │       ▼                                                                 │
//! │    apply_movement(stock, movement, allow_negative)                     │
//! │       │  OUT below zero → InsufficientStock, rollback                  │
//! │       ▼                                                                 │
//! │    UPDATE products SET current_stock = current_stock + delta           │
//! │    INSERT INTO transactions (...)                                      │
//! │  COMMIT                                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The ledger row and the stock change are written together or not at all.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use depot_core::stock::{apply_movement, StockMovement};
use depot_core::{CoreError, Transaction};

/// Repository for stock transactions.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    pool: SqlitePool,
}

impl TransactionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        TransactionRepository { pool }
    }

    /// Records a stock movement and applies it to the product's stock.
    ///
    /// ## Errors
    /// * `DbError::Core(ProductNotFound)` - product doesn't exist
    /// * `DbError::Core(InsufficientStock)` - OUT would go negative and
    ///   `allow_negative` is false
    pub async fn record(
        &self,
        movement: &StockMovement,
        allow_negative: bool,
    ) -> DbResult<Transaction> {
        debug!(
            product_id = movement.product_id,
            kind = %movement.transaction_type,
            quantity = movement.quantity,
            "Recording stock movement"
        );

        let mut tx = self.pool.begin().await?;

        let current: Option<i64> =
            sqlx::query_scalar("SELECT current_stock FROM products WHERE id = ?1")
                .bind(movement.product_id)
                .fetch_optional(&mut *tx)
                .await?;

        let current = current.ok_or(CoreError::ProductNotFound(movement.product_id))?;
        let next = apply_movement(current, movement, allow_negative)?;

        sqlx::query("UPDATE products SET current_stock = current_stock + ?2 WHERE id = ?1")
            .bind(movement.product_id)
            .bind(movement.delta())
            .execute(&mut *tx)
            .await?;

        let created_at = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO transactions (product_id, transaction_type, quantity, remarks, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(movement.product_id)
        .bind(movement.transaction_type)
        .bind(movement.quantity)
        .bind(&movement.remarks)
        .bind(created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(
            product_id = movement.product_id,
            kind = %movement.transaction_type,
            quantity = movement.quantity,
            stock = next,
            "Stock movement recorded"
        );

        Ok(Transaction {
            id: result.last_insert_rowid(),
            product_id: movement.product_id,
            transaction_type: movement.transaction_type,
            quantity: movement.quantity,
            remarks: movement.remarks.clone(),
            created_at,
        })
    }

    /// Every transaction, newest first.
    pub async fn list_all(&self) -> DbResult<Vec<Transaction>> {
        let transactions = sqlx::query_as::<_, Transaction>(
            r#"
            SELECT id, product_id, transaction_type, quantity, remarks, created_at
            FROM transactions
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(transactions)
    }

    /// One product's transactions, newest first.
    pub async fn list_for_product(&self, product_id: i64) -> DbResult<Vec<Transaction>> {
        let transactions = sqlx::query_as::<_, Transaction>(
            r#"
            SELECT id, product_id, transaction_type, quantity, remarks, created_at
            FROM transactions
            WHERE product_id = ?1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(transactions)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig, DbError};
    use depot_core::stock::{find_drift, StockMovement};
    use depot_core::{Category, CoreError, Product, Supplier, TransactionType};

    async fn setup() -> (Database, Product) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let category = db
            .categories()
            .insert(&Category {
                id: 0,
                name: "Hardware".to_string(),
                description: String::new(),
            })
            .await
            .unwrap();
        let supplier = db
            .suppliers()
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
        let product = db
            .products()
            .insert(&Product {
                id: 0,
                name: "Widget".to_string(),
                description: String::new(),
                category_id: category.id,
                supplier_id: supplier.id,
                cost_cents: 200,
                selling_cents: 500,
                reorder_level: 10,
                current_stock: 0,
            })
            .await
            .unwrap();
        (db, product)
    }

    fn movement(product_id: i64, kind: TransactionType, quantity: i64) -> StockMovement {
        StockMovement::new(product_id, kind, quantity, None).unwrap()
    }

    async fn stock_of(db: &Database, id: i64) -> i64 {
        db.products()
            .get_by_id(id)
            .await
            .unwrap()
            .unwrap()
            .current_stock
    }

    #[tokio::test]
    async fn test_stock_in_inserts_one_row() {
        let (db, product) = setup().await;
        let repo = db.transactions();

        let recorded = repo
            .record(&movement(product.id, TransactionType::In, 5), false)
            .await
            .unwrap();

        assert_eq!(recorded.transaction_type, TransactionType::In);
        assert_eq!(recorded.quantity, 5);
        assert_eq!(recorded.remarks, "Stock In");

        let history = repo.list_for_product(product.id).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, recorded.id);
        assert_eq!(history[0].transaction_type, TransactionType::In);
        assert_eq!(history[0].quantity, 5);
        assert_eq!(stock_of(&db, product.id).await, 5);
    }

    #[tokio::test]
    async fn test_stock_out_moves_stock_down() {
        let (db, product) = setup().await;
        let repo = db.transactions();

        repo.record(&movement(product.id, TransactionType::In, 8), false)
            .await
            .unwrap();
        repo.record(&movement(product.id, TransactionType::Out, 3), false)
            .await
            .unwrap();

        assert_eq!(stock_of(&db, product.id).await, 5);

        let history = repo.list_all().await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].transaction_type, TransactionType::Out);
    }

    #[tokio::test]
    async fn test_stock_out_beyond_stock_is_rejected() {
        let (db, product) = setup().await;
        let repo = db.transactions();

        let err = repo
            .record(&movement(product.id, TransactionType::Out, 1), false)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DbError::Core(CoreError::InsufficientStock { .. })
        ));
        assert!(repo.list_all().await.unwrap().is_empty());
        assert_eq!(stock_of(&db, product.id).await, 0);
    }

    #[tokio::test]
    async fn test_negative_stock_when_allowed() {
        let (db, product) = setup().await;

        db.transactions()
            .record(&movement(product.id, TransactionType::Out, 2), true)
            .await
            .unwrap();

        assert_eq!(stock_of(&db, product.id).await, -2);
    }

    #[tokio::test]
    async fn test_movement_for_missing_product() {
        let (db, _) = setup().await;

        let err = db
            .transactions()
            .record(&movement(404, TransactionType::In, 1), false)
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::Core(CoreError::ProductNotFound(404))));
    }

    #[tokio::test]
    async fn test_ledger_matches_stock() {
        let (db, product) = setup().await;
        let repo = db.transactions();
        repo.record(&movement(product.id, TransactionType::In, 10), false)
            .await
            .unwrap();
        repo.record(&movement(product.id, TransactionType::Out, 4), false)
            .await
            .unwrap();

        let products = db.products().get_all().await.unwrap();
        let balances = db.products().ledger_balances().await.unwrap();
        assert_eq!(balances.get(&product.id), Some(&6));
        assert!(find_drift(&products, &balances).is_empty());
    }

    #[tokio::test]
    async fn test_deleting_product_removes_history() {
        let (db, product) = setup().await;
        db.transactions()
            .record(&movement(product.id, TransactionType::In, 1), false)
            .await
            .unwrap();

        db.products().delete(product.id).await.unwrap();
        assert!(db.transactions().list_all().await.unwrap().is_empty());
    }
}
