//! # Supplier Repository
//!
//! Plain CRUD over the `suppliers` table.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use depot_core::Supplier;

#[derive(Debug, Clone)]
pub struct SupplierRepository {
    pool: SqlitePool,
}

impl SupplierRepository {
    pub fn new(pool: SqlitePool) -> Self {
        SupplierRepository { pool }
    }

    /// Lists every supplier, ordered by id.
    pub async fn get_all(&self) -> DbResult<Vec<Supplier>> {
        let suppliers = sqlx::query_as::<_, Supplier>(
            r#"
            SELECT id, name, contact_person, phone, email, address
            FROM suppliers
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = suppliers.len(), "Loaded suppliers");
        Ok(suppliers)
    }

    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Supplier>> {
        let supplier = sqlx::query_as::<_, Supplier>(
            r#"
            SELECT id, name, contact_person, phone, email, address
            FROM suppliers
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(supplier)
    }

    /// Inserts a supplier and returns it with its assigned id.
    pub async fn insert(&self, supplier: &Supplier) -> DbResult<Supplier> {
        debug!(name = %supplier.name, "Inserting supplier");

        let result = sqlx::query(
            r#"
            INSERT INTO suppliers (name, contact_person, phone, email, address)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&supplier.name)
        .bind(&supplier.contact_person)
        .bind(&supplier.phone)
        .bind(&supplier.email)
        .bind(&supplier.address)
        .execute(&self.pool)
        .await?;

        let mut stored = supplier.clone();
        stored.id = result.last_insert_rowid();
        Ok(stored)
    }

    pub async fn update(&self, supplier: &Supplier) -> DbResult<()> {
        debug!(id = supplier.id, "Updating supplier");

        let result = sqlx::query(
            r#"
            UPDATE suppliers SET
                name = ?2,
                contact_person = ?3,
                phone = ?4,
                email = ?5,
                address = ?6
            WHERE id = ?1
            "#,
        )
        .bind(supplier.id)
        .bind(&supplier.name)
        .bind(&supplier.contact_person)
        .bind(&supplier.phone)
        .bind(&supplier.email)
        .bind(&supplier.address)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Supplier", supplier.id));
        }

        Ok(())
    }

    /// Deletes a supplier.
    ///
    /// ## Errors
    /// * `DbError::ForeignKeyViolation` - products still reference it
    /// * `DbError::NotFound` - no such supplier
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting supplier");

        let result = sqlx::query("DELETE FROM suppliers WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Supplier", id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig, DbError};
    use depot_core::{Category, Product, Supplier};

    fn acme() -> Supplier {
        Supplier {
            id: 0,
            name: "Acme".to_string(),
            contact_person: "Wile E.".to_string(),
            phone: "555-0100".to_string(),
            email: "orders@acme.test".to_string(),
            address: "1 Desert Rd".to_string(),
        }
    }

    #[tokio::test]
    async fn test_supplier_crud() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.suppliers();

        let mut stored = repo.insert(&acme()).await.unwrap();
        assert_eq!(stored.id, 1);

        stored.phone = "555-0199".to_string();
        repo.update(&stored).await.unwrap();
        assert_eq!(repo.get_all().await.unwrap(), vec![stored.clone()]);

        repo.delete(stored.id).await.unwrap();
        assert!(repo.get_by_id(stored.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_referenced_supplier_fails() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let supplier = db.suppliers().insert(&acme()).await.unwrap();
        let category = db
            .categories()
            .insert(&Category {
                id: 0,
                name: "Tools".to_string(),
                description: String::new(),
            })
            .await
            .unwrap();
        db.products()
            .insert(&Product {
                id: 0,
                name: "Anvil".to_string(),
                description: String::new(),
                category_id: category.id,
                supplier_id: supplier.id,
                cost_cents: 1000,
                selling_cents: 2500,
                reorder_level: 1,
                current_stock: 0,
            })
            .await
            .unwrap();

        let err = db.suppliers().delete(supplier.id).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
        assert!(db.suppliers().get_by_id(supplier.id).await.unwrap().is_some());
    }
}
