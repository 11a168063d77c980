//! # Category Repository
//!
//! Plain CRUD over the `categories` table.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use depot_core::Category;

#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        CategoryRepository { pool }
    }

    /// Lists every category, ordered by id.
    pub async fn get_all(&self) -> DbResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, description FROM categories ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = categories.len(), "Loaded categories");
        Ok(categories)
    }

    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, description FROM categories WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    pub async fn insert(&self, category: &Category) -> DbResult<Category> {
        debug!(name = %category.name, "Inserting category");

        let result = sqlx::query("INSERT INTO categories (name, description) VALUES (?1, ?2)")
            .bind(&category.name)
            .bind(&category.description)
            .execute(&self.pool)
            .await?;

        let mut stored = category.clone();
        stored.id = result.last_insert_rowid();
        Ok(stored)
    }

    pub async fn update(&self, category: &Category) -> DbResult<()> {
        debug!(id = category.id, "Updating category");

        let result = sqlx::query("UPDATE categories SET name = ?2, description = ?3 WHERE id = ?1")
            .bind(category.id)
            .bind(&category.name)
            .bind(&category.description)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Category", category.id));
        }

        Ok(())
    }

    /// Deletes a category; fails while products still reference it.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting category");

        let result = sqlx::query("DELETE FROM categories WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Category", id));
        }

        Ok(())
    }
}
