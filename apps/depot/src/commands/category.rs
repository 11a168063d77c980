//! # Category Commands

use tracing::{debug, info};

use depot_core::forms::{CategoryForm, Selection};

use crate::commands::refresh::{refresh_all, Refresh};
use crate::error::Alert;
use crate::state::{AppConfig, DbState};

pub async fn add_category(
    db: &DbState,
    config: &AppConfig,
    form: &CategoryForm,
) -> Result<Refresh, Alert> {
    debug!(name = %form.name, "add_category command");

    let input = form
        .parse()
        .map_err(|e| Alert::error(format!("Error adding category: {}", e)))?;
    let category = db
        .inner()
        .categories()
        .insert(&input.into_new_category())
        .await
        .map_err(|e| Alert::storage("Error adding category", e))?;

    info!(id = category.id, name = %category.name, "Category added");
    refresh_all(db, config).await
}

pub async fn update_category(
    db: &DbState,
    config: &AppConfig,
    selection: Selection,
    form: &CategoryForm,
) -> Result<Refresh, Alert> {
    let Some(id) = selection.id() else {
        return Err(Alert::warning("No category selected for update."));
    };
    debug!(id, "update_category command");

    let mut category = db
        .inner()
        .categories()
        .get_by_id(id)
        .await
        .map_err(|e| Alert::storage("Error updating category", e))?
        .ok_or_else(|| Alert::error(format!("Error updating category: Category not found: {}", id)))?;
    let input = form
        .parse()
        .map_err(|e| Alert::error(format!("Error updating category: {}", e)))?;

    input.apply_to(&mut category);
    db.inner()
        .categories()
        .update(&category)
        .await
        .map_err(|e| Alert::storage("Error updating category", e))?;

    info!(id, "Category updated");
    refresh_all(db, config).await
}

/// Deletes the selected category. Fails while products still reference it.
pub async fn delete_category(
    db: &DbState,
    config: &AppConfig,
    selection: Selection,
) -> Result<Refresh, Alert> {
    let Some(id) = selection.id() else {
        return Err(Alert::warning("No category selected for deletion."));
    };
    debug!(id, "delete_category command");

    db.inner()
        .categories()
        .delete(id)
        .await
        .map_err(|e| Alert::storage("Error deleting category", e))?;

    info!(id, "Category deleted");
    refresh_all(db, config).await
}

/// Pre-fills a category form from the selected row.
pub async fn category_form(db: &DbState, selection: Selection) -> Result<Option<CategoryForm>, Alert> {
    let Some(id) = selection.id() else {
        return Ok(None);
    };
    let category = db.inner().categories().get_by_id(id).await?;
    Ok(category.as_ref().map(CategoryForm::from_category))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::setup;
    use crate::error::Severity;

    fn form(name: &str) -> CategoryForm {
        CategoryForm {
            name: name.into(),
            description: "Misc".into(),
        }
    }

    #[tokio::test]
    async fn test_crud() {
        let (db, config) = setup().await;

        let refresh = add_category(&db, &config, &form("Paint")).await.unwrap();
        let id = refresh.categories[0].id;

        let refresh = update_category(&db, &config, Selection::of(id), &form("Paints"))
            .await
            .unwrap();
        assert_eq!(refresh.categories[0].name, "Paints");

        let refresh = delete_category(&db, &config, Selection::of(id)).await.unwrap();
        assert!(refresh.categories.is_empty());
    }

    #[tokio::test]
    async fn test_alerts() {
        let (db, config) = setup().await;

        let alert = add_category(&db, &config, &form("")).await.unwrap_err();
        assert!(alert.message.starts_with("Error adding category: "));

        let alert = update_category(&db, &config, Selection::none(), &form("X"))
            .await
            .unwrap_err();
        assert_eq!(alert.severity, Severity::Warning);
        assert_eq!(alert.message, "No category selected for update.");

        let alert = delete_category(&db, &config, Selection::none()).await.unwrap_err();
        assert_eq!(alert.message, "No category selected for deletion.");

        let alert = update_category(&db, &config, Selection::of(77), &form("X"))
            .await
            .unwrap_err();
        assert_eq!(alert.message, "Error updating category: Category not found: 77");
    }
}
