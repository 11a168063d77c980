//! # Form Requests
//!
//! Explicit request objects standing in for the text fields of the
//! product, supplier and category forms, plus the table [`Selection`].
//!
//! ## Flow
//! ```text
//! ProductForm (raw text)  ──parse()──►  ProductInput (typed)
//!                                           │
//!                     ┌─────────────────────┴──────────────────┐
//!                     ▼                                        ▼
//!           into_new_product()                       apply_to(&mut Product)
//!           (id = 0, stock = 0)                      (edit selected row)
//! ```
//!
//! Parsing either yields a complete typed input or the first
//! [`ValidationError`]; nothing is half-applied.

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{Category, Product, Supplier};
use crate::validation::{
    parse_count, parse_id, parse_money, validate_name, validate_text, ValidationResult,
};
use crate::UNASSIGNED_ID;

// =============================================================================
// Product
// =============================================================================

/// Raw product form fields, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub category_id: String,
    pub supplier_id: String,
    pub cost_price: String,
    pub selling_price: String,
    pub reorder_level: String,
}

/// Parsed and validated product fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    pub category_id: i64,
    pub supplier_id: i64,
    pub cost: Money,
    pub selling_price: Money,
    pub reorder_level: i64,
}

impl ProductForm {
    /// Pre-fills the form from an existing product (edit dialogs).
    pub fn from_product(product: &Product) -> Self {
        ProductForm {
            name: product.name.clone(),
            description: product.description.clone(),
            category_id: product.category_id.to_string(),
            supplier_id: product.supplier_id.to_string(),
            cost_price: product.cost().to_string(),
            selling_price: product.selling_price().to_string(),
            reorder_level: product.reorder_level.to_string(),
        }
    }

    /// Parses every field, in form order.
    pub fn parse(&self) -> ValidationResult<ProductInput> {
        Ok(ProductInput {
            name: validate_name("name", &self.name)?,
            description: validate_text("description", &self.description)?,
            category_id: parse_id("category id", &self.category_id)?,
            supplier_id: parse_id("supplier id", &self.supplier_id)?,
            cost: parse_money("cost price", &self.cost_price)?,
            selling_price: parse_money("selling price", &self.selling_price)?,
            reorder_level: parse_count("reorder level", &self.reorder_level)?,
        })
    }
}

impl ProductInput {
    /// Builds a not-yet-stored product. Stock starts at zero.
    pub fn into_new_product(self) -> Product {
        Product {
            id: UNASSIGNED_ID,
            name: self.name,
            description: self.description,
            category_id: self.category_id,
            supplier_id: self.supplier_id,
            cost_cents: self.cost.cents(),
            selling_cents: self.selling_price.cents(),
            reorder_level: self.reorder_level,
            current_stock: 0,
        }
    }

    /// Overwrites the editable fields of `product`.
    ///
    /// `id` and `current_stock` are left alone; stock only moves through
    /// transactions.
    pub fn apply_to(self, product: &mut Product) {
        product.name = self.name;
        product.description = self.description;
        product.category_id = self.category_id;
        product.supplier_id = self.supplier_id;
        product.cost_cents = self.cost.cents();
        product.selling_cents = self.selling_price.cents();
        product.reorder_level = self.reorder_level;
    }
}

// =============================================================================
// Supplier
// =============================================================================

/// Raw supplier form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierForm {
    pub name: String,
    pub contact_person: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

/// Parsed supplier fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupplierInput {
    pub name: String,
    pub contact_person: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

impl SupplierForm {
    pub fn from_supplier(supplier: &Supplier) -> Self {
        SupplierForm {
            name: supplier.name.clone(),
            contact_person: supplier.contact_person.clone(),
            phone: supplier.phone.clone(),
            email: supplier.email.clone(),
            address: supplier.address.clone(),
        }
    }

    pub fn parse(&self) -> ValidationResult<SupplierInput> {
        Ok(SupplierInput {
            name: validate_name("supplier name", &self.name)?,
            contact_person: validate_text("contact person", &self.contact_person)?,
            phone: validate_text("phone", &self.phone)?,
            email: validate_text("email", &self.email)?,
            address: validate_text("address", &self.address)?,
        })
    }
}

impl SupplierInput {
    pub fn into_new_supplier(self) -> Supplier {
        Supplier {
            id: UNASSIGNED_ID,
            name: self.name,
            contact_person: self.contact_person,
            phone: self.phone,
            email: self.email,
            address: self.address,
        }
    }

    pub fn apply_to(self, supplier: &mut Supplier) {
        supplier.name = self.name;
        supplier.contact_person = self.contact_person;
        supplier.phone = self.phone;
        supplier.email = self.email;
        supplier.address = self.address;
    }
}

// =============================================================================
// Category
// =============================================================================

/// Raw category form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryForm {
    pub name: String,
    pub description: String,
}

/// Parsed category fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryInput {
    pub name: String,
    pub description: String,
}

impl CategoryForm {
    pub fn from_category(category: &Category) -> Self {
        CategoryForm {
            name: category.name.clone(),
            description: category.description.clone(),
        }
    }

    pub fn parse(&self) -> ValidationResult<CategoryInput> {
        Ok(CategoryInput {
            name: validate_name("category name", &self.name)?,
            description: validate_text("description", &self.description)?,
        })
    }
}

impl CategoryInput {
    pub fn into_new_category(self) -> Category {
        Category {
            id: UNASSIGNED_ID,
            name: self.name,
            description: self.description,
        }
    }

    pub fn apply_to(self, category: &mut Category) {
        category.name = self.name;
        category.description = self.description;
    }
}

// =============================================================================
// Selection
// =============================================================================

/// The row currently selected in a table, if any.
///
/// Update, delete and stock actions act on the selection; with nothing
/// selected they are no-ops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection(Option<i64>);

impl Selection {
    /// Nothing selected.
    pub const fn none() -> Self {
        Selection(None)
    }

    /// The row with the given id is selected.
    pub const fn of(id: i64) -> Self {
        Selection(Some(id))
    }

    pub const fn id(&self) -> Option<i64> {
        self.0
    }

    pub const fn is_empty(&self) -> bool {
        self.0.is_none()
    }
}

impl From<Option<i64>> for Selection {
    fn from(id: Option<i64>) -> Self {
        Selection(id)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValidationError;

    fn widget_form() -> ProductForm {
        ProductForm {
            name: "Widget".to_string(),
            description: "Blue".to_string(),
            category_id: "1".to_string(),
            supplier_id: "2".to_string(),
            cost_price: "2.00".to_string(),
            selling_price: "5.00".to_string(),
            reorder_level: "10".to_string(),
        }
    }

    #[test]
    fn test_product_form_parses_into_new_product() {
        let product = widget_form().parse().unwrap().into_new_product();

        assert_eq!(product.id, UNASSIGNED_ID);
        assert_eq!(product.name, "Widget");
        assert_eq!(product.category_id, 1);
        assert_eq!(product.supplier_id, 2);
        assert_eq!(product.cost_cents, 200);
        assert_eq!(product.selling_cents, 500);
        assert_eq!(product.reorder_level, 10);
        assert_eq!(product.current_stock, 0);
    }

    #[test]
    fn test_product_form_reports_numeric_failure() {
        let mut form = widget_form();
        form.cost_price = "cheap".to_string();

        let err = form.parse().unwrap_err();
        assert!(err.is_numeric());
    }

    #[test]
    fn test_product_form_requires_name() {
        let mut form = widget_form();
        form.name = "  ".to_string();

        assert_eq!(
            form.parse().unwrap_err(),
            ValidationError::Required {
                field: "name".to_string()
            }
        );
    }

    #[test]
    fn test_apply_keeps_identity_and_stock() {
        let mut product = widget_form().parse().unwrap().into_new_product();
        product.id = 9;
        product.current_stock = 4;

        let mut form = ProductForm::from_product(&product);
        form.name = "Widget XL".to_string();
        form.selling_price = "7.50".to_string();
        form.parse().unwrap().apply_to(&mut product);

        assert_eq!(product.id, 9);
        assert_eq!(product.current_stock, 4);
        assert_eq!(product.name, "Widget XL");
        assert_eq!(product.selling_cents, 750);
        assert_eq!(product.cost_cents, 200);
    }

    #[test]
    fn test_supplier_form_allows_empty_optional_fields() {
        let form = SupplierForm {
            name: "Acme".to_string(),
            ..SupplierForm::default()
        };

        let supplier = form.parse().unwrap().into_new_supplier();
        assert_eq!(supplier.id, UNASSIGNED_ID);
        assert_eq!(supplier.name, "Acme");
        assert!(supplier.email.is_empty());
        assert!(SupplierForm::default().parse().is_err());
    }

    #[test]
    fn test_category_form_round_trip_through_record() {
        let mut category = CategoryForm {
            name: "Tools".to_string(),
            description: "Hand tools".to_string(),
        }
        .parse()
        .unwrap()
        .into_new_category();
        category.id = 3;

        let mut form = CategoryForm::from_category(&category);
        form.description = "Hand and power tools".to_string();
        form.parse().unwrap().apply_to(&mut category);

        assert_eq!(category.id, 3);
        assert_eq!(category.description, "Hand and power tools");
    }

    #[test]
    fn test_selection() {
        assert!(Selection::none().is_empty());
        assert_eq!(Selection::of(4).id(), Some(4));
        assert_eq!(Selection::from(None), Selection::default());
    }
}
