//! # Validation Module
//!
//! Field parsing and rule checks for Depot forms.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Form text (forms.rs)                                         │
//! │  └── Raw strings exactly as typed                                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Text → number coercion (parse_id, parse_count, parse_money)       │
//! │  └── Business rules (name present, quantity > 0, price >= 0)           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  └── Foreign key constraints (category, supplier, product)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every function returns a typed [`ValidationResult`]; nothing here panics
//! or relies on exceptions for control flow.

use crate::error::ValidationError;
use crate::money::Money;
use crate::{MAX_MOVEMENT_QUANTITY, MAX_TEXT_LENGTH};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Coercion
// =============================================================================

/// Parses an integer field (ids, reorder level, quantities).
///
/// Surrounding whitespace is ignored; anything else that is not a plain
/// integer yields [`ValidationError::InvalidNumber`].
///
/// ## Example
/// ```rust
/// use depot_core::validation::parse_integer;
///
/// assert_eq!(parse_integer("quantity", " 5 ").unwrap(), 5);
/// assert!(parse_integer("quantity", "five").is_err());
/// ```
pub fn parse_integer(field: &str, text: &str) -> ValidationResult<i64> {
    text.trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidNumber {
            field: field.to_string(),
            input: text.to_string(),
        })
}

/// Parses a record id reference (category, supplier, product).
///
/// ## Rules
/// - Must be an integer
/// - Must be positive (storage ids start at 1)
pub fn parse_id(field: &str, text: &str) -> ValidationResult<i64> {
    let id = parse_integer(field, text)?;
    if id <= 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }
    Ok(id)
}

/// Parses a non-negative count (reorder level).
pub fn parse_count(field: &str, text: &str) -> ValidationResult<i64> {
    let count = parse_integer(field, text)?;
    if count < 0 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        });
    }
    Ok(count)
}

/// Parses a price field into [`Money`].
///
/// ## Rules
/// - Decimal text with at most two fractional digits
/// - Must be non-negative (zero is allowed)
///
/// ## Example
/// ```rust
/// use depot_core::validation::parse_money;
///
/// assert_eq!(parse_money("cost price", "2.00").unwrap().cents(), 200);
/// assert!(parse_money("cost price", "-1").is_err());
/// assert!(parse_money("cost price", "two").is_err());
/// ```
pub fn parse_money(field: &str, text: &str) -> ValidationResult<Money> {
    let money = Money::parse_decimal(text).ok_or_else(|| ValidationError::InvalidNumber {
        field: field.to_string(),
        input: text.to_string(),
    })?;
    validate_price_cents(field, money.cents())?;
    Ok(money)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a stock movement quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed [`MAX_MOVEMENT_QUANTITY`]
///
/// ## User Workflow
/// ```text
/// User enters quantity: -3, clicks Stock Out
///      │
///      ▼
/// validate_quantity(-3) ← THIS FUNCTION
///      │
///      ├── qty <= 0?   → Error: "quantity must be positive"
///      ├── qty > max?  → Error: "quantity must be between 1 and ..."
///      └── OK → record the transaction
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_MOVEMENT_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_MOVEMENT_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price in cents (zero allowed).
pub fn validate_price_cents(field: &str, cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a required name and returns it trimmed.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most [`MAX_TEXT_LENGTH`] characters
pub fn validate_name(field: &str, name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    validate_text(field, name)
}

/// Validates an optional free-text field and returns it trimmed.
///
/// Empty is fine; overly long text is not.
pub fn validate_text(field: &str, text: &str) -> ValidationResult<String> {
    let text = text.trim();

    if text.chars().count() > MAX_TEXT_LENGTH {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_TEXT_LENGTH,
        });
    }

    Ok(text.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================
