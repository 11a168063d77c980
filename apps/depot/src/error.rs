//! # Alerts and App Errors
//!
//! Every controller command ends in either a refreshed view or an [`Alert`].
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Depot                                  │
//! │                                                                         │
//! │  depot product add --name Widget --cost abc                            │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function → Result<Refresh, Alert>                       │  │
//! │  │         │                                                        │  │
//! │  │  Nothing selected? ── WARNING "No product selected ..." ───┐    │  │
//! │  │         │                                                  │    │  │
//! │  │  Form parse failed? ── ERROR "Invalid numeric input ..." ──┤    │  │
//! │  │         │                                                  │    │  │
//! │  │  Storage failed? ── DbError (logged) ── ERROR "Error ..." ─┤    │  │
//! │  │         │                                                  ▼    │  │
//! │  │  Success ───────────────────────────────────────────► terminal  │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing is retried; each alert ends the action that raised it.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

use depot_core::{CoreError, ValidationError};
use depot_db::DbError;

/// How serious an alert is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Non-fatal: nothing selected, low stock.
    Warning,
    /// The operation was aborted.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("WARNING"),
            Severity::Error => f.write_str("ERROR"),
        }
    }
}

/// A message for the user, shown after the action that raised it.
///
/// ## Serialization
/// ```json
/// { "severity": "WARNING", "message": "No product selected for update." }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub severity: Severity,
    pub message: String,
}

impl Alert {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Alert {
            severity,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Alert::new(Severity::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Alert::new(Severity::Error, message)
    }

    /// A storage failure during `action`, e.g. "Error adding supplier".
    ///
    /// Stock rule violations keep their own message; everything else is
    /// logged and prefixed with the action.
    pub fn storage(action: &str, err: DbError) -> Self {
        match err {
            DbError::Core(core) => Alert::from(core),
            other => {
                tracing::error!(action, error = %other, "Storage operation failed");
                Alert::error(format!("{}: {}", action, other))
            }
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

impl std::error::Error for Alert {}

/// Converts database errors to alerts.
impl From<DbError> for Alert {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Core(core) => Alert::from(core),
            DbError::NotFound { entity, id } => {
                Alert::error(format!("{} not found: {}", entity, id))
            }
            DbError::ForeignKeyViolation { message } => {
                tracing::error!("Foreign key violation: {}", message);
                Alert::error("Invalid reference: the referenced record does not exist or is still in use")
            }
            other => {
                tracing::error!(error = %other, "Database operation failed");
                Alert::error(other.to_string())
            }
        }
    }
}

/// Converts core errors to alerts.
impl From<CoreError> for Alert {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => Alert::error(format!("Product not found: {}", id)),
            CoreError::InsufficientStock {
                product_id,
                available,
                requested,
            } => Alert::error(format!(
                "Insufficient stock for product {}: {} available, {} requested",
                product_id, available, requested
            )),
            CoreError::Validation(e) => Alert::from(e),
        }
    }
}

impl From<ValidationError> for Alert {
    fn from(err: ValidationError) -> Self {
        Alert::error(err.to_string())
    }
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors while loading `depot.toml` or locating the data directory.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Could not determine app data directory")]
    NoDataDir,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_display() {
        assert_eq!(
            Alert::warning("No product selected for update.").to_string(),
            "WARNING: No product selected for update."
        );
        assert!(Alert::error("boom").is_error());
        assert!(!Alert::warning("hm").is_error());
    }

    #[test]
    fn test_alert_serializes_severity_tag() {
        let json = serde_json::to_string(&Alert::warning("Low")).unwrap();
        assert_eq!(json, r#"{"severity":"WARNING","message":"Low"}"#);
    }

    #[test]
    fn test_storage_alert_prefixes_action() {
        let alert = Alert::storage("Error adding supplier", DbError::QueryFailed("disk".into()));
        assert_eq!(alert.message, "Error adding supplier: Query failed: disk");
        assert!(alert.is_error());
    }

    #[test]
    fn test_stock_rule_keeps_its_message() {
        let err = DbError::Core(CoreError::InsufficientStock {
            product_id: 3,
            available: 1,
            requested: 4,
        });
        let alert = Alert::storage("Error recording stock-out", err);
        assert_eq!(
            alert.message,
            "Insufficient stock for product 3: 1 available, 4 requested"
        );
    }
}
