//! # Depot Entry Point
//!
//! ```text
//! depot <product|supplier|category|low-stock|transactions|audit|status> ...
//! ```
//!
//! The actual setup is in lib.rs for better testability.

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    depot::run().await
}
