//! Session module
//!
//! Provides:
//! - `AccountName` - Validated account store key
//! - `DesktopSession` - One signed-in account with its desktop components

mod manager;
mod types;

pub use manager::*;
pub use types::*;
