//! Desktop window management module
//!
//! Provides:
//! - `WindowKind` / `WindowDescriptor` - The fixed set of application windows
//! - `WindowManager` - Open state, stacking order and focus

mod manager;
mod types;

pub use manager::*;
pub use types::*;
