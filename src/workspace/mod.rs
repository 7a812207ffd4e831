//! File workspace module
//!
//! Provides:
//! - `FileArtifact` - One markup, style or script source
//! - `FileWorkspace` - The session's editable buffer with explicit save

mod types;
#[allow(clippy::module_inception)]
mod workspace;

pub use types::*;
pub use workspace::*;
