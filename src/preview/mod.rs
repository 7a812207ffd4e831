//! Live preview module
//!
//! Provides:
//! - `compose` - Pure workspace snapshot -> sandboxed HTML document
//! - `SandboxPolicy` - Capabilities granted to the rendering context
//! - `LivePreview` - Per-revision cache invalidated by workspace edits

mod compositor;
mod live;

pub use compositor::*;
pub use live::*;
