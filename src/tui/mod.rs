//! Terminal UI module using ratatui
//!
//! Event-driven desktop with:
//! - Overlapping windows painted back to front with focus highlighting
//! - Editor with tabs and a draggable editor/preview divider
//! - File explorer list
//! - Taskbar with window toggles and a clock
//! - Modal overlays for input and confirmation

mod app;
mod event;
mod layout;
pub mod theme;
mod widgets;

pub use app::*;
pub use event::*;
pub use layout::*;
