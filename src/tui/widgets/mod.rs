//! TUI widgets
//!
//! Custom ratatui widgets for the desktop:
//! - `FileList` - Explorer rows with kind markers
//! - `Preview` - Composed document source view
//! - `Taskbar` - Window buttons, status and clock

mod file_list;
mod preview;
mod taskbar;

pub use file_list::*;
pub use preview::*;
pub use taskbar::*;
