//! Split pane module
//!
//! Provides `SplitPaneController`, the editor/preview ratio driven by drag
//! input, and the scoped `DragGesture`.

mod controller;

pub use controller::*;
