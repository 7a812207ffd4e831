//! Nova Desk - A multi-window desktop with a live-preview web editor
//!
//! Users sign in, then open overlapping, focusable windows (an editor and a
//! file explorer) above a taskbar. The editor composes the workspace's
//! markup, style and script files into one sandboxed document as you type.
//!
//! # Modules
//!
//! - [`desktop`] - Window descriptors, stacking order and focus
//! - [`workspace`] - Editable file buffer with explicit save
//! - [`preview`] - Sandboxed document compositor and live cache
//! - [`split`] - Editor/preview ratio driven by drag input
//! - [`session`] - Signed-in desktop session
//! - [`config`] - Configuration and the account store
//! - [`tui`] - Terminal desktop with ratatui
//! - [`error`] - Error types

pub mod config;
pub mod desktop;
pub mod error;
pub mod preview;
pub mod session;
pub mod split;
pub mod tui;
pub mod workspace;

pub use config::{AccountStore, Config, JsonAccountStore, MemoryAccountStore};
pub use desktop::{WindowDescriptor, WindowKind, WindowManager};
pub use error::{Error, Result};
pub use preview::{compose, LivePreview, PreviewDocument, PreviewOptions, SandboxPolicy};
pub use session::{AccountName, DesktopSession};
pub use split::{SplitBounds, SplitPaneController, TrackRegion};
pub use workspace::{ArtifactKind, FileArtifact, FileId, FileWorkspace};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
