//! Error types for nova-desk
//!
//! Uses `thiserror` for ergonomic error definitions with automatic `Display` and `Error` impls.
//! Script failures inside the preview sandbox have no representation here: they
//! never reach the host.

use std::path::PathBuf;

use thiserror::Error;

use crate::desktop::WindowKind;
use crate::workspace::FileId;

/// Top-level error type for nova-desk
#[derive(Error, Debug)]
pub enum Error {
    #[error("Window error: {0}")]
    Window(#[from] WindowError),

    #[error("Workspace error: {0}")]
    Workspace(#[from] WorkspaceError),

    #[error("Split pane error: {0}")]
    Split(#[from] SplitError),

    #[error("Account error: {0}")]
    Account(#[from] AccountError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("TUI error: {0}")]
    Tui(#[from] TuiError),
}

/// Window manager errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WindowError {
    #[error("Window not managed by this desktop: {0}")]
    NotFound(WindowKind),

    #[error("Unknown window kind '{0}'")]
    UnknownKind(String),

    #[error("Window {0} is closed; open it before raising")]
    NotOpen(WindowKind),
}

/// File workspace errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkspaceError {
    #[error("File not found in workspace: {0}")]
    FileNotFound(FileId),

    #[error("Invalid file name '{name}': {reason}")]
    InvalidFileName { name: String, reason: String },

    #[error("Unsupported file type for '{0}' (expected .html, .css or .js)")]
    UnsupportedKind(String),

    #[error("A file named '{0}' already exists")]
    DuplicateName(String),
}

/// Split pane errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SplitError {
    #[error("Invalid split bounds [{min}, {max}]: need 0 <= min < max <= 100")]
    InvalidBounds { min: f64, max: f64 },

    #[error("Invalid tracking region width: {0}")]
    InvalidRegion(f64),
}

/// Account store errors
#[derive(Error, Debug)]
pub enum AccountError {
    #[error("Account not found: {0}")]
    NotFound(String),

    #[error("Account already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid account name or password")]
    InvalidCredentials,

    #[error("Invalid account name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("Failed to load account store: {0}")]
    LoadFailed(String),

    #[error("Failed to save account store: {0}")]
    SaveFailed(String),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("Failed to save configuration: {0}")]
    SaveFailed(String),

    #[error("Invalid configuration value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Failed to create config directory: {0}")]
    DirectoryCreationFailed(PathBuf),
}

/// TUI-related errors
#[derive(Error, Debug)]
pub enum TuiError {
    #[error("Failed to initialize terminal: {0}")]
    InitFailed(String),

    #[error("Failed to restore terminal: {0}")]
    RestoreFailed(String),

    #[error("Render error: {0}")]
    RenderError(String),
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = WindowError::NotOpen(WindowKind::Editor);
        assert!(err.to_string().contains("closed"));

        let err = WorkspaceError::FileNotFound(FileId::from("42"));
        assert!(err.to_string().contains("42"));

        let err = AccountError::InvalidCredentials;
        assert!(err.to_string().contains("password"));

        let err = SplitError::InvalidBounds { min: 80.0, max: 20.0 };
        assert!(err.to_string().contains("[80, 20]"));
    }

    #[test]
    fn test_error_conversion() {
        let window_err = WindowError::UnknownKind("TERMINAL".to_string());
        let top_err: Error = window_err.into();
        assert!(matches!(top_err, Error::Window(WindowError::UnknownKind(_))));

        let account_err = AccountError::SaveFailed("disk full".to_string());
        let top_err: Error = account_err.into();
        assert!(top_err.to_string().contains("disk full"));
    }
}
