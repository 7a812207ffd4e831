//! Window descriptor types
//!
//! The set of windows is closed: every desktop knows the same small list of
//! application kinds, and descriptors are toggled rather than created.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::WindowError;

/// Application window kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WindowKind {
    /// Code editor with live preview
    Editor,
    /// File browser
    Explorer,
}

impl WindowKind {
    /// Every window kind, in taskbar order
    pub const ALL: [WindowKind; 2] = [WindowKind::Editor, WindowKind::Explorer];

    /// Title shown in the window frame
    pub fn title(&self) -> &'static str {
        match self {
            Self::Editor => "Nova IDE",
            Self::Explorer => "File Explorer",
        }
    }

    /// Short label for the taskbar
    pub fn label(&self) -> &'static str {
        match self {
            Self::Editor => "IDE",
            Self::Explorer => "Explorer",
        }
    }
}

impl fmt::Display for WindowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Editor => write!(f, "EDITOR"),
            Self::Explorer => write!(f, "EXPLORER"),
        }
    }
}

impl FromStr for WindowKind {
    type Err = WindowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "EDITOR" | "IDE" => Ok(Self::Editor),
            "EXPLORER" => Ok(Self::Explorer),
            _ => Err(WindowError::UnknownKind(s.to_string())),
        }
    }
}

/// Open/maximized/stacking state of one application window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowDescriptor {
    /// Which application this window hosts
    pub id: WindowKind,
    /// Rendered iff true
    pub is_open: bool,
    /// Layout hint, independent of open state
    pub is_maximized: bool,
    /// Paint order; higher is in front
    pub z_index: u64,
}

impl WindowDescriptor {
    /// Create a closed descriptor at the given stacking baseline
    pub fn new(id: WindowKind, z_baseline: u64) -> Self {
        Self {
            id,
            is_open: false,
            is_maximized: false,
            z_index: z_baseline,
        }
    }
}
