//! Source artifact types
//!
//! The persisted shape matches the account store format:
//! `{ "id": "1", "name": "index.html", "type": "html", "content": "..." }`.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a file artifact, unique within a workspace
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(String);

impl FileId {
    /// Create a new random file ID
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Borrow the raw identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for FileId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for FileId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for FileId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Declared kind of a source artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArtifactKind {
    #[serde(rename = "html")]
    Markup,
    #[serde(rename = "css")]
    Style,
    #[serde(rename = "js")]
    Script,
}

impl ArtifactKind {
    /// Infer the kind from a file name's extension
    pub fn from_file_name(name: &str) -> Option<Self> {
        let ext = Path::new(name).extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "html" | "htm" => Some(Self::Markup),
            "css" => Some(Self::Style),
            "js" | "mjs" => Some(Self::Script),
            _ => None,
        }
    }

    /// Short marker used in file lists
    pub fn marker(&self) -> &'static str {
        match self {
            Self::Markup => "<>",
            Self::Style => "#",
            Self::Script => "{}",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Markup => write!(f, "html"),
            Self::Style => write!(f, "css"),
            Self::Script => write!(f, "js"),
        }
    }
}

/// One named unit of source content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileArtifact {
    /// Unique within the workspace
    pub id: FileId,
    /// Display name, unique by convention
    pub name: String,
    /// Declared kind
    #[serde(rename = "type")]
    pub kind: ArtifactKind,
    /// Raw text
    pub content: String,
}

impl FileArtifact {
    /// Create an artifact with an explicit id
    pub fn new(
        id: impl Into<FileId>,
        name: impl Into<String>,
        kind: ArtifactKind,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            content: content.into(),
        }
    }
}

/// The workspace every new account starts with
pub fn starter_files() -> Vec<FileArtifact> {
    vec![
        FileArtifact::new(
            "1",
            "index.html",
            ArtifactKind::Markup,
            "<div class=\"h-screen flex flex-col items-center justify-center bg-slate-900 text-white p-10\">\n  <h1 class=\"text-6xl font-black mb-4\">Nova OS</h1>\n  <p class=\"text-white/60 text-xl font-medium\">Tablet-First Cloud IDE</p>\n  <div class=\"mt-8 p-4 glass-bright rounded-2xl text-sm text-blue-300\">Ready for development.</div>\n</div>",
        ),
        FileArtifact::new(
            "2",
            "style.css",
            ArtifactKind::Style,
            "body { background: #020617; }\n.glass-bright { background: rgba(255,255,255,0.05); backdrop-filter: blur(10px); }",
        ),
        FileArtifact::new(
            "3",
            "main.js",
            ArtifactKind::Script,
            "console.log(\"Welcome to the grid.\");",
        ),
    ]
}
