//! Preview compositor
//!
//! Assembles a workspace snapshot into one self-contained HTML document:
//! - Body: the first markup artifact (empty when there is none)
//! - Style block: every style artifact, in workspace order
//! - Script block: every script artifact, in workspace order
//!
//! The document is only ever handed to an isolated rendering context. Its
//! sandbox capabilities come from a closed set that cannot express storage,
//! same-origin or top-level navigation access.

use std::fmt;

use xxhash_rust::xxh3::xxh3_64;

use crate::workspace::{ArtifactKind, FileArtifact};

/// Script loaded by every preview unless configured otherwise
pub const DEFAULT_HEAD_SCRIPT: &str = "https://cdn.tailwindcss.com";

/// Capabilities a preview context may be granted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SandboxCapability {
    /// Run user scripts
    Scripts,
    /// Show transient prompts (`alert`, `confirm`, `prompt`)
    Modals,
}

impl SandboxCapability {
    /// Token used in the iframe `sandbox` attribute
    pub fn token(&self) -> &'static str {
        match self {
            Self::Scripts => "allow-scripts",
            Self::Modals => "allow-modals",
        }
    }
}

/// Sandbox granted to a rendered preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SandboxPolicy {
    capabilities: Vec<SandboxCapability>,
}

impl Default for SandboxPolicy {
    fn default() -> Self {
        Self {
            capabilities: vec![SandboxCapability::Scripts, SandboxCapability::Modals],
        }
    }
}

impl SandboxPolicy {
    /// Granted capabilities
    pub fn capabilities(&self) -> &[SandboxCapability] {
        &self.capabilities
    }

    /// Value of the iframe `sandbox` attribute
    pub fn attribute_value(&self) -> String {
        self.capabilities
            .iter()
            .map(|c| c.token())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for SandboxPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.attribute_value())
    }
}

/// Compositor settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewOptions {
    /// External scripts loaded in `<head>`
    pub head_scripts: Vec<String>,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            head_scripts: vec![DEFAULT_HEAD_SCRIPT.to_string()],
        }
    }
}

/// One composed, sandboxed document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewDocument {
    /// Full document text
    pub html: String,
    /// Sandbox the rendering host must apply
    pub sandbox: SandboxPolicy,
    /// Content hash for change detection
    pub hash: u64,
}

impl PreviewDocument {
    fn new(html: String) -> Self {
        let hash = xxh3_64(html.as_bytes());
        Self {
            html,
            sandbox: SandboxPolicy::default(),
            hash,
        }
    }

    /// Check if the document differs from another one
    pub fn has_changed(&self, other: &Self) -> bool {
        self.hash != other.hash
    }

    /// Sandboxed iframe embedding the document through `srcdoc`
    pub fn iframe(&self) -> String {
        format!(
            "<iframe title=\"preview\" sandbox=\"{}\" srcdoc=\"{}\"></iframe>",
            self.sandbox.attribute_value(),
            escape_attribute(&self.html)
        )
    }
}

/// Compose a workspace snapshot into a preview document
pub fn compose(files: &[FileArtifact], options: &PreviewOptions) -> PreviewDocument {
    let body = files
        .iter()
        .find(|f| f.kind == ArtifactKind::Markup)
        .map(|f| f.content.as_str())
        .unwrap_or("");

    let css = join_kind(files, ArtifactKind::Style);
    let js = join_kind(files, ArtifactKind::Script);

    let head_scripts: String = options
        .head_scripts
        .iter()
        .map(|src| format!("<script src=\"{}\"></script>", escape_attribute(src)))
        .collect();

    let html = format!(
        "<!DOCTYPE html><html><head>{}<style>{}</style></head><body>{}<script>{}</script></body></html>",
        head_scripts,
        neutralize_closing_tag(&css, "</style"),
        body,
        neutralize_closing_tag(&js, "</script"),
    );

    PreviewDocument::new(html)
}

fn join_kind(files: &[FileArtifact], kind: ArtifactKind) -> String {
    files
        .iter()
        .filter(|f| f.kind == kind)
        .map(|f| f.content.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Keep raw text from closing its enclosing element early
fn neutralize_closing_tag(text: &str, tag: &str) -> String {
    let lower = text.to_ascii_lowercase();
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for (start, _) in lower.match_indices(tag) {
        out.push_str(&text[last..start]);
        out.push_str("<\\");
        last = start + 1;
    }
    out.push_str(&text[last..]);
    out
}

fn escape_attribute(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}
