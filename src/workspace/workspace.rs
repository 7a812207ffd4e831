//! In-session file buffer with explicit save semantics
//!
//! Edits stay local until the user saves. `save()` only exports a snapshot;
//! the snapshot becomes the canonical saved state through `mark_saved` once
//! the account store has accepted it.

use std::collections::HashSet;

use tracing::{debug, info, warn};
use xxhash_rust::xxh3::Xxh3;

use super::{ArtifactKind, FileArtifact, FileId};
use crate::error::WorkspaceError;

/// Editable set of source artifacts for the active session
#[derive(Debug, Clone, Default)]
pub struct FileWorkspace {
    /// Current artifacts in workspace order
    files: Vec<FileArtifact>,
    /// Last snapshot accepted by the account store
    saved: Vec<FileArtifact>,
    /// Artifact shown in the editing surface
    active: Option<FileId>,
    /// Bumped on every content or membership change
    revision: u64,
}

impl FileWorkspace {
    /// Create an empty workspace
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole workspace with a stored file list
    ///
    /// Ids must be unique: a repeated id keeps its first artifact and the
    /// later ones are dropped.
    pub fn load(&mut self, files: Vec<FileArtifact>) {
        let mut seen = HashSet::new();
        let total = files.len();
        let files: Vec<FileArtifact> = files
            .into_iter()
            .filter(|f| seen.insert(f.id.clone()))
            .collect();
        if files.len() < total {
            warn!("Dropped {} files with duplicate ids", total - files.len());
        }

        info!("Loading workspace with {} files", files.len());
        self.active = files.first().map(|f| f.id.clone());
        self.saved = files.clone();
        self.files = files;
        self.revision += 1;
    }

    /// Replace one artifact's content
    pub fn edit(&mut self, id: &FileId, content: impl Into<String>) -> Result<(), WorkspaceError> {
        let file = self.get_mut(id)?;
        file.content = content.into();
        self.revision += 1;
        Ok(())
    }

    /// Choose the artifact shown in the editing surface
    pub fn select(&mut self, id: &FileId) -> Result<(), WorkspaceError> {
        self.get(id)?;
        self.active = Some(id.clone());
        debug!("Selected file {}", id);
        Ok(())
    }

    /// Artifact currently shown in the editing surface
    pub fn active(&self) -> Option<&FileArtifact> {
        self.active.as_ref().and_then(|id| self.get(id).ok())
    }

    /// Identifier of the active artifact
    pub fn active_id(&self) -> Option<&FileId> {
        self.active.as_ref()
    }

    /// Move the selection forward or backward through the file list, wrapping
    pub fn cycle_selection(&mut self, forward: bool) {
        if self.files.is_empty() {
            return;
        }

        let len = self.files.len();
        let current = self
            .active
            .as_ref()
            .and_then(|id| self.files.iter().position(|f| &f.id == id));

        let next = match (current, forward) {
            (None, _) => 0,
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
        };

        self.active = Some(self.files[next].id.clone());
    }

    /// Append text to the active artifact
    pub fn append_to_active(&mut self, text: &str) -> Result<(), WorkspaceError> {
        let Some(id) = self.active.clone() else {
            return Ok(());
        };
        let file = self.get_mut(&id)?;
        file.content.push_str(text);
        self.revision += 1;
        Ok(())
    }

    /// Remove the last character of the active artifact
    pub fn backspace_active(&mut self) -> Result<(), WorkspaceError> {
        let Some(id) = self.active.clone() else {
            return Ok(());
        };
        let file = self.get_mut(&id)?;
        if file.content.pop().is_some() {
            self.revision += 1;
        }
        Ok(())
    }

    /// Add an empty artifact whose kind follows the file extension
    pub fn create_file(&mut self, name: &str) -> Result<FileId, WorkspaceError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(WorkspaceError::InvalidFileName {
                name: name.to_string(),
                reason: "name cannot be empty".to_string(),
            });
        }
        if name.contains('/') || name.contains('\\') {
            return Err(WorkspaceError::InvalidFileName {
                name: name.to_string(),
                reason: "directories are not supported".to_string(),
            });
        }
        let kind = ArtifactKind::from_file_name(name)
            .ok_or_else(|| WorkspaceError::UnsupportedKind(name.to_string()))?;
        if self.files.iter().any(|f| f.name == name) {
            return Err(WorkspaceError::DuplicateName(name.to_string()));
        }

        let file = FileArtifact::new(FileId::new(), name, kind, "");
        let id = file.id.clone();
        self.files.push(file);
        self.active = Some(id.clone());
        self.revision += 1;

        info!("Created {} file '{}'", kind, name);
        Ok(id)
    }

    /// Delete an artifact from the workspace
    pub fn remove_file(&mut self, id: &FileId) -> Result<FileArtifact, WorkspaceError> {
        let index = self
            .files
            .iter()
            .position(|f| &f.id == id)
            .ok_or_else(|| WorkspaceError::FileNotFound(id.clone()))?;

        let removed = self.files.remove(index);
        if self.active.as_ref() == Some(id) {
            self.active = self.files.first().map(|f| f.id.clone());
        }
        self.revision += 1;

        info!("Removed file '{}'", removed.name);
        Ok(removed)
    }

    /// Export the full current snapshot for persistence
    pub fn save(&self) -> Vec<FileArtifact> {
        self.files.clone()
    }

    /// Record a snapshot as the canonical saved state
    pub fn mark_saved(&mut self, snapshot: Vec<FileArtifact>) {
        self.saved = snapshot;
    }

    /// Whether the workspace differs from the last saved snapshot
    pub fn is_dirty(&self) -> bool {
        self.files != self.saved
    }

    /// Current artifacts in workspace order
    pub fn files(&self) -> &[FileArtifact] {
        &self.files
    }

    /// Last saved snapshot
    pub fn saved_files(&self) -> &[FileArtifact] {
        &self.saved
    }

    /// Change counter, used to invalidate derived state
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Hash of every artifact's kind and content, in workspace order
    pub fn content_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        for file in &self.files {
            let kind: u8 = match file.kind {
                ArtifactKind::Markup => 0,
                ArtifactKind::Style => 1,
                ArtifactKind::Script => 2,
            };
            hasher.update(&[kind]);
            hasher.update(&(file.content.len() as u64).to_le_bytes());
            hasher.update(file.content.as_bytes());
        }
        hasher.digest()
    }

    /// Look up an artifact
    pub fn get(&self, id: &FileId) -> Result<&FileArtifact, WorkspaceError> {
        self.files
            .iter()
            .find(|f| &f.id == id)
            .ok_or_else(|| WorkspaceError::FileNotFound(id.clone()))
    }

    fn get_mut(&mut self, id: &FileId) -> Result<&mut FileArtifact, WorkspaceError> {
        self.files
            .iter_mut()
            .find(|f| &f.id == id)
            .ok_or_else(|| WorkspaceError::FileNotFound(id.clone()))
    }
}
