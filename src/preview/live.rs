//! Live preview - composes on read, caches per workspace contents
//!
//! The cache key is the workspace's content hash, so any edit, or a
//! different workspace entirely, recomposes on the next read. There is no
//! diffing: a stale key means a full `compose`.

use tracing::debug;

use super::{compose, PreviewDocument, PreviewOptions};
use crate::workspace::FileWorkspace;

/// Cached preview for one workspace
#[derive(Debug, Clone, Default)]
pub struct LivePreview {
    options: PreviewOptions,
    cached: Option<(u64, PreviewDocument)>,
    compositions: u64,
}

impl LivePreview {
    /// Create a live preview with the given compositor options
    pub fn new(options: PreviewOptions) -> Self {
        Self {
            options,
            cached: None,
            compositions: 0,
        }
    }

    /// Document for the workspace's current contents
    pub fn document(&mut self, workspace: &FileWorkspace) -> &PreviewDocument {
        let key = workspace.content_hash();
        let fresh = matches!(&self.cached, Some((k, _)) if *k == key);

        if !fresh {
            debug!("Recomposing preview for workspace contents {:016x}", key);
            self.compositions += 1;
            self.cached = Some((key, compose(workspace.files(), &self.options)));
        }

        let (_, doc) = self
            .cached
            .get_or_insert_with(|| (key, compose(workspace.files(), &self.options)));
        doc
    }

    /// Drop the cached document
    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    /// How many times the document has been composed
    pub fn compositions(&self) -> u64 {
        self.compositions
    }
}
