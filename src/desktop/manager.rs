//! Window manager - open state, stacking order and focus
//!
//! Stacking uses a running maximum: every raise hands out `top + 1`, so a
//! focus change never renumbers or sorts the other windows. The counter lives
//! in the manager itself, one per desktop session.

use std::collections::BTreeMap;

use tracing::{debug, instrument};

use super::{WindowDescriptor, WindowKind};
use crate::error::WindowError;

/// Default stacking baseline for freshly created descriptors
pub const DEFAULT_Z_BASELINE: u64 = 10;

/// Authoritative owner of window visibility, stacking order and focus
#[derive(Debug, Clone)]
pub struct WindowManager {
    /// Descriptors keyed by kind; created once, never removed
    windows: BTreeMap<WindowKind, WindowDescriptor>,
    /// Highest z-index handed out so far, open or closed
    top_z: u64,
    /// Focused window, always an open one
    focus: Option<WindowKind>,
}

impl Default for WindowManager {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowManager {
    /// Create a manager for every window kind at the default baseline
    pub fn new() -> Self {
        Self::with_baseline(DEFAULT_Z_BASELINE)
    }

    /// Create a manager for every window kind at a custom baseline
    pub fn with_baseline(z_baseline: u64) -> Self {
        Self::with_windows(&WindowKind::ALL, z_baseline)
    }

    /// Create a manager over a subset of window kinds
    pub fn with_windows(kinds: &[WindowKind], z_baseline: u64) -> Self {
        let windows = kinds
            .iter()
            .map(|&kind| (kind, WindowDescriptor::new(kind, z_baseline)))
            .collect();

        Self {
            windows,
            top_z: z_baseline,
            focus: None,
        }
    }

    /// Flip a window between open and closed
    ///
    /// Opening raises and focuses the window. Closing clears focus only if
    /// the window held it; every `z_index` stays as it was.
    #[instrument(skip(self))]
    pub fn toggle(&mut self, kind: WindowKind) -> Result<&WindowDescriptor, WindowError> {
        let opening = !self.get(kind)?.is_open;

        if opening {
            self.get_mut(kind)?.is_open = true;
            self.raise(kind)?;
            debug!("Opened window {}", kind);
        } else {
            self.get_mut(kind)?.is_open = false;
            if self.focus == Some(kind) {
                self.focus = None;
            }
            debug!("Closed window {}", kind);
        }

        self.get(kind)
    }

    /// Bring an open window to the front and focus it
    pub fn raise(&mut self, kind: WindowKind) -> Result<&WindowDescriptor, WindowError> {
        if !self.get(kind)?.is_open {
            return Err(WindowError::NotOpen(kind));
        }

        self.top_z += 1;
        let z_index = self.top_z;

        let window = self.get_mut(kind)?;
        window.z_index = z_index;
        self.focus = Some(kind);

        debug!("Raised window {} to z-index {}", kind, z_index);
        self.get(kind)
    }

    /// Open a window if it is closed, otherwise raise it
    pub fn ensure_open(&mut self, kind: WindowKind) -> Result<&WindowDescriptor, WindowError> {
        if self.get(kind)?.is_open {
            self.raise(kind)
        } else {
            self.toggle(kind)
        }
    }

    /// Flip the maximized layout flag
    pub fn toggle_maximize(&mut self, kind: WindowKind) -> Result<&WindowDescriptor, WindowError> {
        let window = self.get_mut(kind)?;
        window.is_maximized = !window.is_maximized;
        debug!("Window {} maximized: {}", kind, window.is_maximized);
        self.get(kind)
    }

    /// Currently focused window, if any
    pub fn focus_of(&self) -> Option<WindowKind> {
        self.focus
    }

    /// Whether the window is open and in front of every other open window
    pub fn is_topmost(&self, kind: WindowKind) -> Result<bool, WindowError> {
        let window = self.get(kind)?;
        if !window.is_open {
            return Ok(false);
        }

        Ok(self.max_open_z() == Some(window.z_index))
    }

    /// Look up a descriptor
    pub fn descriptor(&self, kind: WindowKind) -> Result<&WindowDescriptor, WindowError> {
        self.get(kind)
    }

    /// All descriptors in kind order
    pub fn descriptors(&self) -> impl Iterator<Item = &WindowDescriptor> {
        self.windows.values()
    }

    /// Open windows from back to front
    pub fn paint_order(&self) -> Vec<WindowDescriptor> {
        let mut open: Vec<WindowDescriptor> =
            self.windows.values().filter(|w| w.is_open).copied().collect();
        open.sort_by_key(|w| w.z_index);
        open
    }

    /// Highest z-index handed out so far
    pub fn top_z(&self) -> u64 {
        self.top_z
    }

    fn max_open_z(&self) -> Option<u64> {
        self.windows
            .values()
            .filter(|w| w.is_open)
            .map(|w| w.z_index)
            .max()
    }

    fn get(&self, kind: WindowKind) -> Result<&WindowDescriptor, WindowError> {
        self.windows.get(&kind).ok_or(WindowError::NotFound(kind))
    }

    fn get_mut(&mut self, kind: WindowKind) -> Result<&mut WindowDescriptor, WindowError> {
        self.windows.get_mut(&kind).ok_or(WindowError::NotFound(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use WindowKind::{Editor, Explorer};

    fn z(manager: &WindowManager, kind: WindowKind) -> u64 {
        manager.descriptor(kind).unwrap().z_index
    }

    #[test]
    fn test_initial_state() {
        let manager = WindowManager::new();
        assert_eq!(manager.focus_of(), None);
        assert!(manager.descriptors().all(|w| !w.is_open && w.z_index == 10));
        assert!(manager.paint_order().is_empty());
    }

    #[test]
    fn test_open_raise_sequence() {
        let mut manager = WindowManager::new();

        manager.toggle(Editor).unwrap();
        assert_eq!(manager.focus_of(), Some(Editor));
        assert_eq!(z(&manager, Editor), 11);

        manager.toggle(Explorer).unwrap();
        assert_eq!(manager.focus_of(), Some(Explorer));
        assert_eq!(z(&manager, Explorer), 12);

        manager.raise(Editor).unwrap();
        assert_eq!(manager.focus_of(), Some(Editor));
        assert_eq!(z(&manager, Editor), 13);
        assert_eq!(z(&manager, Explorer), 12);
    }

    #[test]
    fn test_close_focused_clears_focus() {
        let mut manager = WindowManager::new();
        manager.toggle(Editor).unwrap();
        manager.toggle(Editor).unwrap();

        assert_eq!(manager.focus_of(), None);
        assert!(!manager.descriptor(Editor).unwrap().is_open);
        // Closing keeps the old stacking value
        assert_eq!(z(&manager, Editor), 11);
    }

    #[test]
    fn test_close_unfocused_keeps_focus_and_order() {
        let mut manager = WindowManager::new();
        manager.toggle(Editor).unwrap();
        manager.toggle(Explorer).unwrap();

        manager.toggle(Editor).unwrap();
        assert_eq!(manager.focus_of(), Some(Explorer));
        assert_eq!(z(&manager, Editor), 11);
        assert_eq!(z(&manager, Explorer), 12);
    }

    #[test]
    fn test_reopen_lands_on_top() {
        let mut manager = WindowManager::new();
        manager.toggle(Editor).unwrap();
        manager.toggle(Explorer).unwrap();
        manager.raise(Explorer).unwrap();
        manager.toggle(Editor).unwrap();
        manager.toggle(Editor).unwrap();

        assert!(z(&manager, Editor) > z(&manager, Explorer));
        assert!(manager.is_topmost(Editor).unwrap());
        assert!(!manager.is_topmost(Explorer).unwrap());
    }

    #[test]
    fn test_raise_closed_window_rejected() {
        let mut manager = WindowManager::new();
        let err = manager.raise(Explorer).unwrap_err();
        assert_eq!(err, WindowError::NotOpen(Explorer));
        assert_eq!(manager.top_z(), 10);
        assert_eq!(manager.focus_of(), None);
    }

    #[test]
    fn test_unknown_window_rejected() {
        let mut manager = WindowManager::with_windows(&[Editor], 10);
        assert_eq!(manager.toggle(Explorer).unwrap_err(), WindowError::NotFound(Explorer));
        assert_eq!(manager.raise(Explorer).unwrap_err(), WindowError::NotFound(Explorer));
        assert_eq!(
            manager.is_topmost(Explorer).unwrap_err(),
            WindowError::NotFound(Explorer)
        );
        assert_eq!(
            manager.toggle_maximize(Explorer).unwrap_err(),
            WindowError::NotFound(Explorer)
        );
    }

    #[test]
    fn test_closed_window_is_never_topmost() {
        let mut manager = WindowManager::new();
        assert!(!manager.is_topmost(Editor).unwrap());

        manager.toggle(Editor).unwrap();
        manager.toggle(Editor).unwrap();
        assert!(!manager.is_topmost(Editor).unwrap());
    }

    #[test]
    fn test_maximize_independent_of_open_state() {
        let mut manager = WindowManager::new();
        manager.toggle_maximize(Explorer).unwrap();
        let desc = manager.descriptor(Explorer).unwrap();
        assert!(desc.is_maximized);
        assert!(!desc.is_open);
        assert_eq!(manager.focus_of(), None);
    }

    #[test]
    fn test_ensure_open() {
        let mut manager = WindowManager::new();
        manager.ensure_open(Editor).unwrap();
        assert_eq!(z(&manager, Editor), 11);

        manager.ensure_open(Explorer).unwrap();
        manager.ensure_open(Editor).unwrap();
        assert!(manager.descriptor(Editor).unwrap().is_open);
        assert_eq!(z(&manager, Editor), 13);
        assert_eq!(manager.focus_of(), Some(Editor));
    }

    #[test]
    fn test_paint_order() {
        let mut manager = WindowManager::new();
        manager.toggle(Explorer).unwrap();
        manager.toggle(Editor).unwrap();
        manager.raise(Explorer).unwrap();

        let order: Vec<WindowKind> = manager.paint_order().iter().map(|w| w.id).collect();
        assert_eq!(order, vec![Editor, Explorer]);
    }
}
