//! Desktop session - one signed-in account and its components
//!
//! Wires the window manager, file workspace, split controller and live
//! preview to the account store. Saving is all-or-nothing: the workspace is
//! only marked saved after the store accepted the snapshot.

use tracing::{info, instrument, warn};

use crate::config::{AccountStore, Config};
use crate::desktop::{WindowKind, WindowManager};
use crate::error::Result;
use crate::preview::{LivePreview, PreviewDocument};
use crate::session::AccountName;
use crate::split::SplitPaneController;
use crate::workspace::{FileId, FileWorkspace};

/// An authenticated desktop session
pub struct DesktopSession<S: AccountStore> {
    /// Signed-in account
    account: AccountName,
    /// Account storage collaborator
    store: S,
    /// Window visibility, stacking and focus
    pub windows: WindowManager,
    /// Editable file buffer
    pub workspace: FileWorkspace,
    /// Editor/preview ratio
    pub split: SplitPaneController,
    /// Composed preview, cached per workspace contents
    preview: LivePreview,
}

impl<S: AccountStore> DesktopSession<S> {
    /// Authenticate and load the account's saved workspace
    #[instrument(skip(store, password, config))]
    pub fn login(store: S, account: AccountName, password: &str, config: &Config) -> Result<Self> {
        store.authenticate(&account, password)?;
        let files = store.load_files(&account)?;

        let mut workspace = FileWorkspace::new();
        workspace.load(files);

        let mut windows = WindowManager::with_baseline(config.desktop.z_baseline);
        if config.desktop.auto_open_editor {
            windows.ensure_open(WindowKind::Editor)?;
        }

        info!(
            "Signed in as {} with {} files",
            account,
            workspace.files().len()
        );

        Ok(Self {
            account,
            store,
            windows,
            workspace,
            split: config.split_controller()?,
            preview: LivePreview::new(config.preview_options()),
        })
    }

    /// Persist the current workspace through the account store
    #[instrument(skip(self), fields(account = %self.account))]
    pub fn save(&mut self) -> Result<()> {
        let snapshot = self.workspace.save();

        if let Err(e) = self.store.save_files(&self.account, &snapshot) {
            warn!("Save failed, workspace left unsaved: {}", e);
            return Err(e);
        }

        let count = snapshot.len();
        self.workspace.mark_saved(snapshot);
        info!("Saved {} files", count);
        Ok(())
    }

    /// Preview document for the current workspace
    pub fn preview(&mut self) -> &PreviewDocument {
        self.preview.document(&self.workspace)
    }

    /// Live preview state
    pub fn live_preview(&self) -> &LivePreview {
        &self.preview
    }

    /// Select a file and bring the editor to the front
    pub fn open_in_editor(&mut self, id: &FileId) -> Result<()> {
        self.workspace.select(id)?;
        self.windows.ensure_open(WindowKind::Editor)?;
        Ok(())
    }

    /// Signed-in account
    pub fn account(&self) -> &AccountName {
        &self.account
    }

    /// Account store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// End the session, handing back the store
    pub fn logout(mut self) -> S {
        self.split.cancel_tracking();
        if self.workspace.is_dirty() {
            warn!("Signing out {} with unsaved changes", self.account);
        }
        info!("Signed out {}", self.account);
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MemoryAccountStore;
    use crate::error::{AccountError, Error};
    use crate::workspace::{ArtifactKind, FileArtifact};

    fn store_with(name: &AccountName) -> MemoryAccountStore {
        let mut store = MemoryAccountStore::new();
        store.register(name, "secret").unwrap();
        store
    }

    #[test]
    fn test_login_opens_editor() {
        let name = AccountName::parse("alice").unwrap();
        let session =
            DesktopSession::login(store_with(&name), name, "secret", &Config::default()).unwrap();

        assert_eq!(session.windows.focus_of(), Some(WindowKind::Editor));
        assert_eq!(session.workspace.files().len(), 3);
        assert_eq!(session.split.ratio(), 50.0);
    }

    #[test]
    fn test_login_without_auto_open() {
        let name = AccountName::parse("alice").unwrap();
        let mut config = Config::default();
        config.desktop.auto_open_editor = false;

        let session = DesktopSession::login(store_with(&name), name, "secret", &config).unwrap();
        assert_eq!(session.windows.focus_of(), None);
        assert!(session.windows.paint_order().is_empty());
    }

    #[test]
    fn test_login_wrong_password() {
        let name = AccountName::parse("alice").unwrap();
        let result = DesktopSession::login(store_with(&name), name, "nope", &Config::default());
        assert!(matches!(
            result,
            Err(Error::Account(AccountError::InvalidCredentials))
        ));
    }

    #[test]
    fn test_save_commits_snapshot() {
        let name = AccountName::parse("alice").unwrap();
        let mut session =
            DesktopSession::login(store_with(&name), name.clone(), "secret", &Config::default())
                .unwrap();

        session
            .workspace
            .edit(&FileId::from("1"), "<p>saved</p>")
            .unwrap();
        assert!(session.workspace.is_dirty());

        session.save().unwrap();
        assert!(!session.workspace.is_dirty());

        let store = session.logout();
        assert_eq!(store.load_files(&name).unwrap()[0].content, "<p>saved</p>");
    }

    #[test]
    fn test_preview_follows_edits() {
        let name = AccountName::parse("alice").unwrap();
        let mut session =
            DesktopSession::login(store_with(&name), name, "secret", &Config::default()).unwrap();

        assert!(session.preview().html.contains("Welcome to the grid."));
        session
            .workspace
            .edit(&FileId::from("3"), "console.log(\"live\")")
            .unwrap();
        assert!(session.preview().html.contains("console.log(\"live\")"));
        assert_eq!(session.live_preview().compositions(), 2);
    }

    #[test]
    fn test_open_in_editor() {
        let name = AccountName::parse("alice").unwrap();
        let mut config = Config::default();
        config.desktop.auto_open_editor = false;
        let mut session = DesktopSession::login(store_with(&name), name, "secret", &config).unwrap();

        session.windows.toggle(WindowKind::Explorer).unwrap();
        session.open_in_editor(&FileId::from("2")).unwrap();

        assert_eq!(session.windows.focus_of(), Some(WindowKind::Editor));
        assert_eq!(session.workspace.active().unwrap().name, "style.css");
        assert!(session.open_in_editor(&FileId::from("missing")).is_err());
    }

    #[test]
    fn test_preview_follows_replaced_workspace() {
        let name = AccountName::parse("dave").unwrap();
        let mut session =
            DesktopSession::login(store_with(&name), name, "secret", &Config::default()).unwrap();
        assert!(session.preview().html.contains("background: #020617"));

        let mut other = FileWorkspace::new();
        other.load(vec![FileArtifact::new(
            "1",
            "index.html",
            ArtifactKind::Markup,
            "<p>other</p>",
        )]);
        session.workspace = other;

        let doc = session.preview();
        assert!(doc.html.contains("<p>other</p>"));
        assert!(!doc.html.contains("background: #020617"));
    }
}
