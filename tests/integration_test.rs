//! Integration tests for nova-desk
//!
//! Full sign-in, edit, save and compose flows through the public API.
//! All tests use isolated account stores to avoid polluting user data.

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use nova_desk::error::{AccountError, Error};
use nova_desk::{
    compose, AccountName, AccountStore, ArtifactKind, Config, DesktopSession, FileArtifact, FileId,
    JsonAccountStore, MemoryAccountStore, PreviewOptions, WindowKind, WindowManager,
};

/// Helper to create an isolated JSON store with one registered account
fn create_isolated_store(temp_dir: &TempDir) -> (JsonAccountStore, AccountName) {
    let path = temp_dir.path().join("accounts.json");
    let mut store = JsonAccountStore::open(&path).unwrap();
    let account = AccountName::parse("neo").unwrap();
    store.register(&account, "matrix").unwrap();
    (store, account)
}

/// Store whose saves can be switched to fail
struct FlakyStore {
    inner: MemoryAccountStore,
    fail_saves: bool,
}

impl AccountStore for FlakyStore {
    fn register(&mut self, account: &AccountName, password: &str) -> nova_desk::Result<()> {
        self.inner.register(account, password)
    }

    fn authenticate(&self, account: &AccountName, password: &str) -> nova_desk::Result<()> {
        self.inner.authenticate(account, password)
    }

    fn load_files(&self, account: &AccountName) -> nova_desk::Result<Vec<FileArtifact>> {
        self.inner.load_files(account)
    }

    fn save_files(&mut self, account: &AccountName, files: &[FileArtifact]) -> nova_desk::Result<()> {
        if self.fail_saves {
            return Err(AccountError::SaveFailed("disk full".to_string()).into());
        }
        self.inner.save_files(account, files)
    }
}

#[test]
fn test_sign_in_edit_save_reload() {
    let temp_dir = TempDir::new().unwrap();
    let (store, account) = create_isolated_store(&temp_dir);
    let config = Config::default();

    let mut session = DesktopSession::login(store, account.clone(), "matrix", &config).unwrap();
    assert_eq!(session.windows.focus_of(), Some(WindowKind::Editor));

    session
        .workspace
        .edit(&FileId::from("1"), "<h1>Hello</h1>")
        .unwrap();
    let id = session.workspace.create_file("extra.css").unwrap();
    session.workspace.edit(&id, "h1 { margin: 0; }").unwrap();
    session.save().unwrap();
    session.logout();

    // A fresh store reads what the first one committed
    let reopened = JsonAccountStore::open(temp_dir.path().join("accounts.json")).unwrap();
    let session = DesktopSession::login(reopened, account, "matrix", &config).unwrap();

    let names: Vec<&str> = session
        .workspace
        .files()
        .iter()
        .map(|f| f.name.as_str())
        .collect();
    assert_eq!(names, vec!["index.html", "style.css", "main.js", "extra.css"]);
    assert_eq!(session.workspace.files()[0].content, "<h1>Hello</h1>");
    assert!(!session.workspace.is_dirty());
}

#[test]
fn test_unsaved_edits_are_not_persisted() {
    let temp_dir = TempDir::new().unwrap();
    let (store, account) = create_isolated_store(&temp_dir);
    let config = Config::default();

    let mut session = DesktopSession::login(store, account.clone(), "matrix", &config).unwrap();
    session.workspace.append_to_active("<!-- draft -->").unwrap();
    assert!(session.workspace.is_dirty());

    let store = session.logout();
    let files = store.load_files(&account).unwrap();
    assert!(!files[0].content.contains("draft"));
}

#[test]
fn test_failed_save_leaves_workspace_unsaved() {
    let account = AccountName::parse("trinity").unwrap();
    let mut inner = MemoryAccountStore::new();
    inner.register(&account, "pw").unwrap();
    let store = FlakyStore {
        inner,
        fail_saves: true,
    };

    let mut session = DesktopSession::login(store, account.clone(), "pw", &Config::default()).unwrap();
    session.workspace.append_to_active("<p>edit</p>").unwrap();
    let before = session.workspace.files().to_vec();

    let result = session.save();
    assert!(matches!(result, Err(Error::Account(AccountError::SaveFailed(_)))));

    // Nothing changed: buffer intact, still dirty, store untouched
    assert_eq!(session.workspace.files(), before.as_slice());
    assert!(session.workspace.is_dirty());
    let store = session.logout();
    assert!(!store.load_files(&account).unwrap()[0]
        .content
        .contains("<p>edit</p>"));
}

#[test]
fn test_save_retry_after_failure() {
    let account = AccountName::parse("trinity").unwrap();
    let mut inner = MemoryAccountStore::new();
    inner.register(&account, "pw").unwrap();
    let store = FlakyStore {
        inner,
        fail_saves: true,
    };

    let mut session = DesktopSession::login(store, account.clone(), "pw", &Config::default()).unwrap();
    session.workspace.append_to_active("!").unwrap();
    assert!(session.save().is_err());

    let mut store = session.logout();
    store.fail_saves = false;
    let mut session = DesktopSession::login(store, account, "pw", &Config::default()).unwrap();
    session.workspace.append_to_active("!").unwrap();
    session.save().unwrap();
    assert!(!session.workspace.is_dirty());
}

#[test]
fn test_wrong_password_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let (store, account) = create_isolated_store(&temp_dir);

    let result = DesktopSession::login(store, account, "wrong", &Config::default());
    assert!(matches!(
        result,
        Err(Error::Account(AccountError::InvalidCredentials))
    ));
}

#[test]
fn test_compose_example_document() {
    let files = vec![
        FileArtifact::new("m", "index.html", ArtifactKind::Markup, "<p>hi</p>"),
        FileArtifact::new("s", "style.css", ArtifactKind::Style, "p{color:red}"),
        FileArtifact::new("j", "main.js", ArtifactKind::Script, "console.log(1)"),
    ];

    let document = compose(&files, &PreviewOptions::default());

    assert!(document.html.contains("<p>hi</p>"));
    assert!(document.html.contains("<style>p{color:red}</style>"));
    assert!(document.html.contains("<script>console.log(1)</script>"));
    assert_eq!(document.html.matches("<body>").count(), 1);

    // Isolation: scripts may run, but nothing grants host origin access
    let sandbox = document.sandbox.attribute_value();
    assert_eq!(sandbox, "allow-scripts allow-modals");
    assert!(!sandbox.contains("allow-same-origin"));
    assert!(document.iframe().contains("sandbox=\"allow-scripts allow-modals\""));
}

#[test]
fn test_preview_tracks_session_edits() {
    let temp_dir = TempDir::new().unwrap();
    let (store, account) = create_isolated_store(&temp_dir);
    let mut session = DesktopSession::login(store, account, "matrix", &Config::default()).unwrap();

    let first = session.preview().clone();
    session
        .workspace
        .edit(&FileId::from("2"), "body { background: black; }")
        .unwrap();
    let second = session.preview().clone();

    assert!(second.has_changed(&first));
    assert!(second.html.contains("body { background: black; }"));
    // Markup and script contributions are unchanged
    assert!(second.html.contains("console.log(\"Welcome to the grid.\");"));
}

#[test]
fn test_window_focus_scenario() {
    let mut windows = WindowManager::new();
    let a = WindowKind::Editor;
    let b = WindowKind::Explorer;

    assert_eq!(windows.descriptor(a).unwrap().z_index, 10);
    assert_eq!(windows.descriptor(b).unwrap().z_index, 10);

    windows.toggle(a).unwrap();
    assert_eq!(windows.focus_of(), Some(a));
    assert_eq!(windows.descriptor(a).unwrap().z_index, 11);

    windows.toggle(b).unwrap();
    assert_eq!(windows.focus_of(), Some(b));
    assert_eq!(windows.descriptor(b).unwrap().z_index, 12);

    windows.raise(a).unwrap();
    assert_eq!(windows.focus_of(), Some(a));
    assert_eq!(windows.descriptor(a).unwrap().z_index, 13);
    assert_eq!(windows.descriptor(b).unwrap().z_index, 12);

    let order: Vec<WindowKind> = windows.paint_order().iter().map(|w| w.id).collect();
    assert_eq!(order, vec![b, a]);
}

#[test]
fn test_split_settings_from_config() {
    let mut config = Config::default();
    config.split.default_ratio = 95.0;

    let temp_dir = TempDir::new().unwrap();
    let (store, account) = create_isolated_store(&temp_dir);
    let mut session = DesktopSession::login(store, account, "matrix", &config).unwrap();

    // Out-of-range default is clamped into the bounds
    assert_eq!(session.split.ratio(), 90.0);

    let region = nova_desk::TrackRegion::viewport(200.0).unwrap();
    assert!(session.split.press(region));
    assert_eq!(session.split.pointer_moved(50.0), Some(25.0));
    session.split.release();

    session.split.reset();
    assert_eq!(session.split.ratio(), 90.0);
}
