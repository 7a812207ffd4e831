//! Event handling for the TUI
//!
//! Provides an async event stream that combines:
//! - Terminal input events (keyboard, mouse)
//! - Render ticks for the taskbar clock

use std::time::Duration;

use crossterm::event::{Event as CrosstermEvent, EventStream, KeyCode, KeyEvent, KeyModifiers};
use futures::{FutureExt, StreamExt};
use tokio::sync::mpsc;
use tracing::debug;

/// Application events
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Terminal input event
    Input(InputEvent),
    /// Render tick
    Tick,
    /// Request to quit the application
    Quit,
}

/// Input events from the terminal
#[derive(Debug, Clone)]
pub enum InputEvent {
    /// Key press
    Key(KeyEvent),
    /// Mouse event
    Mouse(crossterm::event::MouseEvent),
    /// Terminal resize
    Resize(u16, u16),
}

/// User commands triggered by input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    /// Open or close the editor window
    ToggleEditor,
    /// Open or close the file explorer
    ToggleExplorer,
    /// Maximize or restore the focused window
    ToggleMaximize,
    /// Persist the workspace
    Save,
    /// Create a file
    NewFile,
    /// Select the next file
    NextFile,
    /// Select the previous file
    PrevFile,
    /// Move up in a list
    NavigateUp,
    /// Move down in a list
    NavigateDown,
    /// Page up in the preview
    PageUp,
    /// Page down in the preview
    PageDown,
    /// Show help
    ShowHelp,
    /// Quit application
    Quit,
    /// Cancel current operation
    Cancel,
    /// Enter
    Confirm,
    /// Delete key
    Delete,
    /// Text input
    TextInput(char),
    /// Backspace
    Backspace,
}

impl UserCommand {
    /// Convert a key event to a user command
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        match (key.code, key.modifiers) {
            // Windows
            (KeyCode::F(1), _) => Some(UserCommand::ToggleEditor),
            (KeyCode::F(2), _) => Some(UserCommand::ToggleExplorer),
            (KeyCode::F(3), _) => Some(UserCommand::ToggleMaximize),
            (KeyCode::F(12), _) => Some(UserCommand::ShowHelp),

            // Workspace
            (KeyCode::Char('s'), KeyModifiers::CONTROL) => Some(UserCommand::Save),
            (KeyCode::Char('n'), KeyModifiers::CONTROL) => Some(UserCommand::NewFile),
            (KeyCode::Tab, _) => Some(UserCommand::NextFile),
            (KeyCode::BackTab, _) => Some(UserCommand::PrevFile),

            // Navigation and scrolling
            (KeyCode::Up, _) => Some(UserCommand::NavigateUp),
            (KeyCode::Down, _) => Some(UserCommand::NavigateDown),
            (KeyCode::PageUp, _) => Some(UserCommand::PageUp),
            (KeyCode::PageDown, _) => Some(UserCommand::PageDown),

            // Quit
            (KeyCode::Char('q'), KeyModifiers::CONTROL) => Some(UserCommand::Quit),
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(UserCommand::Quit),

            // Editing and modal controls
            (KeyCode::Esc, _) => Some(UserCommand::Cancel),
            (KeyCode::Enter, _) => Some(UserCommand::Confirm),
            (KeyCode::Backspace, _) => Some(UserCommand::Backspace),
            (KeyCode::Delete, _) => Some(UserCommand::Delete),

            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                Some(UserCommand::TextInput(c))
            }

            _ => None,
        }
    }
}

/// Event loop handle
pub struct EventLoop {
    /// Sender for events
    tx: mpsc::Sender<AppEvent>,
    /// Receiver for events
    rx: mpsc::Receiver<AppEvent>,
}

impl EventLoop {
    /// Create a new event loop
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(256);
        Self { tx, rx }
    }

    /// Start the event loop
    ///
    /// This spawns background tasks for:
    /// - Terminal input
    /// - Render ticks
    pub fn start(&mut self, tick_rate: Duration) {
        let tx = self.tx.clone();

        // Terminal input task - single long-running reader
        tokio::spawn(async move {
            let mut reader = EventStream::new();

            loop {
                let event = reader.next().fuse().await;

                match event {
                    Some(Ok(event)) => {
                        let app_event = match event {
                            CrosstermEvent::Key(key) => AppEvent::Input(InputEvent::Key(key)),
                            CrosstermEvent::Mouse(mouse) => {
                                AppEvent::Input(InputEvent::Mouse(mouse))
                            }
                            CrosstermEvent::Resize(w, h) => {
                                AppEvent::Input(InputEvent::Resize(w, h))
                            }
                            _ => continue,
                        };

                        if tx.send(app_event).await.is_err() {
                            break;
                        }
                    }
                    Some(Err(e)) => {
                        debug!("Error reading terminal event: {}", e);
                        continue;
                    }
                    None => {
                        let _ = tx.send(AppEvent::Quit).await;
                        break;
                    }
                }
            }
        });

        // Render tick task
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick_rate);

            loop {
                interval.tick().await;
                if tx.send(AppEvent::Tick).await.is_err() {
                    break;
                }
            }
        });
    }

    /// Receive the next event
    pub async fn next(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}
