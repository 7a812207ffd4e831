//! Main TUI application
//!
//! Event-driven desktop that coordinates:
//! - Terminal rendering with ratatui
//! - Keyboard and mouse input routed to the focused window
//! - The signed-in desktop session

use std::io::{self, Stdout};
use std::time::Duration;

use chrono::Local;
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, MouseButton, MouseEvent,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation},
    Frame, Terminal,
};
use tracing::{debug, info, warn};

use super::event::{AppEvent, EventLoop, InputEvent, UserCommand};
use super::layout::{
    centered_rect, desktop_areas, window_area, EditorLayout, HitMap, HitTarget, WindowChrome,
};
use super::theme::Theme;
use super::widgets::{
    button_areas, display_lines, FileList, FileListItem, FileListState, Preview, PreviewState,
    Taskbar, TaskbarButton,
};
use crate::config::{AccountStore, Config};
use crate::desktop::{WindowDescriptor, WindowKind};
use crate::error::{Result, TuiError};
use crate::session::DesktopSession;
use crate::split::TrackRegion;
use crate::workspace::FileId;

/// Lines scrolled per mouse wheel notch
const WHEEL_STEP: u16 = 3;

/// Modal dialog state
#[derive(Debug, Clone)]
pub enum Modal {
    /// No modal open
    None,
    /// Text input modal
    Input {
        title: String,
        prompt: String,
        value: String,
        on_submit: InputAction,
    },
    /// Confirmation modal
    Confirm {
        title: String,
        message: String,
        on_confirm: ConfirmAction,
    },
    /// Help modal
    Help,
    /// Error modal
    Error { message: String },
}

/// Action to perform when input modal is submitted
#[derive(Debug, Clone)]
pub enum InputAction {
    CreateFile,
}

/// Action to perform when confirm modal is confirmed
#[derive(Debug, Clone)]
pub enum ConfirmAction {
    DeleteFile { id: FileId },
    Quit,
}

/// Application UI state
pub struct AppUiState {
    /// Explorer list state
    pub explorer_state: FileListState,
    /// Preview pane state
    pub preview_state: PreviewState,
    /// Current modal
    pub modal: Modal,
    /// Status message
    pub status_message: Option<String>,
    /// Should quit
    pub should_quit: bool,
    /// Pointer targets from the last render
    pub hits: HitMap,
    /// Divider drag span from the last render
    pub track_region: Option<TrackRegion>,
    /// Preview display lines keyed by document hash
    preview_lines: Option<(u64, Vec<String>)>,
}

impl Default for AppUiState {
    fn default() -> Self {
        Self {
            explorer_state: FileListState::new(),
            preview_state: PreviewState::new(),
            modal: Modal::None,
            status_message: None,
            should_quit: false,
            hits: HitMap::new(),
            track_region: None,
            preview_lines: None,
        }
    }
}

/// Main TUI application
pub struct App<S: AccountStore> {
    /// Configuration
    config: Config,
    /// Signed-in desktop
    session: DesktopSession<S>,
    /// UI state
    ui_state: AppUiState,
    /// Event loop
    event_loop: EventLoop,
    /// Colors
    theme: Theme,
}

impl<S: AccountStore> App<S> {
    /// Create a new application
    pub fn new(config: Config, session: DesktopSession<S>) -> Self {
        Self {
            config,
            session,
            ui_state: AppUiState::default(),
            event_loop: EventLoop::new(),
            theme: Theme::default(),
        }
    }

    /// Desktop session
    pub fn session(&self) -> &DesktopSession<S> {
        &self.session
    }

    /// UI state
    pub fn ui_state(&self) -> &AppUiState {
        &self.ui_state
    }

    /// Hand back the session once the UI is done
    pub fn into_session(self) -> DesktopSession<S> {
        self.session
    }

    /// Run the application until the user quits
    pub async fn run(&mut self) -> Result<()> {
        let fps = u64::from(self.config.ui_refresh_fps.max(1));
        self.event_loop.start(Duration::from_millis(1000 / fps));

        let mut terminal = self.setup_terminal()?;

        info!("Entering main loop");
        let result = self.main_loop(&mut terminal).await;
        info!("Main loop exited with result: {:?}", result.is_ok());

        self.restore_terminal(&mut terminal)?;
        result
    }

    /// Setup terminal for TUI
    fn setup_terminal(&self) -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode().map_err(|e| TuiError::InitFailed(e.to_string()))?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
            .map_err(|e| TuiError::InitFailed(e.to_string()))?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend).map_err(|e| TuiError::InitFailed(e.to_string()))?;

        Ok(terminal)
    }

    /// Restore terminal to normal state
    fn restore_terminal(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        // No pointer events arrive once mouse capture is off
        self.session.split.cancel_tracking();

        disable_raw_mode().map_err(|e| TuiError::RestoreFailed(e.to_string()))?;

        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )
        .map_err(|e| TuiError::RestoreFailed(e.to_string()))?;

        terminal
            .show_cursor()
            .map_err(|e| TuiError::RestoreFailed(e.to_string()))?;

        info!("Terminal restore complete");
        Ok(())
    }

    /// Main event loop
    async fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        loop {
            terminal
                .draw(|f| self.render(f))
                .map_err(|e| TuiError::RenderError(e.to_string()))?;

            match self.event_loop.next().await {
                Some(AppEvent::Input(input)) => self.handle_input(input),
                Some(AppEvent::Tick) => {}
                Some(AppEvent::Quit) | None => self.ui_state.should_quit = true,
            }

            if self.ui_state.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Render the desktop
    fn render(&mut self, frame: &mut Frame) {
        let screen = frame.area();
        let (desktop, taskbar) = desktop_areas(screen);

        self.ui_state.hits.clear();
        self.ui_state.track_region = None;

        frame.render_widget(
            Block::default().style(Style::default().bg(self.theme.desktop_bg)),
            desktop,
        );

        let focus = self.session.windows.focus_of();
        for window in self.session.windows.paint_order() {
            self.render_window(frame, desktop, window, focus == Some(window.id));
        }

        self.render_taskbar(frame, taskbar);
        self.render_modal(frame, screen);
    }

    /// Render one window frame and its content
    fn render_window(
        &mut self,
        frame: &mut Frame,
        desktop: Rect,
        window: WindowDescriptor,
        focused: bool,
    ) {
        let chrome = WindowChrome::new(window_area(window.id, window.is_maximized, desktop));

        let border_style = if focused {
            self.theme.border_focused()
        } else {
            self.theme.border_unfocused()
        };

        frame.render_widget(Clear, chrome.outer);
        frame.render_widget(
            Block::default()
                .title(format!(" {} ", window.id.title()))
                .borders(Borders::ALL)
                .border_style(border_style),
            chrome.outer,
        );

        let maximize_label = if window.is_maximized { "[▫]" } else { "[□]" };
        frame.render_widget(
            Paragraph::new(Span::styled(maximize_label, border_style)),
            chrome.maximize,
        );
        frame.render_widget(
            Paragraph::new(Span::styled("[x]", border_style)),
            chrome.close,
        );

        self.ui_state.hits.push(chrome.outer, HitTarget::Window(window.id));

        match window.id {
            WindowKind::Editor => self.render_editor(frame, chrome.inner, focused),
            WindowKind::Explorer => self.render_explorer(frame, chrome.inner, focused),
        }

        self.ui_state.hits.push(chrome.maximize, HitTarget::Maximize(window.id));
        self.ui_state.hits.push(chrome.close, HitTarget::Close(window.id));
    }

    /// Render tabs, source and preview
    fn render_editor(&mut self, frame: &mut Frame, inner: Rect, focused: bool) {
        let layout = EditorLayout::new(inner, self.session.split.ratio());
        self.ui_state.track_region = layout.track_region();

        self.render_tabs(frame, layout.tabs);
        self.render_source(frame, layout.editor, focused);

        let dragging = self.session.split.is_tracking();
        let bar: Vec<Line> = (0..layout.divider.height)
            .map(|_| Line::from(if dragging { "┃" } else { "│" }))
            .collect();
        frame.render_widget(
            Paragraph::new(bar).style(self.theme.divider(dragging)),
            layout.divider,
        );
        self.ui_state.hits.push(layout.divider, HitTarget::Divider);

        self.render_preview(frame, layout.preview);
    }

    /// Render one tab per file
    fn render_tabs(&mut self, frame: &mut Frame, area: Rect) {
        let active = self.session.workspace.active_id();
        let mut x = area.x;

        for (index, file) in self.session.workspace.files().iter().enumerate() {
            let label = format!(" {} {} ", file.kind.marker(), file.name);
            let width = (Span::raw(label.as_str()).width() as u16).min(area.right() - x);
            if width == 0 {
                break;
            }

            let style = if active == Some(&file.id) {
                self.theme.selection().add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.theme.text_secondary)
            };

            let tab = Rect::new(x, area.y, width, area.height);
            frame.render_widget(Paragraph::new(Span::styled(label, style)), tab);
            self.ui_state.hits.push(tab, HitTarget::Tab(index));

            x = x.saturating_add(width + 1);
            if x >= area.right() {
                break;
            }
        }
    }

    /// Render the active file, pinned to its last lines
    fn render_source(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let Some(file) = self.session.workspace.active() else {
            frame.render_widget(
                Paragraph::new("No file open. Press Ctrl-N to create one.")
                    .style(Style::default().fg(self.theme.text_secondary)),
                area,
            );
            return;
        };

        let mut text = file.content.clone();
        if focused {
            text.push('▏');
        }

        let total = text.lines().count();
        let scroll = total.saturating_sub(area.height as usize).min(u16::MAX as usize) as u16;

        frame.render_widget(
            Paragraph::new(text)
                .style(Style::default().fg(self.theme.text_primary))
                .scroll((scroll, 0)),
            area,
        );
    }

    /// Render the composed document
    fn render_preview(&mut self, frame: &mut Frame, area: Rect) {
        let document = self.session.preview();
        let title = format!(" Preview [{}] ", document.sandbox);

        let stale = self
            .ui_state
            .preview_lines
            .as_ref()
            .is_none_or(|(hash, _)| *hash != document.hash);
        if stale {
            self.ui_state.preview_lines = Some((document.hash, display_lines(&document.html)));
        }

        let lines: &[String] = match &self.ui_state.preview_lines {
            Some((_, lines)) => lines,
            None => &[],
        };

        let block = Block::default()
            .title(title)
            .title_style(Style::default().fg(self.theme.text_accent));
        let visible_height = block.inner(area).height;
        self.ui_state
            .preview_state
            .set_content(lines.len(), visible_height);

        let preview = Preview::new(lines)
            .block(block)
            .scroll(self.ui_state.preview_state.scroll_offset)
            .tag_color(self.theme.text_accent);
        frame.render_widget(preview, area);

        let mut scrollbar_state = self.ui_state.preview_state.scrollbar_state();
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            area,
            &mut scrollbar_state,
        );
    }

    /// Render the file list with a key hint row
    fn render_explorer(&mut self, frame: &mut Frame, inner: Rect, focused: bool) {
        let workspace = &self.session.workspace;
        let saved = workspace.saved_files();
        let active = workspace.active_id();

        let items: Vec<FileListItem> = workspace
            .files()
            .iter()
            .map(|file| FileListItem {
                name: file.name.clone(),
                kind: file.kind,
                is_active: active == Some(&file.id),
                is_modified: saved.iter().find(|s| s.id == file.id) != Some(file),
            })
            .collect();

        let state = &mut self.ui_state.explorer_state;
        state.set_item_count(items.len());
        if state.selected().is_none() {
            state.select(items.iter().position(|item| item.is_active));
        }

        let list_height = inner.height.saturating_sub(1);
        let list_area = Rect::new(inner.x, inner.y, inner.width, list_height);
        let hint_area = Rect::new(inner.x, inner.y + list_height, inner.width, inner.height.min(1));

        let block = Block::default().style(Style::default().fg(self.theme.text_primary));
        frame.render_stateful_widget(
            FileList::new(&items, &self.theme).block(block),
            list_area,
            &mut state.list_state,
        );

        let offset = state.offset();
        for row in 0..list_area.height {
            let index = offset + row as usize;
            if index >= items.len() {
                break;
            }
            self.ui_state.hits.push(
                Rect::new(list_area.x, list_area.y + row, list_area.width, 1),
                HitTarget::FileRow(index),
            );
        }

        let hint_style = if focused {
            Style::default().fg(self.theme.text_accent)
        } else {
            Style::default().fg(self.theme.text_secondary)
        };
        frame.render_widget(
            Paragraph::new(Span::styled(" Enter open · n new · d delete", hint_style)),
            hint_area,
        );
    }

    /// Render the taskbar
    fn render_taskbar(&mut self, frame: &mut Frame, area: Rect) {
        let focus = self.session.windows.focus_of();
        let buttons = self
            .session
            .windows
            .descriptors()
            .map(|w| TaskbarButton {
                kind: w.id,
                is_open: w.is_open,
                is_focused: focus == Some(w.id),
            })
            .collect();

        let status = match &self.ui_state.status_message {
            Some(message) => message.clone(),
            None if self.session.workspace.is_dirty() => "● unsaved · F12 help".to_string(),
            None => "F12 help".to_string(),
        };

        let taskbar = Taskbar::new(buttons, self.session.account().as_str(), &self.theme)
            .status(Some(status.as_str()))
            .clock(Local::now().format("%H:%M").to_string());
        frame.render_widget(taskbar, area);

        for (kind, slot) in button_areas(area) {
            self.ui_state.hits.push(slot, HitTarget::TaskbarButton(kind));
        }
    }

    /// Render modal overlay
    fn render_modal(&self, frame: &mut Frame, area: Rect) {
        match &self.ui_state.modal {
            Modal::None => {}

            Modal::Input {
                title,
                prompt,
                value,
                ..
            } => {
                let modal_area = centered_rect(60, 20, area);
                frame.render_widget(Clear, modal_area);

                let block = Block::default()
                    .title(format!(" {} ", title))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.theme.modal_warning));

                let inner = block.inner(modal_area);
                frame.render_widget(block, modal_area);

                let text = format!("{}\n\n> {}_", prompt, value);
                frame.render_widget(Paragraph::new(text), inner);
            }

            Modal::Confirm { title, message, .. } => {
                let modal_area = centered_rect(50, 20, area);
                frame.render_widget(Clear, modal_area);

                let block = Block::default()
                    .title(format!(" {} ", title))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.theme.modal_error));

                let inner = block.inner(modal_area);
                frame.render_widget(block, modal_area);

                let text = format!("{}\n\n[Enter] Confirm  [Esc] Cancel", message);
                frame.render_widget(Paragraph::new(text), inner);
            }

            Modal::Error { message } => {
                let modal_area = centered_rect(60, 20, area);
                frame.render_widget(Clear, modal_area);

                let block = Block::default()
                    .title(" Error ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.theme.modal_error));

                let inner = block.inner(modal_area);
                frame.render_widget(block, modal_area);

                let text = format!("{}\n\nPress any key to close.", message);
                frame.render_widget(Paragraph::new(text), inner);
            }

            Modal::Help => {
                let modal_area = centered_rect(70, 80, area);
                frame.render_widget(Clear, modal_area);

                let block = Block::default()
                    .title(" Help ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.theme.modal_info));

                let inner = block.inner(modal_area);
                frame.render_widget(block, modal_area);

                let help_text = r#"
Windows:
  F1              Open/close the IDE
  F2              Open/close the file explorer
  F3              Maximize/restore the focused window
  Mouse           Click a window to focus it, [x] closes, [□] maximizes

Editing (IDE focused):
  Type            Edit the active file
  Tab/Shift+Tab   Next/previous file
  Drag divider    Resize editor and preview
  PgUp/PgDn       Scroll the preview

Explorer:
  Up/Down, j/k    Select a file
  Enter           Open in the IDE
  n, Ctrl+N       New file
  d, Del          Delete file

Other:
  Ctrl+S          Save workspace
  F12             Show this help
  Ctrl+Q          Quit

Press any key to close this help.
"#;

                frame.render_widget(Paragraph::new(help_text), inner);
            }
        }
    }

    /// Handle input events
    fn handle_input(&mut self, input: InputEvent) {
        match input {
            InputEvent::Key(key) => {
                if !matches!(self.ui_state.modal, Modal::None) {
                    self.handle_modal_key(key);
                    return;
                }

                if let Some(cmd) = UserCommand::from_key(key) {
                    self.handle_command(cmd);
                }
            }
            InputEvent::Mouse(mouse) => self.handle_mouse(mouse),
            InputEvent::Resize(_, _) => {
                // Geometry under an active drag is gone
                self.session.split.cancel_tracking();
            }
        }
    }

    /// Handle modal key input
    fn handle_modal_key(&mut self, key: KeyEvent) {
        match &mut self.ui_state.modal {
            Modal::Input {
                value, on_submit, ..
            } => match key.code {
                KeyCode::Enter => {
                    let action = on_submit.clone();
                    let value = value.clone();
                    self.ui_state.modal = Modal::None;
                    self.handle_input_submit(action, value);
                }
                KeyCode::Esc => {
                    self.ui_state.modal = Modal::None;
                }
                KeyCode::Backspace => {
                    value.pop();
                }
                KeyCode::Char(c) => {
                    value.push(c);
                }
                _ => {}
            },

            Modal::Confirm { on_confirm, .. } => match key.code {
                KeyCode::Enter => {
                    let action = on_confirm.clone();
                    self.ui_state.modal = Modal::None;
                    self.handle_confirm(action);
                }
                KeyCode::Esc => {
                    self.ui_state.modal = Modal::None;
                }
                _ => {}
            },

            Modal::Help | Modal::Error { .. } => {
                self.ui_state.modal = Modal::None;
            }

            Modal::None => {}
        }
    }

    /// Handle a user command
    fn handle_command(&mut self, cmd: UserCommand) {
        let focus = self.session.windows.focus_of();

        match cmd {
            UserCommand::ToggleEditor => self.toggle_window(WindowKind::Editor),
            UserCommand::ToggleExplorer => self.toggle_window(WindowKind::Explorer),
            UserCommand::ToggleMaximize => {
                if let Some(kind) = focus {
                    self.toggle_maximize(kind);
                }
            }
            UserCommand::Save => self.save(),
            UserCommand::NewFile => self.prompt_new_file(),
            UserCommand::NextFile => self.session.workspace.cycle_selection(true),
            UserCommand::PrevFile => self.session.workspace.cycle_selection(false),
            UserCommand::NavigateUp => match focus {
                Some(WindowKind::Explorer) => self.ui_state.explorer_state.previous(),
                _ => self.ui_state.preview_state.scroll_up(1),
            },
            UserCommand::NavigateDown => match focus {
                Some(WindowKind::Explorer) => self.ui_state.explorer_state.next(),
                _ => self.ui_state.preview_state.scroll_down(1),
            },
            UserCommand::PageUp => self.ui_state.preview_state.page_up(),
            UserCommand::PageDown => self.ui_state.preview_state.page_down(),
            UserCommand::ShowHelp => self.ui_state.modal = Modal::Help,
            UserCommand::Quit => self.request_quit(),
            UserCommand::Cancel => {
                if self.session.split.is_tracking() {
                    self.session.split.cancel_tracking();
                } else {
                    self.ui_state.status_message = None;
                }
            }
            UserCommand::Confirm => match focus {
                Some(WindowKind::Editor) => self.type_text("\n"),
                Some(WindowKind::Explorer) => self.open_selected(),
                None => {}
            },
            UserCommand::Backspace => {
                if focus == Some(WindowKind::Editor) {
                    let result = self.session.workspace.backspace_active();
                    self.report("Edit failed", result);
                }
            }
            UserCommand::Delete => {
                if focus == Some(WindowKind::Explorer) {
                    self.confirm_delete();
                }
            }
            UserCommand::TextInput(c) => match focus {
                Some(WindowKind::Editor) => self.type_text(c.encode_utf8(&mut [0; 4])),
                Some(WindowKind::Explorer) => match c {
                    'n' => self.prompt_new_file(),
                    'd' => self.confirm_delete(),
                    'j' => self.ui_state.explorer_state.next(),
                    'k' => self.ui_state.explorer_state.previous(),
                    _ => {}
                },
                None => {}
            },
        }
    }

    /// Handle pointer input
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        // A release always ends a drag, even under a modal
        if mouse.kind == MouseEventKind::Up(MouseButton::Left) {
            self.session.split.release();
            return;
        }

        if !matches!(self.ui_state.modal, Modal::None) {
            return;
        }

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.handle_click(mouse.column, mouse.row),
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(ratio) = self.session.split.pointer_moved(f64::from(mouse.column)) {
                    debug!("Split ratio {:.1}", ratio);
                }
            }
            MouseEventKind::ScrollUp => self.ui_state.preview_state.scroll_up(WHEEL_STEP),
            MouseEventKind::ScrollDown => self.ui_state.preview_state.scroll_down(WHEEL_STEP),
            _ => {}
        }
    }

    /// Resolve a click against the last rendered frame
    fn handle_click(&mut self, column: u16, row: u16) {
        let Some(target) = self.ui_state.hits.at(column, row) else {
            return;
        };
        debug!("Click at ({}, {}) on {:?}", column, row, target);

        match target {
            HitTarget::Window(kind) => {
                let result = self.session.windows.raise(kind).map(|_| ());
                self.report("Cannot focus window", result);
            }
            HitTarget::Close(kind) | HitTarget::TaskbarButton(kind) => self.toggle_window(kind),
            HitTarget::Maximize(kind) => self.toggle_maximize(kind),
            HitTarget::Divider => {
                let result = self.session.windows.raise(WindowKind::Editor).map(|_| ());
                if self.report("Cannot focus window", result).is_some() {
                    if let Some(region) = self.ui_state.track_region {
                        self.session.split.press(region);
                    }
                }
            }
            HitTarget::Tab(index) => self.open_file_at(index),
            HitTarget::FileRow(index) => {
                self.ui_state.explorer_state.select(Some(index));
                self.open_file_at(index);
            }
        }
    }

    fn toggle_window(&mut self, kind: WindowKind) {
        let result = self.session.windows.toggle(kind).map(|w| w.is_open);
        if let Some(open) = self.report("Cannot toggle window", result) {
            let verb = if open { "Opened" } else { "Closed" };
            self.ui_state.status_message = Some(format!("{} {}", verb, kind.title()));
        }
    }

    fn toggle_maximize(&mut self, kind: WindowKind) {
        let result = self
            .session
            .windows
            .toggle_maximize(kind)
            .map(|w| w.is_open);
        if let Some(true) = self.report("Cannot maximize window", result) {
            let result = self.session.windows.raise(kind).map(|_| ());
            self.report("Cannot focus window", result);
        }
    }

    fn type_text(&mut self, text: &str) {
        let result = self.session.workspace.append_to_active(text);
        self.report("Edit failed", result);
    }

    fn save(&mut self) {
        let count = self.session.workspace.files().len();
        let result = self.session.save();
        if self.report("Save failed", result).is_some() {
            self.ui_state.status_message = Some(format!("Saved {} files", count));
        }
    }

    fn request_quit(&mut self) {
        if self.session.workspace.is_dirty() {
            self.ui_state.modal = Modal::Confirm {
                title: "Unsaved Changes".to_string(),
                message: "Quit without saving?\nPress Ctrl+S first to keep your edits."
                    .to_string(),
                on_confirm: ConfirmAction::Quit,
            };
        } else {
            self.ui_state.should_quit = true;
        }
    }

    fn prompt_new_file(&mut self) {
        self.ui_state.modal = Modal::Input {
            title: "New File".to_string(),
            prompt: "File name (.html, .css or .js):".to_string(),
            value: String::new(),
            on_submit: InputAction::CreateFile,
        };
    }

    fn open_selected(&mut self) {
        if let Some(index) = self.ui_state.explorer_state.selected() {
            self.open_file_at(index);
        }
    }

    fn open_file_at(&mut self, index: usize) {
        let Some(id) = self
            .session
            .workspace
            .files()
            .get(index)
            .map(|f| f.id.clone())
        else {
            return;
        };

        let result = self.session.open_in_editor(&id);
        self.report("Cannot open file", result);
    }

    fn confirm_delete(&mut self) {
        let selected = self
            .ui_state
            .explorer_state
            .selected()
            .and_then(|i| self.session.workspace.files().get(i));

        if let Some(file) = selected {
            self.ui_state.modal = Modal::Confirm {
                title: "Delete File".to_string(),
                message: format!(
                    "Delete {}?\nThe deletion is kept once you save.",
                    file.name
                ),
                on_confirm: ConfirmAction::DeleteFile {
                    id: file.id.clone(),
                },
            };
        }
    }

    /// Handle input modal submission
    fn handle_input_submit(&mut self, action: InputAction, value: String) {
        match action {
            InputAction::CreateFile => {
                let result = self.session.workspace.create_file(&value);
                let Some(id) = self.report("Cannot create file", result) else {
                    return;
                };

                let result = self.session.open_in_editor(&id);
                self.report("Cannot open file", result);
                self.ui_state.status_message = Some(format!("Created {}", value.trim()));
            }
        }
    }

    /// Handle confirmation
    fn handle_confirm(&mut self, action: ConfirmAction) {
        match action {
            ConfirmAction::DeleteFile { id } => {
                let result = self.session.workspace.remove_file(&id);
                if let Some(file) = self.report("Cannot delete file", result) {
                    self.ui_state.status_message = Some(format!("Deleted {}", file.name));
                }
            }
            ConfirmAction::Quit => {
                self.ui_state.should_quit = true;
            }
        }
    }

    /// Surface a failed action in the error modal
    fn report<T, E: std::fmt::Display>(
        &mut self,
        action: &str,
        result: std::result::Result<T, E>,
    ) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("{}: {}", action, e);
                self.ui_state.modal = Modal::Error {
                    message: format!("{}: {}", action, e),
                };
                None
            }
        }
    }
}
