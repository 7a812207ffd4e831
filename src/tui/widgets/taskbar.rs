//! Taskbar widget
//!
//! One line at the bottom of the desktop: a toggle button per window, then the
//! status message, with the account and clock on the right.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::desktop::WindowKind;
use crate::tui::theme::Theme;

/// Brand shown before the buttons
const START_LABEL: &str = " ◆ NOVA ";

/// Gap between buttons
const BUTTON_GAP: u16 = 1;

/// Button text for a window
fn button_label(kind: WindowKind) -> String {
    format!("[ {} ]", kind.label())
}

/// Cells occupied by each window button
pub fn button_areas(area: Rect) -> Vec<(WindowKind, Rect)> {
    let mut x = area.x + Span::raw(START_LABEL).width() as u16;
    let mut areas = Vec::new();

    for kind in WindowKind::ALL {
        let width = Span::raw(button_label(kind)).width() as u16;
        if x + width > area.right() {
            break;
        }
        areas.push((kind, Rect::new(x, area.y, width, 1)));
        x += width + BUTTON_GAP;
    }

    areas
}

/// State of one taskbar button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskbarButton {
    /// Window the button toggles
    pub kind: WindowKind,
    /// Window is open
    pub is_open: bool,
    /// Window holds focus
    pub is_focused: bool,
}

/// Taskbar widget
pub struct Taskbar<'a> {
    buttons: Vec<TaskbarButton>,
    status: Option<&'a str>,
    account: &'a str,
    clock: String,
    theme: &'a Theme,
}

impl<'a> Taskbar<'a> {
    /// Create a taskbar
    pub fn new(buttons: Vec<TaskbarButton>, account: &'a str, theme: &'a Theme) -> Self {
        Self {
            buttons,
            status: None,
            account,
            clock: String::new(),
            theme,
        }
    }

    /// Set the status message
    pub fn status(mut self, status: Option<&'a str>) -> Self {
        self.status = status;
        self
    }

    /// Set the clock text
    pub fn clock(mut self, clock: impl Into<String>) -> Self {
        self.clock = clock.into();
        self
    }

    fn button_style(&self, button: &TaskbarButton) -> Style {
        if button.is_focused {
            self.theme.selection().add_modifier(Modifier::BOLD)
        } else if button.is_open {
            self.theme.taskbar().fg(self.theme.text_accent)
        } else {
            self.theme.taskbar().fg(self.theme.text_secondary)
        }
    }
}

impl Widget for Taskbar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new("")
            .style(self.theme.taskbar())
            .render(area, buf);

        Paragraph::new(Span::styled(
            START_LABEL,
            self.theme.taskbar().add_modifier(Modifier::BOLD),
        ))
        .render(area, buf);

        let slots = button_areas(area);
        let mut left_end = area.x + Span::raw(START_LABEL).width() as u16;
        for (kind, slot) in &slots {
            if let Some(button) = self.buttons.iter().find(|b| b.kind == *kind) {
                Paragraph::new(Span::styled(button_label(*kind), self.button_style(button)))
                    .render(*slot, buf);
            }
            left_end = slot.right() + BUTTON_GAP;
        }

        let right = Line::from(vec![
            Span::styled(
                format!(" {} ", self.account),
                self.theme.taskbar().fg(self.theme.text_accent),
            ),
            Span::styled(format!(" {} ", self.clock), self.theme.taskbar()),
        ]);
        let right_width = (right.width() as u16).min(area.width);
        let right_area = Rect::new(area.right() - right_width, area.y, right_width, 1);
        Paragraph::new(right).render(right_area, buf);

        if let Some(status) = self.status {
            let width = right_area.x.saturating_sub(left_end + 1);
            if width > 0 {
                Paragraph::new(Span::styled(
                    status.to_string(),
                    self.theme.taskbar().fg(self.theme.text_secondary),
                ))
                .render(Rect::new(left_end + 1, area.y, width, 1), buf);
            }
        }
    }
}
