//! TUI Theme configuration
//!
//! Window frames, taskbar, divider and file kind colors.
//! Supports multiple color depths for terminal compatibility.

use ratatui::style::{Color, Modifier, Style};

use crate::workspace::ArtifactKind;

/// Terminal color capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Basic 16 ANSI colors (maximum compatibility)
    Basic,
    /// 256 color palette
    #[default]
    Indexed,
    /// True color (24-bit RGB)
    TrueColor,
}

impl ColorMode {
    /// Detect the best color mode for the current terminal
    pub fn detect() -> Self {
        if let Ok(colorterm) = std::env::var("COLORTERM") {
            if colorterm == "truecolor" || colorterm == "24bit" {
                return Self::TrueColor;
            }
        }

        if let Ok(term) = std::env::var("TERM") {
            if term.contains("kitty") || term.contains("alacritty") {
                return Self::TrueColor;
            }
            if term.contains("256color") {
                return Self::Indexed;
            }
        }

        Self::Basic
    }
}

/// Theme configuration for the desktop
#[derive(Debug, Clone)]
pub struct Theme {
    // Window frames
    pub border_focused: Color,
    pub border_unfocused: Color,
    pub desktop_bg: Color,

    // Selection
    pub selection_bg: Color,
    pub selection_fg: Option<Color>,

    // Text
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_accent: Color,
    pub text_unsaved: Color,

    // File kind markers
    pub kind_markup: Color,
    pub kind_style: Color,
    pub kind_script: Color,

    // Split divider
    pub divider: Color,
    pub divider_active: Color,

    // Modal borders
    pub modal_info: Color,
    pub modal_warning: Color,
    pub modal_error: Color,

    // Taskbar
    pub taskbar_bg: Color,
    pub taskbar_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::for_color_mode(ColorMode::detect())
    }
}

impl Theme {
    /// Create a theme for the specified color mode
    pub fn for_color_mode(mode: ColorMode) -> Self {
        match mode {
            ColorMode::Basic => Self::basic(),
            ColorMode::Indexed => Self::indexed(),
            ColorMode::TrueColor => Self::truecolor(),
        }
    }

    /// Basic 16-color theme
    pub fn basic() -> Self {
        Self {
            border_focused: Color::Cyan,
            border_unfocused: Color::DarkGray,
            desktop_bg: Color::Black,

            selection_bg: Color::Blue,
            selection_fg: Some(Color::White),

            text_primary: Color::Reset,
            text_secondary: Color::DarkGray,
            text_accent: Color::Blue,
            text_unsaved: Color::Yellow,

            kind_markup: Color::LightRed,
            kind_style: Color::LightBlue,
            kind_script: Color::Yellow,

            divider: Color::DarkGray,
            divider_active: Color::Cyan,

            modal_info: Color::Cyan,
            modal_warning: Color::Yellow,
            modal_error: Color::Red,

            taskbar_bg: Color::Blue,
            taskbar_fg: Color::White,
        }
    }

    /// 256-color theme
    pub fn indexed() -> Self {
        Self {
            border_focused: Color::Indexed(87),   // Neon cyan
            border_unfocused: Color::Indexed(240),
            desktop_bg: Color::Indexed(233),

            selection_bg: Color::Indexed(60),
            selection_fg: Some(Color::Indexed(255)),

            text_primary: Color::Reset,
            text_secondary: Color::Indexed(246),
            text_accent: Color::Indexed(171),     // Magenta
            text_unsaved: Color::Indexed(222),

            kind_markup: Color::Indexed(209),
            kind_style: Color::Indexed(75),
            kind_script: Color::Indexed(221),

            divider: Color::Indexed(238),
            divider_active: Color::Indexed(87),

            modal_info: Color::Indexed(87),
            modal_warning: Color::Indexed(222),
            modal_error: Color::Indexed(210),

            taskbar_bg: Color::Indexed(235),
            taskbar_fg: Color::Indexed(252),
        }
    }

    /// True color theme
    pub fn truecolor() -> Self {
        Self {
            border_focused: Color::Rgb(34, 211, 238),   // Cyan 400
            border_unfocused: Color::Rgb(71, 85, 105),
            desktop_bg: Color::Rgb(5, 5, 12),

            selection_bg: Color::Rgb(49, 46, 129),
            selection_fg: Some(Color::Rgb(245, 245, 250)),

            text_primary: Color::Rgb(226, 232, 240),
            text_secondary: Color::Rgb(148, 163, 184),
            text_accent: Color::Rgb(217, 70, 239),      // Fuchsia 500
            text_unsaved: Color::Rgb(250, 204, 21),

            kind_markup: Color::Rgb(251, 146, 60),
            kind_style: Color::Rgb(96, 165, 250),
            kind_script: Color::Rgb(250, 204, 21),

            divider: Color::Rgb(51, 65, 85),
            divider_active: Color::Rgb(34, 211, 238),

            modal_info: Color::Rgb(34, 211, 238),
            modal_warning: Color::Rgb(250, 204, 21),
            modal_error: Color::Rgb(244, 63, 94),

            taskbar_bg: Color::Rgb(15, 23, 42),
            taskbar_fg: Color::Rgb(203, 213, 225),
        }
    }

    /// Style for the focused window frame
    pub fn border_focused(&self) -> Style {
        Style::default()
            .fg(self.border_focused)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for unfocused window frames
    pub fn border_unfocused(&self) -> Style {
        Style::default().fg(self.border_unfocused)
    }

    /// Style for selected items
    pub fn selection(&self) -> Style {
        let style = Style::default().bg(self.selection_bg);
        match self.selection_fg {
            Some(fg) => style.fg(fg),
            None => style,
        }
    }

    /// Style for the taskbar
    pub fn taskbar(&self) -> Style {
        Style::default().bg(self.taskbar_bg).fg(self.taskbar_fg)
    }

    /// Style for the split divider
    pub fn divider(&self, dragging: bool) -> Style {
        if dragging {
            Style::default().fg(self.divider_active)
        } else {
            Style::default().fg(self.divider)
        }
    }

    /// Marker color for a file kind
    pub fn kind_color(&self, kind: ArtifactKind) -> Color {
        match kind {
            ArtifactKind::Markup => self.kind_markup,
            ArtifactKind::Style => self.kind_style,
            ArtifactKind::Script => self.kind_script,
        }
    }
}
