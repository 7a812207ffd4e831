//! Desktop geometry and pointer hit testing
//!
//! Rendering records a [`HitMap`] in paint order; mouse handling resolves a
//! click against it from the front-most region backwards.

use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};

use crate::desktop::WindowKind;
use crate::split::TrackRegion;

/// Width of a title bar button such as `[x]`
const BUTTON_WIDTH: u16 = 3;

/// Something the pointer can land on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// Window body or title bar
    Window(WindowKind),
    /// Close affordance
    Close(WindowKind),
    /// Maximize affordance
    Maximize(WindowKind),
    /// Editor/preview divider
    Divider,
    /// Editor tab by file index
    Tab(usize),
    /// Explorer row by file index
    FileRow(usize),
    /// Taskbar toggle button
    TaskbarButton(WindowKind),
}

/// Regions recorded during the last render
#[derive(Debug, Default)]
pub struct HitMap {
    regions: Vec<(Rect, HitTarget)>,
}

impl HitMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget every region
    pub fn clear(&mut self) {
        self.regions.clear();
    }

    /// Record a region; later regions sit in front of earlier ones
    pub fn push(&mut self, area: Rect, target: HitTarget) {
        if area.width > 0 && area.height > 0 {
            self.regions.push((area, target));
        }
    }

    /// Front-most target under a cell
    pub fn at(&self, column: u16, row: u16) -> Option<HitTarget> {
        let position = Position::new(column, row);
        self.regions
            .iter()
            .rev()
            .find(|(area, _)| area.contains(position))
            .map(|(_, target)| *target)
    }

    /// Number of recorded regions
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Whether nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

/// Split the screen into desktop and a one-line taskbar
pub fn desktop_areas(screen: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(screen);
    (chunks[0], chunks[1])
}

/// Outer frame of a window on the desktop
pub fn window_area(kind: WindowKind, maximized: bool, desktop: Rect) -> Rect {
    if maximized {
        return desktop;
    }

    // (x, y, width, height) as percentages of the desktop
    let (px, py, pw, ph) = match kind {
        WindowKind::Editor => (4, 4, 72, 86),
        WindowKind::Explorer => (62, 12, 34, 64),
    };

    let scale = |len: u16, pct: u16| (u32::from(len) * u32::from(pct) / 100) as u16;

    let width = scale(desktop.width, pw).max(24).min(desktop.width);
    let height = scale(desktop.height, ph).max(8).min(desktop.height);
    let x = scale(desktop.width, px).min(desktop.width - width);
    let y = scale(desktop.height, py).min(desktop.height - height);

    Rect::new(desktop.x + x, desktop.y + y, width, height)
}

/// Frame pieces of a window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowChrome {
    /// Whole frame including borders
    pub outer: Rect,
    /// Content area inside the borders
    pub inner: Rect,
    /// `[x]` on the title bar
    pub close: Rect,
    /// `[□]` on the title bar
    pub maximize: Rect,
}

impl WindowChrome {
    /// Lay out the frame of a window
    pub fn new(outer: Rect) -> Self {
        let inner = Rect::new(
            outer.x.saturating_add(1),
            outer.y.saturating_add(1),
            outer.width.saturating_sub(2),
            outer.height.saturating_sub(2),
        );

        let right = outer.right();
        let close_x = right.saturating_sub(BUTTON_WIDTH + 1).max(outer.x);
        let maximize_x = close_x.saturating_sub(BUTTON_WIDTH + 1).max(outer.x);

        Self {
            outer,
            inner,
            close: Rect::new(close_x, outer.y, BUTTON_WIDTH.min(outer.width), 1),
            maximize: Rect::new(maximize_x, outer.y, BUTTON_WIDTH.min(outer.width), 1),
        }
    }
}

/// Editor window content: tabs above an editor/preview split
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorLayout {
    /// Tab strip
    pub tabs: Rect,
    /// Source editor pane
    pub editor: Rect,
    /// One-column divider
    pub divider: Rect,
    /// Preview pane
    pub preview: Rect,
    /// Horizontal span the divider is dragged across
    pub track: Rect,
}

impl EditorLayout {
    /// Lay out the editor content for a split ratio in percent
    pub fn new(inner: Rect, ratio: f64) -> Self {
        let tabs = Rect::new(inner.x, inner.y, inner.width, inner.height.min(1));
        let body = Rect::new(
            inner.x,
            inner.y + tabs.height,
            inner.width,
            inner.height - tabs.height,
        );

        let left = if body.width < 3 {
            0
        } else {
            let raw = (f64::from(body.width) * ratio / 100.0).round() as u16;
            raw.clamp(1, body.width - 2)
        };
        let divider_width = body.width.min(1);

        let editor = Rect::new(body.x, body.y, left, body.height);
        let divider = Rect::new(body.x + left, body.y, divider_width, body.height);
        let preview = Rect::new(
            divider.x + divider_width,
            body.y,
            body.width - left - divider_width,
            body.height,
        );

        Self {
            tabs,
            editor,
            divider,
            preview,
            track: body,
        }
    }

    /// Region that maps pointer columns onto split ratios
    pub fn track_region(&self) -> Option<TrackRegion> {
        TrackRegion::new(f64::from(self.track.x), f64::from(self.track.width)).ok()
    }
}

/// Area of a popup centered in `area`
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
