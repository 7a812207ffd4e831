//! Preview pane widget
//!
//! Displays the composed preview document as source, one element per line,
//! with markup tags highlighted and scrolling support.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::{Block, Paragraph, ScrollbarState, Widget},
};

/// Break a document into display lines
///
/// Source newlines are kept and adjacent tags (`><`) are split apart so the
/// single-line document shell reads as a tree.
pub fn display_lines(document: &str) -> Vec<String> {
    let mut lines = Vec::new();
    for line in document.lines() {
        let mut rest = line;
        while let Some(pos) = rest.find("><") {
            lines.push(rest[..=pos].to_string());
            rest = &rest[pos + 1..];
        }
        lines.push(rest.to_string());
    }
    lines
}

/// Split one line into tag and text spans
fn highlight_line(line: &str, tag_color: Color) -> Line<'static> {
    let mut spans = Vec::new();
    let mut rest = line;

    while let Some(start) = rest.find('<') {
        if start > 0 {
            spans.push(Span::raw(rest[..start].to_string()));
        }
        let end = rest[start..]
            .find('>')
            .map_or(rest.len(), |offset| start + offset + 1);
        spans.push(Span::styled(
            rest[start..end].to_string(),
            Style::default().fg(tag_color),
        ));
        rest = &rest[end..];
    }
    if !rest.is_empty() {
        spans.push(Span::raw(rest.to_string()));
    }

    Line::from(spans)
}

/// Preview widget for the composed document
pub struct Preview<'a> {
    /// Document lines
    lines: &'a [String],
    /// Block for borders and title
    block: Option<Block<'a>>,
    /// Scroll offset
    scroll: u16,
    /// Color for tags
    tag_color: Color,
}

impl<'a> Preview<'a> {
    /// Create a new preview widget
    pub fn new(lines: &'a [String]) -> Self {
        Self {
            lines,
            block: None,
            scroll: 0,
            tag_color: Color::Cyan,
        }
    }

    /// Set the block
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// Set the scroll offset
    pub fn scroll(mut self, scroll: u16) -> Self {
        self.scroll = scroll;
        self
    }

    /// Set the tag highlight color
    pub fn tag_color(mut self, color: Color) -> Self {
        self.tag_color = color;
        self
    }
}

impl Widget for Preview<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text: Text<'_> = self
            .lines
            .iter()
            .map(|line| highlight_line(line, self.tag_color))
            .collect::<Vec<_>>()
            .into();

        let paragraph = Paragraph::new(text).scroll((self.scroll, 0));

        let paragraph = if let Some(block) = self.block {
            paragraph.block(block)
        } else {
            paragraph
        };

        paragraph.render(area, buf);
    }
}

/// Preview state for scrolling
#[derive(Debug, Default)]
pub struct PreviewState {
    /// Current scroll offset (lines from top)
    pub scroll_offset: u16,
    /// Total number of display lines
    pub total_lines: usize,
    /// Visible height
    pub visible_height: u16,
}

impl PreviewState {
    /// Create a new state
    pub fn new() -> Self {
        Self::default()
    }

    /// Update content info
    pub fn set_content(&mut self, total_lines: usize, visible_height: u16) {
        self.total_lines = total_lines;
        self.visible_height = visible_height;
        self.clamp_scroll();
    }

    /// Scroll up by n lines
    pub fn scroll_up(&mut self, n: u16) {
        self.scroll_offset = self.scroll_offset.saturating_sub(n);
    }

    /// Scroll down by n lines
    pub fn scroll_down(&mut self, n: u16) {
        self.scroll_offset = self.scroll_offset.saturating_add(n);
        self.clamp_scroll();
    }

    /// Page up
    pub fn page_up(&mut self) {
        let page = self.visible_height.saturating_sub(2).max(1);
        self.scroll_up(page);
    }

    /// Page down
    pub fn page_down(&mut self) {
        let page = self.visible_height.saturating_sub(2).max(1);
        self.scroll_down(page);
    }

    fn max_scroll(&self) -> u16 {
        self.total_lines
            .saturating_sub(self.visible_height as usize)
            .min(u16::MAX as usize) as u16
    }

    fn clamp_scroll(&mut self) {
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());
    }

    /// Get scrollbar state
    pub fn scrollbar_state(&self) -> ScrollbarState {
        ScrollbarState::new(self.total_lines)
            .position(self.scroll_offset as usize)
            .viewport_content_length(self.visible_height as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_lines_split_tags() {
        let lines = display_lines("<html><head></head><body>\n<h1>Hi</h1></body></html>");
        assert_eq!(
            lines,
            vec![
                "<html>",
                "<head>",
                "</head>",
                "<body>",
                "<h1>Hi</h1>",
                "</body>",
                "</html>",
            ]
        );
    }

    #[test]
    fn test_display_lines_keep_text() {
        let lines = display_lines("body { color: red; }\na > b < c");
        assert_eq!(lines, vec!["body { color: red; }", "a > b < c"]);
    }

    #[test]
    fn test_highlight_line_spans() {
        let line = highlight_line("<h1>Hi</h1> there", Color::Red);
        let parts: Vec<&str> = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(parts, vec!["<h1>", "Hi", "</h1>", " there"]);
        assert_eq!(line.spans[0].style.fg, Some(Color::Red));
        assert_eq!(line.spans[1].style.fg, None);

        // unterminated tag runs to the end of the line
        let line = highlight_line("a <b", Color::Red);
        assert_eq!(line.spans.len(), 2);
    }

    #[test]
    fn test_preview_state_scrolling() {
        let mut state = PreviewState::new();
        state.set_content(100, 20);

        state.scroll_down(10);
        assert_eq!(state.scroll_offset, 10);

        state.scroll_up(5);
        assert_eq!(state.scroll_offset, 5);

        state.page_down();
        assert_eq!(state.scroll_offset, 23);

        state.scroll_down(500);
        assert_eq!(state.scroll_offset, 80);

        // document shrank below the viewport
        state.set_content(10, 20);
        assert_eq!(state.scroll_offset, 0);
    }
}
