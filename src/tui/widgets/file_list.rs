//! Explorer file list widget
//!
//! One row per workspace file with a kind marker, the name and an
//! unsaved-changes indicator.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, List, ListItem, ListState, StatefulWidget},
};

use crate::tui::theme::Theme;
use crate::workspace::ArtifactKind;

/// A row in the explorer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileListItem {
    /// Display name
    pub name: String,
    /// File kind
    pub kind: ArtifactKind,
    /// Selected in the editor
    pub is_active: bool,
    /// Differs from the last saved snapshot
    pub is_modified: bool,
}

/// File list widget
pub struct FileList<'a> {
    items: &'a [FileListItem],
    block: Option<Block<'a>>,
    theme: &'a Theme,
}

impl<'a> FileList<'a> {
    /// Create a new file list
    pub fn new(items: &'a [FileListItem], theme: &'a Theme) -> Self {
        Self {
            items,
            block: None,
            theme,
        }
    }

    /// Set the block
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    fn to_list_items(&self) -> Vec<ListItem<'a>> {
        self.items
            .iter()
            .map(|item| {
                let mut name_style = Style::default().fg(self.theme.text_primary);
                if item.is_active {
                    name_style = name_style.add_modifier(Modifier::BOLD);
                }

                let mut spans = vec![
                    Span::styled(
                        format!("{:>2} ", item.kind.marker()),
                        Style::default().fg(self.theme.kind_color(item.kind)),
                    ),
                    Span::styled(item.name.clone(), name_style),
                ];

                if item.is_modified {
                    spans.push(Span::styled(
                        " ●",
                        Style::default().fg(self.theme.text_unsaved),
                    ));
                }

                ListItem::new(Line::from(spans))
            })
            .collect()
    }
}

impl StatefulWidget for FileList<'_> {
    type State = ListState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let items = self.to_list_items();
        let list = List::new(items).highlight_style(self.theme.selection());
        let list = if let Some(block) = self.block {
            list.block(block)
        } else {
            list
        };

        StatefulWidget::render(list, area, buf, state);
    }
}

/// File list selection state
#[derive(Debug, Default)]
pub struct FileListState {
    /// Inner list state
    pub list_state: ListState,
    /// Total number of items
    pub item_count: usize,
}

impl FileListState {
    /// Create a new state
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the selected index
    pub fn selected(&self) -> Option<usize> {
        self.list_state.selected()
    }

    /// Select an item
    pub fn select(&mut self, index: Option<usize>) {
        self.list_state.select(index.filter(|&i| i < self.item_count));
    }

    /// Select the next item, wrapping
    pub fn next(&mut self) {
        if self.item_count == 0 {
            return;
        }

        let i = match self.list_state.selected() {
            Some(i) if i + 1 < self.item_count => i + 1,
            _ => 0,
        };
        self.list_state.select(Some(i));
    }

    /// Select the previous item, wrapping
    pub fn previous(&mut self) {
        if self.item_count == 0 {
            return;
        }

        let i = match self.list_state.selected() {
            Some(0) | None => self.item_count - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
    }

    /// Update item count and keep the selection valid
    pub fn set_item_count(&mut self, count: usize) {
        self.item_count = count;

        match self.list_state.selected() {
            _ if count == 0 => self.list_state.select(None),
            Some(selected) if selected >= count => self.list_state.select(Some(count - 1)),
            _ => {}
        }
    }

    /// Index of the first visible row
    pub fn offset(&self) -> usize {
        self.list_state.offset()
    }
}
