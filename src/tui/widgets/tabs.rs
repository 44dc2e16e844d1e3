//! Tab bar widget for view navigation

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::tui::theme::Theme;

/// Gap between tab labels
const TAB_SPACING: u16 = 2;

/// Available tabs in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Overview,
    Gender,
    Ages,
    Countries,
    Years,
}

impl Tab {
    /// Get the display label for this tab
    pub fn label(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Gender => "Gender",
            Self::Ages => "Ages",
            Self::Countries => "Countries",
            Self::Years => "Years",
        }
    }

    /// Get all tabs in order
    pub fn all() -> &'static [Tab] {
        &[
            Tab::Overview,
            Tab::Gender,
            Tab::Ages,
            Tab::Countries,
            Tab::Years,
        ]
    }

    /// Get the next tab (wrapping)
    pub fn next(self) -> Self {
        match self {
            Self::Overview => Self::Gender,
            Self::Gender => Self::Ages,
            Self::Ages => Self::Countries,
            Self::Countries => Self::Years,
            Self::Years => Self::Overview,
        }
    }

    /// Get the previous tab (wrapping)
    pub fn prev(self) -> Self {
        match self {
            Self::Overview => Self::Years,
            Self::Gender => Self::Overview,
            Self::Ages => Self::Gender,
            Self::Countries => Self::Ages,
            Self::Years => Self::Countries,
        }
    }

    /// Get tab from number key (1-5)
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::Overview),
            2 => Some(Self::Gender),
            3 => Some(Self::Ages),
            4 => Some(Self::Countries),
            5 => Some(Self::Years),
            _ => None,
        }
    }
}

/// Tab bar widget showing available views
pub struct TabBar {
    selected: Tab,
    theme: Theme,
}

impl TabBar {
    pub fn new(selected: Tab, theme: Theme) -> Self {
        Self { selected, theme }
    }
}

impl TabBar {
    /// Display text per tab: "1 Overview", selected one bracketed
    fn segments(&self) -> Vec<(String, Style)> {
        Tab::all()
            .iter()
            .enumerate()
            .map(|(i, tab)| {
                if *tab == self.selected {
                    (
                        format!("[{} {}]", i + 1, tab.label()),
                        Style::default()
                            .fg(self.theme.accent())
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    (
                        format!("{} {}", i + 1, tab.label()),
                        Style::default().fg(self.theme.muted()),
                    )
                }
            })
            .collect()
    }
}

impl Widget for TabBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let segments = self.segments();
        let total_width = segments
            .iter()
            .map(|(text, _)| text.len() as u16 + TAB_SPACING)
            .sum::<u16>()
            .saturating_sub(TAB_SPACING);

        let mut x = area.x + (area.width.saturating_sub(total_width)) / 2;
        for (text, style) in segments {
            let width = text.len() as u16;
            if x + width > area.x + area.width {
                break;
            }
            buf.set_string(x, area.y, &text, style);
            x += width + TAB_SPACING;
        }
    }
}
