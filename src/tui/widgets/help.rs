//! Help popup widget - displays keyboard shortcuts

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::tui::theme::Theme;

/// Version from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Width and height of the help popup
const POPUP_WIDTH: u16 = 46;
const POPUP_HEIGHT: u16 = 21;

/// Shortcut sections: (header, [(key, description)])
const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation",
        &[
            ("Tab / Shift+Tab", "Switch view"),
            ("1-5", "Jump to view"),
            ("Up/Down or j/k", "Scroll (Countries)"),
        ],
    ),
    (
        "Overview panels",
        &[
            ("g / a", "Toggle gender / ages"),
            ("c / y", "Toggle countries / years"),
        ],
    ),
    (
        "General",
        &[
            ("r", "Fetch a new batch"),
            ("q / Esc / Ctrl+C", "Quit"),
            ("?", "Toggle help"),
        ],
    ),
];

/// Help popup widget showing keyboard shortcuts
pub struct HelpPopup {
    theme: Theme,
}

impl HelpPopup {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    /// Calculate centered popup area
    pub fn centered_area(area: Rect) -> Rect {
        let x = area.x + (area.width.saturating_sub(POPUP_WIDTH)) / 2;
        let y = area.y + (area.height.saturating_sub(POPUP_HEIGHT)) / 2;
        Rect {
            x,
            y,
            width: POPUP_WIDTH.min(area.width),
            height: POPUP_HEIGHT.min(area.height),
        }
    }

    fn lines(&self, width: u16) -> Vec<Line<'static>> {
        let mut lines = vec![Line::raw("")];

        for (header, bindings) in SECTIONS {
            lines.push(Line::from(Span::styled(
                *header,
                Style::default()
                    .fg(self.theme.trend())
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(Span::styled(
                "─".repeat(width as usize),
                Style::default().fg(self.theme.muted()),
            )));
            for (key, desc) in bindings.iter() {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("  {:<18}", key),
                        Style::default().fg(self.theme.accent()),
                    ),
                    Span::styled(*desc, Style::default().fg(self.theme.text())),
                ]));
            }
            lines.push(Line::raw(""));
        }

        lines.push(
            Line::from(Span::styled(
                "Press ? to close",
                Style::default().fg(self.theme.muted()),
            ))
            .alignment(Alignment::Center),
        );
        lines
    }
}

impl Default for HelpPopup {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

impl Widget for HelpPopup {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Clear the area first (for overlay effect)
        Clear.render(area, buf);

        let title = format!(" userstats v{} ", VERSION);
        let block = Block::default()
            .title(title)
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent()));

        let inner = block.inner(area);
        block.render(area, buf);

        Paragraph::new(self.lines(inner.width)).render(inner, buf);
    }
}
