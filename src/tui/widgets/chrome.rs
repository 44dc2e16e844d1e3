//! Shared pieces around the panels: separators, panel frames, key hints

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::tui::theme::Theme;

/// Widest bar a bar chart will draw
const MAX_BAR_WIDTH: u16 = 12;

/// Full-width horizontal rule
pub fn render_separator(area: Rect, buf: &mut Buffer, theme: Theme) {
    let line = "─".repeat(area.width as usize);
    buf.set_string(area.x, area.y, &line, Style::default().fg(theme.muted()));
}

/// Bordered frame for a panel, with an optional warning note on the bottom edge
pub fn panel_block(title: &str, note: Option<String>, theme: Theme) -> Block<'static> {
    let block = Block::default()
        .title(Line::from(Span::styled(
            format!(" {} ", title),
            Style::default()
                .fg(theme.text())
                .add_modifier(Modifier::BOLD),
        )))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent()));

    match note {
        Some(note) => block.title_bottom(
            Line::from(Span::styled(
                format!(" {} ", note),
                Style::default().fg(theme.warn()),
            ))
            .alignment(Alignment::Right),
        ),
        None => block,
    }
}

/// Bar width that fits `bars` bars and their gaps into `width`
pub fn fit_bar_width(width: u16, bars: u16, gap: u16) -> u16 {
    if bars == 0 {
        return 1;
    }
    let gaps = gap.saturating_mul(bars - 1);
    (width.saturating_sub(gaps) / bars).clamp(1, MAX_BAR_WIDTH)
}

/// Horizontal offset that centers `content` columns inside `width`
pub fn center_offset(width: u16, content: u16) -> u16 {
    width.saturating_sub(content) / 2
}

/// Centered "key: action" hint line
pub struct KeyHints<'a> {
    hints: &'a [(&'a str, &'a str)],
    theme: Theme,
}

impl<'a> KeyHints<'a> {
    pub fn new(hints: &'a [(&'a str, &'a str)], theme: Theme) -> Self {
        Self { hints, theme }
    }
}

impl Widget for KeyHints<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = Vec::with_capacity(self.hints.len() * 3);
        for (i, (key, action)) in self.hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(*key, Style::default().fg(self.theme.accent())));
            spans.push(Span::styled(
                format!(": {}", action),
                Style::default().fg(self.theme.muted()),
            ));
        }

        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_bar_width() {
        // 2 bars, gap 2, width 30 → (30-2)/2 = 14 → clamped to 12
        assert_eq!(fit_bar_width(30, 2, 2), MAX_BAR_WIDTH);
        // 7 bars, gap 1, width 40 → (40-6)/7 = 4
        assert_eq!(fit_bar_width(40, 7, 1), 4);
        // Too narrow still draws something
        assert_eq!(fit_bar_width(3, 7, 1), 1);
        assert_eq!(fit_bar_width(10, 0, 1), 1);
    }

    #[test]
    fn test_center_offset() {
        assert_eq!(center_offset(10, 4), 3);
        assert_eq!(center_offset(4, 10), 0);
    }

    #[test]
    fn test_key_hints_render() {
        let area = Rect::new(0, 0, 40, 1);
        let mut buf = Buffer::empty(area);
        KeyHints::new(&[("q", "Quit"), ("?", "Help")], Theme::Dark).render(area, &mut buf);

        let line: String = (0..area.width)
            .map(|x| buf[(x, 0)].symbol().to_string())
            .collect();
        assert!(line.contains("q: Quit  ?: Help"));
    }

    #[test]
    fn test_separator_fills_width() {
        let area = Rect::new(0, 0, 5, 1);
        let mut buf = Buffer::empty(area);
        render_separator(area, &mut buf, Theme::Dark);
        assert_eq!(buf[(4, 0)].symbol(), "─");
    }
}
