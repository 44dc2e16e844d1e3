//! Country list panel - one line per country in first-seen order

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::chrome::panel_block;
use super::overview::{format_number, format_percentage_bar};
use crate::tui::theme::Theme;
use crate::types::CountrySummary;

/// Width of the per-country share bar
const BAR_WIDTH: usize = 12;

/// Longest country name shown before truncation
const NAME_WIDTH: usize = 24;

pub struct CountryList<'a> {
    summary: &'a CountrySummary,
    scroll: usize,
    theme: Theme,
}

impl<'a> CountryList<'a> {
    pub fn new(summary: &'a CountrySummary, scroll: usize, theme: Theme) -> Self {
        Self {
            summary,
            scroll,
            theme,
        }
    }

    /// Rows available for countries in a panel `height` cells tall
    pub fn visible_rows(height: u16) -> usize {
        // Borders take two rows
        height.saturating_sub(2) as usize
    }

    /// Offset that shows the last page when `rows` lines are visible
    pub fn max_scroll_offset(summary: &CountrySummary, rows: usize) -> usize {
        summary.len().saturating_sub(rows)
    }

    /// First visible row for a viewport of `rows` lines
    fn effective_scroll(&self, rows: usize) -> usize {
        self.scroll.min(Self::max_scroll_offset(self.summary, rows))
    }

    fn title(&self, first: usize, rows: usize) -> String {
        let len = self.summary.len();
        if len <= rows {
            "Countries".to_string()
        } else {
            let last = (first + rows).min(len);
            format!("Countries {}-{} of {}", first + 1, last, len)
        }
    }

    fn row(&self, name: &str, count: u64, max: u64) -> Line<'static> {
        // Truncate long names (UTF-8 safe)
        let name = if name.chars().count() > NAME_WIDTH {
            format!("{}…", name.chars().take(NAME_WIDTH - 1).collect::<String>())
        } else {
            name.to_string()
        };
        let unit = if count == 1 { "user" } else { "users" };
        let percent = if max > 0 {
            count as f64 / max as f64 * 100.0
        } else {
            0.0
        };

        Line::from(vec![
            Span::styled(
                format!("{:<width$}", format!("{}:", name), width = NAME_WIDTH + 2),
                Style::default().fg(self.theme.accent()),
            ),
            Span::styled(
                format!("{:>6} {:<6}", format_number(count), unit),
                Style::default().fg(self.theme.text()),
            ),
            Span::styled(
                format_percentage_bar(percent, BAR_WIDTH),
                Style::default().fg(self.theme.age_bar()),
            ),
        ])
    }
}

impl Widget for CountryList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rows = Self::visible_rows(area.height);
        let first = self.effective_scroll(rows);

        let block = panel_block(&self.title(first, rows), None, self.theme);
        let inner = block.inner(area);
        block.render(area, buf);

        if self.summary.is_empty() {
            Paragraph::new(Line::styled(
                "No countries",
                Style::default().fg(self.theme.muted()),
            ))
            .render(inner, buf);
            return;
        }

        let max = self.summary.max_count();
        let lines: Vec<Line> = self
            .summary
            .iter()
            .skip(first)
            .take(rows)
            .map(|(name, count)| self.row(name, count, max))
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tally(names: &[&str]) -> CountrySummary {
        let mut summary = CountrySummary::new();
        for name in names {
            summary.increment(name.to_string());
        }
        summary
    }

    fn screen(summary: &CountrySummary, scroll: usize, height: u16) -> Vec<String> {
        let area = Rect::new(0, 0, 60, height);
        let mut buf = Buffer::empty(area);
        CountryList::new(summary, scroll, Theme::Dark).render(area, &mut buf);
        (0..height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_rows_in_first_seen_order() {
        let summary = tally(&["Spain", "Brazil", "Spain"]);
        let lines = screen(&summary, 0, 6);

        assert!(lines[1].contains("Spain:"));
        assert!(lines[1].contains("2 users"));
        assert!(lines[2].contains("Brazil:"));
        assert!(lines[2].contains("1 user "));
    }

    #[test]
    fn test_scroll_clamps_to_last_page() {
        let summary = tally(&["A", "B", "C", "D", "E"]);
        let list = CountryList::new(&summary, 10, Theme::Dark);

        // 3 visible rows → last page starts at index 2
        assert_eq!(list.effective_scroll(3), 2);
        assert_eq!(list.title(2, 3), "Countries 3-5 of 5");
        assert_eq!(list.title(0, 10), "Countries");
    }

    #[test]
    fn test_max_scroll_offset() {
        let three = tally(&["A", "B", "C"]);
        assert_eq!(CountryList::max_scroll_offset(&tally(&[]), 5), 0);
        assert_eq!(CountryList::max_scroll_offset(&three, 5), 0);
        assert_eq!(CountryList::max_scroll_offset(&three, 2), 1);
        assert_eq!(CountryList::visible_rows(7), 5);
        assert_eq!(CountryList::visible_rows(1), 0);
    }

    #[test]
    fn test_long_name_truncated() {
        let summary = tally(&["The Democratic Republic of Somewhere Far"]);
        let list = CountryList::new(&summary, 0, Theme::Dark);
        let line = list.row("The Democratic Republic of Somewhere Far", 1, 1);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(text.starts_with("The Democratic Republic…:"));
    }

    #[test]
    fn test_empty_list_message() {
        let lines = screen(&tally(&[]), 0, 4);
        assert!(lines[1].contains("No countries"));
    }
}
