//! Registration trend panel - users per registration year as a line

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    symbols::Marker,
    text::Line,
    widgets::{Axis, Chart, Dataset, GraphType, Paragraph, Widget},
};

use super::chrome::panel_block;
use crate::tui::theme::Theme;
use crate::types::RegistrationYearSummary;

/// Above this many years only first, middle and last get an x label
const MAX_X_LABELS: usize = 8;

pub struct RegistrationTrend<'a> {
    summary: &'a RegistrationYearSummary,
    theme: Theme,
}

impl<'a> RegistrationTrend<'a> {
    pub fn new(summary: &'a RegistrationYearSummary, theme: Theme) -> Self {
        Self { summary, theme }
    }

    fn note(&self) -> Option<String> {
        match self.summary.unparseable {
            0 => None,
            1 => Some("1 bad date skipped".to_string()),
            n => Some(format!("{} bad dates skipped", n)),
        }
    }

    /// (position, count) points; x follows the summary's year order
    fn points(&self) -> Vec<(f64, f64)> {
        self.summary
            .years
            .iter()
            .enumerate()
            .map(|(i, (_, count))| (i as f64, count as f64))
            .collect()
    }
}

/// X-axis labels, spread evenly over the points
pub fn axis_labels(years: &[i32]) -> Vec<String> {
    match years.len() {
        0 => Vec::new(),
        // Axis needs two labels to draw anything
        1 => vec![years[0].to_string(), String::new()],
        n if n <= MAX_X_LABELS => years.iter().map(|y| y.to_string()).collect(),
        n => vec![
            years[0].to_string(),
            years[(n - 1) / 2].to_string(),
            years[n - 1].to_string(),
        ],
    }
}

impl Widget for RegistrationTrend<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = panel_block("Registrations by year", self.note(), self.theme);

        if self.summary.years.is_empty() {
            let inner = block.inner(area);
            block.render(area, buf);
            Paragraph::new(Line::styled(
                "No registrations",
                Style::default().fg(self.theme.muted()),
            ))
            .render(inner, buf);
            return;
        }

        let points = self.points();
        let years: Vec<i32> = self.summary.years.keys().copied().collect();
        let max_x = (points.len().saturating_sub(1)).max(1) as f64;
        let max_y = self.summary.years.max_count().max(1) as f64;

        // Unnamed datasets keep the legend hidden
        let line = Dataset::default()
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(self.theme.trend()))
            .data(&points);
        let dots = Dataset::default()
            .marker(Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(self.theme.text()))
            .data(&points);

        let muted = Style::default().fg(self.theme.muted());
        Chart::new(vec![line, dots])
            .block(block)
            .x_axis(
                Axis::default()
                    .style(muted)
                    .bounds([0.0, max_x])
                    .labels(axis_labels(&years)),
            )
            .y_axis(
                Axis::default()
                    .style(muted)
                    .bounds([0.0, max_y])
                    .labels(vec!["0".to_string(), format!("{}", max_y as u64)]),
            )
            .render(area, buf);
    }
}
