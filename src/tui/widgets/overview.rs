//! Overview widget - all four panels in a grid, each one can be hidden

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Paragraph, Widget},
};

use super::ages::AgeHistogram;
use super::countries::CountryList;
use super::gender::GenderChart;
use super::registrations::RegistrationTrend;
use crate::tui::theme::Theme;
use crate::types::Summaries;

/// Format a number with thousand separators (e.g., 1234567 -> "1,234,567")
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let len = s.len();
    let mut result = String::with_capacity(len + len / 3);

    // Digits are ASCII, so byte indexing is safe
    for (i, ch) in s.bytes().enumerate() {
        if i > 0 && (len - i).is_multiple_of(3) {
            result.push(',');
        }
        result.push(ch as char);
    }

    result
}

/// Format a percentage bar with filled/empty blocks
/// Example: 50.0% with width 10 → "█████░░░░░"
pub fn format_percentage_bar(percent: f64, width: usize) -> String {
    let filled = ((percent / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    let empty = width - filled;
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

/// The four chart panels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Gender,
    Ages,
    Countries,
    Years,
}

impl Panel {
    pub const ALL: [Panel; 4] = [Panel::Gender, Panel::Ages, Panel::Countries, Panel::Years];

    /// Toggle key shown in the overview hints
    pub fn key(self) -> char {
        match self {
            Self::Gender => 'g',
            Self::Ages => 'a',
            Self::Countries => 'c',
            Self::Years => 'y',
        }
    }

    pub fn from_key(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.key() == c)
    }
}

/// Which panels the overview shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelVisibility {
    shown: [bool; 4],
}

impl Default for PanelVisibility {
    fn default() -> Self {
        Self { shown: [true; 4] }
    }
}

impl PanelVisibility {
    pub fn is_visible(&self, panel: Panel) -> bool {
        self.shown[panel as usize]
    }

    pub fn toggle(&mut self, panel: Panel) {
        let slot = &mut self.shown[panel as usize];
        *slot = !*slot;
    }

    /// Visible panels in display order
    pub fn visible(&self) -> Vec<Panel> {
        Panel::ALL
            .into_iter()
            .filter(|p| self.is_visible(*p))
            .collect()
    }
}

/// Render one panel into `area`
pub fn render_panel(
    panel: Panel,
    summaries: &Summaries,
    country_scroll: usize,
    theme: Theme,
    area: Rect,
    buf: &mut Buffer,
) {
    match panel {
        Panel::Gender => GenderChart::new(&summaries.gender, theme).render(area, buf),
        Panel::Ages => AgeHistogram::new(&summaries.ages, theme).render(area, buf),
        Panel::Countries => {
            CountryList::new(&summaries.countries, country_scroll, theme).render(area, buf)
        }
        Panel::Years => {
            RegistrationTrend::new(&summaries.registration_years, theme).render(area, buf)
        }
    }
}

/// Split `area` into a grid of at most two panels per row
pub fn grid_cells(area: Rect, count: usize) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }

    let rows = count.div_ceil(2);
    let row_areas = Layout::vertical(vec![Constraint::Fill(1); rows]).split(area);

    let mut cells = Vec::with_capacity(count);
    for (row, row_area) in row_areas.iter().enumerate() {
        let in_row = (count - row * 2).min(2);
        let cols = Layout::horizontal(vec![Constraint::Fill(1); in_row]).split(*row_area);
        cells.extend(cols.iter().copied());
    }
    cells
}

/// Overview widget
pub struct Overview<'a> {
    summaries: &'a Summaries,
    panels: PanelVisibility,
    theme: Theme,
}

impl<'a> Overview<'a> {
    pub fn new(summaries: &'a Summaries, panels: PanelVisibility, theme: Theme) -> Self {
        Self {
            summaries,
            panels,
            theme,
        }
    }
}

impl Widget for Overview<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let visible = self.panels.visible();

        if visible.is_empty() {
            let y = area.y + area.height / 2;
            Paragraph::new(Line::styled(
                "All panels hidden. Press g, a, c or y to show one.",
                Style::default().fg(self.theme.muted()),
            ))
            .alignment(Alignment::Center)
            .render(Rect { y, height: 1, ..area }, buf);
            return;
        }

        for (panel, cell) in visible.iter().zip(grid_cells(area, visible.len())) {
            render_panel(*panel, self.summaries, 0, self.theme, cell, buf);
        }
    }
}
