//! Gender panel - one colored column per known gender

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Widget},
};

use super::chrome::{center_offset, fit_bar_width, panel_block};
use crate::tui::theme::Theme;
use crate::types::{Gender, GenderSummary};

const BAR_GAP: u16 = 4;

pub struct GenderChart<'a> {
    summary: &'a GenderSummary,
    theme: Theme,
}

impl<'a> GenderChart<'a> {
    pub fn new(summary: &'a GenderSummary, theme: Theme) -> Self {
        Self { summary, theme }
    }

    fn note(&self) -> Option<String> {
        match self.summary.unrecognized {
            0 => None,
            1 => Some("1 record with unknown gender".to_string()),
            n => Some(format!("{} records with unknown gender", n)),
        }
    }

    fn bars(&self) -> Vec<Bar<'static>> {
        self.summary
            .iter()
            .map(|(gender, count)| {
                Bar::default()
                    .value(count)
                    .label(Line::from(gender.label()))
                    .style(Style::default().fg(self.theme.gender(gender)))
            })
            .collect()
    }
}

impl Widget for GenderChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = panel_block("Gender", self.note(), self.theme);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height < 3 || inner.width < 4 {
            return;
        }

        let count = Gender::ALL.len() as u16;
        let bar_width = fit_bar_width(inner.width, count, BAR_GAP);
        let chart_width = bar_width * count + BAR_GAP * (count - 1);
        let chart_area = Rect {
            x: inner.x + center_offset(inner.width, chart_width),
            width: chart_width.min(inner.width),
            ..inner
        };

        let bars = self.bars();
        BarChart::default()
            .data(BarGroup::default().bars(&bars))
            .bar_width(bar_width)
            .bar_gap(BAR_GAP)
            .max(self.summary.total().max(1))
            .value_style(Style::default().add_modifier(Modifier::BOLD))
            .label_style(Style::default().fg(self.theme.text()))
            .render(chart_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_to_string(summary: &GenderSummary, width: u16, height: u16) -> String {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        GenderChart::new(summary, Theme::Dark).render(area, &mut buf);

        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_note_only_when_unrecognized() {
        let clean = GenderSummary {
            male: 3,
            female: 2,
            unrecognized: 0,
        };
        assert!(GenderChart::new(&clean, Theme::Dark).note().is_none());

        let odd = GenderSummary {
            unrecognized: 2,
            ..clean
        };
        assert_eq!(
            GenderChart::new(&odd, Theme::Dark).note().as_deref(),
            Some("2 records with unknown gender")
        );
    }

    #[test]
    fn test_two_bars_in_order() {
        let summary = GenderSummary {
            male: 3,
            female: 5,
            unrecognized: 0,
        };
        let bars = GenderChart::new(&summary, Theme::Dark).bars();
        assert_eq!(bars.len(), 2);
    }

    #[test]
    fn test_render_shows_title_and_labels() {
        let summary = GenderSummary {
            male: 3,
            female: 5,
            unrecognized: 1,
        };
        let screen = render_to_string(&summary, 40, 12);

        assert!(screen.contains("Gender"));
        assert!(screen.contains("Male"));
        assert!(screen.contains("Female"));
        assert!(screen.contains("1 record with unknown gender"));
    }

    #[test]
    fn test_render_tiny_area_does_not_panic() {
        let summary = GenderSummary::default();
        let _ = render_to_string(&summary, 3, 2);
    }
}
