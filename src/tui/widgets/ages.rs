//! Age histogram panel - seven buckets in fixed order

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Widget},
};

use super::chrome::{center_offset, fit_bar_width, panel_block};
use crate::tui::theme::Theme;
use crate::types::{AgeBucket, AgeBucketSummary, AGE_MINIMUM};

const BAR_GAP: u16 = 1;

pub struct AgeHistogram<'a> {
    summary: &'a AgeBucketSummary,
    theme: Theme,
}

impl<'a> AgeHistogram<'a> {
    pub fn new(summary: &'a AgeBucketSummary, theme: Theme) -> Self {
        Self { summary, theme }
    }

    /// Flags ages that were folded into 80+
    fn note(&self) -> Option<String> {
        match self.summary.below_minimum {
            0 => None,
            n => Some(format!("80+ includes {} under {}", n, AGE_MINIMUM)),
        }
    }
}

impl Widget for AgeHistogram<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = panel_block("Ages", self.note(), self.theme);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height < 3 || inner.width < 8 {
            return;
        }

        let count = AgeBucket::ALL.len() as u16;
        let bar_width = fit_bar_width(inner.width, count, BAR_GAP);
        let chart_width = bar_width * count + BAR_GAP * (count - 1);
        let chart_area = Rect {
            x: inner.x + center_offset(inner.width, chart_width),
            width: chart_width.min(inner.width),
            ..inner
        };

        let bars: Vec<Bar> = self
            .summary
            .iter()
            .map(|(bucket, count)| {
                Bar::default()
                    .value(count)
                    .label(Line::from(bucket.label()))
            })
            .collect();

        BarChart::default()
            .data(BarGroup::default().bars(&bars))
            .bar_width(bar_width)
            .bar_gap(BAR_GAP)
            .max(self.summary.max_count().max(1))
            .bar_style(Style::default().fg(self.theme.age_bar()))
            .value_style(Style::default().add_modifier(Modifier::BOLD))
            .label_style(Style::default().fg(self.theme.text()))
            .render(chart_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary_of(ages: &[u32]) -> AgeBucketSummary {
        let mut summary = AgeBucketSummary::default();
        for age in ages {
            summary.record(*age);
        }
        summary
    }

    #[test]
    fn test_note_flags_young_ages() {
        let clean = summary_of(&[25, 45, 85]);
        assert!(AgeHistogram::new(&clean, Theme::Dark).note().is_none());

        let young = summary_of(&[15, 17, 45]);
        assert_eq!(
            AgeHistogram::new(&young, Theme::Dark).note().as_deref(),
            Some("80+ includes 2 under 20")
        );
    }

    #[test]
    fn test_render_shows_bucket_labels() {
        let summary = summary_of(&[22, 35, 35, 64, 90]);
        let area = Rect::new(0, 0, 80, 14);
        let mut buf = Buffer::empty(area);
        AgeHistogram::new(&summary, Theme::Dark).render(area, &mut buf);

        let screen: String = (0..area.height)
            .flat_map(|y| (0..area.width).map(move |x| (x, y)))
            .map(|pos| buf[pos].symbol().to_string())
            .collect();
        assert!(screen.contains("Ages"));
        assert!(screen.contains("20-29"));
        assert!(screen.contains("80+"));
    }
}
