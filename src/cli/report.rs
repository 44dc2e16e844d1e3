//! `userstats report` subcommand: print the summaries to stdout

use std::fmt::Write as _;

use clap::Args;

use crate::services::{DataLoaderService, LoadResult};
use crate::tui::widgets::overview::{format_number, format_percentage_bar};
use crate::types::{Result, UserStatsError};

/// Width of the text bars in the report
const BAR_WIDTH: usize = 20;

/// Print the four summaries
#[derive(Args, Debug, Default)]
pub struct ReportArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl ReportArgs {
    pub fn run(self, loader: &DataLoaderService) -> Result<()> {
        let result = loader.load()?;

        let output = if self.json {
            render_json(&result)?
        } else {
            render_text(&result)
        };
        println!("{}", output);
        Ok(())
    }
}

/// Summaries as pretty JSON
pub fn render_json(result: &LoadResult) -> Result<String> {
    serde_json::to_string_pretty(&result.summaries).map_err(|e| UserStatsError::Encode(e.to_string()))
}

fn plural(n: u64, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{} {}", n, one)
    } else {
        format!("{} {}", format_number(n), many)
    }
}

/// One labeled count row with a bar relative to the batch size
fn push_row(out: &mut String, label: &str, count: u64, total: u64) {
    let percent = if total > 0 {
        count as f64 / total as f64 * 100.0
    } else {
        0.0
    };
    let _ = writeln!(
        out,
        "  {:<8}{:>6}  {}  {:>5.1}%",
        label,
        format_number(count),
        format_percentage_bar(percent, BAR_WIDTH),
        percent
    );
}

/// Plain-text report, one section per summary
pub fn render_text(result: &LoadResult) -> String {
    let s = &result.summaries;
    let total = s.record_count as u64;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "userstats: {} from {}",
        plural(total, "user", "users"),
        result.source
    );

    out.push_str("\nGender\n");
    for (gender, count) in s.gender.iter() {
        push_row(&mut out, gender.label(), count, total);
    }
    if s.gender.unrecognized > 0 {
        let _ = writeln!(
            out,
            "  ({} with an unrecognized gender tag not counted)",
            plural(s.gender.unrecognized, "record", "records")
        );
    }

    out.push_str("\nAge groups\n");
    for (bucket, count) in s.ages.iter() {
        push_row(&mut out, bucket.label(), count, total);
    }
    if s.ages.below_minimum > 0 {
        let _ = writeln!(
            out,
            "  ({} younger than 20 counted as 80+)",
            plural(s.ages.below_minimum, "record", "records")
        );
    }

    out.push_str("\nCountries\n");
    if s.countries.is_empty() {
        out.push_str("  (none)\n");
    }
    for (country, count) in s.countries.iter() {
        let _ = writeln!(out, "  {}: {}", country, plural(count, "user", "users"));
    }

    out.push_str("\nRegistrations by year\n");
    if s.registration_years.years.is_empty() {
        out.push_str("  (none)\n");
    }
    for (year, count) in s.registration_years.years.iter() {
        push_row(&mut out, &year.to_string(), count, total);
    }
    if s.registration_years.unparseable > 0 {
        let _ = writeln!(
            out,
            "  ({} with an unparseable registration date skipped)",
            plural(s.registration_years.unparseable, "record", "records")
        );
    }

    out.trim_end().to_string()
}
