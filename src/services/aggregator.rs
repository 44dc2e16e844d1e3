//! Aggregator service for computing user statistics
//!
//! Every function is a single pass over the records with no shared state,
//! so the four summaries can be computed in any order or in parallel.

use tracing::{debug, warn};

use crate::types::{
    AgeBucketSummary, CountrySummary, GenderSummary, RegistrationYearSummary, Summaries,
    UserRecord,
};

/// Aggregator for computing user statistics
pub struct Aggregator;

impl Aggregator {
    /// Count records per known gender tag (unknown tags go to `unrecognized`)
    pub fn summarize_gender(records: &[UserRecord]) -> GenderSummary {
        let mut summary = GenderSummary::default();

        for record in records {
            match record.known_gender() {
                Some(gender) => summary.increment(gender),
                None => summary.unrecognized = summary.unrecognized.saturating_add(1),
            }
        }

        if summary.unrecognized > 0 {
            warn!(
                count = summary.unrecognized,
                "records with unrecognized gender tags were left out of the gender summary"
            );
        }
        summary
    }

    /// Count records per fixed age bucket
    pub fn summarize_age_buckets(records: &[UserRecord]) -> AgeBucketSummary {
        let mut summary = AgeBucketSummary::default();

        for record in records {
            summary.record(record.age);
        }

        if summary.below_minimum > 0 {
            debug!(
                count = summary.below_minimum,
                "ages below the first bucket were counted as 80+"
            );
        }
        summary
    }

    /// Count records per country (first-seen order)
    pub fn summarize_countries(records: &[UserRecord]) -> CountrySummary {
        let mut summary = CountrySummary::new();

        for record in records {
            summary.increment(record.country.clone());
        }

        summary
    }

    /// Count records per registration year (first-seen order).
    /// Records with an unparseable timestamp are skipped and counted.
    pub fn summarize_registration_years(records: &[UserRecord]) -> RegistrationYearSummary {
        let mut summary = RegistrationYearSummary::default();

        for record in records {
            match record.registration_year() {
                Some(year) => summary.years.increment(year),
                None => {
                    warn!(
                        timestamp = %record.registered_at,
                        "skipping record with unparseable registration date"
                    );
                    summary.unparseable = summary.unparseable.saturating_add(1);
                }
            }
        }

        summary
    }

    /// Compute all four summaries (in parallel)
    pub fn summarize_all(records: &[UserRecord]) -> Summaries {
        let ((gender, ages), (countries, registration_years)) = rayon::join(
            || {
                rayon::join(
                    || Self::summarize_gender(records),
                    || Self::summarize_age_buckets(records),
                )
            },
            || {
                rayon::join(
                    || Self::summarize_countries(records),
                    || Self::summarize_registration_years(records),
                )
            },
        );

        Summaries {
            record_count: records.len(),
            gender,
            ages,
            countries,
            registration_years,
        }
    }
}
