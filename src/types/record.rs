//! User record types

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Known gender tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// All known tags in display order
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    /// Match a raw tag against the known set. The match is exact:
    /// "Male" or " female" are not known tags.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.tag() == tag)
    }

    /// Tag as delivered by the API
    pub fn tag(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }
}

/// One synthetic user, as delivered by a record source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Raw gender tag (not guaranteed to be in the known set)
    pub gender: String,
    pub age: u32,
    /// Country display name
    pub country: String,
    /// Raw registration timestamp
    pub registered_at: String,
}

impl UserRecord {
    pub fn new(
        gender: impl Into<String>,
        age: u32,
        country: impl Into<String>,
        registered_at: impl Into<String>,
    ) -> Self {
        Self {
            gender: gender.into(),
            age,
            country: country.into(),
            registered_at: registered_at.into(),
        }
    }

    pub fn known_gender(&self) -> Option<Gender> {
        Gender::from_tag(&self.gender)
    }

    /// Calendar year of registration, None if the timestamp does not parse
    pub fn registration_year(&self) -> Option<i32> {
        parse_year(&self.registered_at)
    }
}

/// Extract the calendar year from a timestamp.
///
/// The year is read in the offset the timestamp itself carries; no
/// conversion to UTC or local time happens. Accepted forms:
/// - RFC 3339 (`2015-06-25T05:50:33.498Z`, `2015-06-25T05:50:33+02:00`)
/// - naive date-time (`2015-06-25T05:50:33`, optional fraction)
/// - plain date (`2015-06-25`)
pub fn parse_year(raw: &str) -> Option<i32> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.year());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.year());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|d| d.year())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_from_tag() {
        assert_eq!(Gender::from_tag("male"), Some(Gender::Male));
        assert_eq!(Gender::from_tag("female"), Some(Gender::Female));
        assert_eq!(Gender::from_tag("Female"), None);
        assert_eq!(Gender::from_tag(" male "), None);
        assert_eq!(Gender::from_tag("MALE"), None);
        assert_eq!(Gender::from_tag("other"), None);
        assert_eq!(Gender::from_tag(""), None);
    }

    #[test]
    fn test_gender_labels() {
        assert_eq!(Gender::Male.tag(), "male");
        assert_eq!(Gender::Female.label(), "Female");
        assert_eq!(Gender::ALL, [Gender::Male, Gender::Female]);
    }

    #[test]
    fn test_parse_year_rfc3339_utc() {
        assert_eq!(parse_year("2015-06-25T05:50:33.498Z"), Some(2015));
    }

    #[test]
    fn test_parse_year_keeps_own_offset() {
        // 2019-12-31 23:30 at -05:00 is already 2020 in UTC; the record's own year wins
        assert_eq!(parse_year("2019-12-31T23:30:00-05:00"), Some(2019));
        assert_eq!(parse_year("2021-01-01T00:30:00+09:00"), Some(2021));
    }

    #[test]
    fn test_parse_year_naive_forms() {
        assert_eq!(parse_year("2020-05-01"), Some(2020));
        assert_eq!(parse_year("2018-03-04T10:11:12"), Some(2018));
        assert_eq!(parse_year("2018-03-04T10:11:12.250"), Some(2018));
    }

    #[test]
    fn test_parse_year_invalid() {
        assert_eq!(parse_year(""), None);
        assert_eq!(parse_year("not a date"), None);
        assert_eq!(parse_year("2020-13-45"), None);
    }

    #[test]
    fn test_record_helpers() {
        let record = UserRecord::new("female", 31, "Norway", "2012-02-03T04:05:06.000Z");
        assert_eq!(record.known_gender(), Some(Gender::Female));
        assert_eq!(record.registration_year(), Some(2012));

        let odd = UserRecord::new("unknown", 31, "Norway", "garbage");
        assert_eq!(odd.known_gender(), None);
        assert_eq!(odd.registration_year(), None);
    }
}
