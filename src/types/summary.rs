//! Summary types produced by the aggregator

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};

use super::Gender;

/// Order-preserving multiset tally.
///
/// Entries iterate (and serialize) in the order their key was first seen.
/// The index maps a key to its position in `entries`.
#[derive(Debug, Clone)]
pub struct OrderedTally<K> {
    entries: Vec<(K, u64)>,
    index: HashMap<K, usize>,
}

impl<K> Default for OrderedTally<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> OrderedTally<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `key`, appending it if unseen
    pub fn increment(&mut self, key: K) {
        match self.index.get(&key) {
            Some(&pos) => {
                let count = &mut self.entries[pos].1;
                *count = count.saturating_add(1);
            }
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, 1));
            }
        }
    }

    pub fn get<Q>(&self, key: &Q) -> Option<u64>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(key).map(|&pos| self.entries[pos].1)
    }

    /// Keys in first-seen order
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }
}

impl<K> OrderedTally<K> {
    /// (key, count) pairs in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&K, u64)> {
        self.entries.iter().map(|(k, c)| (k, *c))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, c)| *c).sum()
    }

    /// Largest single count (0 when empty)
    pub fn max_count(&self) -> u64 {
        self.entries.iter().map(|(_, c)| *c).max().unwrap_or(0)
    }
}

// Equality is defined by the ordered entries; the index is derived from them.
impl<K: PartialEq> PartialEq for OrderedTally<K> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K: Eq> Eq for OrderedTally<K> {}

impl<K: Serialize> Serialize for OrderedTally<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, count) in &self.entries {
            map.serialize_entry(key, count)?;
        }
        map.end()
    }
}

/// Record counts per known gender tag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GenderSummary {
    pub male: u64,
    pub female: u64,
    /// Records whose tag matched no known gender (counted nowhere else)
    pub unrecognized: u64,
}

impl GenderSummary {
    pub fn count(&self, gender: Gender) -> u64 {
        match gender {
            Gender::Male => self.male,
            Gender::Female => self.female,
        }
    }

    pub fn increment(&mut self, gender: Gender) {
        let slot = match gender {
            Gender::Male => &mut self.male,
            Gender::Female => &mut self.female,
        };
        *slot = slot.saturating_add(1);
    }

    /// (gender, count) pairs in display order
    pub fn iter(&self) -> impl Iterator<Item = (Gender, u64)> + '_ {
        Gender::ALL.into_iter().map(|g| (g, self.count(g)))
    }

    /// Sum over the known tags only
    pub fn total(&self) -> u64 {
        self.male + self.female
    }
}

/// Fixed age buckets in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgeBucket {
    Twenties,
    Thirties,
    Forties,
    Fifties,
    Sixties,
    Seventies,
    EightyPlus,
}

/// Youngest age covered by an explicit bucket
pub const AGE_MINIMUM: u32 = 20;

/// Bucket interval table: `[lower, upper)`, `None` = open-ended
const AGE_BANDS: [(AgeBucket, u32, Option<u32>); 7] = [
    (AgeBucket::Twenties, 20, Some(30)),
    (AgeBucket::Thirties, 30, Some(40)),
    (AgeBucket::Forties, 40, Some(50)),
    (AgeBucket::Fifties, 50, Some(60)),
    (AgeBucket::Sixties, 60, Some(70)),
    (AgeBucket::Seventies, 70, Some(80)),
    (AgeBucket::EightyPlus, 80, None),
];

/// Where an age lands in the bucket table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgePlacement {
    Bucket(AgeBucket),
    /// Younger than [`AGE_MINIMUM`]; no explicit bucket covers it
    BelowMinimum,
}

impl AgeBucket {
    pub const ALL: [AgeBucket; 7] = [
        AgeBucket::Twenties,
        AgeBucket::Thirties,
        AgeBucket::Forties,
        AgeBucket::Fifties,
        AgeBucket::Sixties,
        AgeBucket::Seventies,
        AgeBucket::EightyPlus,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Twenties => "20-29",
            Self::Thirties => "30-39",
            Self::Forties => "40-49",
            Self::Fifties => "50-59",
            Self::Sixties => "60-69",
            Self::Seventies => "70-79",
            Self::EightyPlus => "80+",
        }
    }

    fn position(self) -> usize {
        self as usize
    }

    /// Classify an age against the interval table
    pub fn classify(age: u32) -> AgePlacement {
        AGE_BANDS
            .iter()
            .find(|(_, lower, upper)| age >= *lower && upper.is_none_or(|u| age < u))
            .map(|(bucket, _, _)| AgePlacement::Bucket(*bucket))
            .unwrap_or(AgePlacement::BelowMinimum)
    }
}

/// Record counts per age bucket.
///
/// Ages below [`AGE_MINIMUM`] are folded into `80+` so every record lands in
/// exactly one bucket; `below_minimum` tells how many of those there were.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AgeBucketSummary {
    counts: [u64; 7],
    pub below_minimum: u64,
}

impl AgeBucketSummary {
    pub fn count(&self, bucket: AgeBucket) -> u64 {
        self.counts[bucket.position()]
    }

    /// Count one record of the given age
    pub fn record(&mut self, age: u32) {
        let bucket = match AgeBucket::classify(age) {
            AgePlacement::Bucket(bucket) => bucket,
            AgePlacement::BelowMinimum => {
                self.below_minimum = self.below_minimum.saturating_add(1);
                AgeBucket::EightyPlus
            }
        };
        let slot = &mut self.counts[bucket.position()];
        *slot = slot.saturating_add(1);
    }

    /// (bucket, count) pairs in fixed display order
    pub fn iter(&self) -> impl Iterator<Item = (AgeBucket, u64)> + '_ {
        AgeBucket::ALL.into_iter().map(|b| (b, self.count(b)))
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn max_count(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

struct BucketCounts<'a>(&'a AgeBucketSummary);

impl Serialize for BucketCounts<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(AgeBucket::ALL.len()))?;
        for (bucket, count) in self.0.iter() {
            map.serialize_entry(bucket.label(), &count)?;
        }
        map.end()
    }
}

impl Serialize for AgeBucketSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("AgeBucketSummary", 2)?;
        state.serialize_field("buckets", &BucketCounts(self))?;
        state.serialize_field("below_minimum", &self.below_minimum)?;
        state.end()
    }
}

/// Record counts per country, first-seen order
pub type CountrySummary = OrderedTally<String>;

/// Record counts per registration year, first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegistrationYearSummary {
    pub years: OrderedTally<i32>,
    /// Records skipped because their timestamp did not parse
    pub unparseable: u64,
}

impl RegistrationYearSummary {
    pub fn total(&self) -> u64 {
        self.years.total()
    }
}

/// All four summaries for one batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summaries {
    pub record_count: usize,
    pub gender: GenderSummary,
    pub ages: AgeBucketSummary,
    pub countries: CountrySummary,
    pub registration_years: RegistrationYearSummary,
}
