use crate::errors::DayKeyError;
use crate::phases::PhaseCatalog;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// `(phase, day)` address of a single day. Orders by phase then day, which is
/// the chronological order of the protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayKey {
    phase_id: u32,
    day: u32,
}

impl DayKey {
    pub(crate) fn new(phase_id: u32, day: u32) -> Self {
        Self { phase_id, day }
    }

    pub fn phase_id(&self) -> u32 {
        self.phase_id
    }

    pub fn day(&self) -> u32 {
        self.day
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.phase_id, self.day)
    }
}

impl FromStr for DayKey {
    type Err = DayKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || DayKeyError::Malformed(s.to_string());
        let (phase, day) = s.split_once('-').ok_or_else(malformed)?;
        let phase_id = phase.parse::<u32>().map_err(|_| malformed())?;
        let day = day.parse::<u32>().map_err(|_| malformed())?;
        Ok(Self { phase_id, day })
    }
}

impl Serialize for DayKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DayKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DayLog {
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, alias = "date", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Every logged day keyed by [`DayKey`]. Persisted as a flat JSON object
/// `{"1-3": {...}}`. A missing entry reads as an incomplete day without data.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(transparent)]
pub struct LogSet {
    entries: BTreeMap<DayKey, DayLog>,
}

impl LogSet {
    pub fn get(&self, key: &DayKey) -> Option<&DayLog> {
        self.entries.get(key)
    }

    pub fn is_completed(&self, key: &DayKey) -> bool {
        self.entries.get(key).is_some_and(|log| log.completed)
    }

    /// Entries in `(phase, day)` order.
    pub fn iter(&self) -> impl Iterator<Item = (&DayKey, &DayLog)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn insert(&mut self, key: DayKey, log: DayLog) {
        self.entries.insert(key, log);
    }

    /// Drops entries whose key does not address a day in `catalog` and
    /// returns the dropped keys.
    pub fn retain_catalog(&mut self, catalog: &PhaseCatalog) -> Vec<DayKey> {
        let mut dropped = Vec::new();
        self.entries.retain(|key, _| {
            let keep = catalog.contains(key);
            if !keep {
                dropped.push(*key);
            }
            keep
        });
        dropped
    }
}
