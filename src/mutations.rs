//! Log mutations. Each takes the current snapshot and returns the next one
//! with the milestone it triggered; committing and persisting the snapshot
//! is left to the caller.

use crate::logs::{DayKey, DayLog, LogSet};
use crate::milestone::{Milestone, detect};
use crate::models::AppData;
use crate::phases::PhaseCatalog;
use chrono::{DateTime, Utc};
use tracing::warn;

/// Empty or non-numeric input means no weight was logged.
pub fn parse_weight(input: &str) -> Option<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

pub fn parse_note(input: &str) -> Option<String> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Saving a day always marks it completed and replaces its weight, note
/// and timestamp. A key outside `catalog` leaves the snapshot unchanged.
pub fn save_day(
    catalog: &PhaseCatalog,
    logs: &LogSet,
    key: DayKey,
    weight_input: &str,
    note_input: &str,
) -> (LogSet, Option<Milestone>) {
    save_day_at(catalog, logs, key, weight_input, note_input, Utc::now())
}

pub fn save_day_at(
    catalog: &PhaseCatalog,
    logs: &LogSet,
    key: DayKey,
    weight_input: &str,
    note_input: &str,
    now: DateTime<Utc>,
) -> (LogSet, Option<Milestone>) {
    if !catalog.contains(&key) {
        warn!(day = %key, "ignoring save for a day outside the phase catalog");
        return (logs.clone(), None);
    }
    let mut next = logs.clone();
    next.insert(
        key,
        DayLog {
            completed: true,
            weight: parse_weight(weight_input),
            note: parse_note(note_input),
            timestamp: Some(now),
        },
    );
    let milestone = detect(catalog, logs, &next, key.phase_id());
    (next, milestone)
}

/// Flips completion and keeps everything else. Unchecking a day never
/// produces a milestone. A key outside `catalog` leaves the snapshot unchanged.
pub fn toggle_completion(
    catalog: &PhaseCatalog,
    logs: &LogSet,
    key: DayKey,
) -> (LogSet, Option<Milestone>) {
    if !catalog.contains(&key) {
        warn!(day = %key, "ignoring toggle for a day outside the phase catalog");
        return (logs.clone(), None);
    }
    let mut entry = logs.get(&key).cloned().unwrap_or_default();
    entry.completed = !entry.completed;
    let completed = entry.completed;

    let mut next = logs.clone();
    next.insert(key, entry);

    let milestone = if completed {
        detect(catalog, logs, &next, key.phase_id())
    } else {
        None
    };
    (next, milestone)
}

pub fn reset_all() -> AppData {
    AppData::default()
}
