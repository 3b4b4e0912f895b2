use crate::goal::GoalWeight;
use crate::logs::LogSet;
use crate::models::{ChartBounds, PhaseProgress, ProgressSummary, WeightPoint};
use crate::phases::PhaseCatalog;

pub fn total_completed(logs: &LogSet) -> u32 {
    logs.iter().filter(|(_, log)| log.completed).count() as u32
}

/// Share of the protocol completed, in percent.
pub fn global_progress(catalog: &PhaseCatalog, logs: &LogSet) -> f64 {
    let ratio = f64::from(total_completed(logs)) / f64::from(catalog.total_days());
    (ratio * 100.0).clamp(0.0, 100.0)
}

pub fn is_journey_complete(catalog: &PhaseCatalog, logs: &LogSet) -> bool {
    total_completed(logs) == catalog.total_days()
}

/// True when every day of the phase has a completed log. Unknown phases are
/// never complete.
pub fn is_phase_complete(catalog: &PhaseCatalog, logs: &LogSet, phase_id: u32) -> bool {
    catalog
        .get(phase_id)
        .is_some_and(|phase| phase.day_keys().all(|key| logs.is_completed(&key)))
}

pub fn phase_completed_days(catalog: &PhaseCatalog, logs: &LogSet, phase_id: u32) -> u32 {
    catalog.get(phase_id).map_or(0, |phase| {
        phase.day_keys().filter(|key| logs.is_completed(key)).count() as u32
    })
}

/// Logged weights in protocol order, independent of the order they were saved.
pub fn weight_series(catalog: &PhaseCatalog, logs: &LogSet) -> Vec<WeightPoint> {
    let mut series = Vec::new();
    for phase in catalog.phases() {
        for key in phase.day_keys() {
            let Some(log) = logs.get(&key) else { continue };
            let Some(weight) = log.weight else { continue };
            series.push(WeightPoint {
                phase_id: phase.id,
                phase_name: phase.name.clone(),
                day: key.day(),
                label: format!("P{}:D{}", phase.id, key.day()),
                day_label: format!("Day {}", key.day()),
                weight,
                note: log.note.clone(),
                timestamp: log.timestamp,
            });
        }
    }
    series
}

/// Y-axis range that keeps every point and the goal line visible.
pub fn chart_bounds(series: &[WeightPoint], goal: GoalWeight) -> Option<ChartBounds> {
    let goal = goal.value();
    let (min, max) = if series.is_empty() {
        let goal = goal?;
        (goal, goal)
    } else {
        series.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), point| {
            (lo.min(point.weight), hi.max(point.weight))
        })
    };

    let mut bounds = ChartBounds {
        min: min - 1.0,
        max: max + 1.0,
    };
    if let Some(goal) = goal {
        bounds.min = bounds.min.min(goal - 2.0);
        bounds.max = bounds.max.max(goal + 2.0);
    }
    Some(bounds)
}

pub fn build_summary(catalog: &PhaseCatalog, logs: &LogSet, goal: GoalWeight) -> ProgressSummary {
    let phases = catalog
        .phases()
        .iter()
        .map(|phase| PhaseProgress {
            id: phase.id,
            name: phase.name.clone(),
            day_count: phase.day_count,
            completed_days: phase_completed_days(catalog, logs, phase.id),
            complete: is_phase_complete(catalog, logs, phase.id),
        })
        .collect();
    let weight_series = weight_series(catalog, logs);
    let chart_bounds = chart_bounds(&weight_series, goal);

    ProgressSummary {
        total_completed: total_completed(logs),
        total_days: catalog.total_days(),
        global_progress: global_progress(catalog, logs),
        journey_complete: is_journey_complete(catalog, logs),
        phases,
        weight_series,
        goal_weight: goal.value(),
        chart_bounds,
    }
}
