use crate::logs::LogSet;
use crate::models::Celebration;
use crate::phases::PhaseCatalog;
use crate::stats::{is_phase_complete, total_completed};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Milestone {
    PhaseComplete { phase_id: u32 },
    HalfwayReached,
    JourneyComplete,
    /// Forward progress that crossed no threshold.
    OrdinaryProgress,
}

/// Feedback the presentation layer plays alongside a milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackCue {
    Milestone,
    Completion,
}

impl Milestone {
    pub fn is_celebration(&self) -> bool {
        !matches!(self, Milestone::OrdinaryProgress)
    }

    pub fn cue(&self) -> FeedbackCue {
        if self.is_celebration() {
            FeedbackCue::Milestone
        } else {
            FeedbackCue::Completion
        }
    }

    pub fn celebration(&self, catalog: &PhaseCatalog) -> Option<Celebration> {
        let (title, message) = match self {
            Milestone::PhaseComplete { phase_id } => {
                let name = catalog
                    .get(*phase_id)
                    .map_or_else(|| format!("Phase {phase_id}"), |phase| phase.name.clone());
                (
                    format!("{name} Complete!"),
                    "You smashed this phase! Nothing can stop you now!",
                )
            }
            Milestone::HalfwayReached => (
                "Halfway There!".to_string(),
                "You've reached the top of the mountain! It's all downhill from here!",
            ),
            Milestone::JourneyComplete => (
                "JOURNEY COMPLETE!".to_string(),
                "You are an absolute LEGEND! The gelatin serves you now!",
            ),
            Milestone::OrdinaryProgress => return None,
        };
        Some(Celebration {
            title,
            message: message.to_string(),
        })
    }
}

/// Compares two snapshots around a single mutation of `affected_phase` and
/// returns at most one event. First match wins: phase completion, then the
/// halfway threshold, then journey completion, then plain progress.
pub fn detect(
    catalog: &PhaseCatalog,
    prev: &LogSet,
    next: &LogSet,
    affected_phase: u32,
) -> Option<Milestone> {
    if !is_phase_complete(catalog, prev, affected_phase)
        && is_phase_complete(catalog, next, affected_phase)
    {
        return Some(Milestone::PhaseComplete {
            phase_id: affected_phase,
        });
    }

    let before = total_completed(prev);
    let after = total_completed(next);

    let half = catalog.halfway();
    if before < half && after >= half {
        return Some(Milestone::HalfwayReached);
    }

    let total = catalog.total_days();
    if before < total && after >= total {
        return Some(Milestone::JourneyComplete);
    }

    (after > before).then_some(Milestone::OrdinaryProgress)
}
