use crate::errors::{CatalogError, DayKeyError};
use crate::logs::DayKey;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Phase {
    pub id: u32,
    pub name: String,
    #[serde(alias = "days")]
    pub day_count: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tips: Vec<String>,
}

impl Phase {
    /// Every day of the phase, in day order.
    pub fn day_keys(&self) -> impl Iterator<Item = DayKey> {
        let phase_id = self.id;
        (1..=self.day_count).map(move |day| DayKey::new(phase_id, day))
    }
}

/// Ordered, validated set of phases. Ids run 1..=n with no gaps and every
/// phase has at least one day, so `total_days` is never zero.
#[derive(Debug, Clone)]
pub struct PhaseCatalog {
    phases: Vec<Phase>,
    total_days: u32,
}

impl PhaseCatalog {
    pub fn new(mut phases: Vec<Phase>) -> Result<Self, CatalogError> {
        if phases.is_empty() {
            return Err(CatalogError::Empty);
        }
        phases.sort_by_key(|phase| phase.id);
        for (index, phase) in phases.iter().enumerate() {
            let expected = index as u32 + 1;
            if phase.id != expected {
                return Err(CatalogError::NonContiguous {
                    expected,
                    found: phase.id,
                });
            }
            if phase.day_count == 0 {
                return Err(CatalogError::EmptyPhase(phase.id));
            }
        }
        let total_days = phases.iter().map(|phase| phase.day_count).sum();
        Ok(Self { phases, total_days })
    }

    pub fn from_json_file(path: &Path) -> Result<Self, CatalogError> {
        let bytes = std::fs::read(path)?;
        let phases: Vec<Phase> = serde_json::from_slice(&bytes)?;
        Self::new(phases)
    }

    /// The three-phase gelatin protocol.
    pub fn builtin() -> Self {
        let phases = vec![
            phase(
                1,
                "Detox Phase",
                21,
                "The initial 21-day reboot. Focus on consistency and breaking old habits.",
                &[
                    "Consume the gelatin recipe every night 2 hours before bed.",
                    "Strictly avoid sugar and alcohol during these 21 days.",
                    "Drink at least 2.5 liters of water daily.",
                    "Focus on getting 7-8 hours of quality sleep.",
                    "If you miss a day, don't worry! Just get back on track immediately.",
                ],
            ),
            phase(
                2,
                "Adaptation Phase",
                30,
                "Solidifying the routine. Your body is adapting to the new gelatin protocol.",
                &[
                    "Continue the nightly gelatin routine.",
                    "You can start introducing light exercise if you haven't already.",
                    "Pay attention to how your body reacts to different foods.",
                    "Consistency is key, this is where habits are formed.",
                    "Track your weight weekly rather than daily if it causes stress.",
                ],
            ),
            phase(
                3,
                "Lifestyle Phase",
                65,
                "The long haul. Turning this into a permanent lifestyle change.",
                &[
                    "Follow the 80/20 rule: 80% disciplined, 20% flexible.",
                    "Use the gelatin recipe for recovery after workouts.",
                    "Focus on non-scale victories like energy levels and skin health.",
                    "Share your journey to inspire others.",
                    "This is your new normal, maintain it with joy!",
                ],
            ),
        ];
        let total_days = phases.iter().map(|phase| phase.day_count).sum();
        Self { phases, total_days }
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    pub fn get(&self, phase_id: u32) -> Option<&Phase> {
        let index = phase_id.checked_sub(1)? as usize;
        self.phases.get(index)
    }

    pub fn total_days(&self) -> u32 {
        self.total_days
    }

    /// Completed-day count at which the halfway milestone fires.
    pub fn halfway(&self) -> u32 {
        self.total_days.div_ceil(2)
    }

    pub fn day_key(&self, phase_id: u32, day: u32) -> Result<DayKey, DayKeyError> {
        let phase = self
            .get(phase_id)
            .ok_or(DayKeyError::UnknownPhase(phase_id))?;
        if day == 0 || day > phase.day_count {
            return Err(DayKeyError::DayOutOfRange {
                phase_id,
                day,
                day_count: phase.day_count,
            });
        }
        Ok(DayKey::new(phase_id, day))
    }

    pub fn contains(&self, key: &DayKey) -> bool {
        self.day_key(key.phase_id(), key.day()).is_ok()
    }
}

fn phase(id: u32, name: &str, day_count: u32, description: &str, tips: &[&str]) -> Phase {
    Phase {
        id,
        name: name.to_string(),
        day_count,
        description: description.to_string(),
        tips: tips.iter().map(|tip| tip.to_string()).collect(),
    }
}

#[cfg(test)]
pub(crate) fn test_catalog(day_counts: &[u32]) -> PhaseCatalog {
    let phases = day_counts
        .iter()
        .enumerate()
        .map(|(index, &days)| phase(index as u32 + 1, &format!("Phase {}", index + 1), days, "", &[]))
        .collect();
    PhaseCatalog::new(phases).expect("valid test catalog")
}
