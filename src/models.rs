use crate::goal::GoalWeight;
use crate::logs::LogSet;
use crate::milestone::{FeedbackCue, Milestone};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything the core persists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppData {
    pub logs: LogSet,
    pub goal: GoalWeight,
}

/// Form input that may arrive as a JSON string or number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum InputField {
    Number(f64),
    Text(String),
}

impl InputField {
    pub fn as_text(&self) -> String {
        match self {
            InputField::Number(value) => value.to_string(),
            InputField::Text(text) => text.clone(),
        }
    }
}

pub fn input_text(field: &Option<InputField>) -> String {
    field.as_ref().map(InputField::as_text).unwrap_or_default()
}

#[derive(Debug, Default, Deserialize)]
pub struct SaveDayRequest {
    #[serde(default)]
    pub weight: Option<InputField>,
    #[serde(default)]
    pub note: Option<InputField>,
}

#[derive(Debug, Deserialize)]
pub struct GoalRequest {
    pub value: Option<InputField>,
}

#[derive(Debug, Deserialize)]
pub struct PhaseQuery {
    pub phase: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Celebration {
    pub title: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightPoint {
    pub phase_id: u32,
    pub phase_name: String,
    pub day: u32,
    pub label: String,
    pub day_label: String,
    pub weight: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartBounds {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseProgress {
    pub id: u32,
    pub name: String,
    pub day_count: u32,
    pub completed_days: u32,
    pub complete: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressSummary {
    pub total_completed: u32,
    pub total_days: u32,
    pub global_progress: f64,
    pub journey_complete: bool,
    pub phases: Vec<PhaseProgress>,
    pub weight_series: Vec<WeightPoint>,
    pub goal_weight: Option<f64>,
    pub chart_bounds: Option<ChartBounds>,
}

#[derive(Debug, Serialize)]
pub struct DayResponse {
    pub key: String,
    pub completed: bool,
    pub weight: Option<f64>,
    pub note: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct MutationResponse {
    pub day: DayResponse,
    pub milestone: Option<Milestone>,
    pub celebration: Option<Celebration>,
    pub cue: Option<FeedbackCue>,
    pub summary: ProgressSummary,
}

#[derive(Debug, Serialize)]
pub struct MotivationResponse {
    pub phase_id: u32,
    pub phase_name: String,
    pub completed_days: u32,
    pub message: String,
}
