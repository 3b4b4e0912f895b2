use crate::errors::AppError;
use crate::goal::set_goal;
use crate::logs::{DayKey, LogSet};
use crate::milestone::Milestone;
use crate::models::{
    DayResponse, GoalRequest, MotivationResponse, MutationResponse, PhaseQuery,
    ProgressSummary, SaveDayRequest, input_text,
};
use crate::mutations::{reset_all, save_day, toggle_completion};
use crate::phases::{Phase, PhaseCatalog};
use crate::state::AppState;
use crate::stats::{build_summary, total_completed};
use crate::storage::{persist_goal, persist_logs};
use crate::ui::render_index;
use axum::{
    Json,
    extract::{Path, Query, State},
    response::{Html, Redirect},
};
use tracing::{error, info};

pub async fn index(State(state): State<AppState>, Query(query): Query<PhaseQuery>) -> Html<String> {
    let active = query
        .phase
        .and_then(|phase_id| state.catalog.get(phase_id))
        .unwrap_or(&state.catalog.phases()[0]);
    let data = state.data.lock().await;
    let summary = build_summary(&state.catalog, &data.logs, data.goal);
    Html(render_index(active, &data.logs, &summary))
}

pub async fn get_phases(State(state): State<AppState>) -> Json<Vec<Phase>> {
    Json(state.catalog.phases().to_vec())
}

pub async fn get_summary(State(state): State<AppState>) -> Json<ProgressSummary> {
    let data = state.data.lock().await;
    Json(build_summary(&state.catalog, &data.logs, data.goal))
}

pub async fn save_day_entry(
    State(state): State<AppState>,
    Path((phase_id, day)): Path<(u32, u32)>,
    Json(payload): Json<SaveDayRequest>,
) -> Result<Json<MutationResponse>, AppError> {
    let key = state.catalog.day_key(phase_id, day)?;
    let weight = input_text(&payload.weight);
    let note = input_text(&payload.note);
    let response = apply_day_mutation(&state, key, |catalog, logs| {
        save_day(catalog, logs, key, &weight, &note)
    })
    .await;
    Ok(Json(response))
}

pub async fn toggle_day(
    State(state): State<AppState>,
    Path((phase_id, day)): Path<(u32, u32)>,
) -> Result<Json<MutationResponse>, AppError> {
    let key = state.catalog.day_key(phase_id, day)?;
    let response = apply_day_mutation(&state, key, |catalog, logs| {
        toggle_completion(catalog, logs, key)
    })
    .await;
    Ok(Json(response))
}

pub async fn toggle_day_form(
    State(state): State<AppState>,
    Path((phase_id, day)): Path<(u32, u32)>,
) -> Result<Redirect, AppError> {
    let key = state.catalog.day_key(phase_id, day)?;
    apply_day_mutation(&state, key, |catalog, logs| {
        toggle_completion(catalog, logs, key)
    })
    .await;
    Ok(Redirect::to(&format!("/?phase={phase_id}")))
}

pub async fn update_goal(
    State(state): State<AppState>,
    Json(payload): Json<GoalRequest>,
) -> Json<ProgressSummary> {
    let mut data = state.data.lock().await;
    let next = set_goal(data.goal, &input_text(&payload.value));
    if next != data.goal {
        data.goal = next;
        if let Err(err) = persist_goal(&state.data_dir, next).await {
            error!("failed to persist goal: {}", err.message);
        }
    }
    Json(build_summary(&state.catalog, &data.logs, data.goal))
}

pub async fn reset(State(state): State<AppState>) -> Json<ProgressSummary> {
    let mut data = state.data.lock().await;
    *data = reset_all();
    info!("all logs and goal cleared");
    if let Err(err) = persist_logs(&state.data_dir, &data.logs).await {
        error!("failed to persist logs: {}", err.message);
    }
    if let Err(err) = persist_goal(&state.data_dir, data.goal).await {
        error!("failed to persist goal: {}", err.message);
    }
    Json(build_summary(&state.catalog, &data.logs, data.goal))
}

pub async fn get_motivation(
    State(state): State<AppState>,
    Query(query): Query<PhaseQuery>,
) -> Result<Json<MotivationResponse>, AppError> {
    let phase_id = query.phase.unwrap_or(1);
    let phase = state
        .catalog
        .get(phase_id)
        .ok_or_else(|| AppError::not_found(format!("unknown phase {phase_id}")))?;
    let completed_days = {
        let data = state.data.lock().await;
        total_completed(&data.logs)
    };

    let message = state
        .motivation
        .get_motivation(&phase.name, completed_days)
        .await;

    Ok(Json(MotivationResponse {
        phase_id,
        phase_name: phase.name.clone(),
        completed_days,
        message,
    }))
}

/// Runs one mutation against the current snapshot, commits it in memory,
/// then persists. A failed write is logged and the in-memory update stands.
async fn apply_day_mutation<F>(state: &AppState, key: DayKey, mutate: F) -> MutationResponse
where
    F: FnOnce(&PhaseCatalog, &LogSet) -> (LogSet, Option<Milestone>),
{
    let mut data = state.data.lock().await;
    let (next, milestone) = mutate(&state.catalog, &data.logs);
    data.logs = next;

    if let Some(milestone) = milestone.filter(Milestone::is_celebration) {
        info!(day = %key, ?milestone, "milestone reached");
    }

    if let Err(err) = persist_logs(&state.data_dir, &data.logs).await {
        error!("failed to persist logs: {}", err.message);
    }

    let entry = data.logs.get(&key).cloned().unwrap_or_default();
    MutationResponse {
        day: DayResponse {
            key: key.to_string(),
            completed: entry.completed,
            weight: entry.weight,
            note: entry.note,
            timestamp: entry.timestamp,
        },
        celebration: milestone.and_then(|milestone| milestone.celebration(&state.catalog)),
        cue: milestone.map(|milestone| milestone.cue()),
        milestone,
        summary: build_summary(&state.catalog, &data.logs, data.goal),
    }
}
