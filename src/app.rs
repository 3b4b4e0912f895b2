use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/days/:phase/:day/toggle", post(handlers::toggle_day_form))
        .route("/api/phases", get(handlers::get_phases))
        .route("/api/summary", get(handlers::get_summary))
        .route("/api/days/:phase/:day", post(handlers::save_day_entry))
        .route("/api/days/:phase/:day/toggle", post(handlers::toggle_day))
        .route("/api/goal", put(handlers::update_goal))
        .route("/api/reset", post(handlers::reset))
        .route("/api/motivation", get(handlers::get_motivation))
        .with_state(state)
}
