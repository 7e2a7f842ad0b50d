use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route(
            "/checklist",
            get(handlers::checklist_page).post(handlers::checklist_submit),
        )
        .route("/dashboard", get(handlers::dashboard_page))
        .route("/api/today", get(handlers::get_today))
        .route("/api/submit", post(handlers::submit))
        .route("/api/summary", get(handlers::get_summary))
        .route("/api/pending", get(handlers::get_pending))
        .route("/api/roster", get(handlers::get_roster))
        .with_state(state)
}
