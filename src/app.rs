use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/calendar/prev", post(handlers::prev_month_form))
        .route("/calendar/next", post(handlers::next_month_form))
        .route("/api/view", get(handlers::get_view))
        .route("/api/days/:date_key", get(handlers::get_day))
        .route("/api/calendar/prev", post(handlers::prev_month))
        .route("/api/calendar/next", post(handlers::next_month))
        .route("/api/editor/open", post(handlers::open_editor))
        .route("/api/editor/field", post(handlers::edit_field))
        .route("/api/editor/save", post(handlers::save_editor))
        .route("/api/editor/dismiss", post(handlers::dismiss_editor))
        .with_state(state)
}
