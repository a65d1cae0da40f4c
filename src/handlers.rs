use crate::calendar::parse_date_key;
use crate::errors::AppError;
use crate::models::{
    DayEntry, DismissRequest, FieldEditRequest, JournalView, OpenDayRequest, SaveDayRequest,
    SaveDayResponse,
};
use crate::state::AppState;
use crate::storage::save_store;
use crate::ui::render_index;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use tracing::info;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let journal = state.journal.lock().await;
    Html(render_index(&journal.view()))
}

pub async fn get_view(State(state): State<AppState>) -> Json<JournalView> {
    let journal = state.journal.lock().await;
    Json(journal.view())
}

pub async fn get_day(
    State(state): State<AppState>,
    Path(date_key): Path<String>,
) -> Result<Json<DayEntry>, AppError> {
    let date = parse_date_key(&date_key)?;
    let journal = state.journal.lock().await;
    journal
        .store
        .get(&date.to_string())
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("no entry for {date}")))
}

pub async fn prev_month(State(state): State<AppState>) -> Json<JournalView> {
    let mut journal = state.journal.lock().await;
    journal.cursor.prev_month();
    Json(journal.view())
}

pub async fn next_month(State(state): State<AppState>) -> Json<JournalView> {
    let mut journal = state.journal.lock().await;
    journal.cursor.next_month();
    Json(journal.view())
}

pub async fn prev_month_form(State(state): State<AppState>) -> Redirect {
    state.journal.lock().await.cursor.prev_month();
    Redirect::to("/")
}

pub async fn next_month_form(State(state): State<AppState>) -> Redirect {
    state.journal.lock().await.cursor.next_month();
    Redirect::to("/")
}

pub async fn open_editor(
    State(state): State<AppState>,
    Json(payload): Json<OpenDayRequest>,
) -> Result<Json<JournalView>, AppError> {
    let date = parse_date_key(&payload.date_key)?;
    let mut journal = state.journal.lock().await;
    let journal = &mut *journal;
    journal.editor.open(date.to_string(), &journal.store);
    Ok(Json(journal.view()))
}

pub async fn edit_field(
    State(state): State<AppState>,
    Json(payload): Json<FieldEditRequest>,
) -> Result<Json<JournalView>, AppError> {
    let mut journal = state.journal.lock().await;
    if !journal.editor.is_open() {
        return Err(AppError::conflict("day editor is not open"));
    }
    if let Some(variant) = payload.variant {
        journal.editor.set_variant(variant);
    }
    if let Some(deposit) = payload.deposit {
        journal.editor.set_deposit(deposit);
    }
    Ok(Json(journal.view()))
}

pub async fn save_editor(
    State(state): State<AppState>,
    Json(payload): Json<SaveDayRequest>,
) -> Result<Response, AppError> {
    let mut journal = state.journal.lock().await;
    let journal = &mut *journal;
    if !journal.editor.is_open() {
        return Err(AppError::conflict("day editor is not open"));
    }

    journal.editor.set_variant(payload.variant);
    journal.editor.set_deposit(payload.deposit);

    let saved = match journal.editor.save(&mut journal.store) {
        Ok(saved) => saved,
        Err(_) => {
            let view = journal.view();
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, Json(view)).into_response());
        }
    };

    let status = save_store(&state.data_path, &journal.store).await;
    if let Some(date_key) = saved {
        info!(%date_key, persisted = status.is_saved(), "day entry saved");
    }

    Ok(Json(SaveDayResponse {
        persisted: status.is_saved(),
        view: journal.view(),
    })
    .into_response())
}

pub async fn dismiss_editor(
    State(state): State<AppState>,
    Json(payload): Json<DismissRequest>,
) -> Json<JournalView> {
    let mut journal = state.journal.lock().await;
    journal.editor.dismiss(payload.reason);
    Json(journal.view())
}
