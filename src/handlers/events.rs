use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::Value;
use uuid::Uuid;

use crate::models::{Event, EventChanges, EventFields};
use crate::routes::AppState;
use crate::utils::error::AppError;
use crate::utils::response::{created, message};

pub const DELETED_MESSAGE: &str = "Event deleted successfully";

/// Malformed ids cannot match any row, so they are reported as missing.
fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound(format!("event '{}'", raw)))
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("event '{}'", id))
}

/// GET /events
pub async fn list_events(State(state): State<AppState>) -> Result<Json<Vec<Event>>, AppError> {
    let events = state.store.list().await?;
    Ok(Json(events))
}

/// POST /events
pub async fn create_event(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    let fields = EventFields::from_payload(&payload)?;

    let event = state.store.create(fields).await?;
    tracing::info!(event_id = %event.id, title = %event.title, "Event created");

    Ok(created(event))
}

/// GET /events/{id}
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Event>, AppError> {
    let id = parse_id(&id)?;

    let event = state.store.get(id).await?.ok_or_else(|| not_found(id))?;
    Ok(Json(event))
}

/// PUT /events/{id} replaces every mutable field.
pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Event>, AppError> {
    let id = parse_id(&id)?;
    ensure_exists(&state, id).await?;
    let Json(payload) = payload?;
    let fields = EventFields::from_payload(&payload)?;

    apply_changes(&state, id, fields.into()).await
}

/// PATCH /events/{id} replaces only the supplied fields.
pub async fn partial_update_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Event>, AppError> {
    let id = parse_id(&id)?;
    ensure_exists(&state, id).await?;
    let Json(payload) = payload?;
    let changes = EventChanges::from_payload(&payload)?;

    apply_changes(&state, id, changes).await
}

/// Unknown ids are reported before the payload is looked at.
async fn ensure_exists(state: &AppState, id: Uuid) -> Result<(), AppError> {
    state
        .store
        .get(id)
        .await?
        .map(|_| ())
        .ok_or_else(|| not_found(id))
}

async fn apply_changes(
    state: &AppState,
    id: Uuid,
    changes: EventChanges,
) -> Result<Json<Event>, AppError> {
    let event = state
        .store
        .update(id, changes)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(event_id = %event.id, "Event updated");
    Ok(Json(event))
}

/// DELETE /events/{id}
pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id)?;

    if !state.store.delete(id).await? {
        return Err(not_found(id));
    }

    tracing::info!(event_id = %id, "Event deleted");
    Ok(message(DELETED_MESSAGE))
}
