use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::routes::AppState;

pub mod events;

pub use events::{
    create_event, delete_event, get_event, list_events, partial_update_event, update_event,
};

#[derive(Serialize)]
pub struct HealthPayload {
    status: &'static str,
    service: &'static str,
    storage: &'static str,
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthPayload> {
    Json(HealthPayload {
        status: "ok",
        service: "events-api",
        storage: state.store.backend_name(),
    })
}
