use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::config::{create_cors_layer, create_security_headers_layer};
use crate::handlers::{
    create_event, delete_event, get_event, health_check, list_events, partial_update_event,
    update_event,
};
use crate::storage::EventStore;

#[derive(Clone)]
pub struct AppState {
    pub store: EventStore,
}

impl AppState {
    pub fn new(store: EventStore) -> Self {
        Self { store }
    }
}

fn event_routes() -> Router<AppState> {
    let collection = get(list_events).post(create_event);
    let member = get(get_event)
        .put(update_event)
        .patch(partial_update_event)
        .delete(delete_event);

    // Trailing-slash variants are what the web frontend calls
    Router::new()
        .route("/events", collection.clone())
        .route("/events/", collection)
        .route("/events/:id", member.clone())
        .route("/events/:id/", member)
}

/// `api_prefix` is expected in normalized form (`""` or `"/api"`).
pub fn create_routes(state: AppState, api_prefix: &str) -> Router {
    let events = if api_prefix.is_empty() {
        event_routes()
    } else {
        Router::new().nest(api_prefix, event_routes())
    };

    Router::new()
        .route("/health", get(health_check))
        .merge(events)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(create_security_headers_layer())
        .layer(create_cors_layer())
}
