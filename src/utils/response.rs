use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub detail: String,
}

pub fn created<T>(data: T) -> impl IntoResponse
where
    T: Serialize,
{
    (StatusCode::CREATED, Json(data))
}

pub fn message(message: impl Into<String>) -> impl IntoResponse {
    let body = MessageResponse {
        message: message.into(),
    };
    (StatusCode::OK, Json(body))
}

pub fn error(detail: impl Into<String>, status: StatusCode) -> Response {
    let body = ErrorDetail {
        detail: detail.into(),
    };

    (status, Json(body)).into_response()
}
