pub mod actors;
pub mod index;
pub mod movies;

use axum::Json;
use axum::extract::Path;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;

use crate::error::AppError;

// Missing/invalid JSON (wrong types included) is a plain 400.
// An over-limit body keeps its 413.
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| match rejection.status() {
            StatusCode::PAYLOAD_TOO_LARGE => AppError::Http(StatusCode::PAYLOAD_TOO_LARGE),
            _ => AppError::BadRequest("bad request"),
        })
}

// `/actors/abc` behaves like an unknown route.
pub(crate) fn path_id(
    path: Result<Path<i64>, PathRejection>,
    resource: &'static str,
) -> Result<i64, AppError> {
    path.map(|Path(id)| id)
        .map_err(|_| AppError::not_found(resource))
}
