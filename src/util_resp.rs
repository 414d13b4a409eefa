use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;

pub fn success<T: Serialize>(body: &T) -> StandardResponse {
    Ok(SuccessResponse::Success(
        serde_json::to_value(body).unwrap(),
    ))
}

pub fn created<T: Serialize>(body: &T) -> StandardResponse {
    Ok(SuccessResponse::Created(
        serde_json::to_value(body).unwrap(),
    ))
}

pub fn err_not_found() -> StandardResponse {
    Err(FailureResponse::NotFound(()))
}

pub fn bad_request(msg: impl Into<String>) -> StandardResponse {
    Err(FailureResponse::BadRequest(msg.into()))
}

pub fn conflict(msg: impl Into<String>) -> StandardResponse {
    Err(FailureResponse::Conflict(msg.into()))
}

pub fn unauthorized(msg: impl Into<String>) -> StandardResponse {
    Err(FailureResponse::Unauthorized(msg.into()))
}

pub type StandardResponse = Result<SuccessResponse, FailureResponse>;

pub enum SuccessResponse {
    Success(serde_json::Value),
    Created(serde_json::Value),
}

impl IntoResponse for SuccessResponse {
    fn into_response(self) -> Response {
        match self {
            SuccessResponse::Success(body) => {
                (StatusCode::OK, Json(body)).into_response()
            }
            SuccessResponse::Created(body) => {
                (StatusCode::CREATED, Json(body)).into_response()
            }
        }
    }
}

#[derive(Debug)]
pub enum FailureResponse {
    BadRequest(String),
    Unauthorized(String),
    NotFound(()),
    Conflict(String),
    ServerError(()),
}

impl From<diesel::result::Error> for FailureResponse {
    fn from(e: diesel::result::Error) -> Self {
        use diesel::result::{DatabaseErrorKind, Error};

        match e {
            Error::NotFound => FailureResponse::NotFound(()),
            Error::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                FailureResponse::Conflict(info.message().to_string())
            }
            e => {
                tracing::error!(error = %e, "database error");
                FailureResponse::ServerError(())
            }
        }
    }
}

impl IntoResponse for FailureResponse {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            FailureResponse::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            FailureResponse::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, msg)
            }
            FailureResponse::NotFound(()) => {
                (StatusCode::NOT_FOUND, "Not found".to_string())
            }
            FailureResponse::Conflict(msg) => (StatusCode::CONFLICT, msg),
            FailureResponse::ServerError(()) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
