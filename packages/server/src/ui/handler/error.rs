//! Mapping of use-case errors to HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    domain::ValueObjectError,
    infrastructure::dto::http::ErrorDto,
    usecase::{ConnectError, RoomError},
};

/// Error returned by the HTTP handlers, rendered as `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    BadRequest(String),
    Forbidden(String),
    NotFound(String),
    Conflict(String),
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn into_message(self) -> String {
        match self {
            Self::BadRequest(message)
            | Self::Forbidden(message)
            | Self::NotFound(message)
            | Self::Conflict(message)
            | Self::Internal(message) => message,
        }
    }
}

impl From<ValueObjectError> for ApiError {
    fn from(error: ValueObjectError) -> Self {
        Self::BadRequest(error.to_string())
    }
}

impl From<RoomError> for ApiError {
    fn from(error: RoomError) -> Self {
        let message = error.to_string();
        match error {
            RoomError::RoomNotFound(_) | RoomError::ParticipantNotFound { .. } => {
                Self::NotFound(message)
            }
            RoomError::RoomAlreadyExists(_) => Self::Conflict(message),
            RoomError::NotRoomHost { .. } => Self::Forbidden(message),
            RoomError::Validation(_) => Self::BadRequest(message),
            RoomError::Credential(_) => {
                tracing::error!("{}", message);
                Self::Internal(message)
            }
        }
    }
}

impl From<ConnectError> for ApiError {
    fn from(error: ConnectError) -> Self {
        let message = error.to_string();
        match error {
            ConnectError::RoomNotFound(_) => Self::NotFound(message),
            ConnectError::DuplicateConnection(_) => Self::Conflict(message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorDto {
            error: self.into_message(),
        });
        (status, body).into_response()
    }
}
