//! Mapping of service errors onto HTTP responses

use super::dto::ErrorBody;
use crate::error::TicketDeskError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Error returned by API handlers
#[derive(Debug)]
pub struct ApiError(TicketDeskError);

impl ApiError {
    /// Missing tickets are 404, other rejected requests 400, everything else 500
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        if self.0.is_not_found() {
            StatusCode::NOT_FOUND
        } else if self.0.is_domain() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self(TicketDeskError::storage(msg))
    }

    /// A request axum could not decode
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self(TicketDeskError::InvalidInput(msg.into()))
    }
}

impl From<TicketDeskError> for ApiError {
    fn from(err: TicketDeskError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = if status.is_server_error() {
            tracing::error!("Request failed: {}", self.0);
            "Internal server error".to_string()
        } else {
            self.0.to_string()
        };

        let body = ErrorBody {
            code: self.0.code().to_string(),
            message,
        };
        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
