//! API error handling.
//!
//! Every failure leaves the server as the same 500 body. The underlying
//! [`SheetError`] is logged with its kind before it is discarded.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sheetgate_core::constants::INTERNAL_ERROR_MESSAGE;
use sheetgate_core::error::SheetError;

use crate::dto::ErrorResponse;

/// API error type.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// Internal server error with the generic message.
    pub fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: INTERNAL_ERROR_MESSAGE.into(),
        }
    }

    /// Status code sent to the client.
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.message,
        };

        (self.status, Json(body)).into_response()
    }
}

impl From<SheetError> for ApiError {
    fn from(err: SheetError) -> Self {
        tracing::error!(kind = err.kind(), error = %err, "Internal error");
        ApiError::internal()
    }
}
