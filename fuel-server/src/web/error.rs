//! Mapping of locator errors to HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use crate::locator::LocatorError;

use super::dto::{ListErrorResponse, ReviewsErrorResponse, StatusErrorResponse};

/// Which endpoint an error belongs to. Each endpoint has its own error
/// body shape and generic server-error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Stations,
    StationDetails,
    Reviews,
    SubmitReview,
}

impl Endpoint {
    /// Message shown for storage failures.
    fn server_error_message(self) -> &'static str {
        match self {
            Endpoint::Stations => "Failed to fetch stations",
            Endpoint::Reviews => "Failed to fetch reviews",
            Endpoint::StationDetails | Endpoint::SubmitReview => "Server error",
        }
    }
}

/// Application error type.
#[derive(Debug)]
pub struct AppError {
    endpoint: Endpoint,
    status: StatusCode,
    message: String,
}

impl AppError {
    /// Convert a locator error.
    ///
    /// Storage error text is only included in the message when
    /// `expose_internal` is set.
    pub fn new(endpoint: Endpoint, err: LocatorError, expose_internal: bool) -> Self {
        let status = match &err {
            LocatorError::InvalidRequest(_)
            | LocatorError::MissingField(_)
            | LocatorError::InvalidInput(_)
            | LocatorError::ValidationFailed(_) => StatusCode::BAD_REQUEST,
            LocatorError::NotFound(_) => StatusCode::NOT_FOUND,
            LocatorError::Conflict(_) => StatusCode::CONFLICT,
            LocatorError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = match &err {
            LocatorError::Storage(inner) => {
                error!(?endpoint, error = %inner, "request failed");
                let generic = endpoint.server_error_message();
                if expose_internal {
                    format!("{generic}: {inner}")
                } else {
                    generic.to_string()
                }
            }
            _ => err.to_string(),
        };

        Self {
            endpoint,
            status,
            message,
        }
    }

    /// A request with a method the endpoint does not serve.
    pub fn method_not_allowed(endpoint: Endpoint) -> Self {
        let message = match endpoint {
            Endpoint::SubmitReview => "Only POST method is allowed.",
            _ => "Only GET method is allowed.",
        };
        Self {
            endpoint,
            status: StatusCode::METHOD_NOT_ALLOWED,
            message: message.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_client_error() {
            warn!(
                endpoint = ?self.endpoint,
                status = %self.status,
                message = %self.message,
                "request rejected"
            );
        }

        let status = self.status;
        match self.endpoint {
            Endpoint::Stations => (
                status,
                Json(ListErrorResponse {
                    error: true,
                    message: self.message,
                }),
            )
                .into_response(),
            Endpoint::Reviews => (
                status,
                Json(ReviewsErrorResponse {
                    error: true,
                    message: self.message,
                    reviews: Vec::new(),
                }),
            )
                .into_response(),
            Endpoint::StationDetails | Endpoint::SubmitReview => (
                status,
                Json(StatusErrorResponse {
                    status: "error",
                    message: self.message,
                }),
            )
                .into_response(),
        }
    }
}
