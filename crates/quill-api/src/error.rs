use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use crate::strings;

/// Failure taxonomy shared by every endpoint. Handlers return
/// `Result<_, ApiError>` and the `IntoResponse` impl below is the single
/// place that maps a failure kind to a status and body.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed input; carries one human message per failed rule.
    #[error("validation failed")]
    Validation(Vec<String>),

    /// Unknown account or wrong password. Both collapse into one outcome so
    /// the response never reveals which precondition failed.
    #[error("authentication failed")]
    Authentication,

    /// The account exists but its email has not been verified.
    #[error("account not verified")]
    Unverified,

    /// A referenced resource does not exist.
    #[error("resource not found")]
    NotFound,

    /// The actor is authenticated but does not own the resource.
    #[error("not resource owner")]
    Unauthorised,

    /// Anything unexpected. Logged, never exposed.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(messages) => {
                (StatusCode::BAD_REQUEST, messages.join(" ")).into_response()
            }
            ApiError::Authentication => {
                (StatusCode::UNAUTHORIZED, strings::LOGIN_FAILURE).into_response()
            }
            ApiError::Unverified => {
                (StatusCode::FORBIDDEN, strings::REGISTER_VALIDATE).into_response()
            }
            ApiError::NotFound => {
                (StatusCode::NOT_FOUND, strings::RESOURCE_NOT_FOUND).into_response()
            }
            ApiError::Unauthorised => {
                (StatusCode::UNAUTHORIZED, strings::UNAUTHORISED).into_response()
            }
            ApiError::Internal(err) => {
                error!("unhandled internal error: {err:#}");
                (StatusCode::INTERNAL_SERVER_ERROR, strings::DEFAULT_ERROR_MESSAGE).into_response()
            }
        }
    }
}
