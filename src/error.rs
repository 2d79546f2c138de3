use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Every handler failure converges here; each variant maps to one fixed
/// status code and one fixed client-visible message.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request payload failed a declared schema check.
    #[error("{0}")]
    Validation(&'static str),

    /// Username already taken at signup or profile update.
    #[error("username already exists")]
    Conflict,

    /// Signin with an unknown username or wrong password. One message for
    /// both cases so the response gives no account-existence oracle.
    #[error("incorrect credentials")]
    BadCredentials,

    /// Missing/invalid token, or a mutation whose ownership predicate
    /// matched no rows.
    #[error("you are not authorized")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    /// Unexpected persistence or signing failure. Detail is logged, never
    /// returned to the client.
    #[error("internal server error")]
    Internal(anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Conflict => StatusCode::LENGTH_REQUIRED,
            ApiError::BadCredentials | ApiError::Unauthorized => StatusCode::FORBIDDEN,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(ref source) = self {
            error!(error = %source, "request failed");
        }
        let body = Json(json!({ "message": self.to_string() }));
        (self.status(), body).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => ApiError::NotFound,
            sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
                ApiError::Conflict
            }
            _ => ApiError::Internal(err.into()),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err)
    }
}
