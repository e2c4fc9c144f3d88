use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use comms_core::error::CommsError;

// ---------------------------------------------------------------------------
// AppError
// ---------------------------------------------------------------------------

/// Unified error type for HTTP responses.
///
/// Rendered as `{"success": false, "error": "..."}` with the status taken
/// from the underlying [`CommsError`] when there is one.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl AppError {
    /// Construct a 400 Bad Request error with the given message.
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self(CommsError::InvalidInput(msg.into()).into())
    }

    fn status(&self) -> StatusCode {
        match self.0.downcast_ref::<CommsError>() {
            Some(e) => match e {
                CommsError::ProjectNotFound(_) | CommsError::PlannedCommNotFound(_) => {
                    StatusCode::NOT_FOUND
                }
                CommsError::InvalidStatus(_)
                | CommsError::InvalidAudience(_)
                | CommsError::InvalidCommType(_)
                | CommsError::InvalidCommStatus(_)
                | CommsError::InvalidDate(_)
                | CommsError::InvalidInput(_) => StatusCode::BAD_REQUEST,
                CommsError::Template(_)
                | CommsError::Io(_)
                | CommsError::Yaml(_)
                | CommsError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            None => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("request failed: {:#}", self.0);
        }
        let body = serde_json::json!({ "success": false, "error": self.0.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

/// Unwrap a JSON request body, turning a parse or content-type rejection
/// into a 400 with the usual error body.
pub(crate) fn json_body<T>(body: Result<axum::Json<T>, JsonRejection>) -> Result<T, AppError> {
    body.map(|axum::Json(value)| value)
        .map_err(|rejection| AppError::bad_request(rejection.body_text()))
}

/// Join a blocking task, mapping a panic or cancellation to a 500.
pub(crate) fn join_error(e: tokio::task::JoinError) -> AppError {
    AppError(anyhow::anyhow!("task join error: {e}"))
}
