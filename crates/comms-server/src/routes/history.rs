use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::Redirect;
use axum::{Form, Json};
use comms_core::form::ManualCommForm;
use comms_core::history::SentDraft;

use crate::error::{json_body, AppError};
use crate::state::AppState;

/// POST /send-email — record a reviewed draft as sent.
///
/// Nothing is actually emailed; the draft becomes a history entry and the
/// matching planned communication is marked sent.
pub async fn send_email(
    State(app): State<AppState>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let body = json_body(body)?;
    let sent: SentDraft = serde_json::from_value(body)
        .map_err(|e| AppError::bad_request(format!("invalid send request: {e}")))?;
    let recorded = app.agent.record_sent(sent).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Email marked as sent and history updated",
        "communication": recorded.record,
        "reconciled": recorded.reconciled,
    })))
}

/// POST /project/{id}/add-manual-comm — append a hand-entered communication.
pub async fn add_manual_comm(
    State(app): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<ManualCommForm>,
) -> Result<Redirect, AppError> {
    let comm = form.into_new_comm()?;
    app.agent.add_manual(&id, comm).await?;
    Ok(Redirect::to(&format!("/project/{id}")))
}
