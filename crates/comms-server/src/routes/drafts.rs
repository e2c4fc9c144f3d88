use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::{Html, Redirect};
use axum::Json;
use comms_core::plan::PlannedComm;
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use crate::agent::DraftTarget;
use crate::error::{json_body, AppError};
use crate::state::AppState;

/// GET /due-comms — due list with draft generation and send controls.
pub async fn due_comms_page(State(app): State<AppState>) -> Result<Html<String>, AppError> {
    let due = app.agent.due_communications().await?;
    // Each row carries its planned communication as JSON so the page can
    // post it back inline; target dates are not unique within a plan.
    let rows = due
        .iter()
        .map(|d| {
            Ok(json!({
                "project_id": d.project_id,
                "project_name": d.project_name,
                "planned_comm": d.planned_comm,
                "planned_comm_json": serde_json::to_string(&d.planned_comm)?,
                "audiences": d.planned_comm.audiences.iter().map(|a| a.as_str()).collect::<Vec<_>>().join(", "),
                "days_until_due": d.days_until_due,
                "due_today": d.days_until_due == 0,
            }))
        })
        .collect::<Result<Vec<_>, serde_json::Error>>()?;
    app.pages.render(
        "due_comms",
        &json!({
            "due": rows,
            "window_days": app.config.schedule.due_window_days,
        }),
    )
}

/// GET /review-drafts — drafts are reviewed on the due page.
pub async fn review_drafts() -> Redirect {
    Redirect::to("/due-comms")
}

#[derive(Debug, Deserialize)]
pub struct GenerateDraftsBody {
    #[serde(default)]
    pub communications: Vec<DraftRequest>,
}

#[derive(Debug, Deserialize)]
pub struct DraftRequest {
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub planned_comm: Option<serde_json::Value>,
    #[serde(default)]
    pub planned_comm_id: Option<String>,
}

/// POST /generate-drafts — drafts for each selected planned communication.
///
/// Items without a project id or planned communication are skipped. A
/// failure for one item is reported in `errors` and does not stop the rest.
pub async fn generate_drafts(
    State(app): State<AppState>,
    body: Result<Json<GenerateDraftsBody>, JsonRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let body = json_body(body)?;
    let mut drafts = Vec::new();
    let mut errors = Vec::new();

    for item in body.communications {
        let Some(project_id) = item.project_id.filter(|s| !s.is_empty()) else {
            continue;
        };
        let planned_comm_id = item.planned_comm_id.filter(|s| !s.is_empty());
        let planned_comm = match item.planned_comm {
            None | Some(serde_json::Value::Null) => None,
            Some(v) => match serde_json::from_value::<PlannedComm>(v) {
                Ok(c) => Some(c),
                Err(e) => {
                    errors.push(json!({
                        "project_id": project_id,
                        "error": format!("invalid planned_comm: {e}"),
                    }));
                    continue;
                }
            },
        };
        if planned_comm.is_none() && planned_comm_id.is_none() {
            continue;
        }

        let target = DraftTarget {
            planned_comm,
            planned_comm_id,
        };
        match app.agent.generate_drafts(&project_id, target).await {
            Ok(mut d) => drafts.append(&mut d),
            Err(e) => {
                warn!(project = %project_id, "draft generation failed: {e:#}");
                errors.push(json!({ "project_id": project_id, "error": e.to_string() }));
            }
        }
    }

    let message = format!("Generated {} draft(s)", drafts.len());
    Ok(Json(json!({
        "success": true,
        "drafts": drafts,
        "errors": errors,
        "message": message,
    })))
}
