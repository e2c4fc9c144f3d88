use axum::extract::{Path, State};
use axum::Json;

use crate::error::AppError;
use crate::state::AppState;

/// POST /project/{id}/generate-plan — generate and store a new plan.
pub async fn generate_plan(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let generated = app.agent.generate_plan(&id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "plan": generated.plan,
        "source": generated.source,
        "message": "Communications plan generated successfully",
    })))
}
