use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::error::{join_error, AppError};
use crate::state::AppState;

/// GET /api/projects — the whole project file.
pub async fn list_projects(
    State(app): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let store = app.store.clone();
    let file = tokio::task::spawn_blocking(move || store.load())
        .await
        .map_err(join_error)??;
    Ok(Json(serde_json::to_value(file)?))
}

/// GET /api/project/{id} — one project.
pub async fn get_project(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let store = app.store.clone();
    let project = tokio::task::spawn_blocking(move || store.get(&id))
        .await
        .map_err(join_error)??;
    Ok(Json(serde_json::to_value(project)?))
}

#[derive(Debug, Deserialize)]
pub struct DueQuery {
    pub window: Option<u32>,
}

/// GET /api/due-comms — pending communications inside the due window.
/// `?window=N` overrides the configured window.
pub async fn due_comms(
    State(app): State<AppState>,
    Query(q): Query<DueQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let due = match q.window {
        Some(days) => app.agent.due_within(days).await?,
        None => app.agent.due_communications().await?,
    };
    Ok(Json(serde_json::to_value(due)?))
}

/// GET /api/config — effective configuration and the active LLM backend.
///
/// Only the name of the API key variable is part of the config; the key
/// itself is never returned.
pub async fn get_config(State(app): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let mut json = serde_json::to_value(app.config.as_ref())?;
    if let Some(obj) = json.as_object_mut() {
        obj.insert("backend".into(), app.agent.backend().into());
        obj.insert(
            "data_path".into(),
            app.store.path().display().to_string().into(),
        );
    }
    Ok(Json(json))
}
