use axum::extract::{Path, State};
use axum::response::{Html, Redirect};
use axum::Form;
use comms_core::form::ProjectForm;
use comms_core::project::Project;
use comms_core::types::{today, Audience, CommType, ProjectStatus};
use serde_json::json;
use tracing::info;

use crate::error::{join_error, AppError};
use crate::state::AppState;

fn summary(p: &Project) -> serde_json::Value {
    json!({
        "id": p.id,
        "name": p.name,
        "owner": p.owner,
        "status": p.status,
        "current_phase": p.current_phase,
        "expected_launch": p.expected_launch,
        "last_comm_date": p.last_comm_date(),
        "pending": p.comms_plan.pending_count(),
    })
}

fn status_options(selected: ProjectStatus) -> Vec<serde_json::Value> {
    ProjectStatus::all()
        .iter()
        .map(|s| json!({ "value": s.as_str(), "selected": *s == selected }))
        .collect()
}

/// GET / — dashboard of all projects.
pub async fn index(State(app): State<AppState>) -> Result<Html<String>, AppError> {
    let store = app.store.clone();
    let projects = tokio::task::spawn_blocking(move || store.list())
        .await
        .map_err(join_error)??;
    let rows: Vec<_> = projects.iter().map(summary).collect();
    app.pages.render(
        "index",
        &json!({ "projects": rows, "backend": app.agent.backend() }),
    )
}

/// GET /project/create — empty project form.
pub async fn create_form(State(app): State<AppState>) -> Result<Html<String>, AppError> {
    app.pages.render(
        "create_project",
        &json!({
            "statuses": status_options(ProjectStatus::default()),
            "today": comms_core::types::format_date(today()),
        }),
    )
}

/// POST /project/create — create a project and show it.
pub async fn create_project(
    State(app): State<AppState>,
    Form(form): Form<ProjectForm>,
) -> Result<Redirect, AppError> {
    let store = app.store.clone();
    let project = tokio::task::spawn_blocking(move || {
        let project = form.into_project(today())?;
        store.insert(project)
    })
    .await
    .map_err(join_error)??;
    info!(project = %project.id, name = %project.name, "created project");
    Ok(Redirect::to(&format!("/project/{}", project.id)))
}

/// GET /project/{id} — details, history and the manual communication form.
pub async fn project_detail(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let store = app.store.clone();
    let project = tokio::task::spawn_blocking(move || store.get(&id))
        .await
        .map_err(join_error)??;

    let history: Vec<_> = project.comms_history.iter().rev().collect();
    let milestones_text = project
        .upcoming_milestones
        .iter()
        .map(|m| format!("{}: {}", m.date, m.description))
        .collect::<Vec<_>>()
        .join("\n");
    let comm_types: Vec<_> = [
        CommType::StatusUpdate,
        CommType::LaunchAnnouncement,
        CommType::NewFeatures,
        CommType::ManagementUpdate,
    ]
    .iter()
    .map(|t| t.as_str())
    .collect();
    let audiences: Vec<_> = Audience::all().iter().map(|a| a.as_str()).collect();

    app.pages.render(
        "project",
        &json!({
            "project": project,
            "summary": summary(&project),
            "history": history,
            "statuses": status_options(project.status),
            "users_text": project.stakeholders.users.join(", "),
            "developers_text": project.stakeholders.developers.join(", "),
            "management_text": project.stakeholders.management.join(", "),
            "updates_text": project.recent_updates.join("\n"),
            "milestones_text": milestones_text,
            "comm_types": comm_types,
            "audiences": audiences,
            "today": comms_core::types::format_date(today()),
        }),
    )
}

/// POST /project/{id}/edit — apply the edit form.
pub async fn edit_project(
    State(app): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<ProjectForm>,
) -> Result<Redirect, AppError> {
    let store = app.store.clone();
    let target = id.clone();
    tokio::task::spawn_blocking(move || store.update(&target, |p| form.apply_to(p)))
        .await
        .map_err(join_error)??;
    info!(project = %id, "updated project");
    Ok(Redirect::to(&format!("/project/{id}")))
}

/// GET /project/{id}/plan — the stored communications plan.
pub async fn view_plan(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let store = app.store.clone();
    let project = tokio::task::spawn_blocking(move || store.get(&id))
        .await
        .map_err(join_error)??;
    let planned: Vec<_> = project
        .comms_plan
        .planned_communications
        .iter()
        .map(|c| {
            json!({
                "target_date": c.target_date,
                "type": c.comm_type,
                "audiences": c.audiences.iter().map(|a| a.as_str()).collect::<Vec<_>>().join(", "),
                "reason": c.reason,
                "key_topics": c.key_topics,
                "status": c.status,
                "pending": c.is_pending(),
            })
        })
        .collect();
    app.pages.render(
        "plan",
        &json!({
            "project": summary(&project),
            "plan": project.comms_plan,
            "planned": planned,
        }),
    )
}
