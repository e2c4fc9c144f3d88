pub mod agent;
pub mod embed;
pub mod error;
pub mod pages;
pub mod routes;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use std::path::PathBuf;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use state::AppState;

/// Build the axum Router with all page, API and asset routes.
/// Used by `serve()` and available for integration testing.
pub fn build_router(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Pages
        .route("/", get(routes::projects::index))
        .route(
            "/project/create",
            get(routes::projects::create_form).post(routes::projects::create_project),
        )
        .route("/project/{id}", get(routes::projects::project_detail))
        .route("/project/{id}/edit", post(routes::projects::edit_project))
        .route("/project/{id}/plan", get(routes::projects::view_plan))
        .route(
            "/project/{id}/add-manual-comm",
            post(routes::history::add_manual_comm),
        )
        .route("/due-comms", get(routes::drafts::due_comms_page))
        .route("/review-drafts", get(routes::drafts::review_drafts))
        // Generation and history actions
        .route(
            "/project/{id}/generate-plan",
            post(routes::plans::generate_plan),
        )
        .route("/generate-drafts", post(routes::drafts::generate_drafts))
        .route("/send-email", post(routes::history::send_email))
        // JSON API
        .route("/api/projects", get(routes::api::list_projects))
        .route("/api/project/{id}", get(routes::api::get_project))
        .route("/api/due-comms", get(routes::api::due_comms))
        .route("/api/config", get(routes::api::get_config))
        // Assets
        .route("/static/{*path}", get(embed::static_handler))
        .fallback(embed::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// Start the web UI server on `port`, loading configuration from `root`.
pub async fn serve(root: PathBuf, port: u16, open_browser: bool) -> anyhow::Result<()> {
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    serve_on(root, listener, open_browser).await
}

/// Start the web UI server on a pre-bound listener.
///
/// Unlike `serve`, this accepts a `TcpListener` that was already bound so the
/// caller can read the actual port before starting (useful when `port = 0` and
/// the OS picks a free port).
pub async fn serve_on(
    root: PathBuf,
    listener: tokio::net::TcpListener,
    open_browser: bool,
) -> anyhow::Result<()> {
    let actual_port = listener.local_addr()?.port();
    let app_state = AppState::load(root)?;
    let app = build_router(app_state);

    tracing::info!("comms UI server listening on http://localhost:{actual_port}");

    if open_browser {
        let url = format!("http://localhost:{actual_port}");
        if let Err(e) = open::that(&url) {
            tracing::warn!("could not open browser: {e}");
        }
    }

    axum::serve(listener, app).await?;
    Ok(())
}
