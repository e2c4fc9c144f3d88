use crate::cmd::runtime;
use anyhow::Context;
use comms_core::config::Config;
use std::path::Path;

/// Start the web UI. Without `--port` the configured `server.port` is used;
/// `--port 0` lets the OS pick one.
pub fn run(root: &Path, port: Option<u16>, no_open: bool) -> anyhow::Result<()> {
    let port = match port {
        Some(p) => p,
        None => Config::load(root).context("failed to load config")?.server.port,
    };
    let root_buf = root.to_path_buf();
    runtime()?.block_on(async move {
        let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
            .await
            .with_context(|| format!("failed to bind port {port}"))?;
        comms_server::serve_on(root_buf, listener, !no_open).await
    })
}
