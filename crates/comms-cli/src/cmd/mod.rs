pub mod config;
pub mod draft;
pub mod due;
pub mod history;
pub mod init;
pub mod plan;
pub mod project;
pub mod sent;
pub mod ui;

use anyhow::Context;
use comms_core::config::Config;
use comms_core::store::Store;
use comms_server::AppState;
use std::path::Path;

/// Open the project store named by the config under `root`.
pub(crate) fn open_store(root: &Path) -> anyhow::Result<Store> {
    let config = Config::load(root).context("failed to load config")?;
    Ok(Store::open(config.data_path(root)))
}

/// Full application state, for commands that call the LLM.
pub(crate) fn load_state(root: &Path) -> anyhow::Result<AppState> {
    AppState::load(root.to_path_buf()).context("failed to load comms state")
}

pub(crate) fn runtime() -> anyhow::Result<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new().context("failed to start async runtime")
}
