use crate::agent::CommsAgent;
use crate::pages::Pages;
use comms_agent::{AnthropicClient, ClientOptions, Completer, Offline};
use comms_core::config::{Config, LlmConfig};
use comms_core::prompt::PromptLoader;
use comms_core::store::Store;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub root: PathBuf,
    pub config: Arc<Config>,
    pub store: Store,
    pub agent: CommsAgent,
    pub pages: Arc<Pages>,
}

impl AppState {
    /// Load `.comms/config.yaml` under `root` and pick the LLM backend it
    /// names.
    pub fn load(root: PathBuf) -> anyhow::Result<Self> {
        let config = Config::load(&root)?;
        let llm = completer_for(&config.llm);
        Self::with_completer(root, config, llm)
    }

    /// Build state around an explicit backend.
    pub fn with_completer(
        root: PathBuf,
        config: Config,
        llm: Arc<dyn Completer>,
    ) -> anyhow::Result<Self> {
        let store = Store::open(config.data_path(&root));
        let prompts = Arc::new(PromptLoader::new()?);
        let agent = CommsAgent::new(store.clone(), prompts, llm, config.schedule.clone());
        Ok(Self {
            root,
            config: Arc::new(config),
            store,
            agent,
            pages: Arc::new(Pages::new()?),
        })
    }
}

/// Choose the LLM backend for `cfg`. Falls back to [`Offline`] when the
/// provider is `offline` or no API key is available.
pub fn completer_for(cfg: &LlmConfig) -> Arc<dyn Completer> {
    if cfg.is_offline() {
        info!("llm provider is offline; using template generators");
        return Arc::new(Offline::new("llm.provider is offline"));
    }
    let Some(api_key) = cfg.api_key() else {
        warn!(
            "{} is not set; plans and drafts will use template generators",
            cfg.api_key_env
        );
        return Arc::new(Offline::new(format!("{} is not set", cfg.api_key_env)));
    };
    let opts = ClientOptions {
        api_key,
        base_url: cfg.base_url.clone(),
        api_version: cfg.api_version.clone(),
        model: cfg.model.clone(),
        max_tokens: cfg.max_tokens,
        timeout: Duration::from_secs(cfg.timeout_seconds),
    };
    match AnthropicClient::new(opts) {
        Ok(client) => {
            info!(model = %cfg.model, "using anthropic backend");
            Arc::new(client)
        }
        Err(e) => {
            warn!("cannot create anthropic client: {e}; using template generators");
            Arc::new(Offline::new(e.to_string()))
        }
    }
}
