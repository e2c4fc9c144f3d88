use anyhow::Context;
use comms_core::config::{Config, PROVIDER_ANTHROPIC, PROVIDER_OFFLINE};
use comms_core::store::Store;
use comms_core::{io, paths};
use std::path::Path;

pub fn run(root: &Path, provider: Option<&str>) -> anyhow::Result<()> {
    println!("Initializing comms in: {}", root.display());

    let dir = paths::comms_dir(root);
    io::ensure_dir(&dir).with_context(|| format!("failed to create {}", dir.display()))?;

    let config_path = paths::config_path(root);
    if config_path.exists() {
        println!("  exists:  {}", paths::CONFIG_FILE);
    } else {
        let mut config = Config::default();
        if let Some(p) = provider {
            if p != PROVIDER_ANTHROPIC && p != PROVIDER_OFFLINE {
                anyhow::bail!(
                    "unknown provider '{p}'; valid: {PROVIDER_ANTHROPIC}, {PROVIDER_OFFLINE}"
                );
            }
            config.llm.provider = p.to_string();
        }
        config.save(root).context("failed to write config.yaml")?;
        println!("  created: {}", paths::CONFIG_FILE);
    }

    let config = Config::load(root).context("failed to load config")?;
    let store = Store::open(config.data_path(root));
    let shown = config.data_file.display();
    if store.init().context("failed to create data file")? {
        println!("  created: {shown}");
    } else {
        println!("  exists:  {shown}");
    }

    println!("\nNext: comms project create --name \"My Project\"");
    Ok(())
}
