//! Server-rendered HTML pages.

use crate::embed::PageTemplates;
use crate::error::AppError;
use axum::response::Html;
use handlebars::Handlebars;
use rust_embed::Embed;
use serde::Serialize;

/// Registry of the embedded page templates. Each `name.hbs` file is
/// registered as `name` and can also be used as a partial.
pub struct Pages {
    hbs: Handlebars<'static>,
}

impl Pages {
    pub fn new() -> anyhow::Result<Self> {
        let mut hbs = Handlebars::new();
        hbs.set_strict_mode(false);
        for file in <PageTemplates as Embed>::iter() {
            let Some(name) = file.strip_suffix(".hbs") else {
                continue;
            };
            let Some(content) = <PageTemplates as Embed>::get(&file) else {
                continue;
            };
            let source = std::str::from_utf8(&content.data)?;
            hbs.register_template_string(name, source)
                .map_err(|e| anyhow::anyhow!("page template {name}: {e}"))?;
        }
        Ok(Self { hbs })
    }

    pub fn has(&self, name: &str) -> bool {
        self.hbs.has_template(name)
    }

    pub fn render<T: Serialize>(&self, name: &str, ctx: &T) -> Result<Html<String>, AppError> {
        let html = self
            .hbs
            .render(name, ctx)
            .map_err(|e| anyhow::anyhow!("render {name}: {e}"))?;
        Ok(Html(html))
    }
}
