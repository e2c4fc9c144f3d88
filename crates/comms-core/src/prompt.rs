//! Prompt templates for plan and draft generation.
//!
//! Templates are compiled into the binary from `.pmt` files and rendered
//! with handlebars. Output is plain text, so HTML escaping is disabled.

use crate::error::{CommsError, Result};
use crate::history::CommRecord;
use crate::plan::PlannedComm;
use crate::project::Project;
use crate::types::{format_date, Audience};
use chrono::NaiveDate;
use handlebars::Handlebars;
use serde::Serialize;
use tracing::debug;

pub const SYSTEM: &str = include_str!("../prompts/system.pmt");
pub const PLAN: &str = include_str!("../prompts/plan.pmt");
pub const DRAFT: &str = include_str!("../prompts/draft.pmt");

/// Number of earlier communications to the same audience shown in a draft
/// prompt.
pub const DRAFT_HISTORY_LIMIT: usize = 3;

// ---------------------------------------------------------------------------
// Contexts
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct PlanContext<'a> {
    project: &'a Project,
    today: String,
    horizon: &'a str,
    users: String,
    developers: String,
    management: String,
}

#[derive(Debug, Serialize)]
struct DraftContext<'a> {
    project: &'a Project,
    comm: &'a PlannedComm,
    audience: Audience,
    key_topics: String,
    previous: Vec<&'a CommRecord>,
    guidelines: &'static str,
}

// ---------------------------------------------------------------------------
// PromptLoader
// ---------------------------------------------------------------------------

pub struct PromptLoader {
    hbs: Handlebars<'static>,
}

impl PromptLoader {
    pub fn new() -> Result<Self> {
        let mut hbs = Handlebars::new();
        hbs.register_escape_fn(handlebars::no_escape);
        for (name, source) in [("system", SYSTEM), ("plan", PLAN), ("draft", DRAFT)] {
            hbs.register_template_string(name, source)
                .map_err(|e| CommsError::Template(format!("{name}: {e}")))?;
        }
        Ok(Self { hbs })
    }

    fn render<T: Serialize>(&self, name: &str, ctx: &T) -> Result<String> {
        let out = self
            .hbs
            .render(name, ctx)
            .map_err(|e| CommsError::Template(format!("{name}: {e}")))?;
        debug!(template = name, chars = out.len(), "rendered prompt");
        Ok(out)
    }

    pub fn system(&self) -> Result<String> {
        self.render("system", &serde_json::json!({}))
    }

    /// Prompt asking for a communications plan covering `horizon`.
    pub fn plan(&self, project: &Project, today: NaiveDate, horizon: &str) -> Result<String> {
        let s = &project.stakeholders;
        let ctx = PlanContext {
            project,
            today: format_date(today),
            horizon,
            users: s.users.join(", "),
            developers: s.developers.join(", "),
            management: s.management.join(", "),
        };
        self.render("plan", &ctx)
    }

    /// Prompt asking for one email draft for `audience`.
    pub fn draft(&self, project: &Project, comm: &PlannedComm, audience: Audience) -> Result<String> {
        let history = project.history_for(audience);
        let skip = history.len().saturating_sub(DRAFT_HISTORY_LIMIT);
        let ctx = DraftContext {
            project,
            comm,
            audience,
            key_topics: comm.key_topics.join(", "),
            previous: history.into_iter().skip(skip).collect(),
            guidelines: audience.guidelines(),
        };
        self.render("draft", &ctx)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
