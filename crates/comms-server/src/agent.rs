//! Plan and draft generation on top of the project store.
//!
//! Every generation step tries the LLM first and drops to the template
//! generators in `comms-core` on any failure, so callers always get a
//! result as long as the project exists.

use comms_agent::{agent_run, Completer, RunConfig};
use comms_core::config::ScheduleConfig;
use comms_core::draft::{fallback_draft, Draft};
use comms_core::due::{due_communications, DueComm};
use comms_core::error::CommsError;
use comms_core::extract;
use comms_core::history::{record_communication, NewComm, Recorded, SentDraft};
use comms_core::plan::{fallback_plan, CommsPlan, PlannedComm};
use comms_core::project::Project;
use comms_core::prompt::PromptLoader;
use comms_core::store::Store;
use comms_core::types::{today, Audience};
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Where a generated plan came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanSource {
    Llm,
    Fallback,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedPlan {
    pub plan: CommsPlan,
    pub source: PlanSource,
}

/// Identifies the planned communication to draft for: given inline, or by
/// target date within the project's plan.
#[derive(Debug, Clone, Default)]
pub struct DraftTarget {
    pub planned_comm: Option<PlannedComm>,
    pub planned_comm_id: Option<String>,
}

async fn blocking<T, F>(f: F) -> anyhow::Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> comms_core::Result<T> + Send + 'static,
{
    let out = tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| anyhow::anyhow!("task join error: {e}"))??;
    Ok(out)
}

#[derive(Clone)]
pub struct CommsAgent {
    store: Store,
    prompts: Arc<PromptLoader>,
    llm: Arc<dyn Completer>,
    schedule: ScheduleConfig,
}

impl CommsAgent {
    pub fn new(
        store: Store,
        prompts: Arc<PromptLoader>,
        llm: Arc<dyn Completer>,
        schedule: ScheduleConfig,
    ) -> Self {
        Self {
            store,
            prompts,
            llm,
            schedule,
        }
    }

    pub fn backend(&self) -> &str {
        self.llm.name()
    }

    async fn load_project(&self, project_id: &str) -> anyhow::Result<Project> {
        let store = self.store.clone();
        let id = project_id.to_string();
        blocking(move || store.get(&id)).await
    }

    // -----------------------------------------------------------------------
    // Plans
    // -----------------------------------------------------------------------

    async fn plan_from_llm(&self, project: &Project, today: NaiveDate) -> anyhow::Result<CommsPlan> {
        let horizon = &self.schedule.planning_horizon;
        let run = agent_run(
            self.llm.as_ref(),
            RunConfig {
                system_prompt: self.prompts.system()?,
                prompt: self.prompts.plan(project, today, horizon)?,
            },
        )
        .await?;
        Ok(extract::plan_from_reply(&run.result_text, today, horizon)?)
    }

    /// Generate a plan for the project and store it, replacing any previous
    /// plan.
    pub async fn generate_plan(&self, project_id: &str) -> anyhow::Result<GeneratedPlan> {
        let project = self.load_project(project_id).await?;
        let today = today();

        let generated = match self.plan_from_llm(&project, today).await {
            Ok(plan) => GeneratedPlan {
                plan,
                source: PlanSource::Llm,
            },
            Err(e) => {
                warn!(project = %project.id, "plan generation fell back to template: {e:#}");
                GeneratedPlan {
                    plan: fallback_plan(&project, today),
                    source: PlanSource::Fallback,
                }
            }
        };

        let store = self.store.clone();
        let id = project.id.clone();
        let plan = generated.plan.clone();
        blocking(move || {
            store.update(&id, |p| {
                p.comms_plan = plan;
                Ok(())
            })
        })
        .await?;

        info!(
            project = %project.id,
            source = ?generated.source,
            planned = generated.plan.planned_communications.len(),
            "stored communications plan"
        );
        Ok(generated)
    }

    // -----------------------------------------------------------------------
    // Due communications
    // -----------------------------------------------------------------------

    /// Pending communications due within the configured window.
    pub async fn due_communications(&self) -> anyhow::Result<Vec<DueComm>> {
        self.due_within(self.schedule.due_window_days).await
    }

    pub async fn due_within(&self, window_days: u32) -> anyhow::Result<Vec<DueComm>> {
        let store = self.store.clone();
        let projects = blocking(move || store.list()).await?;
        Ok(due_communications(&projects, today(), window_days))
    }

    // -----------------------------------------------------------------------
    // Drafts
    // -----------------------------------------------------------------------

    async fn draft_from_llm(
        &self,
        project: &Project,
        planned: &PlannedComm,
        audience: Audience,
    ) -> anyhow::Result<Draft> {
        let run = agent_run(
            self.llm.as_ref(),
            RunConfig {
                system_prompt: self.prompts.system()?,
                prompt: self.prompts.draft(project, planned, audience)?,
            },
        )
        .await?;
        Ok(extract::draft_from_reply(&run.result_text, project, planned, audience)?)
    }

    /// One draft per audience of the planned communication.
    pub async fn generate_drafts(
        &self,
        project_id: &str,
        target: DraftTarget,
    ) -> anyhow::Result<Vec<Draft>> {
        let project = self.load_project(project_id).await?;

        let planned = match (target.planned_comm, target.planned_comm_id) {
            (Some(inline), _) => inline,
            (None, Some(id)) => project
                .comms_plan
                .find(&id)
                .cloned()
                .ok_or(CommsError::PlannedCommNotFound(id))?,
            (None, None) => {
                return Err(CommsError::InvalidInput(
                    "planned_comm or planned_comm_id is required".into(),
                )
                .into())
            }
        };

        let mut drafts = Vec::with_capacity(planned.audiences.len());
        for &audience in &planned.audiences {
            let draft = match self.draft_from_llm(&project, &planned, audience).await {
                Ok(d) => d,
                Err(e) => {
                    warn!(
                        project = %project.id,
                        %audience,
                        "draft generation fell back to template: {e:#}"
                    );
                    fallback_draft(&project, &planned, audience)
                }
            };
            drafts.push(draft);
        }
        Ok(drafts)
    }

    // -----------------------------------------------------------------------
    // History
    // -----------------------------------------------------------------------

    /// Record a sent draft and mark its planned communication as sent.
    pub async fn record_sent(&self, sent: SentDraft) -> anyhow::Result<Recorded> {
        let store = self.store.clone();
        let today = today();
        let recorded = blocking(move || {
            store.update(&sent.project_id, |p| {
                let comm = NewComm::from_sent_draft(p, &sent);
                Ok(record_communication(p, comm, today))
            })
        })
        .await?;
        info!(
            comm = %recorded.record.id,
            reconciled = recorded.reconciled,
            "recorded sent communication"
        );
        Ok(recorded)
    }

    /// Append a manually entered communication to the project history.
    pub async fn add_manual(&self, project_id: &str, comm: NewComm) -> anyhow::Result<Recorded> {
        let store = self.store.clone();
        let id = project_id.to_string();
        let today = today();
        let recorded =
            blocking(move || store.update(&id, |p| Ok(record_communication(p, comm, today)))).await?;
        info!(comm = %recorded.record.id, "recorded manual communication");
        Ok(recorded)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use comms_agent::testing::ScriptedCompleter;
    use comms_core::types::{format_date, CommStatus, CommType, ProjectStatus};
    use tempfile::TempDir;

    fn agent(dir: &TempDir, llm: Arc<dyn Completer>) -> CommsAgent {
        let store = Store::open(dir.path().join("data/projects.json"));
        let prompts = Arc::new(PromptLoader::new().unwrap());
        CommsAgent::new(store, prompts, llm, ScheduleConfig::default())
    }

    fn active_project(agent: &CommsAgent) -> Project {
        let mut p = Project::new("Apollo");
        p.status = ProjectStatus::Active;
        p.stakeholders.users = vec!["u@x.io".into()];
        agent.store.insert(p).unwrap()
    }

    fn plan_reply(date: &str) -> String {
        format!(
            r#"Plan follows.
{{"planning_horizon": "3 months", "planned_communications": [
  {{"target_date": "{date}", "type": "new_features", "audiences": ["users", "management"],
    "reason": "Beta", "key_topics": ["Search"], "status": "pending"}}]}}"#
        )
    }

    #[tokio::test]
    async fn llm_plan_is_stored() {
        let dir = TempDir::new().unwrap();
        let llm = Arc::new(ScriptedCompleter::new([plan_reply("2030-01-01")]));
        let agent = agent(&dir, llm.clone());
        let p = active_project(&agent);

        let out = agent.generate_plan(&p.id).await.unwrap();
        assert_eq!(out.source, PlanSource::Llm);
        assert_eq!(out.plan.generated_date.as_deref(), Some(format_date(today()).as_str()));

        let stored = agent.store.get(&p.id).unwrap();
        assert_eq!(stored.comms_plan.planned_communications.len(), 1);
        assert!(llm.prompts()[0].contains("Project: Apollo"));
    }

    #[tokio::test]
    async fn unparsable_reply_falls_back_and_stores() {
        let dir = TempDir::new().unwrap();
        let llm = Arc::new(ScriptedCompleter::new(["I cannot help with that."]));
        let agent = agent(&dir, llm);
        let p = active_project(&agent);

        let out = agent.generate_plan(&p.id).await.unwrap();
        assert_eq!(out.source, PlanSource::Fallback);
        assert_eq!(out.plan.planned_communications.len(), 7);
        assert_eq!(agent.store.get(&p.id).unwrap().comms_plan, out.plan);
    }

    #[tokio::test]
    async fn llm_error_falls_back() {
        let dir = TempDir::new().unwrap();
        let llm = Arc::new(ScriptedCompleter::default());
        llm.push_error("overloaded");
        let agent = agent(&dir, llm);
        let p = active_project(&agent);
        let out = agent.generate_plan(&p.id).await.unwrap();
        assert_eq!(out.source, PlanSource::Fallback);
    }

    #[tokio::test]
    async fn unknown_project_is_not_found() {
        let dir = TempDir::new().unwrap();
        let agent = agent(&dir, Arc::new(ScriptedCompleter::default()));
        let err = agent.generate_plan("proj_missing").await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CommsError>(),
            Some(CommsError::ProjectNotFound(_))
        ));
    }

    #[tokio::test]
    async fn drafts_per_audience_with_per_audience_fallback() {
        let dir = TempDir::new().unwrap();
        let llm = Arc::new(ScriptedCompleter::new([
            r#"{"subject": "Search is here", "body": "Try it today."}"#,
            "not json",
        ]));
        let agent = agent(&dir, llm);
        let mut p = active_project(&agent);
        p.comms_plan = CommsPlan {
            planned_communications: vec![PlannedComm {
                target_date: "2030-01-01".into(),
                comm_type: CommType::NewFeatures,
                audiences: vec![Audience::Users, Audience::Management],
                reason: "Beta".into(),
                key_topics: vec!["Search".into()],
                status: CommStatus::Pending,
            }],
            ..Default::default()
        };
        let plan = p.comms_plan.clone();
        agent
            .store
            .update(&p.id, move |stored| {
                stored.comms_plan = plan;
                Ok(())
            })
            .unwrap();

        let drafts = agent
            .generate_drafts(
                &p.id,
                DraftTarget {
                    planned_comm: None,
                    planned_comm_id: Some("2030-01-01".into()),
                },
            )
            .await
            .unwrap();
        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].subject, "Search is here");
        assert_eq!(drafts[0].key_points, ["Search"]);
        assert_eq!(drafts[1].audience, Audience::Management);
        assert_eq!(drafts[1].subject, "Apollo Status Report");
    }

    #[tokio::test]
    async fn draft_for_unknown_planned_comm_is_not_found() {
        let dir = TempDir::new().unwrap();
        let agent = agent(&dir, Arc::new(ScriptedCompleter::default()));
        let p = active_project(&agent);
        let err = agent
            .generate_drafts(
                &p.id,
                DraftTarget {
                    planned_comm: None,
                    planned_comm_id: Some("2031-01-01".into()),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CommsError>(),
            Some(CommsError::PlannedCommNotFound(_))
        ));
    }

    #[tokio::test]
    async fn record_sent_reconciles_plan() {
        let dir = TempDir::new().unwrap();
        let llm = Arc::new(ScriptedCompleter::new([plan_reply("2030-01-01")]));
        let agent = agent(&dir, llm);
        let p = active_project(&agent);
        agent.generate_plan(&p.id).await.unwrap();

        let recorded = agent
            .record_sent(SentDraft {
                project_id: p.id.clone(),
                audience: Audience::Users,
                subject: "Search is here".into(),
                body: "Body".into(),
                key_points: vec![],
                planned_comm_id: Some("2030-01-01".into()),
                comm_type: Some(CommType::NewFeatures),
            })
            .await
            .unwrap();
        assert_eq!(recorded.reconciled, 1);
        assert_eq!(recorded.record.sent_to, ["u@x.io"]);

        let stored = agent.store.get(&p.id).unwrap();
        assert_eq!(stored.comms_history.len(), 1);
        assert_eq!(stored.comms_plan.pending_count(), 0);
    }
}
