use crate::error::{CommsError, Result};
use crate::plan::PlannedComm;
use crate::project::Project;
use crate::types::{Audience, CommType};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Draft
// ---------------------------------------------------------------------------

/// An email draft for one audience of a planned communication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Draft {
    pub draft_id: String,
    pub project_id: String,
    /// Target date of the planned communication.
    pub planned_comm_id: String,
    pub audience: Audience,
    /// Type of the planned communication, carried through to history.
    #[serde(rename = "type", default)]
    pub comm_type: CommType,
    pub subject: String,
    pub body: String,
    #[serde(default)]
    pub key_points: Vec<String>,
}

/// The JSON object the LLM is asked to return for a draft.
#[derive(Debug, Clone, Deserialize)]
pub struct DraftReply {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub key_points: Option<Vec<String>>,
}

impl DraftReply {
    /// Turn a reply into a draft. Subject and body must be non-empty;
    /// missing key points default to the planned key topics.
    pub fn into_draft(
        self,
        project: &Project,
        planned: &PlannedComm,
        audience: Audience,
    ) -> Result<Draft> {
        if self.subject.trim().is_empty() {
            return Err(CommsError::InvalidInput("draft has no subject".into()));
        }
        if self.body.trim().is_empty() {
            return Err(CommsError::InvalidInput("draft has no body".into()));
        }
        Ok(Draft {
            draft_id: new_draft_id(),
            project_id: project.id.clone(),
            planned_comm_id: planned.target_date.clone(),
            audience,
            comm_type: planned.comm_type,
            subject: self.subject,
            body: self.body,
            key_points: self.key_points.unwrap_or_else(|| planned.key_topics.clone()),
        })
    }
}

fn new_draft_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

// ---------------------------------------------------------------------------
// Fallback generator
// ---------------------------------------------------------------------------

fn bullets<'a>(items: impl IntoIterator<Item = &'a String>) -> String {
    items
        .into_iter()
        .map(|s| format!("- {s}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Template-based draft used when the LLM is unavailable or its reply is
/// unusable.
pub fn fallback_draft(project: &Project, planned: &PlannedComm, audience: Audience) -> Draft {
    let name = &project.name;
    let updates = bullets(project.recent_updates.iter().take(3));

    let (subject, body) = match audience {
        Audience::Users => (
            format!("{name} Update - New Features & Improvements"),
            format!(
                "Hi team,\n\n\
                 We wanted to share an update on {name}.\n\n\
                 Recent progress:\n{updates}\n\n\
                 What's coming next:\n\
                 We're working on {phase} and expect to launch on {launch}.\n\n\
                 Thanks for your continued support!",
                phase = project.current_phase,
                launch = project.expected_launch,
            ),
        ),
        Audience::Developers => {
            let milestones = project
                .upcoming_milestones
                .iter()
                .take(2)
                .map(|m| format!("- {}: {}", m.date, m.description))
                .collect::<Vec<_>>()
                .join("\n");
            (
                format!("{name} - Technical Update"),
                format!(
                    "Team,\n\n\
                     Technical update on {name}:\n\n\
                     Current Phase: {phase}\n\n\
                     Recent Updates:\n{updates}\n\n\
                     Upcoming Milestones:\n{milestones}\n\n\
                     Please review and let me know if you have questions.",
                    phase = project.current_phase,
                ),
            )
        }
        Audience::Management => {
            let next_steps = project
                .upcoming_milestones
                .iter()
                .take(2)
                .map(|m| format!("- {}", m.description))
                .collect::<Vec<_>>()
                .join("\n");
            (
                format!("{name} Status Report"),
                format!(
                    "Executive Update: {name}\n\n\
                     Status: {status}\n\
                     Current Phase: {phase}\n\
                     Expected Launch: {launch}\n\n\
                     Key Accomplishments:\n{updates}\n\n\
                     Business Value: {value}\n\n\
                     Next Steps:\n{next_steps}",
                    status = project.status,
                    phase = project.current_phase,
                    launch = project.expected_launch,
                    value = project.business_value,
                ),
            )
        }
    };

    Draft {
        draft_id: new_draft_id(),
        project_id: project.id.clone(),
        planned_comm_id: planned.target_date.clone(),
        audience,
        comm_type: planned.comm_type,
        subject,
        body: body.trim().to_string(),
        key_points: planned.key_topics.clone(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
