use crate::paths;
use crate::project::Project;
use crate::types::{format_date, Audience, CommStatus, CommType};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Summaries longer than this are cut and suffixed with `...`.
pub const SUMMARY_MAX_CHARS: usize = 200;

// ---------------------------------------------------------------------------
// CommRecord
// ---------------------------------------------------------------------------

/// A communication that has been sent, as stored in `comms_history`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommRecord {
    pub id: String,
    pub date_sent: String,
    #[serde(rename = "type", default)]
    pub comm_type: CommType,
    pub audience: Audience,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub key_messages: Vec<String>,
    #[serde(default)]
    pub sent_to: Vec<String>,
}

// ---------------------------------------------------------------------------
// NewComm
// ---------------------------------------------------------------------------

/// Input for [`record_communication`]. Missing `id`/`date_sent` are filled
/// in when the record is created.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewComm {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub date_sent: Option<String>,
    #[serde(rename = "type", default)]
    pub comm_type: CommType,
    pub audience: Option<Audience>,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub key_messages: Vec<String>,
    #[serde(default)]
    pub sent_to: Vec<String>,
    /// Target date of the planned communication this fulfils, if any.
    #[serde(default)]
    pub planned_comm_id: Option<String>,
}

/// Payload posted when an email draft is marked as sent.
#[derive(Debug, Clone, Deserialize)]
pub struct SentDraft {
    pub project_id: String,
    pub audience: Audience,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub key_points: Vec<String>,
    #[serde(default)]
    pub planned_comm_id: Option<String>,
    #[serde(rename = "type", default)]
    pub comm_type: Option<CommType>,
}

impl NewComm {
    /// Build a history entry for a sent draft. Recipients are the project's
    /// stakeholders for the draft's audience. Without an explicit type the
    /// planned communication's type is used.
    pub fn from_sent_draft(project: &Project, draft: &SentDraft) -> Self {
        let planned_type = draft.planned_comm_id.as_deref().and_then(|date| {
            project
                .comms_plan
                .planned_communications
                .iter()
                .find(|c| c.target_date == date && c.targets(draft.audience))
                .map(|c| c.comm_type)
        });
        Self {
            id: None,
            date_sent: None,
            comm_type: draft.comm_type.or(planned_type).unwrap_or_default(),
            audience: Some(draft.audience),
            subject: draft.subject.clone(),
            summary: summarize(&draft.body),
            key_messages: draft.key_points.clone(),
            sent_to: project.stakeholders.for_audience(draft.audience).to_vec(),
            planned_comm_id: draft.planned_comm_id.clone(),
        }
    }
}

/// The body itself when short enough, otherwise its first
/// [`SUMMARY_MAX_CHARS`] characters followed by `...`.
pub fn summarize(body: &str) -> String {
    if body.chars().count() > SUMMARY_MAX_CHARS {
        let cut: String = body.chars().take(SUMMARY_MAX_CHARS).collect();
        format!("{cut}...")
    } else {
        body.to_string()
    }
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Outcome of [`record_communication`].
#[derive(Debug, Clone)]
pub struct Recorded {
    pub record: CommRecord,
    /// Number of planned communications that moved from pending to sent.
    pub reconciled: usize,
}

/// Append a communication to the project history and mark the matching
/// planned communications as sent.
///
/// A planned communication matches when its `target_date` equals
/// `comm.planned_comm_id` and its audiences include the record's audience.
pub fn record_communication(project: &mut Project, comm: NewComm, today: NaiveDate) -> Recorded {
    let audience = comm.audience.unwrap_or(Audience::Users);
    let record = CommRecord {
        id: comm
            .id
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(paths::new_comm_id),
        date_sent: comm
            .date_sent
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| format_date(today)),
        comm_type: comm.comm_type,
        audience,
        subject: comm.subject,
        summary: comm.summary,
        key_messages: comm.key_messages,
        sent_to: comm.sent_to,
    };
    project.comms_history.push(record.clone());

    let mut reconciled = 0;
    if let Some(target) = comm.planned_comm_id.as_deref().filter(|s| !s.is_empty()) {
        for planned in project
            .comms_plan
            .planned_communications
            .iter_mut()
            .filter(|c| c.target_date == target && c.targets(audience))
        {
            if planned.status != CommStatus::Sent {
                planned.status = CommStatus::Sent;
                reconciled += 1;
            }
        }
    }

    Recorded { record, reconciled }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
