use crate::history::CommRecord;
use crate::plan::CommsPlan;
use crate::types::{Audience, ProjectStatus};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Stakeholders
// ---------------------------------------------------------------------------

/// Email addresses per audience.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stakeholders {
    #[serde(default)]
    pub users: Vec<String>,
    #[serde(default)]
    pub developers: Vec<String>,
    #[serde(default)]
    pub management: Vec<String>,
}

impl Stakeholders {
    pub fn for_audience(&self, audience: Audience) -> &[String] {
        match audience {
            Audience::Users => &self.users,
            Audience::Developers => &self.developers,
            Audience::Management => &self.management,
        }
    }
}

// ---------------------------------------------------------------------------
// Milestone
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub date: String,
    pub description: String,
}

// ---------------------------------------------------------------------------
// Project
// ---------------------------------------------------------------------------

pub const NO_COMMS_YET: &str = "No communications yet";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub business_value: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub current_phase: String,
    #[serde(default)]
    pub expected_launch: String,
    #[serde(default)]
    pub stakeholders: Stakeholders,
    #[serde(default)]
    pub recent_updates: Vec<String>,
    #[serde(default)]
    pub upcoming_milestones: Vec<Milestone>,
    #[serde(default)]
    pub comms_history: Vec<CommRecord>,
    #[serde(default)]
    pub comms_plan: CommsPlan,
}

impl Project {
    /// A blank project with a fresh id, started today.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: crate::paths::new_project_id(),
            name: name.into(),
            owner: String::new(),
            status: ProjectStatus::default(),
            description: String::new(),
            business_value: String::new(),
            start_date: crate::types::format_date(crate::types::today()),
            current_phase: String::new(),
            expected_launch: String::new(),
            stakeholders: Stakeholders::default(),
            recent_updates: Vec::new(),
            upcoming_milestones: Vec::new(),
            comms_history: Vec::new(),
            comms_plan: CommsPlan::default(),
        }
    }

    /// `date_sent` of the most recent history entry.
    pub fn last_comm_date(&self) -> &str {
        self.comms_history
            .last()
            .map(|c| c.date_sent.as_str())
            .unwrap_or(NO_COMMS_YET)
    }

    /// History entries sent to `audience`, oldest first.
    pub fn history_for(&self, audience: Audience) -> Vec<&CommRecord> {
        self.comms_history
            .iter()
            .filter(|c| c.audience == audience)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// ProjectFile
// ---------------------------------------------------------------------------

/// Top-level shape of the JSON data file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectFile {
    #[serde(default)]
    pub projects: Vec<Project>,
}

impl ProjectFile {
    pub fn find(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Project> {
        self.projects.iter_mut().find(|p| p.id == id)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
