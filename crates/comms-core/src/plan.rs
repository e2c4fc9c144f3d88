use crate::error::{CommsError, Result};
use crate::project::Project;
use crate::types::{format_date, parse_date, Audience, CommStatus, CommType, ProjectStatus};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PLANNING_HORIZON: &str = "3 months";

// ---------------------------------------------------------------------------
// PlannedComm
// ---------------------------------------------------------------------------

/// A scheduled future communication. Identified within its plan by
/// `target_date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedComm {
    pub target_date: String,
    #[serde(rename = "type")]
    pub comm_type: CommType,
    #[serde(default)]
    pub audiences: Vec<Audience>,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub key_topics: Vec<String>,
    #[serde(default)]
    pub status: CommStatus,
}

impl PlannedComm {
    pub fn is_pending(&self) -> bool {
        self.status == CommStatus::Pending
    }

    pub fn targets(&self, audience: Audience) -> bool {
        self.audiences.contains(&audience)
    }
}

// ---------------------------------------------------------------------------
// CommsPlan
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommsPlan {
    #[serde(default)]
    pub generated_date: Option<String>,
    #[serde(default)]
    pub planning_horizon: Option<String>,
    #[serde(default)]
    pub planned_communications: Vec<PlannedComm>,
}

impl CommsPlan {
    /// Planned communication with the given target date. A pending entry
    /// wins over one already sent on the same date.
    pub fn find(&self, target_date: &str) -> Option<&PlannedComm> {
        let mut same_date = self
            .planned_communications
            .iter()
            .filter(|c| c.target_date == target_date);
        let first = same_date.clone().next();
        same_date.find(|c| c.is_pending()).or(first)
    }

    pub fn pending_count(&self) -> usize {
        self.planned_communications
            .iter()
            .filter(|c| c.is_pending())
            .count()
    }

    /// Check a plan produced by the LLM and normalize its metadata.
    ///
    /// Every target date must be `YYYY-MM-DD` and every entry needs at least
    /// one audience. `generated_date` is always set to `today`; a missing
    /// horizon becomes `default_horizon`.
    pub fn validated(mut self, today: NaiveDate, default_horizon: &str) -> Result<Self> {
        for (i, comm) in self.planned_communications.iter().enumerate() {
            parse_date(&comm.target_date)?;
            if comm.audiences.is_empty() {
                return Err(CommsError::InvalidInput(format!(
                    "planned communication {i} ({}) has no audiences",
                    comm.target_date
                )));
            }
        }
        self.generated_date = Some(format_date(today));
        let horizon_missing = match self.planning_horizon.as_deref() {
            Some(h) => h.trim().is_empty(),
            None => true,
        };
        if horizon_missing {
            self.planning_horizon = Some(default_horizon.to_string());
        }
        Ok(self)
    }
}

// ---------------------------------------------------------------------------
// Fallback generator
// ---------------------------------------------------------------------------

/// Deterministic plan used when the LLM is unavailable or its output is
/// unusable.
///
/// Active projects get developer status updates at weeks 2, 5, 8 and 11 and
/// management updates at 30, 60 and 90 days. Any other status yields an
/// empty schedule.
pub fn fallback_plan(project: &Project, today: NaiveDate) -> CommsPlan {
    let mut planned = Vec::new();

    if project.status == ProjectStatus::Active {
        for week in (2..13).step_by(3) {
            planned.push(PlannedComm {
                target_date: format_date(today + Duration::weeks(week)),
                comm_type: CommType::StatusUpdate,
                audiences: vec![Audience::Developers],
                reason: format!("Regular status update - week {week}"),
                key_topics: vec![
                    "Progress update".into(),
                    "Blockers".into(),
                    "Next steps".into(),
                ],
                status: CommStatus::Pending,
            });
        }

        for month in 1..=3 {
            planned.push(PlannedComm {
                target_date: format_date(today + Duration::days(30 * month)),
                comm_type: CommType::ManagementUpdate,
                audiences: vec![Audience::Management],
                reason: "Monthly executive update".into(),
                key_topics: vec![
                    "Progress".into(),
                    "Budget".into(),
                    "Risks".into(),
                    "Timeline".into(),
                ],
                status: CommStatus::Pending,
            });
        }
    }

    CommsPlan {
        generated_date: Some(format_date(today)),
        planning_horizon: Some(DEFAULT_PLANNING_HORIZON.to_string()),
        planned_communications: planned,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
