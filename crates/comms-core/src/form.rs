//! Mapping from submitted HTML form fields to domain values.

use crate::error::Result;
use crate::history::NewComm;
use crate::project::{Milestone, Project, Stakeholders};
use crate::types::{format_date, Audience, CommType, ProjectStatus};
use chrono::NaiveDate;
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Field parsers
// ---------------------------------------------------------------------------

/// Split on commas, trim, drop empties.
pub fn comma_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Split on newlines, trim, drop empties.
pub fn line_list(s: &str) -> Vec<String> {
    s.lines()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// One milestone per `date: description` line, split at the first colon.
/// Lines without a colon are ignored.
pub fn parse_milestones(s: &str) -> Vec<Milestone> {
    s.lines()
        .filter_map(|line| {
            let (date, description) = line.split_once(':')?;
            Some(Milestone {
                date: date.trim().to_string(),
                description: description.trim().to_string(),
            })
        })
        .collect()
}

fn parse_status(s: &str) -> Result<ProjectStatus> {
    s.parse()
}

// ---------------------------------------------------------------------------
// ProjectForm
// ---------------------------------------------------------------------------

/// Fields of the create and edit project forms. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectForm {
    pub name: Option<String>,
    pub owner: Option<String>,
    pub status: Option<String>,
    pub description: Option<String>,
    pub business_value: Option<String>,
    pub start_date: Option<String>,
    pub current_phase: Option<String>,
    pub expected_launch: Option<String>,
    pub users: Option<String>,
    pub developers: Option<String>,
    pub management: Option<String>,
    pub recent_updates: Option<String>,
    pub milestones: Option<String>,
}

impl ProjectForm {
    fn stakeholders(&self) -> Stakeholders {
        let list = |field: &Option<String>| comma_list(field.as_deref().unwrap_or(""));
        Stakeholders {
            users: list(&self.users),
            developers: list(&self.developers),
            management: list(&self.management),
        }
    }

    /// Build a new project. Status defaults to planning and start date to
    /// `today`.
    pub fn into_project(self, today: NaiveDate) -> Result<Project> {
        let status = match self.status.as_deref() {
            Some(s) if !s.trim().is_empty() => parse_status(s)?,
            _ => ProjectStatus::default(),
        };
        let mut project = Project::new(self.name.clone().unwrap_or_default());
        project.owner = self.owner.clone().unwrap_or_default();
        project.status = status;
        project.description = self.description.clone().unwrap_or_default();
        project.business_value = self.business_value.clone().unwrap_or_default();
        project.start_date = self
            .start_date
            .clone()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| format_date(today));
        project.current_phase = self.current_phase.clone().unwrap_or_default();
        project.expected_launch = self.expected_launch.clone().unwrap_or_default();
        project.stakeholders = self.stakeholders();
        project.recent_updates = line_list(self.recent_updates.as_deref().unwrap_or(""));
        project.upcoming_milestones = parse_milestones(self.milestones.as_deref().unwrap_or(""));
        Ok(project)
    }

    /// Apply an edit. Absent scalar fields keep their stored value;
    /// stakeholders are always replaced; updates and milestones only when
    /// the submitted text is non-empty.
    ///
    /// The project is left untouched when the status is invalid.
    pub fn apply_to(self, project: &mut Project) -> Result<()> {
        let stakeholders = self.stakeholders();
        let status = non_blank(self.status)
            .map(|s| parse_status(&s))
            .transpose()?;

        fn replace(slot: &mut String, value: Option<String>) {
            if let Some(v) = value {
                *slot = v;
            }
        }

        replace(&mut project.name, self.name);
        replace(&mut project.owner, self.owner);
        if let Some(status) = status {
            project.status = status;
        }
        replace(&mut project.description, self.description);
        replace(&mut project.business_value, self.business_value);
        replace(&mut project.start_date, self.start_date);
        replace(&mut project.current_phase, self.current_phase);
        replace(&mut project.expected_launch, self.expected_launch);
        project.stakeholders = stakeholders;

        if let Some(text) = self.recent_updates.filter(|t| !t.trim().is_empty()) {
            project.recent_updates = line_list(&text);
        }
        if let Some(text) = self.milestones.filter(|t| !t.trim().is_empty()) {
            project.upcoming_milestones = parse_milestones(&text);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// ManualCommForm
// ---------------------------------------------------------------------------

/// Fields of the "add manual communication" form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ManualCommForm {
    pub date_sent: Option<String>,
    #[serde(rename = "type")]
    pub comm_type: Option<String>,
    pub audience: Option<String>,
    pub subject: Option<String>,
    pub summary: Option<String>,
    pub key_messages: Option<String>,
    pub sent_to: Option<String>,
}

fn non_blank(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.trim().is_empty())
}

impl ManualCommForm {
    pub fn into_new_comm(self) -> Result<NewComm> {
        let comm_type = match non_blank(self.comm_type) {
            Some(t) => t.parse::<CommType>()?,
            None => CommType::default(),
        };
        let audience = match non_blank(self.audience) {
            Some(a) => a.parse::<Audience>()?,
            None => Audience::Users,
        };
        Ok(NewComm {
            id: None,
            date_sent: non_blank(self.date_sent),
            comm_type,
            audience: Some(audience),
            subject: self.subject.unwrap_or_default(),
            summary: self.summary.unwrap_or_default(),
            key_messages: line_list(self.key_messages.as_deref().unwrap_or("")),
            sent_to: comma_list(self.sent_to.as_deref().unwrap_or("")),
            planned_comm_id: None,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CommsError;
    use crate::types::parse_date;

    fn today() -> NaiveDate {
        parse_date("2025-02-03").unwrap()
    }

    #[test]
    fn comma_list_trims_and_drops_empties() {
        assert_eq!(comma_list(" a@x.io, ,b@x.io ,"), ["a@x.io", "b@x.io"]);
        assert!(comma_list("").is_empty());
    }

    #[test]
    fn line_list_handles_crlf() {
        assert_eq!(line_list("one\r\n\r\n  two  \n"), ["one", "two"]);
    }

    #[test]
    fn milestones_split_at_first_colon() {
        let ms = parse_milestones("2025-03-01: Beta: public\nno colon here\n 2025-04-01 :GA ");
        assert_eq!(ms.len(), 2);
        assert_eq!(ms[0].date, "2025-03-01");
        assert_eq!(ms[0].description, "Beta: public");
        assert_eq!(ms[1].date, "2025-04-01");
        assert_eq!(ms[1].description, "GA");
    }

    #[test]
    fn create_applies_defaults() {
        let form = ProjectForm {
            name: Some("Apollo".into()),
            users: Some("u@x.io, v@x.io".into()),
            recent_updates: Some("Shipped login\nFixed sync".into()),
            ..Default::default()
        };
        let p = form.into_project(today()).unwrap();
        assert!(p.id.starts_with("proj_"));
        assert_eq!(p.status, ProjectStatus::Planning);
        assert_eq!(p.start_date, "2025-02-03");
        assert_eq!(p.stakeholders.users, ["u@x.io", "v@x.io"]);
        assert!(p.stakeholders.management.is_empty());
        assert_eq!(p.recent_updates.len(), 2);
        assert!(p.comms_history.is_empty());
    }

    #[test]
    fn create_rejects_unknown_status() {
        let form = ProjectForm {
            status: Some("paused".into()),
            ..Default::default()
        };
        assert!(matches!(form.into_project(today()), Err(CommsError::InvalidStatus(_))));
    }

    fn existing() -> Project {
        let mut p = Project::new("Apollo");
        p.owner = "Ana".into();
        p.status = ProjectStatus::Active;
        p.stakeholders.developers = vec!["d@x.io".into()];
        p.recent_updates = vec!["old update".into()];
        p.upcoming_milestones = vec![Milestone {
            date: "2025-05-01".into(),
            description: "GA".into(),
        }];
        p
    }

    #[test]
    fn edit_keeps_absent_scalars_and_replaces_stakeholders() {
        let mut p = existing();
        ProjectForm {
            name: Some("Apollo 2".into()),
            users: Some("u@x.io".into()),
            ..Default::default()
        }
        .apply_to(&mut p)
        .unwrap();
        assert_eq!(p.name, "Apollo 2");
        assert_eq!(p.owner, "Ana");
        assert_eq!(p.status, ProjectStatus::Active);
        assert_eq!(p.stakeholders.users, ["u@x.io"]);
        assert!(p.stakeholders.developers.is_empty(), "absent list becomes empty");
    }

    #[test]
    fn edit_replaces_updates_and_milestones_only_when_non_empty() {
        let mut p = existing();
        ProjectForm {
            recent_updates: Some("  ".into()),
            milestones: Some(String::new()),
            ..Default::default()
        }
        .apply_to(&mut p)
        .unwrap();
        assert_eq!(p.recent_updates, ["old update"]);
        assert_eq!(p.upcoming_milestones.len(), 1);

        ProjectForm {
            recent_updates: Some("new update".into()),
            milestones: Some("2025-06-01: Launch".into()),
            ..Default::default()
        }
        .apply_to(&mut p)
        .unwrap();
        assert_eq!(p.recent_updates, ["new update"]);
        assert_eq!(p.upcoming_milestones[0].description, "Launch");
    }

    #[test]
    fn edit_with_bad_status_changes_nothing() {
        let mut p = existing();
        let err = ProjectForm {
            name: Some("Changed".into()),
            status: Some("paused".into()),
            ..Default::default()
        }
        .apply_to(&mut p);
        assert!(err.is_err());
        assert_eq!(p.name, "Apollo");
        assert_eq!(p.stakeholders.developers, ["d@x.io"]);
    }

    #[test]
    fn edit_with_blank_status_keeps_current() {
        let mut p = existing();
        ProjectForm {
            status: Some("  ".into()),
            owner: Some("Bo".into()),
            ..Default::default()
        }
        .apply_to(&mut p)
        .unwrap();
        assert_eq!(p.status, ProjectStatus::Active);
        assert_eq!(p.owner, "Bo");
    }

    #[test]
    fn manual_comm_defaults() {
        let comm = ManualCommForm {
            subject: Some("Kickoff".into()),
            key_messages: Some("Scope\nTimeline".into()),
            sent_to: Some("a@x.io,b@x.io".into()),
            ..Default::default()
        }
        .into_new_comm()
        .unwrap();
        assert_eq!(comm.comm_type, CommType::StatusUpdate);
        assert_eq!(comm.audience, Some(Audience::Users));
        assert!(comm.date_sent.is_none());
        assert_eq!(comm.key_messages, ["Scope", "Timeline"]);
        assert_eq!(comm.sent_to, ["a@x.io", "b@x.io"]);
    }

    #[test]
    fn manual_comm_rejects_unknown_audience() {
        let form = ManualCommForm {
            audience: Some("investors".into()),
            ..Default::default()
        };
        assert!(matches!(form.into_new_comm(), Err(CommsError::InvalidAudience(_))));
    }
}
