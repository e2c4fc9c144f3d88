use crate::plan::PlannedComm;
use crate::project::Project;
use crate::types::parse_date;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const DEFAULT_DUE_WINDOW_DAYS: u32 = 7;

/// A pending planned communication falling inside the due window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DueComm {
    pub project_id: String,
    pub project_name: String,
    pub planned_comm: PlannedComm,
    pub days_until_due: i64,
}

/// Collect pending communications with `today <= target_date <= today + window_days`.
///
/// Entries whose target date does not parse are logged and skipped. The
/// result is ordered by `days_until_due`; equal values keep store order.
pub fn due_communications(projects: &[Project], today: NaiveDate, window_days: u32) -> Vec<DueComm> {
    let horizon = today + Duration::days(i64::from(window_days));
    let mut due = Vec::new();

    for project in projects {
        for comm in &project.comms_plan.planned_communications {
            if !comm.is_pending() {
                continue;
            }
            let target = match parse_date(&comm.target_date) {
                Ok(d) => d,
                Err(e) => {
                    warn!(project = %project.id, "skipping planned communication: {e}");
                    continue;
                }
            };
            if target < today || target > horizon {
                continue;
            }
            due.push(DueComm {
                project_id: project.id.clone(),
                project_name: project.name.clone(),
                planned_comm: comm.clone(),
                days_until_due: (target - today).num_days(),
            });
        }
    }

    due.sort_by_key(|d| d.days_until_due);
    due
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Audience, CommStatus, CommType};

    fn today() -> NaiveDate {
        parse_date("2025-06-10").unwrap()
    }

    fn comm(date: &str, status: CommStatus) -> PlannedComm {
        PlannedComm {
            target_date: date.into(),
            comm_type: CommType::StatusUpdate,
            audiences: vec![Audience::Developers],
            reason: String::new(),
            key_topics: vec![],
            status,
        }
    }

    fn project(name: &str, comms: Vec<PlannedComm>) -> Project {
        let mut p = Project::new(name);
        p.comms_plan.planned_communications = comms;
        p
    }

    #[test]
    fn window_is_inclusive_on_both_ends() {
        let p = project(
            "A",
            vec![
                comm("2025-06-09", CommStatus::Pending), // yesterday
                comm("2025-06-10", CommStatus::Pending), // today
                comm("2025-06-17", CommStatus::Pending), // today + 7
                comm("2025-06-18", CommStatus::Pending), // today + 8
            ],
        );
        let due = due_communications(&[p], today(), 7);
        let days: Vec<i64> = due.iter().map(|d| d.days_until_due).collect();
        assert_eq!(days, [0, 7]);
    }

    #[test]
    fn sent_and_unparsable_entries_are_skipped() {
        let p = project(
            "A",
            vec![
                comm("2025-06-11", CommStatus::Sent),
                comm("soon", CommStatus::Pending),
                comm("2025-06-12", CommStatus::Pending),
            ],
        );
        let due = due_communications(&[p], today(), 7);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].planned_comm.target_date, "2025-06-12");
        assert_eq!(due[0].days_until_due, 2);
    }

    #[test]
    fn sorted_by_days_across_projects_with_stable_ties() {
        let a = project("A", vec![comm("2025-06-15", CommStatus::Pending), comm("2025-06-12", CommStatus::Pending)]);
        let b = project("B", vec![comm("2025-06-11", CommStatus::Pending), comm("2025-06-12", CommStatus::Pending)]);
        let due = due_communications(&[a, b], today(), 7);
        let seen: Vec<(String, i64)> = due
            .iter()
            .map(|d| (d.project_name.clone(), d.days_until_due))
            .collect();
        assert_eq!(
            seen,
            [
                ("B".to_string(), 1),
                ("A".to_string(), 2),
                ("B".to_string(), 2),
                ("A".to_string(), 5),
            ]
        );
    }

    #[test]
    fn custom_window() {
        let p = project("A", vec![comm("2025-06-20", CommStatus::Pending)]);
        assert!(due_communications(std::slice::from_ref(&p), today(), 7).is_empty());
        assert_eq!(due_communications(&[p], today(), 14).len(), 1);
    }

    #[test]
    fn zero_window_only_today() {
        let p = project("A", vec![comm("2025-06-10", CommStatus::Pending), comm("2025-06-11", CommStatus::Pending)]);
        let due = due_communications(&[p], today(), 0);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].days_until_due, 0);
    }
}
