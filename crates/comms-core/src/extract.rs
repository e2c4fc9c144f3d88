//! Pull structured JSON out of free-form LLM replies.

use crate::draft::{Draft, DraftReply};
use crate::error::{CommsError, Result};
use crate::plan::{CommsPlan, PlannedComm};
use crate::project::Project;
use crate::types::Audience;
use chrono::NaiveDate;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

static FENCE_RE: OnceLock<Regex> = OnceLock::new();

fn fence_re() -> &'static Regex {
    FENCE_RE.get_or_init(|| Regex::new(r"(?s)```(?:json)?\s*(\{.*?\})\s*```").unwrap())
}

fn parse_object(s: &str) -> Option<Value> {
    match serde_json::from_str::<Value>(s.trim()) {
        Ok(v @ Value::Object(_)) => Some(v),
        _ => None,
    }
}

/// Find the JSON object in `text`.
///
/// Tries the whole text, then a fenced ```json block, then the span from the
/// first `{` to the last `}`. Returns `None` when none of them parse.
pub fn extract_json_object(text: &str) -> Option<Value> {
    if let Some(v) = parse_object(text) {
        return Some(v);
    }
    if let Some(v) = fence_re()
        .captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| parse_object(m.as_str()))
    {
        return Some(v);
    }
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    parse_object(&text[start..=end])
}

fn no_json() -> CommsError {
    CommsError::InvalidInput("reply contains no JSON object".into())
}

/// Extract and validate a communications plan from an LLM reply.
pub fn plan_from_reply(text: &str, today: NaiveDate, default_horizon: &str) -> Result<CommsPlan> {
    let value = extract_json_object(text).ok_or_else(no_json)?;
    if value.get("planned_communications").is_none() {
        return Err(CommsError::InvalidInput(
            "reply has no planned_communications".into(),
        ));
    }
    let plan: CommsPlan = serde_json::from_value(value)?;
    plan.validated(today, default_horizon)
}

/// Extract and validate an email draft from an LLM reply.
pub fn draft_from_reply(
    text: &str,
    project: &Project,
    planned: &PlannedComm,
    audience: Audience,
) -> Result<Draft> {
    let value = extract_json_object(text).ok_or_else(no_json)?;
    let reply: DraftReply = serde_json::from_value(value)?;
    reply.into_draft(project, planned, audience)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{parse_date, CommStatus, CommType};

    fn today() -> NaiveDate {
        parse_date("2025-03-01").unwrap()
    }

    #[test]
    fn whole_reply_is_json() {
        let v = extract_json_object(r#" {"a": 1} "#).unwrap();
        assert_eq!(v["a"], 1);
    }

    #[test]
    fn json_embedded_in_prose() {
        let text = "Sure! Here is the plan:\n{\"a\": {\"b\": 2}}\nLet me know.";
        let v = extract_json_object(text).unwrap();
        assert_eq!(v["a"]["b"], 2);
    }

    #[test]
    fn fenced_block_wins_over_trailing_braces() {
        let text = "```json\n{\"a\": 1}\n```\nNote: use {placeholders} carefully";
        let v = extract_json_object(text).unwrap();
        assert_eq!(v["a"], 1);
    }

    #[test]
    fn no_object_is_none() {
        assert!(extract_json_object("no json here").is_none());
        assert!(extract_json_object("} backwards {").is_none());
        assert!(extract_json_object("[1, 2, 3]").is_none());
        assert!(extract_json_object("{ not: valid }").is_none());
    }

    #[test]
    fn plan_reply_is_validated() {
        let text = r#"Here you go:
{
  "generated_date": "2024-01-01",
  "planned_communications": [
    {"target_date": "2025-03-15", "type": "status_update",
     "audiences": ["developers"], "reason": "Sprint end",
     "key_topics": ["Velocity"], "status": "pending"}
  ]
}"#;
        let plan = plan_from_reply(text, today(), "3 months").unwrap();
        assert_eq!(plan.generated_date.as_deref(), Some("2025-03-01"));
        assert_eq!(plan.planning_horizon.as_deref(), Some("3 months"));
        assert_eq!(plan.planned_communications.len(), 1);
        assert_eq!(plan.planned_communications[0].comm_type, CommType::StatusUpdate);
    }

    #[test]
    fn plan_reply_without_list_is_rejected() {
        let err = plan_from_reply(r#"{"plan": []}"#, today(), "3 months").unwrap_err();
        assert!(matches!(err, CommsError::InvalidInput(_)));
    }

    #[test]
    fn plan_reply_with_unknown_type_is_rejected() {
        let text = r#"{"planned_communications": [
            {"target_date": "2025-03-15", "type": "newsletter", "audiences": ["users"]}]}"#;
        assert!(matches!(
            plan_from_reply(text, today(), "3 months"),
            Err(CommsError::Json(_))
        ));
    }

    #[test]
    fn draft_reply_is_validated() {
        let project = Project::new("Apollo");
        let planned = PlannedComm {
            target_date: "2025-03-15".into(),
            comm_type: CommType::NewFeatures,
            audiences: vec![Audience::Users],
            reason: String::new(),
            key_topics: vec!["Search".into()],
            status: CommStatus::Pending,
        };
        let text = r#"{"subject": "New search", "body": "It is fast.", "key_points": ["Speed"]}"#;
        let draft = draft_from_reply(text, &project, &planned, Audience::Users).unwrap();
        assert_eq!(draft.subject, "New search");
        assert_eq!(draft.key_points, ["Speed"]);
        assert_eq!(draft.planned_comm_id, "2025-03-15");

        assert!(draft_from_reply("nothing", &project, &planned, Audience::Users).is_err());
    }
}
