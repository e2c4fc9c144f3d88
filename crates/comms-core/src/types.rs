use crate::error::CommsError;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Audience
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Audience {
    Users,
    Developers,
    Management,
}

impl Audience {
    pub fn all() -> &'static [Audience] {
        &[Audience::Users, Audience::Developers, Audience::Management]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Audience::Users => "users",
            Audience::Developers => "developers",
            Audience::Management => "management",
        }
    }

    /// Writing guidelines included in draft prompts for this audience.
    pub fn guidelines(self) -> &'static str {
        match self {
            Audience::Users => {
                "- Focus on benefits and user value\n\
                 - Use accessible, non-technical language\n\
                 - Keep it brief (under 200 words)\n\
                 - Highlight what's in it for them\n\
                 - Use friendly, engaging tone"
            }
            Audience::Developers => {
                "- Include technical details and architecture\n\
                 - Mention integration points and APIs\n\
                 - Discuss implementation specifics\n\
                 - Keep under 300 words\n\
                 - Use technical terminology appropriately"
            }
            Audience::Management => {
                "- Focus on metrics, ROI, and strategic value\n\
                 - Mention risks and resource requirements\n\
                 - Include timeline and budget status\n\
                 - Keep under 250 words\n\
                 - Professional, executive tone"
            }
        }
    }
}

impl fmt::Display for Audience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Audience {
    type Err = CommsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "users" => Ok(Audience::Users),
            "developers" => Ok(Audience::Developers),
            "management" => Ok(Audience::Management),
            other => Err(CommsError::InvalidAudience(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// CommType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommType {
    #[default]
    StatusUpdate,
    LaunchAnnouncement,
    NewFeatures,
    ManagementUpdate,
}

impl CommType {
    pub fn as_str(self) -> &'static str {
        match self {
            CommType::StatusUpdate => "status_update",
            CommType::LaunchAnnouncement => "launch_announcement",
            CommType::NewFeatures => "new_features",
            CommType::ManagementUpdate => "management_update",
        }
    }
}

impl fmt::Display for CommType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CommType {
    type Err = CommsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "status_update" => Ok(CommType::StatusUpdate),
            "launch_announcement" => Ok(CommType::LaunchAnnouncement),
            "new_features" => Ok(CommType::NewFeatures),
            "management_update" => Ok(CommType::ManagementUpdate),
            other => Err(CommsError::InvalidCommType(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// CommStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommStatus {
    #[default]
    Pending,
    Sent,
}

impl CommStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CommStatus::Pending => "pending",
            CommStatus::Sent => "sent",
        }
    }
}

impl fmt::Display for CommStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CommStatus {
    type Err = CommsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "pending" => Ok(CommStatus::Pending),
            "sent" => Ok(CommStatus::Sent),
            other => Err(CommsError::InvalidCommStatus(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// ProjectStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    #[default]
    Planning,
    Active,
    OnHold,
    Launched,
    Completed,
}

impl ProjectStatus {
    pub fn all() -> &'static [ProjectStatus] {
        &[
            ProjectStatus::Planning,
            ProjectStatus::Active,
            ProjectStatus::OnHold,
            ProjectStatus::Launched,
            ProjectStatus::Completed,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProjectStatus::Planning => "planning",
            ProjectStatus::Active => "active",
            ProjectStatus::OnHold => "on_hold",
            ProjectStatus::Launched => "launched",
            ProjectStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProjectStatus {
    type Err = CommsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProjectStatus::all()
            .iter()
            .copied()
            .find(|st| st.as_str() == s.trim())
            .ok_or_else(|| CommsError::InvalidStatus(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Dates
// ---------------------------------------------------------------------------

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The local calendar date.
pub fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn format_date(date: chrono::NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_date(s: &str) -> Result<chrono::NaiveDate, CommsError> {
    chrono::NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| CommsError::InvalidDate(s.to_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn audience_parse_and_display() {
        for a in Audience::all() {
            assert_eq!(Audience::from_str(a.as_str()).unwrap(), *a);
        }
        assert!(matches!(
            Audience::from_str("investors"),
            Err(CommsError::InvalidAudience(s)) if s == "investors"
        ));
    }

    #[test]
    fn comm_type_serde_is_snake_case() {
        let json = serde_json::to_string(&CommType::LaunchAnnouncement).unwrap();
        assert_eq!(json, "\"launch_announcement\"");
        let back: CommType = serde_json::from_str("\"new_features\"").unwrap();
        assert_eq!(back, CommType::NewFeatures);
    }

    #[test]
    fn comm_type_rejects_unknown() {
        assert!(CommType::from_str("newsletter").is_err());
        assert!(serde_json::from_str::<CommType>("\"newsletter\"").is_err());
    }

    #[test]
    fn project_status_roundtrip_and_default() {
        assert_eq!(ProjectStatus::default(), ProjectStatus::Planning);
        assert_eq!(ProjectStatus::from_str("on_hold").unwrap(), ProjectStatus::OnHold);
        assert_eq!(ProjectStatus::Active.to_string(), "active");
        assert!(matches!(
            ProjectStatus::from_str("paused"),
            Err(CommsError::InvalidStatus(_))
        ));
    }

    #[test]
    fn comm_status_defaults_to_pending() {
        assert_eq!(CommStatus::default(), CommStatus::Pending);
        assert_eq!(CommStatus::Sent.to_string(), "sent");
        for status in [CommStatus::Pending, CommStatus::Sent] {
            assert_eq!(status.as_str().parse::<CommStatus>().unwrap(), status);
        }
        let err = "archived".parse::<CommStatus>().unwrap_err();
        assert!(matches!(err, CommsError::InvalidCommStatus(_)));
        assert_eq!(err.to_string(), "invalid communication status: archived");
    }

    #[test]
    fn parse_date_accepts_iso_and_rejects_other_formats() {
        let d = parse_date(" 2025-03-07 ").unwrap();
        assert_eq!(format_date(d), "2025-03-07");
        assert!(matches!(parse_date("03/07/2025"), Err(CommsError::InvalidDate(_))));
        assert!(parse_date("2025-02-30").is_err());
    }

    #[test]
    fn every_audience_has_guidelines() {
        for a in Audience::all() {
            assert!(a.guidelines().contains("words"));
        }
    }
}
