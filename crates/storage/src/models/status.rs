//! Status vocabularies for the lifecycle rules.
//!
//! Rows store status as free TEXT, so parsing must be total: any value
//! outside the known vocabulary is preserved as `Unknown(raw)` instead of
//! being silently dropped or folded into a known bucket. Write paths
//! validate against the known sets before anything reaches the database.

use std::fmt;

/// Lifecycle state of a competition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompetitionStatus {
    Open,
    Closed,
    Upcoming,
    Unknown(String),
}

impl CompetitionStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "open" => CompetitionStatus::Open,
            "closed" => CompetitionStatus::Closed,
            "upcoming" => CompetitionStatus::Upcoming,
            other => CompetitionStatus::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CompetitionStatus::Open => "open",
            CompetitionStatus::Closed => "closed",
            CompetitionStatus::Upcoming => "upcoming",
            CompetitionStatus::Unknown(raw) => raw,
        }
    }

    /// Only `open` competitions accept registrations and submissions.
    pub fn is_open(&self) -> bool {
        matches!(self, CompetitionStatus::Open)
    }
}

impl fmt::Display for CompetitionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State of a participant's registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationStatus {
    Registered,
    Confirmed,
    Cancelled,
    Unknown(String),
}

impl RegistrationStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "registered" => RegistrationStatus::Registered,
            "confirmed" => RegistrationStatus::Confirmed,
            "cancelled" => RegistrationStatus::Cancelled,
            other => RegistrationStatus::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RegistrationStatus::Registered => "registered",
            RegistrationStatus::Confirmed => "confirmed",
            RegistrationStatus::Cancelled => "cancelled",
            RegistrationStatus::Unknown(raw) => raw,
        }
    }
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Review state of submitted work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewStatus {
    Submitted,
    Reviewed,
    Approved,
    Rejected,
    Unknown(String),
}

impl ReviewStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "submitted" => ReviewStatus::Submitted,
            "reviewed" => ReviewStatus::Reviewed,
            "approved" => ReviewStatus::Approved,
            "rejected" => ReviewStatus::Rejected,
            other => ReviewStatus::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ReviewStatus::Submitted => "submitted",
            ReviewStatus::Reviewed => "reviewed",
            ReviewStatus::Approved => "approved",
            ReviewStatus::Rejected => "rejected",
            ReviewStatus::Unknown(raw) => raw,
        }
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Account role stored on the profile row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    Admin,
    Participant,
    Unknown(String),
}

impl Role {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "admin" => Role::Admin,
            "participant" => Role::Participant,
            other => Role::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "admin",
            Role::Participant => "participant",
            Role::Unknown(raw) => raw,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_competition_status_parse_known_values() {
        assert_eq!(CompetitionStatus::parse("open"), CompetitionStatus::Open);
        assert_eq!(CompetitionStatus::parse("closed"), CompetitionStatus::Closed);
        assert_eq!(
            CompetitionStatus::parse("upcoming"),
            CompetitionStatus::Upcoming
        );
    }

    #[test]
    fn test_competition_status_parse_is_total() {
        assert_eq!(
            CompetitionStatus::parse("archived"),
            CompetitionStatus::Unknown("archived".to_string())
        );
        // Matching is exact: casing is not normalized away.
        assert_eq!(
            CompetitionStatus::parse("OPEN"),
            CompetitionStatus::Unknown("OPEN".to_string())
        );
        assert_eq!(
            CompetitionStatus::parse(""),
            CompetitionStatus::Unknown(String::new())
        );
    }

    #[test]
    fn test_competition_status_round_trips_raw_value() {
        let status = CompetitionStatus::parse("paused");
        assert_eq!(status.as_str(), "paused");
        assert_eq!(status.to_string(), "paused");
    }

    #[test]
    fn test_only_open_is_open() {
        assert!(CompetitionStatus::Open.is_open());
        assert!(!CompetitionStatus::Closed.is_open());
        assert!(!CompetitionStatus::Upcoming.is_open());
        assert!(!CompetitionStatus::Unknown("open ".to_string()).is_open());
    }

    #[test]
    fn test_registration_status_parse() {
        assert_eq!(
            RegistrationStatus::parse("registered"),
            RegistrationStatus::Registered
        );
        assert_eq!(
            RegistrationStatus::parse("confirmed"),
            RegistrationStatus::Confirmed
        );
        assert_eq!(
            RegistrationStatus::parse("cancelled"),
            RegistrationStatus::Cancelled
        );
        assert_eq!(
            RegistrationStatus::parse("waitlisted"),
            RegistrationStatus::Unknown("waitlisted".to_string())
        );
    }

    #[test]
    fn test_review_status_parse() {
        assert_eq!(ReviewStatus::parse("submitted"), ReviewStatus::Submitted);
        assert_eq!(ReviewStatus::parse("reviewed"), ReviewStatus::Reviewed);
        assert_eq!(ReviewStatus::parse("approved"), ReviewStatus::Approved);
        assert_eq!(ReviewStatus::parse("rejected"), ReviewStatus::Rejected);
        assert_eq!(
            ReviewStatus::parse("pending"),
            ReviewStatus::Unknown("pending".to_string())
        );
    }

    #[test]
    fn test_role_parse_defaults_nothing() {
        assert_eq!(Role::parse("admin"), Role::Admin);
        assert_eq!(Role::parse("participant"), Role::Participant);
        assert_eq!(Role::parse("owner"), Role::Unknown("owner".to_string()));
        assert!(Role::Admin.is_admin());
        assert!(!Role::Participant.is_admin());
        assert!(!Role::Unknown("admin ".to_string()).is_admin());
    }
}
