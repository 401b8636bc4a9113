use serde::Serialize;
use utoipa::ToSchema;

use crate::services::lifecycle::{Eligibility, ReasonCode};

/// Wire form of an eligibility verdict. Ineligibility is a normal answer,
/// not an error, so it travels in a 200 body with a machine-readable reason
/// and its canonical message.
#[derive(Debug, Serialize, ToSchema)]
pub struct EligibilityResponse {
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<ReasonCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<Eligibility> for EligibilityResponse {
    fn from(eligibility: Eligibility) -> Self {
        let message = eligibility.reason.map(|r| r.message().to_string());
        Self {
            allowed: eligibility.allowed,
            reason: eligibility.reason,
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_granted_verdict_has_no_reason() {
        let response = EligibilityResponse::from(Eligibility::granted());
        assert!(response.allowed);
        assert!(response.reason.is_none());
        assert!(response.message.is_none());
    }

    #[test]
    fn test_denied_verdict_carries_reason_and_message() {
        let response = EligibilityResponse::from(Eligibility::denied(ReasonCode::DeadlinePassed));
        assert!(!response.allowed);
        assert_eq!(response.reason, Some(ReasonCode::DeadlinePassed));
        assert_eq!(
            response.message.as_deref(),
            Some(ReasonCode::DeadlinePassed.message())
        );
    }
}
