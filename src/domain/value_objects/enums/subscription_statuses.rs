use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::domain::errors::{EngineError, EngineResult};

/// Lifecycle state of a user subscription.
///
/// `Cancelled` is terminal. `Suspended` is a reversible hold on an active
/// subscription.
#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    #[default]
    Active,
    Cancelled,
    Suspended,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Cancelled => "cancelled",
            SubscriptionStatus::Suspended => "suspended",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "active" => Some(SubscriptionStatus::Active),
            "cancelled" => Some(SubscriptionStatus::Cancelled),
            "suspended" => Some(SubscriptionStatus::Suspended),
            _ => None,
        }
    }

    pub fn parse(value: &str) -> EngineResult<Self> {
        Self::from_str(value)
            .ok_or_else(|| EngineError::validation(format!("unknown subscription status: {value}")))
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, SubscriptionStatus::Cancelled)
    }

    pub fn can_transition_to(&self, target: SubscriptionStatus) -> bool {
        use SubscriptionStatus::*;
        matches!(
            (self, target),
            (Active, Suspended) | (Suspended, Active) | (Active, Cancelled) | (Suspended, Cancelled)
        )
    }

    pub fn transition_to(self, target: SubscriptionStatus) -> EngineResult<SubscriptionStatus> {
        if self.can_transition_to(target) {
            Ok(target)
        } else {
            Err(EngineError::InvalidTransition {
                from: self,
                to: target,
            })
        }
    }
}

impl Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [SubscriptionStatus; 3] = [
        SubscriptionStatus::Active,
        SubscriptionStatus::Cancelled,
        SubscriptionStatus::Suspended,
    ];

    #[test]
    fn active_can_be_suspended_and_resumed() {
        let suspended = SubscriptionStatus::Active
            .transition_to(SubscriptionStatus::Suspended)
            .unwrap();
        assert_eq!(suspended, SubscriptionStatus::Suspended);

        let resumed = suspended.transition_to(SubscriptionStatus::Active).unwrap();
        assert_eq!(resumed, SubscriptionStatus::Active);
    }

    #[test]
    fn active_and_suspended_can_be_cancelled() {
        assert!(SubscriptionStatus::Active.can_transition_to(SubscriptionStatus::Cancelled));
        assert!(SubscriptionStatus::Suspended.can_transition_to(SubscriptionStatus::Cancelled));
    }

    #[test]
    fn cancelled_never_leaves_cancelled() {
        for target in ALL {
            let result = SubscriptionStatus::Cancelled.transition_to(target);
            assert!(
                matches!(
                    result,
                    Err(EngineError::InvalidTransition {
                        from: SubscriptionStatus::Cancelled,
                        ..
                    })
                ),
                "cancelled -> {target} must be rejected"
            );
        }
    }

    #[test]
    fn same_state_transitions_are_rejected() {
        for status in ALL {
            assert!(!status.can_transition_to(status), "{status} -> {status}");
        }
    }

    #[test]
    fn parse_accepts_known_values_case_insensitively() {
        assert_eq!(
            SubscriptionStatus::parse(" Suspended ").unwrap(),
            SubscriptionStatus::Suspended
        );
        assert_eq!(
            SubscriptionStatus::parse("cancelled").unwrap(),
            SubscriptionStatus::Cancelled
        );
    }

    #[test]
    fn parse_rejects_unknown_values() {
        assert!(matches!(
            SubscriptionStatus::parse("expired"),
            Err(EngineError::Validation(_))
        ));
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&SubscriptionStatus::Cancelled).unwrap();
        assert_eq!(json, "\"cancelled\"");
    }
}
