//! Request lifecycle state machine
//!
//! `ASSIGNED` is entered only through assignment, never through a generic
//! transition, so the table below lists it as a target of nothing.

use crate::error::LifecycleError;
use crate::types::RequestStatus;

/// Validates a strict status transition.
pub fn validate_transition(from: RequestStatus, to: RequestStatus) -> Result<(), LifecycleError> {
    if allowed(from, to) {
        Ok(())
    } else {
        Err(LifecycleError::IllegalTransition { from, to })
    }
}

/// Statuses reachable from `from` through a generic transition.
pub fn allowed_transitions(from: RequestStatus) -> Vec<RequestStatus> {
    use RequestStatus::*;
    match from {
        Pending => vec![],
        Assigned => vec![Accepted, Rejected],
        Accepted => vec![Contacted],
        Contacted => vec![Scheduled],
        Scheduled => vec![Collected],
        Rejected => vec![],
        Collected => vec![],
    }
}

/// Whether a request in `status` may be handed to a specialist.
#[inline]
#[must_use]
pub fn can_assign(status: RequestStatus) -> bool {
    matches!(status, RequestStatus::Pending | RequestStatus::Rejected)
}

fn allowed(from: RequestStatus, to: RequestStatus) -> bool {
    allowed_transitions(from).into_iter().any(|s| s == to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use RequestStatus::*;

    #[test]
    fn happy_path_is_allowed() {
        assert!(validate_transition(Assigned, Accepted).is_ok());
        assert!(validate_transition(Accepted, Contacted).is_ok());
        assert!(validate_transition(Contacted, Scheduled).is_ok());
        assert!(validate_transition(Scheduled, Collected).is_ok());
    }

    #[test]
    fn rejection_only_from_assigned() {
        assert!(validate_transition(Assigned, Rejected).is_ok());
        assert!(validate_transition(Accepted, Rejected).is_err());
        assert!(validate_transition(Pending, Rejected).is_err());
        assert!(validate_transition(Rejected, Rejected).is_err());
    }

    #[test]
    fn assigned_is_not_a_generic_target() {
        for from in RequestStatus::ALL {
            assert!(validate_transition(from, Assigned).is_err());
        }
    }

    #[test]
    fn skipping_steps_is_illegal() {
        let err = validate_transition(Pending, Collected).unwrap_err();
        assert_eq!(
            err,
            LifecycleError::IllegalTransition {
                from: Pending,
                to: Collected
            }
        );
        assert!(validate_transition(Assigned, Scheduled).is_err());
    }

    #[test]
    fn assignable_statuses() {
        assert!(can_assign(Pending));
        assert!(can_assign(Rejected));
        assert!(!can_assign(Assigned));
        assert!(!can_assign(Collected));
    }
}
