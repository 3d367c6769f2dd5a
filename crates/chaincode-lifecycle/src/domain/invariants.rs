//! # Domain Invariants
//!
//! Sequence rules for approvals and commits.
//!
//! | Rule | Enforcement |
//! |------|-------------|
//! | Sequence 0 is never approvable | `check_approval_sequence` |
//! | Approvals target the committed or the next sequence only | `check_approval_sequence` |
//! | Commits advance the public sequence by exactly 1 | `check_commit_sequence` |

use crate::errors::LifecycleError;

/// What an accepted approval refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalKind {
    /// The already committed sequence; parameters must match the committed
    /// definition exactly.
    Reapproval,
    /// The next, not yet committed sequence.
    NextSequence,
}

/// Classify an approval at `requested` given the public `current` sequence.
pub fn check_approval_sequence(current: i64, requested: i64) -> Result<ApprovalKind, LifecycleError> {
    if current == 0 && requested == 0 {
        return Err(LifecycleError::ZeroSequence);
    }

    if requested < current {
        return Err(LifecycleError::SequenceSuperseded { current, requested });
    }

    let next = current.saturating_add(1);
    if requested > next {
        return Err(LifecycleError::SequenceTooHigh { requested, next });
    }

    if requested == current {
        Ok(ApprovalKind::Reapproval)
    } else {
        Ok(ApprovalKind::NextSequence)
    }
}

/// A commit must be for exactly `current + 1`.
pub fn check_commit_sequence(current: i64, requested: i64) -> Result<(), LifecycleError> {
    let expected = current
        .checked_add(1)
        .ok_or(LifecycleError::SequenceOverflow { current })?;

    if requested != expected {
        return Err(LifecycleError::CommitSequenceMismatch {
            requested,
            expected,
        });
    }

    Ok(())
}
