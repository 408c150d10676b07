//! Closed status types for every entity with a state machine.
//!
//! Statuses are stored as strings in the database (one word, lowercase)
//! and parsed into these enums at the workflow boundary, so transition
//! logic never touches raw strings.

use crate::error::AppError;

/// Contest lifecycle states.
///
/// ```text
/// draft -> pending -> approved -> published -> ongoing -> completed -> archived
///             |
///             v
///          rejected -> draft   (resubmission)
/// ```
///
/// `archived` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContestStatus {
    Draft,
    Pending,
    Approved,
    Rejected,
    Published,
    Ongoing,
    Completed,
    Archived,
}

impl ContestStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ContestStatus::Draft => "draft",
            ContestStatus::Pending => "pending",
            ContestStatus::Approved => "approved",
            ContestStatus::Rejected => "rejected",
            ContestStatus::Published => "published",
            ContestStatus::Ongoing => "ongoing",
            ContestStatus::Completed => "completed",
            ContestStatus::Archived => "archived",
        }
    }

    pub fn parse(s: &str) -> Result<Self, AppError> {
        match s {
            "draft" => Ok(ContestStatus::Draft),
            "pending" => Ok(ContestStatus::Pending),
            "approved" => Ok(ContestStatus::Approved),
            "rejected" => Ok(ContestStatus::Rejected),
            "published" => Ok(ContestStatus::Published),
            "ongoing" => Ok(ContestStatus::Ongoing),
            "completed" => Ok(ContestStatus::Completed),
            "archived" => Ok(ContestStatus::Archived),
            other => Err(AppError::Internal(format!(
                "Unknown contest status '{other}' in store"
            ))),
        }
    }

    /// Whether `self -> to` is an edge of the lifecycle graph.
    pub fn can_advance_to(self, to: ContestStatus) -> bool {
        use ContestStatus::*;
        matches!(
            (self, to),
            (Draft, Pending)
                | (Pending, Approved)
                | (Pending, Rejected)
                | (Rejected, Draft)
                | (Approved, Published)
                | (Published, Ongoing)
                | (Ongoing, Completed)
                | (Completed, Archived)
        )
    }

    /// States in which the contest record itself may still be edited.
    pub fn is_editable(self) -> bool {
        matches!(self, ContestStatus::Draft | ContestStatus::Rejected)
    }
}

/// Registration review states. Both decisions are terminal; re-applying
/// means a new registration record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationStatus {
    Pending,
    Approved,
    Rejected,
}

impl RegistrationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RegistrationStatus::Pending => "pending",
            RegistrationStatus::Approved => "approved",
            RegistrationStatus::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> Result<Self, AppError> {
        match s {
            "pending" => Ok(RegistrationStatus::Pending),
            "approved" => Ok(RegistrationStatus::Approved),
            "rejected" => Ok(RegistrationStatus::Rejected),
            other => Err(AppError::Internal(format!(
                "Unknown registration status '{other}' in store"
            ))),
        }
    }
}

/// Judge assignment states: pending -> accepted -> completed, or
/// pending -> rejected (terminal).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentStatus {
    Pending,
    Accepted,
    Rejected,
    Completed,
}

impl AssignmentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AssignmentStatus::Pending => "pending",
            AssignmentStatus::Accepted => "accepted",
            AssignmentStatus::Rejected => "rejected",
            AssignmentStatus::Completed => "completed",
        }
    }

    pub fn parse(s: &str) -> Result<Self, AppError> {
        match s {
            "pending" => Ok(AssignmentStatus::Pending),
            "accepted" => Ok(AssignmentStatus::Accepted),
            "rejected" => Ok(AssignmentStatus::Rejected),
            "completed" => Ok(AssignmentStatus::Completed),
            other => Err(AppError::Internal(format!(
                "Unknown assignment status '{other}' in store"
            ))),
        }
    }
}

/// Judge roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JudgeRole {
    Primary,
    Secondary,
    Reviewer,
}

impl JudgeRole {
    pub fn as_str(self) -> &'static str {
        match self {
            JudgeRole::Primary => "primary",
            JudgeRole::Secondary => "secondary",
            JudgeRole::Reviewer => "reviewer",
        }
    }

    /// Parse from request input; unknown values are a validation error.
    pub fn parse(s: &str) -> Result<Self, AppError> {
        match s {
            "primary" => Ok(JudgeRole::Primary),
            "secondary" => Ok(JudgeRole::Secondary),
            "reviewer" => Ok(JudgeRole::Reviewer),
            _ => Err(AppError::Validation(
                "role must be one of: primary, secondary, reviewer".into(),
            )),
        }
    }
}

/// Award levels for contest results.
pub const AWARD_LEVELS: &[&str] = &["first", "second", "third", "excellence", "participation"];
