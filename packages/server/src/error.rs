use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::Serialize;

/// Structured error response returned by all endpoints on failure.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code. One of: `VALIDATION_ERROR`,
    /// `SCHEDULE_INVALID`, `NOT_FOUND`, `INVALID_STATE`, `CONFLICT`,
    /// `DUPLICATE_REGISTRATION`, `CAPACITY_EXCEEDED`, `INELIGIBLE_MEMBER`,
    /// `CAPTAIN_REQUIRED`, `CONTEST_CLOSED`, `INTERNAL_ERROR`.
    #[schema(example = "INVALID_STATE")]
    pub code: &'static str,
    /// Human-readable error description.
    #[schema(example = "Contest is not in draft")]
    pub message: String,
}

/// Application-level error type.
///
/// Every refused transition is a normal return value carrying one of
/// these kinds; nothing here is fatal to the process.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    /// Contest dates are out of order.
    #[error("{0}")]
    ScheduleInvalid(String),
    #[error("{0}")]
    NotFound(String),
    /// A state transition was attempted from a state that does not permit it.
    #[error("{0}")]
    InvalidState(String),
    /// Duplicate primary judge assignment.
    #[error("{0}")]
    Conflict(String),
    /// The student already holds an active registration for the contest.
    #[error("Student already has an active registration for this contest")]
    DuplicateRegistration,
    /// Team size bounds would be violated.
    #[error("{0}")]
    CapacityExceeded(String),
    /// The student is not eligible to join the team.
    #[error("{0}")]
    IneligibleMember(String),
    /// Removing the captain requires naming a replacement.
    #[error("Removing the captain requires a new captain or disbanding the team")]
    CaptainRequired,
    /// The contest no longer accepts this dependent-entity mutation.
    #[error("{0}")]
    ContestClosed(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "VALIDATION_ERROR",
                    message: msg,
                },
            ),
            AppError::ScheduleInvalid(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "SCHEDULE_INVALID",
                    message: msg,
                },
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    code: "NOT_FOUND",
                    message: msg,
                },
            ),
            AppError::InvalidState(msg) => (
                StatusCode::CONFLICT,
                ErrorBody {
                    code: "INVALID_STATE",
                    message: msg,
                },
            ),
            AppError::Conflict(msg) => (
                StatusCode::CONFLICT,
                ErrorBody {
                    code: "CONFLICT",
                    message: msg,
                },
            ),
            AppError::DuplicateRegistration => (
                StatusCode::CONFLICT,
                ErrorBody {
                    code: "DUPLICATE_REGISTRATION",
                    message: "Student already has an active registration for this contest".into(),
                },
            ),
            AppError::CapacityExceeded(msg) => (
                StatusCode::CONFLICT,
                ErrorBody {
                    code: "CAPACITY_EXCEEDED",
                    message: msg,
                },
            ),
            AppError::IneligibleMember(msg) => (
                StatusCode::CONFLICT,
                ErrorBody {
                    code: "INELIGIBLE_MEMBER",
                    message: msg,
                },
            ),
            AppError::CaptainRequired => (
                StatusCode::CONFLICT,
                ErrorBody {
                    code: "CAPTAIN_REQUIRED",
                    message: "Removing the captain requires a new captain or disbanding the team"
                        .into(),
                },
            ),
            AppError::ContestClosed(msg) => (
                StatusCode::CONFLICT,
                ErrorBody {
                    code: "CONTEST_CLOSED",
                    message: msg,
                },
            ),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        code: "INTERNAL_ERROR",
                        message: "An unexpected error occurred".into(),
                    },
                )
            }
        }
    }

    /// The machine-readable code, without consuming the error.
    /// Used by batch endpoints to report per-item outcomes.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::ScheduleInvalid(_) => "SCHEDULE_INVALID",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::InvalidState(_) => "INVALID_STATE",
            AppError::Conflict(_) => "CONFLICT",
            AppError::DuplicateRegistration => "DUPLICATE_REGISTRATION",
            AppError::CapacityExceeded(_) => "CAPACITY_EXCEEDED",
            AppError::IneligibleMember(_) => "INELIGIBLE_MEMBER",
            AppError::CaptainRequired => "CAPTAIN_REQUIRED",
            AppError::ContestClosed(_) => "CONTEST_CLOSED",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Human-readable message for per-item batch reporting. Internal
    /// details never leave the process.
    pub fn message(&self) -> String {
        match self {
            AppError::Internal(_) => "An unexpected error occurred".into(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Internal(err.to_string())
    }
}
