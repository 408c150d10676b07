use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::AppError;
use crate::workflow::BatchOutcome;

#[derive(Deserialize, ToSchema)]
pub struct CreateRegistrationRequest {
    pub student_id: i32,
    /// Role the student applies for within a future team.
    pub team_role: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct ApproveRegistrationRequest {
    /// Name of the administrator making the decision.
    pub reviewer: String,
}

#[derive(Deserialize, ToSchema)]
pub struct RejectRegistrationRequest {
    pub reviewer: String,
    pub reason: String,
}

#[derive(Deserialize, IntoParams)]
pub struct RegistrationListQuery {
    /// Filter by status: pending, approved or rejected.
    pub status: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct BatchApproveRequest {
    pub registration_ids: Vec<i32>,
    pub reviewer: String,
}

#[derive(Serialize, ToSchema)]
pub struct RegistrationResponse {
    pub id: i32,
    pub contest_id: i32,
    pub student_id: i32,
    pub team_role: Option<String>,
    pub status: String,
    pub rejection_reason: Option<String>,
    pub reviewed_by: Option<String>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, ToSchema)]
pub struct BatchApproveResponse {
    pub approved: usize,
    pub failed: usize,
    pub outcomes: Vec<BatchOutcome>,
}

impl From<crate::entity::registration::Model> for RegistrationResponse {
    fn from(m: crate::entity::registration::Model) -> Self {
        Self {
            id: m.id,
            contest_id: m.contest_id,
            student_id: m.student_id,
            team_role: m.team_role,
            status: m.status,
            rejection_reason: m.rejection_reason,
            reviewed_by: m.reviewed_by,
            reviewed_at: m.reviewed_at,
            created_at: m.created_at,
        }
    }
}

pub fn validate_reviewer(reviewer: &str) -> Result<(), AppError> {
    if reviewer.trim().is_empty() {
        return Err(AppError::Validation("reviewer must not be empty".into()));
    }
    Ok(())
}
