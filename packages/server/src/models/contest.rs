use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::shared::{Pagination, validate_name};
use crate::error::AppError;
use crate::workflow::guard;

#[derive(Deserialize, ToSchema)]
pub struct CreateContestRequest {
    pub name: String,
    /// Free-form category, e.g. "subject", "innovation", "technology".
    pub contest_type: String,
    /// Contest rules in Markdown.
    pub rules: String,
    pub first_prize: Option<String>,
    pub second_prize: Option<String>,
    pub third_prize: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub is_online: bool,
    pub registration_start: DateTime<Utc>,
    pub registration_end: DateTime<Utc>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub min_team_size: i32,
    pub max_team_size: i32,
}

#[derive(Deserialize, Default, PartialEq, ToSchema)]
pub struct UpdateContestRequest {
    pub name: Option<String>,
    pub contest_type: Option<String>,
    pub rules: Option<String>,
    pub first_prize: Option<String>,
    pub second_prize: Option<String>,
    pub third_prize: Option<String>,
    pub location: Option<String>,
    pub is_online: Option<bool>,
    pub registration_start: Option<DateTime<Utc>>,
    pub registration_end: Option<DateTime<Utc>>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub min_team_size: Option<i32>,
    pub max_team_size: Option<i32>,
}

#[derive(Deserialize, ToSchema)]
pub struct ReviewContestRequest {
    /// Either "approve" or "reject".
    pub decision: String,
    /// Required (non-blank) when rejecting.
    pub note: Option<String>,
}

#[derive(Deserialize, IntoParams)]
pub struct ContestListQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    /// Case-insensitive substring match on the contest name.
    pub search: Option<String>,
    /// Filter to a single lifecycle status.
    pub status: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

// ---------------------------------------------------------------------------
// Response DTOs
// ---------------------------------------------------------------------------

#[derive(Serialize, ToSchema)]
pub struct ContestResponse {
    pub id: i32,
    pub name: String,
    pub contest_type: String,
    pub rules: String,
    pub first_prize: Option<String>,
    pub second_prize: Option<String>,
    pub third_prize: Option<String>,
    pub location: Option<String>,
    pub is_online: bool,
    pub registration_start: DateTime<Utc>,
    pub registration_end: DateTime<Utc>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub min_team_size: i32,
    pub max_team_size: i32,
    pub status: String,
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, ToSchema)]
pub struct ContestListItem {
    pub id: i32,
    pub name: String,
    pub contest_type: String,
    pub status: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, ToSchema)]
pub struct ContestListResponse {
    pub data: Vec<ContestListItem>,
    pub pagination: Pagination,
}

/// Dashboard counts for one contest.
#[derive(Serialize, ToSchema)]
pub struct ContestSummaryResponse {
    pub id: i32,
    pub status: String,
    pub registrations_pending: u64,
    pub registrations_approved: u64,
    pub registrations_rejected: u64,
    pub teams: u64,
    pub judges_active: u64,
    pub results_published: u64,
    pub results_unpublished: u64,
}

impl From<crate::entity::contest::Model> for ContestResponse {
    fn from(m: crate::entity::contest::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            contest_type: m.contest_type,
            rules: m.rules,
            first_prize: m.first_prize,
            second_prize: m.second_prize,
            third_prize: m.third_prize,
            location: m.location,
            is_online: m.is_online,
            registration_start: m.registration_start,
            registration_end: m.registration_end,
            start_date: m.start_date,
            end_date: m.end_date,
            min_team_size: m.min_team_size,
            max_team_size: m.max_team_size,
            status: m.status,
            rejection_reason: m.rejection_reason,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

impl From<crate::entity::contest::Model> for ContestListItem {
    fn from(m: crate::entity::contest::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            contest_type: m.contest_type,
            status: m.status,
            start_date: m.start_date,
            end_date: m.end_date,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

pub fn validate_create_contest(req: &CreateContestRequest) -> Result<(), AppError> {
    validate_name(&req.name, "name")?;
    if req.contest_type.trim().is_empty() {
        return Err(AppError::Validation("contest_type must not be empty".into()));
    }
    if req.rules.trim().is_empty() || req.rules.len() > 1_000_000 {
        return Err(AppError::Validation(
            "Rules must be non-empty and at most 1MB".into(),
        ));
    }
    if !req.is_online && req.location.as_deref().map(str::trim).unwrap_or("").is_empty() {
        return Err(AppError::Validation(
            "An on-site contest needs a location".into(),
        ));
    }
    guard::validate_team_bounds(req.min_team_size, req.max_team_size)?;
    guard::validate_schedule(
        req.registration_start,
        req.registration_end,
        req.start_date,
        req.end_date,
    )
}

pub fn validate_update_contest(req: &UpdateContestRequest) -> Result<(), AppError> {
    if let Some(ref name) = req.name {
        validate_name(name, "name")?;
    }
    if let Some(ref contest_type) = req.contest_type
        && contest_type.trim().is_empty()
    {
        return Err(AppError::Validation("contest_type must not be empty".into()));
    }
    if let Some(ref rules) = req.rules
        && (rules.trim().is_empty() || rules.len() > 1_000_000)
    {
        return Err(AppError::Validation(
            "Rules must be non-empty and at most 1MB".into(),
        ));
    }
    Ok(())
}
