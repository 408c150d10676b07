use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::workflow::BatchOutcome;

#[derive(Deserialize, ToSchema)]
pub struct RecordResultRequest {
    /// Exactly one of `student_id` / `team_id`.
    pub student_id: Option<i32>,
    pub team_id: Option<i32>,
    pub ranking: i32,
    /// One of: first, second, third, excellence, participation.
    pub award_level: String,
    pub certificate_number: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct ResultResponse {
    pub id: i32,
    pub contest_id: i32,
    pub student_id: Option<i32>,
    pub team_id: Option<i32>,
    pub ranking: i32,
    pub award_level: String,
    pub is_published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub certificate_number: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, ToSchema)]
pub struct BatchPublishResponse {
    pub published: usize,
    pub failed: usize,
    pub outcomes: Vec<BatchOutcome>,
}

impl From<crate::entity::contest_result::Model> for ResultResponse {
    fn from(m: crate::entity::contest_result::Model) -> Self {
        Self {
            id: m.id,
            contest_id: m.contest_id,
            student_id: m.student_id,
            team_id: m.team_id,
            ranking: m.ranking,
            award_level: m.award_level,
            is_published: m.is_published,
            published_at: m.published_at,
            certificate_number: m.certificate_number,
            created_at: m.created_at,
        }
    }
}
