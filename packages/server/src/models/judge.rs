use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct AssignJudgeRequest {
    pub expert_id: i32,
    /// One of: primary, secondary, reviewer.
    pub role: String,
}

#[derive(Deserialize, ToSchema)]
pub struct JudgeDecisionRequest {
    /// `true` accepts the assignment, `false` declines it.
    pub accept: bool,
}

#[derive(Deserialize, ToSchema)]
pub struct CompleteAssignmentRequest {
    /// 0-100.
    pub score: i32,
    pub comments: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct JudgeAssignmentResponse {
    pub id: i32,
    pub contest_id: i32,
    pub expert_id: i32,
    pub role: String,
    pub status: String,
    pub score: Option<i32>,
    pub comments: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<crate::entity::judge_assignment::Model> for JudgeAssignmentResponse {
    fn from(m: crate::entity::judge_assignment::Model) -> Self {
        Self {
            id: m.id,
            contest_id: m.contest_id,
            expert_id: m.expert_id,
            role: m.role,
            status: m.status,
            score: m.score,
            comments: m.comments,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
