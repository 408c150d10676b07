use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, ToSchema)]
pub struct CreateTeamRequest {
    pub name: String,
    pub captain_id: i32,
}

#[derive(Deserialize, ToSchema)]
pub struct AddMemberRequest {
    pub student_id: i32,
}

#[derive(Deserialize, IntoParams)]
pub struct RemoveMemberQuery {
    /// Required when removing the current captain; must name another
    /// member of the same team.
    pub new_captain_id: Option<i32>,
}

#[derive(Serialize, ToSchema)]
pub struct TeamMemberItem {
    pub student_id: i32,
    pub is_captain: bool,
    pub joined_at: DateTime<Utc>,
}

#[derive(Serialize, ToSchema)]
pub struct TeamResponse {
    pub id: i32,
    pub contest_id: i32,
    pub name: String,
    pub captain_id: i32,
    pub member_count: usize,
    pub members: Vec<TeamMemberItem>,
    pub created_at: DateTime<Utc>,
}

impl TeamResponse {
    pub fn new(
        team: crate::entity::team::Model,
        members: Vec<crate::entity::team_member::Model>,
    ) -> Self {
        let members: Vec<TeamMemberItem> = members
            .into_iter()
            .map(|m| TeamMemberItem {
                student_id: m.student_id,
                is_captain: m.student_id == team.captain_id,
                joined_at: m.joined_at,
            })
            .collect();
        Self {
            id: team.id,
            contest_id: team.contest_id,
            name: team.name,
            captain_id: team.captain_id,
            member_count: members.len(),
            members,
            created_at: team.created_at,
        }
    }
}
