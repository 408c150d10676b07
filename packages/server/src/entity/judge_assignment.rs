use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "judge_assignment")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub contest_id: i32,
    #[sea_orm(belongs_to, from = "contest_id", to = "id")]
    pub contest: HasOne<super::contest::Entity>,

    pub expert_id: i32,
    #[sea_orm(belongs_to, from = "expert_id", to = "id")]
    pub expert: HasOne<super::expert::Entity>,

    /// One of: primary, secondary, reviewer.
    /// At most one primary assignment may be pending or accepted per contest.
    pub role: String,

    /// One of: pending, accepted, rejected, completed
    pub status: String,

    /// Set when the assignment is completed.
    pub score: Option<i32>,
    pub comments: Option<String>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
