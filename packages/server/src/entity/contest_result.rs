use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contest_result")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub contest_id: i32,
    #[sea_orm(belongs_to, from = "contest_id", to = "id")]
    pub contest: HasOne<super::contest::Entity>,

    /// Exactly one of `student_id` / `team_id` is set.
    pub student_id: Option<i32>,
    #[sea_orm(belongs_to, from = "student_id", to = "id")]
    pub student: BelongsTo<Option<super::student::Entity>>,

    pub team_id: Option<i32>,
    #[sea_orm(belongs_to, from = "team_id", to = "id")]
    pub team: BelongsTo<Option<super::team::Entity>>,

    /// 1-based placement. Uniqueness per award tier is a convention,
    /// not enforced.
    pub ranking: i32,
    /// One of: first, second, third, excellence, participation
    pub award_level: String,

    /// Monotonic: once true it never reverts.
    pub is_published: bool,
    pub published_at: Option<DateTimeUtc>,
    pub certificate_number: Option<String>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
