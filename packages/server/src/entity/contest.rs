use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contest")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,
    pub contest_type: String,
    pub rules: String, // in Markdown

    pub first_prize: Option<String>,
    pub second_prize: Option<String>,
    pub third_prize: Option<String>,

    /// NULL for online-only contests.
    pub location: Option<String>,
    pub is_online: bool,

    pub registration_start: DateTimeUtc,
    pub registration_end: DateTimeUtc,
    pub start_date: DateTimeUtc,
    pub end_date: DateTimeUtc,

    /// Team size bounds inherited by every team in this contest.
    pub min_team_size: i32,
    pub max_team_size: i32,

    /// One of:
    /// draft, pending, approved, rejected, published, ongoing, completed, archived
    pub status: String,
    /// Set when a review rejects the contest; cleared on resubmission.
    pub rejection_reason: Option<String>,

    #[sea_orm(has_many)]
    pub registrations: HasMany<super::registration::Entity>,

    #[sea_orm(has_many)]
    pub teams: HasMany<super::team::Entity>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
