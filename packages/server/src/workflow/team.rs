//! Team composition: creation, membership, captaincy, dissolution.
//!
//! All checks run against the contest the team belongs to; membership
//! is only open to students with an approved registration there.

use chrono::Utc;
use sea_orm::prelude::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryFilter, Set,
};

use crate::entity::{team, team_member};
use crate::error::AppError;
use crate::workflow::{guard, lifecycle};

/// Look up a team by ID, returning 404 if not found.
pub async fn find_team<C: ConnectionTrait>(db: &C, id: i32) -> Result<team::Model, AppError> {
    team::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Team not found".into()))
}

/// Create a team with its captain as the first member.
///
/// The captain must be eligible (approved registration, not already on
/// a team in this contest). A fresh team may start below
/// `min_team_size`; it fills up through `add_member`.
pub async fn create_team<C: ConnectionTrait>(
    db: &C,
    contest_id: i32,
    name: &str,
    captain_id: i32,
) -> Result<team::Model, AppError> {
    let contest = lifecycle::find_contest(db, contest_id).await?;
    guard::require_contest_open(&contest)?;
    guard::check_member_eligibility(db, contest_id, captain_id).await?;

    let now = Utc::now();
    let new_team = team::ActiveModel {
        contest_id: Set(contest_id),
        name: Set(name.trim().to_string()),
        captain_id: Set(captain_id),
        created_at: Set(now),
        ..Default::default()
    };
    let model = new_team.insert(db).await?;

    let captain_row = team_member::ActiveModel {
        team_id: Set(model.id),
        student_id: Set(captain_id),
        joined_at: Set(now),
    };
    captain_row.insert(db).await?;

    Ok(model)
}

/// Add a student to a team, enforcing capacity and eligibility.
pub async fn add_member<C: ConnectionTrait>(
    db: &C,
    team_id: i32,
    student_id: i32,
) -> Result<team_member::Model, AppError> {
    let team_model = find_team(db, team_id).await?;
    let contest = lifecycle::find_contest(db, team_model.contest_id).await?;
    guard::require_contest_open(&contest)?;
    guard::check_capacity(db, team_id, contest.max_team_size).await?;
    guard::check_member_eligibility(db, team_model.contest_id, student_id).await?;

    let row = team_member::ActiveModel {
        team_id: Set(team_id),
        student_id: Set(student_id),
        joined_at: Set(Utc::now()),
    };
    // A concurrent add of the same student trips the composite primary key.
    row.insert(db).await.map_err(|e| {
        if matches!(e.sql_err(), Some(sea_orm::SqlErr::UniqueConstraintViolation(_))) {
            AppError::IneligibleMember(format!(
                "Student {student_id} is already a member of team {team_id}"
            ))
        } else {
            e.into()
        }
    })
}

/// Remove a member from a team.
///
/// Removing the captain requires `new_captain_id`, which must be
/// another current member; otherwise the call is refused with
/// `CAPTAIN_REQUIRED`. A removal that would drop the team below
/// `min_team_size` is refused with `CAPACITY_EXCEEDED`; such teams can
/// only grow or be disbanded.
pub async fn remove_member<C: ConnectionTrait>(
    db: &C,
    team_id: i32,
    student_id: i32,
    new_captain_id: Option<i32>,
) -> Result<(), AppError> {
    let team_model = find_team(db, team_id).await?;
    let contest = lifecycle::find_contest(db, team_model.contest_id).await?;
    guard::require_contest_open(&contest)?;

    let member = team_member::Entity::find_by_id((team_id, student_id))
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Not a member of this team".into()))?;

    let count = guard::member_count(db, team_id).await?;
    if count <= contest.min_team_size as u64 {
        return Err(AppError::CapacityExceeded(format!(
            "Team {} cannot drop below {} members; disband it instead",
            team_id, contest.min_team_size
        )));
    }

    if student_id == team_model.captain_id {
        let new_captain_id = new_captain_id.ok_or(AppError::CaptainRequired)?;
        if new_captain_id == student_id {
            return Err(AppError::CaptainRequired);
        }
        team_member::Entity::find_by_id((team_id, new_captain_id))
            .one(db)
            .await?
            .ok_or_else(|| {
                AppError::IneligibleMember(format!(
                    "Student {new_captain_id} is not a member of team {team_id}"
                ))
            })?;

        team::Entity::update_many()
            .filter(team::Column::Id.eq(team_id))
            .col_expr(team::Column::CaptainId, Expr::value(new_captain_id))
            .exec(db)
            .await?;
        tracing::info!(team_id, new_captain_id, "Team captain reassigned");
    }

    member.delete(db).await?;
    Ok(())
}

/// Hard-delete the team and its membership rows. The members'
/// registrations are untouched.
pub async fn disband<C: ConnectionTrait>(db: &C, team_id: i32) -> Result<(), AppError> {
    let team_model = find_team(db, team_id).await?;

    team_member::Entity::delete_many()
        .filter(team_member::Column::TeamId.eq(team_id))
        .exec(db)
        .await?;
    team_model.delete(db).await?;

    tracing::info!(team_id, "Team disbanded");
    Ok(())
}
