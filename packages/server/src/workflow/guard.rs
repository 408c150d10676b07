//! Consistency guard: read-only cross-entity checks run before a
//! transition commits. Every check reads from the caller's connection
//! (usually an open transaction) and never writes.

use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect};

use crate::entity::{contest, judge_assignment, registration, team, team_member};
use crate::error::AppError;
use crate::workflow::status::{AssignmentStatus, ContestStatus, JudgeRole, RegistrationStatus};

/// Validate the contest schedule ordering:
/// `registration_start <= registration_end <= start_date <= end_date`.
pub fn validate_schedule(
    registration_start: DateTime<Utc>,
    registration_end: DateTime<Utc>,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
) -> Result<(), AppError> {
    if registration_end < registration_start {
        return Err(AppError::ScheduleInvalid(
            "registration_end must not be before registration_start".into(),
        ));
    }
    if start_date < registration_end {
        return Err(AppError::ScheduleInvalid(
            "start_date must not be before registration_end".into(),
        ));
    }
    if end_date < start_date {
        return Err(AppError::ScheduleInvalid(
            "end_date must not be before start_date".into(),
        ));
    }
    Ok(())
}

/// Validate the team size bounds carried by a contest.
pub fn validate_team_bounds(min: i32, max: i32) -> Result<(), AppError> {
    if min < 1 {
        return Err(AppError::Validation("min_team_size must be >= 1".into()));
    }
    if max < min {
        return Err(AppError::Validation(
            "max_team_size must be >= min_team_size".into(),
        ));
    }
    Ok(())
}

/// Refuse dependent-entity mutations once the contest is archived.
pub fn require_contest_open(contest: &contest::Model) -> Result<ContestStatus, AppError> {
    let status = ContestStatus::parse(&contest.status)?;
    if status == ContestStatus::Archived {
        return Err(AppError::ContestClosed(format!(
            "Contest {} is archived",
            contest.id
        )));
    }
    Ok(status)
}

/// Check that the contest currently accepts new registrations: it must
/// be published and `now` must fall inside the registration window.
pub fn require_registration_open(
    contest: &contest::Model,
    now: DateTime<Utc>,
) -> Result<(), AppError> {
    let status = ContestStatus::parse(&contest.status)?;
    if status != ContestStatus::Published {
        return Err(AppError::ContestClosed(format!(
            "Contest {} is not accepting registrations (status: {})",
            contest.id, contest.status
        )));
    }
    if now < contest.registration_start || now > contest.registration_end {
        return Err(AppError::ContestClosed(format!(
            "Registration window for contest {} is closed",
            contest.id
        )));
    }
    Ok(())
}

/// A student may hold at most one active (pending or approved)
/// registration per contest.
pub async fn check_duplicate_registration<C: ConnectionTrait>(
    db: &C,
    contest_id: i32,
    student_id: i32,
) -> Result<(), AppError> {
    let active = registration::Entity::find()
        .filter(registration::Column::ContestId.eq(contest_id))
        .filter(registration::Column::StudentId.eq(student_id))
        .filter(registration::Column::Status.is_in([
            RegistrationStatus::Pending.as_str(),
            RegistrationStatus::Approved.as_str(),
        ]))
        .one(db)
        .await?;
    if active.is_some() {
        return Err(AppError::DuplicateRegistration);
    }
    Ok(())
}

/// At most one primary judge assignment may be active (pending or
/// accepted) per contest.
pub async fn check_primary_conflict<C: ConnectionTrait>(
    db: &C,
    contest_id: i32,
) -> Result<(), AppError> {
    let active = judge_assignment::Entity::find()
        .filter(judge_assignment::Column::ContestId.eq(contest_id))
        .filter(judge_assignment::Column::Role.eq(JudgeRole::Primary.as_str()))
        .filter(judge_assignment::Column::Status.is_in([
            AssignmentStatus::Pending.as_str(),
            AssignmentStatus::Accepted.as_str(),
        ]))
        .one(db)
        .await?;
    if active.is_some() {
        return Err(AppError::Conflict(format!(
            "Contest {contest_id} already has an active primary judge"
        )));
    }
    Ok(())
}

/// Current number of members in a team.
pub async fn member_count<C: ConnectionTrait>(db: &C, team_id: i32) -> Result<u64, AppError> {
    let count = team_member::Entity::find()
        .filter(team_member::Column::TeamId.eq(team_id))
        .count(db)
        .await?;
    Ok(count)
}

/// Refuse an `add_member` that would exceed the contest's maximum team
/// size.
pub async fn check_capacity<C: ConnectionTrait>(
    db: &C,
    team_id: i32,
    max_team_size: i32,
) -> Result<(), AppError> {
    let count = member_count(db, team_id).await?;
    if count >= max_team_size as u64 {
        return Err(AppError::CapacityExceeded(format!(
            "Team {team_id} is full ({max_team_size} members)"
        )));
    }
    Ok(())
}

/// A student joining a team needs an approved registration for the
/// team's contest and must not already belong to a team in it.
pub async fn check_member_eligibility<C: ConnectionTrait>(
    db: &C,
    contest_id: i32,
    student_id: i32,
) -> Result<(), AppError> {
    let approved = registration::Entity::find()
        .filter(registration::Column::ContestId.eq(contest_id))
        .filter(registration::Column::StudentId.eq(student_id))
        .filter(registration::Column::Status.eq(RegistrationStatus::Approved.as_str()))
        .one(db)
        .await?;
    if approved.is_none() {
        return Err(AppError::IneligibleMember(format!(
            "Student {student_id} has no approved registration for contest {contest_id}"
        )));
    }

    let team_ids: Vec<i32> = team::Entity::find()
        .filter(team::Column::ContestId.eq(contest_id))
        .select_only()
        .column(team::Column::Id)
        .into_tuple()
        .all(db)
        .await?;
    if team_ids.is_empty() {
        return Ok(());
    }

    let already = team_member::Entity::find()
        .filter(team_member::Column::TeamId.is_in(team_ids))
        .filter(team_member::Column::StudentId.eq(student_id))
        .one(db)
        .await?;
    if already.is_some() {
        return Err(AppError::IneligibleMember(format!(
            "Student {student_id} already belongs to a team in contest {contest_id}"
        )));
    }
    Ok(())
}
