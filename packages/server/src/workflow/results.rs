//! Result recording and publication. Publication is monotonic: once a
//! result is out, it stays out, and re-publishing is a quiet no-op.

use chrono::Utc;
use sea_orm::prelude::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QuerySelect, Set,
};

use crate::entity::{contest_result, student, team};
use crate::error::AppError;
use crate::workflow::status::AWARD_LEVELS;
use crate::workflow::{BatchOutcome, guard, lifecycle};

/// Look up a result by ID, returning 404 if not found.
pub async fn find_result<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<contest_result::Model, AppError> {
    contest_result::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Result not found".into()))
}

/// Record an unpublished result for a student or a team.
pub async fn record<C: ConnectionTrait>(
    db: &C,
    contest_id: i32,
    student_id: Option<i32>,
    team_id: Option<i32>,
    ranking: i32,
    award_level: &str,
    certificate_number: Option<String>,
) -> Result<contest_result::Model, AppError> {
    if student_id.is_some() == team_id.is_some() {
        return Err(AppError::Validation(
            "Exactly one of student_id or team_id is required".into(),
        ));
    }
    if ranking < 1 {
        return Err(AppError::Validation("ranking must be >= 1".into()));
    }
    if !AWARD_LEVELS.contains(&award_level) {
        return Err(AppError::Validation(format!(
            "award_level must be one of: {}",
            AWARD_LEVELS.join(", ")
        )));
    }

    let contest = lifecycle::find_contest(db, contest_id).await?;
    guard::require_contest_open(&contest)?;

    if let Some(student_id) = student_id {
        student::Entity::find_by_id(student_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Student not found".into()))?;
    }
    if let Some(team_id) = team_id {
        let team_model = team::Entity::find_by_id(team_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Team not found".into()))?;
        if team_model.contest_id != contest_id {
            return Err(AppError::Validation(format!(
                "Team {team_id} does not belong to contest {contest_id}"
            )));
        }
    }

    let new_result = contest_result::ActiveModel {
        contest_id: Set(contest_id),
        student_id: Set(student_id),
        team_id: Set(team_id),
        ranking: Set(ranking),
        award_level: Set(award_level.to_string()),
        is_published: Set(false),
        certificate_number: Set(certificate_number),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    Ok(new_result.insert(db).await?)
}

/// Publish a result.
///
/// Idempotent: publishing an already-published result succeeds without
/// touching `published_at`. The flag never reverts.
pub async fn publish<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<contest_result::Model, AppError> {
    let existing = find_result(db, id).await?;
    if existing.is_published {
        return Ok(existing);
    }

    // CAS on the flag; a concurrent publish winning first is fine, the
    // outcome is identical either way.
    contest_result::Entity::update_many()
        .filter(contest_result::Column::Id.eq(id))
        .filter(contest_result::Column::IsPublished.eq(false))
        .col_expr(contest_result::Column::IsPublished, Expr::value(true))
        .col_expr(
            contest_result::Column::PublishedAt,
            Expr::value(Some(Utc::now())),
        )
        .exec(db)
        .await?;

    find_result(db, id).await
}

/// Publish every unpublished result of a contest, best-effort per item.
/// Returns the per-item report; the published count is derived by the
/// handler.
pub async fn batch_publish<C: ConnectionTrait>(
    db: &C,
    contest_id: i32,
) -> Result<Vec<BatchOutcome>, AppError> {
    lifecycle::find_contest(db, contest_id).await?;

    let pending_ids: Vec<i32> = contest_result::Entity::find()
        .filter(contest_result::Column::ContestId.eq(contest_id))
        .filter(contest_result::Column::IsPublished.eq(false))
        .select_only()
        .column(contest_result::Column::Id)
        .into_tuple()
        .all(db)
        .await?;

    let mut outcomes = Vec::with_capacity(pending_ids.len());
    for id in pending_ids {
        match publish(db, id).await {
            Ok(_) => outcomes.push(BatchOutcome::ok(id)),
            Err(AppError::Internal(detail)) => return Err(AppError::Internal(detail)),
            Err(err) => outcomes.push(BatchOutcome::failed(id, &err)),
        }
    }
    tracing::info!(
        contest_id,
        published = outcomes.iter().filter(|o| o.ok).count(),
        "Batch publish finished"
    );
    Ok(outcomes)
}
