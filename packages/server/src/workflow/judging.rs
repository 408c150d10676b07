//! Judge assignment workflow: pending -> accepted -> completed, with
//! pending -> rejected as the terminal refusal branch.

use chrono::Utc;
use sea_orm::prelude::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};

use crate::entity::{expert, judge_assignment};
use crate::error::AppError;
use crate::workflow::status::{AssignmentStatus, ContestStatus, JudgeRole};
use crate::workflow::{guard, lifecycle};

/// Look up an assignment by ID, returning 404 if not found.
pub async fn find_assignment<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<judge_assignment::Model, AppError> {
    judge_assignment::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Judge assignment not found".into()))
}

/// Bind an expert to a contest in the given role, starting at `pending`.
///
/// A second active primary assignment for the same contest is refused
/// with `CONFLICT`; once the first one is rejected the slot frees up.
pub async fn assign<C: ConnectionTrait>(
    db: &C,
    contest_id: i32,
    expert_id: i32,
    role: JudgeRole,
) -> Result<judge_assignment::Model, AppError> {
    let contest = lifecycle::find_contest(db, contest_id).await?;
    let status = guard::require_contest_open(&contest)?;
    if status == ContestStatus::Draft {
        return Err(AppError::ContestClosed(format!(
            "Contest {contest_id} is still a draft; judges are assigned after review"
        )));
    }

    expert::Entity::find_by_id(expert_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Expert not found".into()))?;

    if role == JudgeRole::Primary {
        guard::check_primary_conflict(db, contest_id).await?;
    }

    let now = Utc::now();
    let new_assignment = judge_assignment::ActiveModel {
        contest_id: Set(contest_id),
        expert_id: Set(expert_id),
        role: Set(role.as_str().to_string()),
        status: Set(AssignmentStatus::Pending.as_str().to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    Ok(new_assignment.insert(db).await?)
}

/// Compare-and-set the assignment status, refusing out-of-order moves.
async fn advance<C: ConnectionTrait>(
    db: &C,
    id: i32,
    from: AssignmentStatus,
    to: AssignmentStatus,
    score: Option<i32>,
    comments: Option<String>,
) -> Result<judge_assignment::Model, AppError> {
    let mut update = judge_assignment::Entity::update_many()
        .filter(judge_assignment::Column::Id.eq(id))
        .filter(judge_assignment::Column::Status.eq(from.as_str()))
        .col_expr(judge_assignment::Column::Status, Expr::value(to.as_str()))
        .col_expr(judge_assignment::Column::UpdatedAt, Expr::value(Utc::now()));
    if to == AssignmentStatus::Completed {
        update = update
            .col_expr(judge_assignment::Column::Score, Expr::value(score))
            .col_expr(judge_assignment::Column::Comments, Expr::value(comments));
    }

    let res = update.exec(db).await?;
    if res.rows_affected == 0 {
        let current = find_assignment(db, id).await?;
        return Err(AppError::InvalidState(format!(
            "Assignment {} is {}, expected {}",
            id,
            current.status,
            from.as_str()
        )));
    }
    find_assignment(db, id).await
}

/// The expert accepts or declines a pending assignment.
pub async fn record_decision<C: ConnectionTrait>(
    db: &C,
    id: i32,
    accept: bool,
) -> Result<judge_assignment::Model, AppError> {
    let to = if accept {
        AssignmentStatus::Accepted
    } else {
        AssignmentStatus::Rejected
    };
    advance(db, id, AssignmentStatus::Pending, to, None, None).await
}

/// accepted -> completed, storing the score and comments.
pub async fn complete<C: ConnectionTrait>(
    db: &C,
    id: i32,
    score: i32,
    comments: Option<String>,
) -> Result<judge_assignment::Model, AppError> {
    if !(0..=100).contains(&score) {
        return Err(AppError::Validation("score must be between 0 and 100".into()));
    }
    advance(
        db,
        id,
        AssignmentStatus::Accepted,
        AssignmentStatus::Completed,
        Some(score),
        comments,
    )
    .await
}
