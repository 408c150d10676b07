//! Registration workflow: creation against the registration window,
//! terminal approve/reject decisions, and the best-effort batch form.

use chrono::Utc;
use sea_orm::prelude::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set,
};

use crate::entity::{registration, student};
use crate::error::AppError;
use crate::workflow::{BatchOutcome, guard, lifecycle};
use crate::workflow::status::RegistrationStatus;

/// Look up a registration by ID, returning 404 if not found.
pub async fn find_registration<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<registration::Model, AppError> {
    registration::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Registration not found".into()))
}

/// Create a pending registration for a student.
///
/// The contest must be published with its registration window open, and
/// the student must not already hold an active registration for it.
pub async fn register<C: ConnectionTrait>(
    db: &C,
    contest_id: i32,
    student_id: i32,
    team_role: Option<String>,
) -> Result<registration::Model, AppError> {
    let contest = lifecycle::find_contest(db, contest_id).await?;
    guard::require_registration_open(&contest, Utc::now())?;

    student::Entity::find_by_id(student_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Student not found".into()))?;

    guard::check_duplicate_registration(db, contest_id, student_id).await?;

    let new_reg = registration::ActiveModel {
        contest_id: Set(contest_id),
        student_id: Set(student_id),
        team_role: Set(team_role),
        status: Set(RegistrationStatus::Pending.as_str().to_string()),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    Ok(new_reg.insert(db).await?)
}

/// Compare-and-set a pending registration to its terminal decision.
/// The losing side of a concurrent approve/reject race matches zero
/// rows and observes `INVALID_STATE`.
async fn decide<C: ConnectionTrait>(
    db: &C,
    id: i32,
    to: RegistrationStatus,
    reviewer: &str,
    rejection_reason: Option<String>,
) -> Result<registration::Model, AppError> {
    let existing = find_registration(db, id).await?;
    let contest = lifecycle::find_contest(db, existing.contest_id).await?;
    guard::require_contest_open(&contest)?;

    let res = registration::Entity::update_many()
        .filter(registration::Column::Id.eq(id))
        .filter(registration::Column::Status.eq(RegistrationStatus::Pending.as_str()))
        .col_expr(registration::Column::Status, Expr::value(to.as_str()))
        .col_expr(
            registration::Column::RejectionReason,
            Expr::value(rejection_reason),
        )
        .col_expr(
            registration::Column::ReviewedBy,
            Expr::value(Some(reviewer.to_string())),
        )
        .col_expr(
            registration::Column::ReviewedAt,
            Expr::value(Some(Utc::now())),
        )
        .exec(db)
        .await?;

    if res.rows_affected == 0 {
        let current = find_registration(db, id).await?;
        return Err(AppError::InvalidState(format!(
            "Registration {} is already {}",
            id, current.status
        )));
    }
    find_registration(db, id).await
}

/// pending -> approved, stamping the reviewer.
pub async fn approve<C: ConnectionTrait>(
    db: &C,
    id: i32,
    reviewer: &str,
) -> Result<registration::Model, AppError> {
    decide(db, id, RegistrationStatus::Approved, reviewer, None).await
}

/// pending -> rejected. The reason is mandatory and non-blank.
pub async fn reject<C: ConnectionTrait>(
    db: &C,
    id: i32,
    reviewer: &str,
    reason: &str,
) -> Result<registration::Model, AppError> {
    let reason = reason.trim();
    if reason.is_empty() {
        return Err(AppError::Validation(
            "A rejection reason is required".into(),
        ));
    }
    decide(
        db,
        id,
        RegistrationStatus::Rejected,
        reviewer,
        Some(reason.to_string()),
    )
    .await
}

/// Approve each registration independently. One failing ID does not
/// roll back the others; the caller gets a per-item report.
pub async fn batch_approve<C: ConnectionTrait>(
    db: &C,
    ids: &[i32],
    reviewer: &str,
) -> Result<Vec<BatchOutcome>, AppError> {
    let mut outcomes = Vec::with_capacity(ids.len());
    for &id in ids {
        match approve(db, id, reviewer).await {
            Ok(_) => outcomes.push(BatchOutcome::ok(id)),
            Err(AppError::Internal(detail)) => return Err(AppError::Internal(detail)),
            Err(err) => outcomes.push(BatchOutcome::failed(id, &err)),
        }
    }
    tracing::info!(
        total = ids.len(),
        approved = outcomes.iter().filter(|o| o.ok).count(),
        "Batch approve finished"
    );
    Ok(outcomes)
}
