//! Contest lifecycle controller.
//!
//! Every transition is a compare-and-set: one `UPDATE .. WHERE id = ?
//! AND status = ?`. When two administrators race, the loser's update
//! matches zero rows and is reported as `INVALID_STATE` rather than
//! silently overwriting the winner.

use sea_orm::prelude::Expr;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QuerySelect};

use crate::entity::{
    contest, contest_resource, contest_result, judge_assignment, registration, team, team_member,
};
use crate::error::AppError;
use crate::workflow::status::ContestStatus;

/// Look up a contest by ID, returning 404 if not found.
pub async fn find_contest<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<contest::Model, AppError> {
    contest::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Contest not found".into()))
}

/// Compare-and-set the contest status from `from` to `to`.
///
/// Returns the updated model. A zero-row update is disambiguated by
/// re-reading: missing row means `NOT_FOUND`, a different current status
/// means `INVALID_STATE`.
async fn advance<C: ConnectionTrait>(
    db: &C,
    id: i32,
    from: ContestStatus,
    to: ContestStatus,
) -> Result<contest::Model, AppError> {
    debug_assert!(from.can_advance_to(to));

    let res = contest::Entity::update_many()
        .filter(contest::Column::Id.eq(id))
        .filter(contest::Column::Status.eq(from.as_str()))
        .col_expr(contest::Column::Status, Expr::value(to.as_str()))
        .col_expr(contest::Column::UpdatedAt, Expr::value(chrono::Utc::now()))
        .exec(db)
        .await?;

    if res.rows_affected == 0 {
        let current = find_contest(db, id).await?;
        return Err(AppError::InvalidState(format!(
            "Contest {} is {}, expected {}",
            id, current.status, from.as_str()
        )));
    }

    let model = find_contest(db, id).await?;
    tracing::info!(
        contest_id = id,
        from = from.as_str(),
        to = to.as_str(),
        "Contest transitioned"
    );
    Ok(model)
}

/// draft -> pending
pub async fn submit_for_review<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<contest::Model, AppError> {
    advance(db, id, ContestStatus::Draft, ContestStatus::Pending).await
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewDecision {
    Approve,
    Reject,
}

/// pending -> approved, or pending -> rejected with the note stored as
/// the rejection reason. A reject with a blank note is a validation
/// error before anything is written.
pub async fn review<C: ConnectionTrait>(
    db: &C,
    id: i32,
    decision: ReviewDecision,
    note: Option<&str>,
) -> Result<contest::Model, AppError> {
    match decision {
        ReviewDecision::Approve => {
            advance(db, id, ContestStatus::Pending, ContestStatus::Approved).await
        }
        ReviewDecision::Reject => {
            let note = note.map(str::trim).unwrap_or_default();
            if note.is_empty() {
                return Err(AppError::Validation(
                    "A rejection note is required".into(),
                ));
            }

            let res = contest::Entity::update_many()
                .filter(contest::Column::Id.eq(id))
                .filter(contest::Column::Status.eq(ContestStatus::Pending.as_str()))
                .col_expr(
                    contest::Column::Status,
                    Expr::value(ContestStatus::Rejected.as_str()),
                )
                .col_expr(
                    contest::Column::RejectionReason,
                    Expr::value(Some(note.to_string())),
                )
                .col_expr(contest::Column::UpdatedAt, Expr::value(chrono::Utc::now()))
                .exec(db)
                .await?;

            if res.rows_affected == 0 {
                let current = find_contest(db, id).await?;
                return Err(AppError::InvalidState(format!(
                    "Contest {} is {}, expected pending",
                    id, current.status
                )));
            }
            tracing::info!(contest_id = id, "Contest rejected in review");
            find_contest(db, id).await
        }
    }
}

/// rejected -> draft, clearing the stored rejection reason so the
/// record can be edited and resubmitted.
pub async fn resubmit<C: ConnectionTrait>(db: &C, id: i32) -> Result<contest::Model, AppError> {
    let res = contest::Entity::update_many()
        .filter(contest::Column::Id.eq(id))
        .filter(contest::Column::Status.eq(ContestStatus::Rejected.as_str()))
        .col_expr(
            contest::Column::Status,
            Expr::value(ContestStatus::Draft.as_str()),
        )
        .col_expr(
            contest::Column::RejectionReason,
            Expr::value(None::<String>),
        )
        .col_expr(contest::Column::UpdatedAt, Expr::value(chrono::Utc::now()))
        .exec(db)
        .await?;

    if res.rows_affected == 0 {
        let current = find_contest(db, id).await?;
        return Err(AppError::InvalidState(format!(
            "Contest {} is {}, expected rejected",
            id, current.status
        )));
    }
    find_contest(db, id).await
}

/// approved -> published
pub async fn publish<C: ConnectionTrait>(db: &C, id: i32) -> Result<contest::Model, AppError> {
    advance(db, id, ContestStatus::Approved, ContestStatus::Published).await
}

/// published -> ongoing
pub async fn start<C: ConnectionTrait>(db: &C, id: i32) -> Result<contest::Model, AppError> {
    advance(db, id, ContestStatus::Published, ContestStatus::Ongoing).await
}

/// ongoing -> completed
pub async fn complete<C: ConnectionTrait>(db: &C, id: i32) -> Result<contest::Model, AppError> {
    advance(db, id, ContestStatus::Ongoing, ContestStatus::Completed).await
}

/// completed -> archived. Irreversible.
pub async fn archive<C: ConnectionTrait>(db: &C, id: i32) -> Result<contest::Model, AppError> {
    advance(db, id, ContestStatus::Completed, ContestStatus::Archived).await
}

/// Delete a contest and everything hanging off it.
///
/// Only a draft contest may be deleted; anything further along has
/// downstream dependents and must be archived instead. Dependents are
/// removed first so the whole removal is observable as one unit inside
/// the caller's transaction.
pub async fn delete_contest<C: ConnectionTrait>(db: &C, id: i32) -> Result<(), AppError> {
    let model = find_contest(db, id).await?;
    let status = ContestStatus::parse(&model.status)?;
    if status != ContestStatus::Draft {
        return Err(AppError::InvalidState(format!(
            "Contest {} is {}, only draft contests can be deleted",
            id, model.status
        )));
    }

    cascade_delete_dependents(db, id).await?;

    // CAS on the status so a concurrent submit_for_review cannot lose
    // its contest under it.
    let res = contest::Entity::delete_many()
        .filter(contest::Column::Id.eq(id))
        .filter(contest::Column::Status.eq(ContestStatus::Draft.as_str()))
        .exec(db)
        .await?;
    if res.rows_affected == 0 {
        let current = find_contest(db, id).await?;
        return Err(AppError::InvalidState(format!(
            "Contest {} is {}, only draft contests can be deleted",
            id, current.status
        )));
    }

    tracing::info!(contest_id = id, "Contest deleted");
    Ok(())
}

/// Explicit cascade: registrations, team members, teams, judge
/// assignments, results, and resources of the contest.
async fn cascade_delete_dependents<C: ConnectionTrait>(db: &C, id: i32) -> Result<(), AppError> {
    let team_ids: Vec<i32> = team::Entity::find()
        .filter(team::Column::ContestId.eq(id))
        .select_only()
        .column(team::Column::Id)
        .into_tuple()
        .all(db)
        .await?;
    if !team_ids.is_empty() {
        team_member::Entity::delete_many()
            .filter(team_member::Column::TeamId.is_in(team_ids))
            .exec(db)
            .await?;
    }
    team::Entity::delete_many()
        .filter(team::Column::ContestId.eq(id))
        .exec(db)
        .await?;
    registration::Entity::delete_many()
        .filter(registration::Column::ContestId.eq(id))
        .exec(db)
        .await?;
    judge_assignment::Entity::delete_many()
        .filter(judge_assignment::Column::ContestId.eq(id))
        .exec(db)
        .await?;
    contest_result::Entity::delete_many()
        .filter(contest_result::Column::ContestId.eq(id))
        .exec(db)
        .await?;
    contest_resource::Entity::delete_many()
        .filter(contest_resource::Column::ContestId.eq(id))
        .exec(db)
        .await?;
    Ok(())
}
