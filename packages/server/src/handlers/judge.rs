use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::judge_assignment;
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::judge::*;
use crate::state::AppState;
use crate::workflow::judging as workflow;
use crate::workflow::status::JudgeRole;

#[utoipa::path(
    post,
    path = "/{id}/judges",
    tag = "Judging",
    operation_id = "assignJudge",
    summary = "Assign an expert to a contest",
    description = "Creates a pending assignment. A contest holds at most one active primary \
        judge; assigning a second primary is refused until the first assignment is rejected.",
    params(("id" = i32, Path, description = "Contest ID")),
    request_body = AssignJudgeRequest,
    responses(
        (status = 201, description = "Assignment created", body = JudgeAssignmentResponse),
        (status = 400, description = "Unknown role (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Contest or expert not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Primary already assigned (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(contest_id, expert_id = payload.expert_id))]
pub async fn assign_judge(
    State(state): State<AppState>,
    Path(contest_id): Path<i32>,
    AppJson(payload): AppJson<AssignJudgeRequest>,
) -> Result<impl IntoResponse, AppError> {
    let role = JudgeRole::parse(&payload.role)?;

    let txn = state.db.begin().await?;
    let model = workflow::assign(&txn, contest_id, payload.expert_id, role).await?;
    txn.commit().await?;

    Ok((StatusCode::CREATED, Json(JudgeAssignmentResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/{id}/judges",
    tag = "Judging",
    operation_id = "listJudgeAssignments",
    summary = "List judge assignments of a contest",
    params(("id" = i32, Path, description = "Contest ID")),
    responses(
        (status = 200, description = "Assignments, oldest first", body = Vec<JudgeAssignmentResponse>),
        (status = 404, description = "Contest not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(contest_id))]
pub async fn list_judge_assignments(
    State(state): State<AppState>,
    Path(contest_id): Path<i32>,
) -> Result<Json<Vec<JudgeAssignmentResponse>>, AppError> {
    crate::workflow::lifecycle::find_contest(&state.db, contest_id).await?;

    let data = judge_assignment::Entity::find()
        .filter(judge_assignment::Column::ContestId.eq(contest_id))
        .order_by_asc(judge_assignment::Column::CreatedAt)
        .all(&state.db)
        .await?
        .into_iter()
        .map(JudgeAssignmentResponse::from)
        .collect();
    Ok(Json(data))
}

#[utoipa::path(
    post,
    path = "/{id}/decision",
    tag = "Judging",
    operation_id = "recordJudgeDecision",
    summary = "Accept or decline a pending assignment",
    params(("id" = i32, Path, description = "Assignment ID")),
    request_body = JudgeDecisionRequest,
    responses(
        (status = 200, description = "Decision recorded", body = JudgeAssignmentResponse),
        (status = 404, description = "Assignment not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Assignment is not pending (INVALID_STATE)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id, accept = payload.accept))]
pub async fn record_judge_decision(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<JudgeDecisionRequest>,
) -> Result<Json<JudgeAssignmentResponse>, AppError> {
    let model = workflow::record_decision(&state.db, id, payload.accept).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    post,
    path = "/{id}/complete",
    tag = "Judging",
    operation_id = "completeJudgeAssignment",
    summary = "Complete an accepted assignment with a score",
    params(("id" = i32, Path, description = "Assignment ID")),
    request_body = CompleteAssignmentRequest,
    responses(
        (status = 200, description = "Assignment completed", body = JudgeAssignmentResponse),
        (status = 400, description = "Score out of range (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Assignment not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Assignment is not accepted (INVALID_STATE)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id, score = payload.score))]
pub async fn complete_judge_assignment(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<CompleteAssignmentRequest>,
) -> Result<Json<JudgeAssignmentResponse>, AppError> {
    let model = workflow::complete(&state.db, id, payload.score, payload.comments).await?;
    Ok(Json(model.into()))
}
