use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::contest_result;
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::result::*;
use crate::state::AppState;
use crate::workflow::results as workflow;

#[utoipa::path(
    post,
    path = "/{id}/results",
    tag = "Results",
    operation_id = "recordResult",
    summary = "Record an unpublished result",
    description = "Records a result for exactly one of a student or a team of this contest. \
        Results start unpublished and become visible through the publish endpoints.",
    params(("id" = i32, Path, description = "Contest ID")),
    request_body = RecordResultRequest,
    responses(
        (status = 201, description = "Result recorded", body = ResultResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Contest, student or team not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(contest_id))]
pub async fn record_result(
    State(state): State<AppState>,
    Path(contest_id): Path<i32>,
    AppJson(payload): AppJson<RecordResultRequest>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;
    let model = workflow::record(
        &txn,
        contest_id,
        payload.student_id,
        payload.team_id,
        payload.ranking,
        &payload.award_level,
        payload.certificate_number,
    )
    .await?;
    txn.commit().await?;

    Ok((StatusCode::CREATED, Json(ResultResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/{id}/results",
    tag = "Results",
    operation_id = "listResults",
    summary = "List results of a contest",
    params(("id" = i32, Path, description = "Contest ID")),
    responses(
        (status = 200, description = "Results ordered by ranking", body = Vec<ResultResponse>),
        (status = 404, description = "Contest not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(contest_id))]
pub async fn list_results(
    State(state): State<AppState>,
    Path(contest_id): Path<i32>,
) -> Result<Json<Vec<ResultResponse>>, AppError> {
    crate::workflow::lifecycle::find_contest(&state.db, contest_id).await?;

    let data = contest_result::Entity::find()
        .filter(contest_result::Column::ContestId.eq(contest_id))
        .order_by_asc(contest_result::Column::Ranking)
        .all(&state.db)
        .await?
        .into_iter()
        .map(ResultResponse::from)
        .collect();
    Ok(Json(data))
}

#[utoipa::path(
    post,
    path = "/{id}/publish",
    tag = "Results",
    operation_id = "publishResult",
    summary = "Publish a single result",
    description = "Idempotent: publishing an already-published result returns it unchanged, \
        keeping the original `published_at`.",
    params(("id" = i32, Path, description = "Result ID")),
    responses(
        (status = 200, description = "Result is published", body = ResultResponse),
        (status = 404, description = "Result not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn publish_result(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ResultResponse>, AppError> {
    let model = workflow::publish(&state.db, id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    post,
    path = "/{id}/results/publish-all",
    tag = "Results",
    operation_id = "publishAllResults",
    summary = "Publish every unpublished result of a contest",
    description = "Best-effort per item: one failing result does not block the rest. Already \
        published results are untouched and do not appear in the report.",
    params(("id" = i32, Path, description = "Contest ID")),
    responses(
        (status = 200, description = "Per-item report", body = BatchPublishResponse),
        (status = 404, description = "Contest not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(contest_id))]
pub async fn publish_all_results(
    State(state): State<AppState>,
    Path(contest_id): Path<i32>,
) -> Result<Json<BatchPublishResponse>, AppError> {
    let outcomes = workflow::batch_publish(&state.db, contest_id).await?;
    let published = outcomes.iter().filter(|o| o.ok).count();
    Ok(Json(BatchPublishResponse {
        published,
        failed: outcomes.len() - published,
        outcomes,
    }))
}
