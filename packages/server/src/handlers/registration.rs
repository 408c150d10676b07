use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::registration;
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::registration::*;
use crate::models::shared::validate_batch_ids;
use crate::state::AppState;
use crate::workflow::registration as workflow;
use crate::workflow::status::RegistrationStatus;

const MAX_BATCH_IDS: usize = 500;

#[utoipa::path(
    post,
    path = "/{id}/registrations",
    tag = "Registrations",
    operation_id = "createRegistration",
    summary = "Register a student for a contest",
    description = "Creates a pending registration. The contest must be published and its \
        registration window open; the student must not already hold a pending or approved \
        registration for this contest.",
    params(("id" = i32, Path, description = "Contest ID")),
    request_body = CreateRegistrationRequest,
    responses(
        (status = 201, description = "Registration created", body = RegistrationResponse),
        (status = 404, description = "Contest or student not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Window closed or already registered (CONTEST_CLOSED, DUPLICATE_REGISTRATION)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(contest_id, student_id = payload.student_id))]
pub async fn create_registration(
    State(state): State<AppState>,
    Path(contest_id): Path<i32>,
    AppJson(payload): AppJson<CreateRegistrationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;
    let model =
        workflow::register(&txn, contest_id, payload.student_id, payload.team_role).await?;
    txn.commit().await?;
    Ok((StatusCode::CREATED, Json(RegistrationResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/{id}/registrations",
    tag = "Registrations",
    operation_id = "listRegistrations",
    summary = "List registrations of a contest",
    params(
        ("id" = i32, Path, description = "Contest ID"),
        RegistrationListQuery,
    ),
    responses(
        (status = 200, description = "Registrations, newest first", body = Vec<RegistrationResponse>),
        (status = 400, description = "Unknown status filter (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Contest not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query), fields(contest_id))]
pub async fn list_registrations(
    State(state): State<AppState>,
    Path(contest_id): Path<i32>,
    Query(query): Query<RegistrationListQuery>,
) -> Result<Json<Vec<RegistrationResponse>>, AppError> {
    crate::workflow::lifecycle::find_contest(&state.db, contest_id).await?;

    let mut select =
        registration::Entity::find().filter(registration::Column::ContestId.eq(contest_id));
    if let Some(ref status) = query.status {
        let status = RegistrationStatus::parse(status)
            .map_err(|_| AppError::Validation(format!("Unknown status '{status}'")))?;
        select = select.filter(registration::Column::Status.eq(status.as_str()));
    }

    let data = select
        .order_by_desc(registration::Column::CreatedAt)
        .all(&state.db)
        .await?
        .into_iter()
        .map(RegistrationResponse::from)
        .collect();
    Ok(Json(data))
}

#[utoipa::path(
    post,
    path = "/{id}/approve",
    tag = "Registrations",
    operation_id = "approveRegistration",
    summary = "Approve a pending registration",
    params(("id" = i32, Path, description = "Registration ID")),
    request_body = ApproveRegistrationRequest,
    responses(
        (status = 200, description = "Registration approved", body = RegistrationResponse),
        (status = 404, description = "Registration not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Registration is not pending (INVALID_STATE)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn approve_registration(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<ApproveRegistrationRequest>,
) -> Result<Json<RegistrationResponse>, AppError> {
    validate_reviewer(&payload.reviewer)?;
    let model = workflow::approve(&state.db, id, payload.reviewer.trim()).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    post,
    path = "/{id}/reject",
    tag = "Registrations",
    operation_id = "rejectRegistration",
    summary = "Reject a pending registration with a reason",
    params(("id" = i32, Path, description = "Registration ID")),
    request_body = RejectRegistrationRequest,
    responses(
        (status = 200, description = "Registration rejected", body = RegistrationResponse),
        (status = 400, description = "Missing reason (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Registration not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Registration is not pending (INVALID_STATE)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn reject_registration(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<RejectRegistrationRequest>,
) -> Result<Json<RegistrationResponse>, AppError> {
    validate_reviewer(&payload.reviewer)?;
    let model =
        workflow::reject(&state.db, id, payload.reviewer.trim(), &payload.reason).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    post,
    path = "/batch-approve",
    tag = "Registrations",
    operation_id = "batchApproveRegistrations",
    summary = "Approve a batch of registrations",
    description = "Each registration is approved independently; failures are reported per item \
        and do not roll back successes.",
    request_body = BatchApproveRequest,
    responses(
        (status = 200, description = "Per-item report", body = BatchApproveResponse),
        (status = 400, description = "Bad ID list (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(count = payload.registration_ids.len()))]
pub async fn batch_approve_registrations(
    State(state): State<AppState>,
    AppJson(payload): AppJson<BatchApproveRequest>,
) -> Result<Json<BatchApproveResponse>, AppError> {
    validate_reviewer(&payload.reviewer)?;
    validate_batch_ids(&payload.registration_ids, "registration_ids", MAX_BATCH_IDS)?;

    let outcomes = workflow::batch_approve(
        &state.db,
        &payload.registration_ids,
        payload.reviewer.trim(),
    )
    .await?;

    let approved = outcomes.iter().filter(|o| o.ok).count();
    Ok(Json(BatchApproveResponse {
        approved,
        failed: outcomes.len() - approved,
        outcomes,
    }))
}
