use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::prelude::Expr;
use sea_orm::sea_query::{Func, LikeExpr};
use sea_orm::*;
use tracing::instrument;

use crate::entity::{contest, contest_result, judge_assignment, registration, team};
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::contest::*;
use crate::models::shared::{Pagination, escape_like};
use crate::state::AppState;
use crate::workflow::status::{AssignmentStatus, ContestStatus, RegistrationStatus};
use crate::workflow::{guard, lifecycle};

#[utoipa::path(
    post,
    path = "/",
    tag = "Contests",
    operation_id = "createContest",
    summary = "Create a new contest in draft",
    request_body = CreateContestRequest,
    responses(
        (status = 201, description = "Contest created", body = ContestResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR, SCHEDULE_INVALID)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(name = %payload.name))]
pub async fn create_contest(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateContestRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_contest(&payload)?;

    let now = chrono::Utc::now();
    let new_contest = contest::ActiveModel {
        name: Set(payload.name.trim().to_string()),
        contest_type: Set(payload.contest_type.trim().to_string()),
        rules: Set(payload.rules),
        first_prize: Set(payload.first_prize),
        second_prize: Set(payload.second_prize),
        third_prize: Set(payload.third_prize),
        location: Set(payload.location),
        is_online: Set(payload.is_online),
        registration_start: Set(payload.registration_start),
        registration_end: Set(payload.registration_end),
        start_date: Set(payload.start_date),
        end_date: Set(payload.end_date),
        min_team_size: Set(payload.min_team_size),
        max_team_size: Set(payload.max_team_size),
        status: Set(ContestStatus::Draft.as_str().to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let model = new_contest.insert(&state.db).await?;

    Ok((StatusCode::CREATED, Json(ContestResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Contests",
    operation_id = "listContests",
    summary = "List contests with pagination, search and status filter",
    params(ContestListQuery),
    responses(
        (status = 200, description = "List of contests", body = ContestListResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_contests(
    State(state): State<AppState>,
    Query(query): Query<ContestListQuery>,
) -> Result<Json<ContestListResponse>, AppError> {
    let page = Ord::max(query.page.unwrap_or(1), 1);
    let per_page = query.per_page.unwrap_or(20).clamp(1, 100);

    let mut select = contest::Entity::find();

    if let Some(ref search) = query.search {
        let term = escape_like(search.trim());
        if !term.is_empty() {
            select = select.filter(
                Expr::expr(Func::lower(Expr::col(contest::Column::Name)))
                    .like(LikeExpr::new(format!("%{}%", term.to_lowercase())).escape('\\')),
            );
        }
    }

    if let Some(ref status) = query.status {
        // Reject unknown statuses instead of returning an empty list.
        let status = ContestStatus::parse(status)
            .map_err(|_| AppError::Validation(format!("Unknown status '{status}'")))?;
        select = select.filter(contest::Column::Status.eq(status.as_str()));
    }

    let sort_by = query.sort_by.as_deref().unwrap_or("created_at");
    let sort_order = if query.sort_order.as_deref() == Some("asc") {
        Order::Asc
    } else {
        Order::Desc
    };
    let sort_column = match sort_by {
        "created_at" => contest::Column::CreatedAt,
        "updated_at" => contest::Column::UpdatedAt,
        "start_date" => contest::Column::StartDate,
        "name" => contest::Column::Name,
        _ => {
            return Err(AppError::Validation(
                "sort_by must be one of: created_at, updated_at, start_date, name".into(),
            ));
        }
    };

    let total = select
        .clone()
        .paginate(&state.db, per_page)
        .num_items()
        .await?;
    let total_pages = total.div_ceil(per_page);

    let data = select
        .order_by(sort_column, sort_order)
        .paginate(&state.db, per_page)
        .fetch_page(page - 1)
        .await?
        .into_iter()
        .map(ContestListItem::from)
        .collect();

    Ok(Json(ContestListResponse {
        data,
        pagination: Pagination {
            page,
            per_page,
            total,
            total_pages,
        },
    }))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Contests",
    operation_id = "getContest",
    summary = "Get a contest by ID",
    params(("id" = i32, Path, description = "Contest ID")),
    responses(
        (status = 200, description = "Contest details", body = ContestResponse),
        (status = 404, description = "Contest not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_contest(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ContestResponse>, AppError> {
    let model = lifecycle::find_contest(&state.db, id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Contests",
    operation_id = "updateContest",
    summary = "Update a draft or rejected contest",
    description = "Partially updates a contest using PATCH semantics. Only draft and rejected \
        contests are editable; anything further along has been reviewed and must go through the \
        lifecycle. Cross-field schedule validation runs against the effective values.",
    params(("id" = i32, Path, description = "Contest ID")),
    request_body = UpdateContestRequest,
    responses(
        (status = 200, description = "Contest updated", body = ContestResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR, SCHEDULE_INVALID)", body = ErrorBody),
        (status = 404, description = "Contest not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Contest is not editable (INVALID_STATE)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_contest(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateContestRequest>,
) -> Result<Json<ContestResponse>, AppError> {
    validate_update_contest(&payload)?;

    let txn = state.db.begin().await?;
    let existing = lifecycle::find_contest(&txn, id).await?;

    let status = ContestStatus::parse(&existing.status)?;
    if !status.is_editable() {
        return Err(AppError::InvalidState(format!(
            "Contest {} is {}, only draft or rejected contests can be edited",
            id, existing.status
        )));
    }

    // The editability gate applies even when there is nothing to write.
    if payload == UpdateContestRequest::default() {
        return Ok(Json(existing.into()));
    }

    // Cross-field validation against effective values
    let effective = (
        payload.registration_start.unwrap_or(existing.registration_start),
        payload.registration_end.unwrap_or(existing.registration_end),
        payload.start_date.unwrap_or(existing.start_date),
        payload.end_date.unwrap_or(existing.end_date),
    );
    guard::validate_schedule(effective.0, effective.1, effective.2, effective.3)?;
    guard::validate_team_bounds(
        payload.min_team_size.unwrap_or(existing.min_team_size),
        payload.max_team_size.unwrap_or(existing.max_team_size),
    )?;

    let mut active: contest::ActiveModel = existing.into();

    if let Some(ref name) = payload.name {
        active.name = Set(name.trim().to_string());
    }
    if let Some(ref contest_type) = payload.contest_type {
        active.contest_type = Set(contest_type.trim().to_string());
    }
    if let Some(rules) = payload.rules {
        active.rules = Set(rules);
    }
    if let Some(first_prize) = payload.first_prize {
        active.first_prize = Set(Some(first_prize));
    }
    if let Some(second_prize) = payload.second_prize {
        active.second_prize = Set(Some(second_prize));
    }
    if let Some(third_prize) = payload.third_prize {
        active.third_prize = Set(Some(third_prize));
    }
    if let Some(location) = payload.location {
        active.location = Set(Some(location));
    }
    if let Some(is_online) = payload.is_online {
        active.is_online = Set(is_online);
    }
    if let Some(registration_start) = payload.registration_start {
        active.registration_start = Set(registration_start);
    }
    if let Some(registration_end) = payload.registration_end {
        active.registration_end = Set(registration_end);
    }
    if let Some(start_date) = payload.start_date {
        active.start_date = Set(start_date);
    }
    if let Some(end_date) = payload.end_date {
        active.end_date = Set(end_date);
    }
    if let Some(min_team_size) = payload.min_team_size {
        active.min_team_size = Set(min_team_size);
    }
    if let Some(max_team_size) = payload.max_team_size {
        active.max_team_size = Set(max_team_size);
    }
    active.updated_at = Set(chrono::Utc::now());

    let model = active.update(&txn).await?;
    txn.commit().await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Contests",
    operation_id = "deleteContest",
    summary = "Delete a draft contest",
    description = "Permanently deletes a draft contest and cascade-deletes its registrations, \
        teams, judge assignments, results and resources. Contests past draft must be archived \
        instead.",
    params(("id" = i32, Path, description = "Contest ID")),
    responses(
        (status = 204, description = "Contest deleted"),
        (status = 404, description = "Contest not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Contest is not a draft (INVALID_STATE)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_contest(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;
    lifecycle::delete_contest(&txn, id).await?;
    txn.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/{id}/submit",
    tag = "Contest Lifecycle",
    operation_id = "submitContestForReview",
    summary = "Submit a draft contest for review",
    params(("id" = i32, Path, description = "Contest ID")),
    responses(
        (status = 200, description = "Contest is now pending review", body = ContestResponse),
        (status = 404, description = "Contest not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Contest is not a draft (INVALID_STATE)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn submit_contest(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ContestResponse>, AppError> {
    let model = lifecycle::submit_for_review(&state.db, id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    post,
    path = "/{id}/review",
    tag = "Contest Lifecycle",
    operation_id = "reviewContest",
    summary = "Approve or reject a pending contest",
    request_body = ReviewContestRequest,
    params(("id" = i32, Path, description = "Contest ID")),
    responses(
        (status = 200, description = "Review recorded", body = ContestResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Contest not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Contest is not pending (INVALID_STATE)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id, decision = %payload.decision))]
pub async fn review_contest(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<ReviewContestRequest>,
) -> Result<Json<ContestResponse>, AppError> {
    let decision = match payload.decision.as_str() {
        "approve" => lifecycle::ReviewDecision::Approve,
        "reject" => lifecycle::ReviewDecision::Reject,
        _ => {
            return Err(AppError::Validation(
                "decision must be 'approve' or 'reject'".into(),
            ));
        }
    };
    let model = lifecycle::review(&state.db, id, decision, payload.note.as_deref()).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    post,
    path = "/{id}/resubmit",
    tag = "Contest Lifecycle",
    operation_id = "resubmitContest",
    summary = "Return a rejected contest to draft for editing",
    params(("id" = i32, Path, description = "Contest ID")),
    responses(
        (status = 200, description = "Contest is a draft again", body = ContestResponse),
        (status = 404, description = "Contest not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Contest is not rejected (INVALID_STATE)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn resubmit_contest(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ContestResponse>, AppError> {
    let model = lifecycle::resubmit(&state.db, id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    post,
    path = "/{id}/publish",
    tag = "Contest Lifecycle",
    operation_id = "publishContest",
    summary = "Publish an approved contest",
    params(("id" = i32, Path, description = "Contest ID")),
    responses(
        (status = 200, description = "Contest published", body = ContestResponse),
        (status = 404, description = "Contest not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Contest is not approved (INVALID_STATE)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn publish_contest(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ContestResponse>, AppError> {
    let model = lifecycle::publish(&state.db, id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    post,
    path = "/{id}/start",
    tag = "Contest Lifecycle",
    operation_id = "startContest",
    summary = "Move a published contest to ongoing",
    params(("id" = i32, Path, description = "Contest ID")),
    responses(
        (status = 200, description = "Contest is ongoing", body = ContestResponse),
        (status = 404, description = "Contest not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Contest is not published (INVALID_STATE)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn start_contest(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ContestResponse>, AppError> {
    let model = lifecycle::start(&state.db, id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    post,
    path = "/{id}/complete",
    tag = "Contest Lifecycle",
    operation_id = "completeContest",
    summary = "Move an ongoing contest to completed",
    params(("id" = i32, Path, description = "Contest ID")),
    responses(
        (status = 200, description = "Contest completed", body = ContestResponse),
        (status = 404, description = "Contest not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Contest is not ongoing (INVALID_STATE)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn complete_contest(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ContestResponse>, AppError> {
    let model = lifecycle::complete(&state.db, id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    post,
    path = "/{id}/archive",
    tag = "Contest Lifecycle",
    operation_id = "archiveContest",
    summary = "Archive a completed contest (irreversible)",
    params(("id" = i32, Path, description = "Contest ID")),
    responses(
        (status = 200, description = "Contest archived", body = ContestResponse),
        (status = 404, description = "Contest not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Contest is not completed (INVALID_STATE)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn archive_contest(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ContestResponse>, AppError> {
    let model = lifecycle::archive(&state.db, id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    get,
    path = "/{id}/summary",
    tag = "Contests",
    operation_id = "getContestSummary",
    summary = "Dashboard counts for a contest",
    params(("id" = i32, Path, description = "Contest ID")),
    responses(
        (status = 200, description = "Contest summary", body = ContestSummaryResponse),
        (status = 404, description = "Contest not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn contest_summary(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ContestSummaryResponse>, AppError> {
    let model = lifecycle::find_contest(&state.db, id).await?;

    let reg_count = |status: RegistrationStatus| {
        registration::Entity::find()
            .filter(registration::Column::ContestId.eq(id))
            .filter(registration::Column::Status.eq(status.as_str()))
            .count(&state.db)
    };
    let registrations_pending = reg_count(RegistrationStatus::Pending).await?;
    let registrations_approved = reg_count(RegistrationStatus::Approved).await?;
    let registrations_rejected = reg_count(RegistrationStatus::Rejected).await?;

    let teams = team::Entity::find()
        .filter(team::Column::ContestId.eq(id))
        .count(&state.db)
        .await?;

    let judges_active = judge_assignment::Entity::find()
        .filter(judge_assignment::Column::ContestId.eq(id))
        .filter(judge_assignment::Column::Status.is_in([
            AssignmentStatus::Pending.as_str(),
            AssignmentStatus::Accepted.as_str(),
        ]))
        .count(&state.db)
        .await?;

    let results_published = contest_result::Entity::find()
        .filter(contest_result::Column::ContestId.eq(id))
        .filter(contest_result::Column::IsPublished.eq(true))
        .count(&state.db)
        .await?;
    let results_unpublished = contest_result::Entity::find()
        .filter(contest_result::Column::ContestId.eq(id))
        .filter(contest_result::Column::IsPublished.eq(false))
        .count(&state.db)
        .await?;

    Ok(Json(ContestSummaryResponse {
        id: model.id,
        status: model.status,
        registrations_pending,
        registrations_approved,
        registrations_rejected,
        teams,
        judges_active,
        results_published,
        results_unpublished,
    }))
}
