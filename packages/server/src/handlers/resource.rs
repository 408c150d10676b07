use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::contest_resource;
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::resource::*;
use crate::state::AppState;
use crate::workflow::{guard, lifecycle};

#[utoipa::path(
    post,
    path = "/{id}/resources",
    tag = "Resources",
    operation_id = "addContestResource",
    summary = "Attach a resource plan entry to a contest",
    params(("id" = i32, Path, description = "Contest ID")),
    request_body = AddResourceRequest,
    responses(
        (status = 201, description = "Resource added", body = ResourceResponse),
        (status = 400, description = "Unknown category (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Contest not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Contest is archived (CONTEST_CLOSED)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(contest_id, category = %payload.category))]
pub async fn add_resource(
    State(state): State<AppState>,
    Path(contest_id): Path<i32>,
    AppJson(payload): AppJson<AddResourceRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_add_resource(&payload)?;

    let contest = lifecycle::find_contest(&state.db, contest_id).await?;
    guard::require_contest_open(&contest)?;

    let new_resource = contest_resource::ActiveModel {
        contest_id: Set(contest_id),
        category: Set(payload.category),
        name: Set(payload.name.trim().to_string()),
        amount: Set(payload.amount),
        quantity: Set(payload.quantity),
        note: Set(payload.note),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    let model = new_resource.insert(&state.db).await?;

    Ok((StatusCode::CREATED, Json(ResourceResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/{id}/resources",
    tag = "Resources",
    operation_id = "listContestResources",
    summary = "List the resource plan of a contest",
    params(("id" = i32, Path, description = "Contest ID")),
    responses(
        (status = 200, description = "Resources grouped by category", body = Vec<ResourceResponse>),
        (status = 404, description = "Contest not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(contest_id))]
pub async fn list_resources(
    State(state): State<AppState>,
    Path(contest_id): Path<i32>,
) -> Result<Json<Vec<ResourceResponse>>, AppError> {
    lifecycle::find_contest(&state.db, contest_id).await?;

    let data = contest_resource::Entity::find()
        .filter(contest_resource::Column::ContestId.eq(contest_id))
        .order_by_asc(contest_resource::Column::Category)
        .order_by_asc(contest_resource::Column::CreatedAt)
        .all(&state.db)
        .await?
        .into_iter()
        .map(ResourceResponse::from)
        .collect();
    Ok(Json(data))
}

#[utoipa::path(
    delete,
    path = "/{id}/resources/{resource_id}",
    tag = "Resources",
    operation_id = "removeContestResource",
    summary = "Remove a resource plan entry",
    params(
        ("id" = i32, Path, description = "Contest ID"),
        ("resource_id" = i32, Path, description = "Resource ID"),
    ),
    responses(
        (status = 204, description = "Resource removed"),
        (status = 404, description = "Contest or resource not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Contest is archived (CONTEST_CLOSED)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(contest_id, resource_id))]
pub async fn remove_resource(
    State(state): State<AppState>,
    Path((contest_id, resource_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let contest = lifecycle::find_contest(&state.db, contest_id).await?;
    guard::require_contest_open(&contest)?;

    let model = contest_resource::Entity::find_by_id(resource_id)
        .filter(contest_resource::Column::ContestId.eq(contest_id))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Resource not found".into()))?;
    model.delete(&state.db).await?;

    Ok(StatusCode::NO_CONTENT)
}
