use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{team, team_member};
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::shared::validate_name;
use crate::models::team::*;
use crate::state::AppState;
use crate::workflow::team as workflow;

async fn load_team_response<C: ConnectionTrait>(
    db: &C,
    team_model: team::Model,
) -> Result<TeamResponse, AppError> {
    let members = team_member::Entity::find()
        .filter(team_member::Column::TeamId.eq(team_model.id))
        .order_by_asc(team_member::Column::JoinedAt)
        .all(db)
        .await?;
    Ok(TeamResponse::new(team_model, members))
}

#[utoipa::path(
    post,
    path = "/{id}/teams",
    tag = "Teams",
    operation_id = "createTeam",
    summary = "Create a team with its captain",
    description = "The captain must hold an approved registration for this contest and must not \
        already belong to one of its teams. The captain is enrolled as the first member.",
    params(("id" = i32, Path, description = "Contest ID")),
    request_body = CreateTeamRequest,
    responses(
        (status = 201, description = "Team created", body = TeamResponse),
        (status = 404, description = "Contest not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Captain not eligible (INELIGIBLE_MEMBER, CONTEST_CLOSED)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(contest_id, captain_id = payload.captain_id))]
pub async fn create_team(
    State(state): State<AppState>,
    Path(contest_id): Path<i32>,
    AppJson(payload): AppJson<CreateTeamRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_name(&payload.name, "name")?;

    let txn = state.db.begin().await?;
    let model = workflow::create_team(&txn, contest_id, &payload.name, payload.captain_id).await?;
    let response = load_team_response(&txn, model).await?;
    txn.commit().await?;

    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/{id}/teams",
    tag = "Teams",
    operation_id = "listTeams",
    summary = "List teams of a contest with their members",
    params(("id" = i32, Path, description = "Contest ID")),
    responses(
        (status = 200, description = "Teams, oldest first", body = Vec<TeamResponse>),
        (status = 404, description = "Contest not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(contest_id))]
pub async fn list_teams(
    State(state): State<AppState>,
    Path(contest_id): Path<i32>,
) -> Result<Json<Vec<TeamResponse>>, AppError> {
    crate::workflow::lifecycle::find_contest(&state.db, contest_id).await?;

    let teams = team::Entity::find()
        .filter(team::Column::ContestId.eq(contest_id))
        .order_by_asc(team::Column::CreatedAt)
        .all(&state.db)
        .await?;

    let mut data = Vec::with_capacity(teams.len());
    for team_model in teams {
        data.push(load_team_response(&state.db, team_model).await?);
    }
    Ok(Json(data))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Teams",
    operation_id = "getTeam",
    summary = "Get a team with its members",
    params(("id" = i32, Path, description = "Team ID")),
    responses(
        (status = 200, description = "Team details", body = TeamResponse),
        (status = 404, description = "Team not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_team(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<TeamResponse>, AppError> {
    let model = workflow::find_team(&state.db, id).await?;
    Ok(Json(load_team_response(&state.db, model).await?))
}

#[utoipa::path(
    post,
    path = "/{id}/members",
    tag = "Teams",
    operation_id = "addTeamMember",
    summary = "Add a student to a team",
    params(("id" = i32, Path, description = "Team ID")),
    request_body = AddMemberRequest,
    responses(
        (status = 200, description = "Member added", body = TeamResponse),
        (status = 404, description = "Team not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Team full or student not eligible (CAPACITY_EXCEEDED, INELIGIBLE_MEMBER)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(team_id, student_id = payload.student_id))]
pub async fn add_team_member(
    State(state): State<AppState>,
    Path(team_id): Path<i32>,
    AppJson(payload): AppJson<AddMemberRequest>,
) -> Result<Json<TeamResponse>, AppError> {
    let txn = state.db.begin().await?;
    workflow::add_member(&txn, team_id, payload.student_id).await?;
    let model = workflow::find_team(&txn, team_id).await?;
    let response = load_team_response(&txn, model).await?;
    txn.commit().await?;
    Ok(Json(response))
}

#[utoipa::path(
    delete,
    path = "/{id}/members/{student_id}",
    tag = "Teams",
    operation_id = "removeTeamMember",
    summary = "Remove a member from a team",
    description = "Refused when the removal would shrink the team below its contest's minimum \
        size. Removing the captain requires `new_captain_id` naming another current member, who \
        takes over captaincy atomically with the removal.",
    params(
        ("id" = i32, Path, description = "Team ID"),
        ("student_id" = i32, Path, description = "Student ID of the member"),
        RemoveMemberQuery,
    ),
    responses(
        (status = 200, description = "Member removed", body = TeamResponse),
        (status = 404, description = "Team or member not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Below minimum or no replacement captain (CAPACITY_EXCEEDED, CAPTAIN_REQUIRED)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query), fields(team_id, student_id))]
pub async fn remove_team_member(
    State(state): State<AppState>,
    Path((team_id, student_id)): Path<(i32, i32)>,
    Query(query): Query<RemoveMemberQuery>,
) -> Result<Json<TeamResponse>, AppError> {
    let txn = state.db.begin().await?;
    workflow::remove_member(&txn, team_id, student_id, query.new_captain_id).await?;
    let model = workflow::find_team(&txn, team_id).await?;
    let response = load_team_response(&txn, model).await?;
    txn.commit().await?;
    Ok(Json(response))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Teams",
    operation_id = "disbandTeam",
    summary = "Disband a team",
    description = "Deletes the team and its membership rows. The members keep their approved \
        registrations and may join or form other teams.",
    params(("id" = i32, Path, description = "Team ID")),
    responses(
        (status = 204, description = "Team disbanded"),
        (status = 404, description = "Team not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn disband_team(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;
    workflow::disband(&txn, id).await?;
    txn.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}
