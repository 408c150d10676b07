use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{expert, student};
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::directory::*;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/",
    tag = "Directory",
    operation_id = "createStudent",
    summary = "Add a student to the directory",
    request_body = CreateStudentRequest,
    responses(
        (status = 201, description = "Student created", body = StudentResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 409, description = "Student number already taken (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(student_no = %payload.student_no))]
pub async fn create_student(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateStudentRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_student(&payload)?;

    let new_student = student::ActiveModel {
        name: Set(payload.name.trim().to_string()),
        student_no: Set(payload.student_no.trim().to_string()),
        school: Set(payload.school.trim().to_string()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    let model = new_student.insert(&state.db).await.map_err(|e| {
        if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
            AppError::Conflict(format!(
                "Student number '{}' is already registered",
                payload.student_no.trim()
            ))
        } else {
            e.into()
        }
    })?;

    Ok((StatusCode::CREATED, Json(StudentResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Directory",
    operation_id = "listStudents",
    summary = "List all students",
    responses(
        (status = 200, description = "Students ordered by name", body = Vec<StudentResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_students(
    State(state): State<AppState>,
) -> Result<Json<Vec<StudentResponse>>, AppError> {
    let data = student::Entity::find()
        .order_by_asc(student::Column::Name)
        .all(&state.db)
        .await?
        .into_iter()
        .map(StudentResponse::from)
        .collect();
    Ok(Json(data))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Directory",
    operation_id = "createExpert",
    summary = "Add an expert to the directory",
    request_body = CreateExpertRequest,
    responses(
        (status = 201, description = "Expert created", body = ExpertResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(name = %payload.name))]
pub async fn create_expert(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateExpertRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_expert(&payload)?;

    let new_expert = expert::ActiveModel {
        name: Set(payload.name.trim().to_string()),
        title: Set(payload.title.trim().to_string()),
        organization: Set(payload.organization.trim().to_string()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    let model = new_expert.insert(&state.db).await?;

    Ok((StatusCode::CREATED, Json(ExpertResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Directory",
    operation_id = "listExperts",
    summary = "List all experts",
    responses(
        (status = 200, description = "Experts ordered by name", body = Vec<ExpertResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_experts(
    State(state): State<AppState>,
) -> Result<Json<Vec<ExpertResponse>>, AppError> {
    let data = expert::Entity::find()
        .order_by_asc(expert::Column::Name)
        .all(&state.db)
        .await?
        .into_iter()
        .map(ExpertResponse::from)
        .collect();
    Ok(Json(data))
}
