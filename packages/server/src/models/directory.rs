//! Students and experts: the directory entities the workflows reference.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::shared::validate_name;
use crate::error::AppError;

#[derive(Deserialize, ToSchema)]
pub struct CreateStudentRequest {
    pub name: String,
    pub student_no: String,
    pub school: String,
}

#[derive(Serialize, ToSchema)]
pub struct StudentResponse {
    pub id: i32,
    pub name: String,
    pub student_no: String,
    pub school: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateExpertRequest {
    pub name: String,
    pub title: String,
    pub organization: String,
}

#[derive(Serialize, ToSchema)]
pub struct ExpertResponse {
    pub id: i32,
    pub name: String,
    pub title: String,
    pub organization: String,
    pub created_at: DateTime<Utc>,
}

impl From<crate::entity::student::Model> for StudentResponse {
    fn from(m: crate::entity::student::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            student_no: m.student_no,
            school: m.school,
            created_at: m.created_at,
        }
    }
}

impl From<crate::entity::expert::Model> for ExpertResponse {
    fn from(m: crate::entity::expert::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            title: m.title,
            organization: m.organization,
            created_at: m.created_at,
        }
    }
}

pub fn validate_create_student(req: &CreateStudentRequest) -> Result<(), AppError> {
    validate_name(&req.name, "name")?;
    if req.student_no.trim().is_empty() {
        return Err(AppError::Validation("student_no must not be empty".into()));
    }
    if req.school.trim().is_empty() {
        return Err(AppError::Validation("school must not be empty".into()));
    }
    Ok(())
}

pub fn validate_create_expert(req: &CreateExpertRequest) -> Result<(), AppError> {
    validate_name(&req.name, "name")?;
    if req.title.trim().is_empty() {
        return Err(AppError::Validation("title must not be empty".into()));
    }
    if req.organization.trim().is_empty() {
        return Err(AppError::Validation("organization must not be empty".into()));
    }
    Ok(())
}
