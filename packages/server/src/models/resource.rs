use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;

/// Resource categories a contest can be configured with.
pub const RESOURCE_CATEGORIES: &[&str] =
    &["budget", "venue", "personnel", "equipment", "material"];

#[derive(Deserialize, ToSchema)]
pub struct AddResourceRequest {
    /// One of: budget, venue, personnel, equipment, material.
    pub category: String,
    pub name: String,
    /// Monetary amount in minor units; budget entries only.
    pub amount: Option<i64>,
    pub quantity: Option<i32>,
    pub note: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct ResourceResponse {
    pub id: i32,
    pub contest_id: i32,
    pub category: String,
    pub name: String,
    pub amount: Option<i64>,
    pub quantity: Option<i32>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<crate::entity::contest_resource::Model> for ResourceResponse {
    fn from(m: crate::entity::contest_resource::Model) -> Self {
        Self {
            id: m.id,
            contest_id: m.contest_id,
            category: m.category,
            name: m.name,
            amount: m.amount,
            quantity: m.quantity,
            note: m.note,
            created_at: m.created_at,
        }
    }
}

pub fn validate_add_resource(req: &AddResourceRequest) -> Result<(), AppError> {
    if !RESOURCE_CATEGORIES.contains(&req.category.as_str()) {
        return Err(AppError::Validation(format!(
            "category must be one of: {}",
            RESOURCE_CATEGORIES.join(", ")
        )));
    }
    if req.name.trim().is_empty() {
        return Err(AppError::Validation("name must not be empty".into()));
    }
    if let Some(amount) = req.amount
        && amount < 0
    {
        return Err(AppError::Validation("amount must be >= 0".into()));
    }
    if let Some(quantity) = req.quantity
        && quantity < 1
    {
        return Err(AppError::Validation("quantity must be >= 1".into()));
    }
    Ok(())
}
