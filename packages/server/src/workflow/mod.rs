//! Workflow layer: the contest lifecycle, registration/team, and
//! judging/results state machines, plus the cross-entity consistency
//! checks they run before committing a transition.
//!
//! Handlers stay thin; everything that can refuse a transition lives
//! here and reports the refusal as an [`crate::error::AppError`] kind.

pub mod guard;
pub mod judging;
pub mod lifecycle;
pub mod registration;
pub mod results;
pub mod status;
pub mod team;

use serde::Serialize;

use crate::error::AppError;

/// Per-item outcome of a best-effort batch operation.
///
/// Batches are not transactions: each item commits or fails on its own,
/// and callers receive the full list instead of a first-failure abort.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct BatchOutcome {
    pub id: i32,
    /// `true` when the item's operation committed.
    pub ok: bool,
    /// Error code for failed items, e.g. `INVALID_STATE`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl BatchOutcome {
    pub fn ok(id: i32) -> Self {
        Self {
            id,
            ok: true,
            code: None,
            message: None,
        }
    }

    pub fn failed(id: i32, err: &AppError) -> Self {
        Self {
            id,
            ok: false,
            code: Some(err.code()),
            message: Some(err.message()),
        }
    }
}
