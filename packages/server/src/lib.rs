pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod state;
pub mod workflow;

use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "ContestHub API",
        version = "1.0.0",
        description = "API for the ContestHub university contest administration system"
    ),
    tags(
        (name = "Contests", description = "Contest CRUD and dashboards"),
        (name = "Contest Lifecycle", description = "Review and lifecycle transitions"),
        (name = "Registrations", description = "Student registration and review"),
        (name = "Teams", description = "Team composition and captaincy"),
        (name = "Judging", description = "Expert judge assignments"),
        (name = "Results", description = "Result recording and publication"),
        (name = "Resources", description = "Contest resource planning"),
        (name = "Directory", description = "Student and expert directories"),
    ),
)]
struct ApiDoc;

/// Build the application router.
pub fn build_router(state: AppState) -> axum::Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/api", routes::api_routes(&state.config))
        .split_for_parts();

    router
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api.clone()))
        .merge(Scalar::with_url("/scalar", api))
}
