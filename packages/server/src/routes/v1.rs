use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/contests", contest_routes())
        .nest("/registrations", registration_routes())
        .nest("/teams", team_routes())
        .nest("/judge-assignments", judge_assignment_routes())
        .nest("/results", result_routes())
        .nest("/students", student_routes())
        .nest("/experts", expert_routes())
}

fn contest_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::contest::list_contests,
            handlers::contest::create_contest
        ))
        .routes(routes!(
            handlers::contest::get_contest,
            handlers::contest::update_contest,
            handlers::contest::delete_contest
        ))
        .routes(routes!(handlers::contest::submit_contest))
        .routes(routes!(handlers::contest::review_contest))
        .routes(routes!(handlers::contest::resubmit_contest))
        .routes(routes!(handlers::contest::publish_contest))
        .routes(routes!(handlers::contest::start_contest))
        .routes(routes!(handlers::contest::complete_contest))
        .routes(routes!(handlers::contest::archive_contest))
        .routes(routes!(handlers::contest::contest_summary))
        .routes(routes!(
            handlers::registration::list_registrations,
            handlers::registration::create_registration
        ))
        .routes(routes!(
            handlers::team::list_teams,
            handlers::team::create_team
        ))
        .routes(routes!(
            handlers::judge::list_judge_assignments,
            handlers::judge::assign_judge
        ))
        .routes(routes!(
            handlers::result::list_results,
            handlers::result::record_result
        ))
        .routes(routes!(handlers::result::publish_all_results))
        .routes(routes!(
            handlers::resource::list_resources,
            handlers::resource::add_resource
        ))
        .routes(routes!(handlers::resource::remove_resource))
}

fn registration_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::registration::approve_registration))
        .routes(routes!(handlers::registration::reject_registration))
        .routes(routes!(handlers::registration::batch_approve_registrations))
}

fn team_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::team::get_team,
            handlers::team::disband_team
        ))
        .routes(routes!(handlers::team::add_team_member))
        .routes(routes!(handlers::team::remove_team_member))
}

fn judge_assignment_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::judge::record_judge_decision))
        .routes(routes!(handlers::judge::complete_judge_assignment))
}

fn result_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(handlers::result::publish_result))
}

fn student_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(
        handlers::directory::list_students,
        handlers::directory::create_student
    ))
}

fn expert_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(
        handlers::directory::list_experts,
        handlers::directory::create_expert
    ))
}
