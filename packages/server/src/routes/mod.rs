use utoipa_axum::{router::OpenApiRouter, routes};

use crate::handlers;
use crate::state::AppState;

pub fn api_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .merge(auth_routes())
        .merge(session_routes())
        .merge(evaluation_routes())
}

fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::auth::login))
        .routes(routes!(handlers::auth::logout))
        .routes(routes!(handlers::auth::check_session))
}

fn session_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::session::list_sessions,
            handlers::session::create_session
        ))
        .routes(routes!(handlers::session::delete_session))
        .routes(routes!(
            handlers::session::add_jury,
            handlers::session::remove_jury
        ))
        .routes(routes!(
            handlers::session::add_student,
            handlers::session::remove_student
        ))
}

fn evaluation_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::evaluation::submit_evaluation))
        .routes(routes!(handlers::evaluation::results_with_averages))
}
