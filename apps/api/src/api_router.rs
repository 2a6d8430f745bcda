mod cors;

use axum::Router;
use axum::middleware::from_fn;
use axum::routing::{get, post};
use launchpad_core::AppError;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{handlers, middleware};

pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let protected_routes = Router::new()
        .route("/api/token", get(handlers::token::token_handler))
        .route("/api/tenants", get(handlers::tenants::list_tenants_handler))
        .route(
            "/api/tenants/{tenant_id}",
            get(handlers::tenants::switch_tenant_handler),
        )
        .route("/api/arm", get(handlers::arm::arm_root_handler))
        .route("/api/arm/", get(handlers::arm::arm_root_handler))
        .route("/api/arm/{*path}", get(handlers::arm::arm_proxy_handler))
        .route("/api/preview", post(handlers::deployments::preview_handler))
        .route("/api/deploy", post(handlers::deployments::deploy_handler))
        .route(
            "/api/deployments/status",
            get(handlers::deployments::deployment_status_handler),
        )
        .route(
            "/api/deployments/git-status",
            get(handlers::deployments::git_status_handler),
        )
        .route(
            "/api/sites/availability",
            get(handlers::sites::site_availability_handler),
        )
        .route(
            "/api/template",
            get(handlers::templates::discover_template_handler),
        )
        .route_layer(from_fn(middleware::require_auth));

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(protected_routes)
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors::build_cors_layer(frontend_url)?)
        .with_state(app_state))
}
