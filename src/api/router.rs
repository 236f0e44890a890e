//! Router setup and configuration.

use axum::{Router, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::api::handlers::{health, missions, planets, scientists};
use crate::api::state::AppState;

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    // Health and metrics routes
    let health_routes = Router::new()
        .route("/", get(health::home))
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/metrics", get(health::metrics));

    let scientist_routes = Router::new()
        .route(
            "/scientists",
            get(scientists::list_scientists).post(scientists::create_scientist),
        )
        .route(
            "/scientists/{id}",
            get(scientists::get_scientist)
                .patch(scientists::update_scientist)
                .delete(scientists::delete_scientist),
        );

    let planet_routes = Router::new()
        .route(
            "/planets",
            get(planets::list_planets).post(planets::create_planet),
        )
        .route(
            "/planets/{id}",
            get(planets::get_planet)
                .patch(planets::update_planet)
                .delete(planets::delete_planet),
        );

    let mission_routes = Router::new()
        .route(
            "/missions",
            get(missions::list_missions).post(missions::create_mission),
        )
        .route(
            "/missions/{id}",
            get(missions::get_mission)
                .patch(missions::update_mission)
                .delete(missions::delete_mission),
        );

    let mut router = Router::new()
        .merge(health_routes)
        .merge(scientist_routes)
        .merge(planet_routes)
        .merge(mission_routes);

    if state.config.server.permissive_cors {
        router = router.layer(CorsLayer::permissive());
    }

    // Layers run outermost-last: the request id is set before tracing sees
    // the request and copied onto the response afterwards.
    router
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}
