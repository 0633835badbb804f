use crate::app_context::AppContext;
use crate::cli::Args;
use crate::storage::games::HashMapGamesStorage;
use crate::{auth, games, health, http::cors, http::middleware, map};
use axum::{
    routing::{get, post},
    Router,
};

pub fn new(args: &Args, app_context: AppContext<HashMapGamesStorage>) -> Router {
    let cors_policy = cors::layer(args);
    tracing::info!("Initialized HTTP configuration.");

    let health_routes = Router::new().route("/check", get(health::handlers::healthcheck));
    let auth_routes = Router::new().route("/passcode/decode", get(auth::handlers::decode_passcode));
    let games_routes = Router::new()
        .route("/", post(games::handlers::create))
        .route(
            "/:game-id",
            get(games::handlers::state).delete(games::handlers::exit),
        )
        .route("/:game-id/guess", post(games::handlers::guess))
        .route("/:game-id/advance", post(games::handlers::advance))
        .route("/:game-id/restart", post(games::handlers::restart))
        .route("/:game-id/retry-round", post(games::handlers::retry_round));

    Router::new()
        .nest("/health", health_routes)
        .nest("/auth", auth_routes)
        .route("/map", get(map::handlers::config))
        .nest("/games", games_routes)
        .with_state(app_context)
        .layer(cors_policy)
        .layer(axum::middleware::from_fn(middleware::tracing))
}
