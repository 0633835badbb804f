use crate::app_context::AppContext;
use crate::health::responses::HealthCheckResponse;
use crate::storage::games::HashMapGamesStorage;
use crate::storage::interface::GameRepo;
use axum::extract::State;
use axum::response::Json;

#[axum::debug_handler]
pub async fn healthcheck(
    State(app_context): State<AppContext<HashMapGamesStorage>>,
) -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        error: false,
        active_games: app_context.games.count().await,
    })
}
