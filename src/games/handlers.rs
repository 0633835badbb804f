use crate::app_context::{AppContext, RequestContext};
use crate::auth::extractors::MaybePlayer;
use crate::games::requests::RetryRoundQueryParams;
use crate::games::responses::{ExitGameResponse, GameResponse};
use crate::games::services::{CreateGameHttpHandler, GameHttpHandler};
use crate::map::models::Coordinate;
use crate::storage::games::HashMapGamesStorage;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;

fn with_status(response: GameResponse) -> (StatusCode, Json<GameResponse>) {
    let status = if response.error {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::OK
    };
    (status, Json(response))
}

#[axum::debug_handler]
pub async fn create(
    MaybePlayer(player): MaybePlayer,
    State(app_context): State<AppContext<HashMapGamesStorage>>,
) -> (StatusCode, Json<GameResponse>) {
    let response = CreateGameHttpHandler::new(app_context, player)
        .create()
        .await;
    with_status(response)
}

#[axum::debug_handler]
pub async fn state(
    MaybePlayer(player): MaybePlayer,
    Path(game_id): Path<String>,
    State(app_context): State<AppContext<HashMapGamesStorage>>,
) -> (StatusCode, Json<GameResponse>) {
    let request_context = RequestContext { game_id, player };
    let response = GameHttpHandler::new(app_context, &request_context)
        .state()
        .await;
    with_status(response)
}

#[axum::debug_handler]
pub async fn guess(
    MaybePlayer(player): MaybePlayer,
    Path(game_id): Path<String>,
    State(app_context): State<AppContext<HashMapGamesStorage>>,
    Json(guess): Json<Coordinate>,
) -> (StatusCode, Json<GameResponse>) {
    let request_context = RequestContext { game_id, player };
    let response = GameHttpHandler::new(app_context, &request_context)
        .submit_guess(guess)
        .await;
    with_status(response)
}

#[axum::debug_handler]
pub async fn advance(
    MaybePlayer(player): MaybePlayer,
    Path(game_id): Path<String>,
    State(app_context): State<AppContext<HashMapGamesStorage>>,
) -> (StatusCode, Json<GameResponse>) {
    let request_context = RequestContext { game_id, player };
    let response = GameHttpHandler::new(app_context, &request_context)
        .advance()
        .await;
    with_status(response)
}

#[axum::debug_handler]
pub async fn restart(
    MaybePlayer(player): MaybePlayer,
    Path(game_id): Path<String>,
    State(app_context): State<AppContext<HashMapGamesStorage>>,
) -> (StatusCode, Json<GameResponse>) {
    let request_context = RequestContext { game_id, player };
    let response = GameHttpHandler::new(app_context, &request_context)
        .restart()
        .await;
    with_status(response)
}

#[axum::debug_handler]
pub async fn retry_round(
    MaybePlayer(player): MaybePlayer,
    Path(game_id): Path<String>,
    Query(query_params): Query<RetryRoundQueryParams>,
    State(app_context): State<AppContext<HashMapGamesStorage>>,
) -> (StatusCode, Json<GameResponse>) {
    let request_context = RequestContext { game_id, player };
    let response = GameHttpHandler::new(app_context, &request_context)
        .retry_round(query_params.mode)
        .await;
    with_status(response)
}

#[axum::debug_handler]
pub async fn exit(
    MaybePlayer(player): MaybePlayer,
    Path(game_id): Path<String>,
    State(app_context): State<AppContext<HashMapGamesStorage>>,
) -> (StatusCode, Json<ExitGameResponse>) {
    let request_context = RequestContext { game_id, player };
    let response = GameHttpHandler::new(app_context, &request_context)
        .exit()
        .await;
    let status = if response.error {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::OK
    };
    (status, Json(response))
}
