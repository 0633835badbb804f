use crate::app_context::{AppContext, RequestContext};
use crate::auth::models::Player;
use crate::challenges::models::ChallengeMode;
use crate::games::models::{Advance, FinishedGame, RoundTicket};
use crate::games::responses::{ExitGameResponse, GameResponse, GameResponseError, GameView};
use crate::map::models::Coordinate;
use crate::scores::submission;
use crate::storage::interface::{GameNotFound, IGameStorage};

pub struct CreateGameHttpHandler<GS: IGameStorage> {
    app_context: AppContext<GS>,
    player: Option<Player>,
}

impl<GS> CreateGameHttpHandler<GS>
where
    GS: IGameStorage,
{
    pub fn new(app_context: AppContext<GS>, player: Option<Player>) -> Self {
        Self {
            app_context,
            player,
        }
    }

    pub async fn create(self) -> GameResponse {
        let (game_id, ticket) = self.app_context.games.create(self.player.clone()).await;
        let count = self.app_context.games.count().await;
        tracing::info!(task = "games_count", count);
        let request_context = RequestContext {
            game_id,
            player: self.player,
        };
        let handler = GameHttpHandler::new(self.app_context, &request_context);
        handler.set_up_round(ticket, None).await;
        handler.view().await
    }
}

pub struct GameHttpHandler<'a, GS: IGameStorage> {
    app_context: AppContext<GS>,
    request_context: &'a RequestContext,
}

impl<'a, GS> GameHttpHandler<'a, GS>
where
    GS: IGameStorage,
{
    pub fn new(app_context: AppContext<GS>, request_context: &'a RequestContext) -> Self {
        Self {
            app_context,
            request_context,
        }
    }

    fn game_id(&self) -> &str {
        &self.request_context.game_id
    }

    async fn observe_player(&self) -> Result<(), GameNotFound> {
        let changed = self
            .app_context
            .games
            .observe_player(self.game_id(), self.request_context.player.clone())
            .await?;
        if changed {
            tracing::info!(
                "Player of game `{}` changed to {:?}.",
                self.game_id(),
                self.request_context.player.as_ref().map(|player| &player.id),
            );
        }
        Ok(())
    }

    pub async fn view(&self) -> GameResponse {
        match self.app_context.games.session(self.game_id()).await {
            Ok(session) => GameResponse::ok(GameView::new(self.game_id().to_string(), &session)),
            Err(_) => GameResponse::err(GameResponseError::GameNotFound),
        }
    }

    pub async fn state(&self) -> GameResponse {
        if self.observe_player().await.is_err() {
            return GameResponse::err(GameResponseError::GameNotFound);
        }
        self.view().await
    }

    pub async fn submit_guess(&self, guess: Coordinate) -> GameResponse {
        if self.observe_player().await.is_err() {
            return GameResponse::err(GameResponseError::GameNotFound);
        }
        match self.app_context.games.submit_guess(self.game_id(), guess).await {
            Ok(Some(result)) => tracing::debug!(
                "Guess in game `{}` was {:.0} m off, {} points.",
                self.game_id(),
                result.distance_meters,
                result.score,
            ),
            Ok(None) => tracing::debug!(
                "Ignoring a guess in game `{}`: not guessing right now.",
                self.game_id(),
            ),
            Err(_) => return GameResponse::err(GameResponseError::GameNotFound),
        }
        self.view().await
    }

    pub async fn advance(&self) -> GameResponse {
        if self.observe_player().await.is_err() {
            return GameResponse::err(GameResponseError::GameNotFound);
        }
        match self.app_context.games.advance(self.game_id()).await {
            Ok(Advance::NextRound(ticket)) => self.set_up_round(ticket, None).await,
            Ok(Advance::Finished(finished_game)) => self.submit_score(finished_game).await,
            Ok(Advance::Ignored) => tracing::debug!(
                "Ignoring an advance in game `{}`: no round result yet.",
                self.game_id(),
            ),
            Err(_) => return GameResponse::err(GameResponseError::GameNotFound),
        }
        self.view().await
    }

    pub async fn restart(&self) -> GameResponse {
        if self.observe_player().await.is_err() {
            return GameResponse::err(GameResponseError::GameNotFound);
        }
        match self.app_context.games.restart(self.game_id()).await {
            Ok(Some(ticket)) => self.set_up_round(ticket, None).await,
            Ok(None) => tracing::debug!(
                "Ignoring a restart of game `{}`: the game is still on.",
                self.game_id(),
            ),
            Err(_) => return GameResponse::err(GameResponseError::GameNotFound),
        }
        self.view().await
    }

    pub async fn retry_round(&self, mode: Option<ChallengeMode>) -> GameResponse {
        if self.observe_player().await.is_err() {
            return GameResponse::err(GameResponseError::GameNotFound);
        }
        match self.app_context.games.retry_round(self.game_id()).await {
            Ok(Some(ticket)) => self.set_up_round(ticket, mode).await,
            Ok(None) => tracing::debug!(
                "Ignoring a round retry in game `{}`: the round didn't fail.",
                self.game_id(),
            ),
            Err(_) => return GameResponse::err(GameResponseError::GameNotFound),
        }
        self.view().await
    }

    pub async fn exit(&self) -> ExitGameResponse {
        match self.app_context.games.remove(self.game_id()).await {
            Ok(()) => ExitGameResponse {
                error: false,
                error_code: None,
            },
            Err(_) => ExitGameResponse {
                error: true,
                error_code: Some(GameResponseError::GameNotFound),
            },
        }
    }

    // Generation runs outside the storage lock. A session that moved on drops the outcome.
    async fn set_up_round(&self, ticket: RoundTicket, mode: Option<ChallengeMode>) {
        let games = &self.app_context.games;
        let applied = match self.app_context.generator.generate(mode).await {
            Ok(challenge) => games.apply_challenge(self.game_id(), ticket, challenge).await,
            Err(err) => {
                tracing::warn!(
                    "Couldn't set up round {} of game `{}`: {}",
                    ticket.round_index(),
                    self.game_id(),
                    err,
                );
                games.fail_round(self.game_id(), ticket, err).await
            }
        };
        if !applied {
            tracing::debug!(
                "Dropping the setup of round {} of game `{}`: superseded.",
                ticket.round_index(),
                self.game_id(),
            );
        }
    }

    async fn submit_score(&self, finished_game: FinishedGame) {
        let player = self
            .app_context
            .games
            .player(self.game_id())
            .await
            .unwrap_or_default();
        let outcome = submission::submit(
            self.app_context.scores.as_ref(),
            player.as_ref(),
            finished_game.total_score,
        )
        .await;
        self.app_context
            .games
            .record_submission(self.game_id(), finished_game.generation, outcome)
            .await;
        tracing::info!(
            task = "game_finished",
            total_score = finished_game.total_score,
            signed_in = player.is_some(),
            score_submission = ?outcome,
        );
    }
}
