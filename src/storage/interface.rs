use crate::auth::models::Player;
use crate::challenges::generator::GenerationError;
use crate::challenges::models::Challenge;
use crate::games::models::{Advance, GameSession, RoundTicket};
use crate::map::models::Coordinate;
use crate::map::scoring::RoundResult;
use crate::scores::models::ScoreSubmission;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
#[error("game `{0}` not found")]
pub struct GameNotFound(pub String);

pub trait IGameStorage: GameRepo + GameFlowHandler + Clone + Send + Sync + 'static {}

pub trait GameRepo {
    async fn create(&self, player: Option<Player>) -> (String, RoundTicket);

    async fn session(&self, game_id: &str) -> Result<GameSession, GameNotFound>;

    async fn remove(&self, game_id: &str) -> Result<(), GameNotFound>;

    async fn observe_player(
        &self,
        game_id: &str,
        player: Option<Player>,
    ) -> Result<bool, GameNotFound>;

    async fn player(&self, game_id: &str) -> Result<Option<Player>, GameNotFound>;

    async fn count(&self) -> usize;
}

pub trait GameFlowHandler {
    async fn apply_challenge(&self, game_id: &str, ticket: RoundTicket, challenge: Challenge)
        -> bool;

    async fn fail_round(&self, game_id: &str, ticket: RoundTicket, reason: GenerationError)
        -> bool;

    async fn submit_guess(
        &self,
        game_id: &str,
        guess: Coordinate,
    ) -> Result<Option<RoundResult>, GameNotFound>;

    async fn advance(&self, game_id: &str) -> Result<Advance, GameNotFound>;

    async fn restart(&self, game_id: &str) -> Result<Option<RoundTicket>, GameNotFound>;

    async fn retry_round(&self, game_id: &str) -> Result<Option<RoundTicket>, GameNotFound>;

    async fn record_submission(
        &self,
        game_id: &str,
        generation: u64,
        outcome: ScoreSubmission,
    ) -> bool;
}
