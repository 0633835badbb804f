use crate::auth::models::Player;
use crate::challenges::generator::GenerationError;
use crate::challenges::models::Challenge;
use crate::games::models::{Advance, GameSession, RoundTicket};
use crate::map::models::Coordinate;
use crate::map::scoring::RoundResult;
use crate::scores::models::ScoreSubmission;
use crate::storage::interface::{GameFlowHandler, GameNotFound, GameRepo, IGameStorage};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Clone, Debug)]
pub struct StoredGame {
    pub session: GameSession,
    pub player: Option<Player>,
}

#[derive(Clone, Default)]
pub struct HashMapGamesStorage {
    storage: Arc<RwLock<HashMap<String, StoredGame>>>,
}

impl HashMapGamesStorage {
    async fn with_game<T>(
        &self,
        game_id: &str,
        transition: impl FnOnce(&mut StoredGame) -> T,
    ) -> Result<T, GameNotFound> {
        let mut storage_guard = self.storage.write().await;
        let game = storage_guard
            .get_mut(game_id)
            .ok_or_else(|| GameNotFound(game_id.to_string()))?;
        Ok(transition(game))
    }
}

impl IGameStorage for HashMapGamesStorage {}

impl GameRepo for HashMapGamesStorage {
    async fn create(&self, player: Option<Player>) -> (String, RoundTicket) {
        let game_id = Uuid::new_v4().to_string();
        let (session, ticket) = GameSession::new();
        self.storage
            .write()
            .await
            .insert(game_id.clone(), StoredGame { session, player });
        (game_id, ticket)
    }

    async fn session(&self, game_id: &str) -> Result<GameSession, GameNotFound> {
        self.storage
            .read()
            .await
            .get(game_id)
            .map(|game| game.session.clone())
            .ok_or_else(|| GameNotFound(game_id.to_string()))
    }

    async fn remove(&self, game_id: &str) -> Result<(), GameNotFound> {
        self.storage
            .write()
            .await
            .remove(game_id)
            .map(|_| ())
            .ok_or_else(|| GameNotFound(game_id.to_string()))
    }

    async fn observe_player(
        &self,
        game_id: &str,
        player: Option<Player>,
    ) -> Result<bool, GameNotFound> {
        self.with_game(game_id, |game| {
            if game.player == player {
                return false;
            }
            game.player = player;
            true
        })
        .await
    }

    async fn player(&self, game_id: &str) -> Result<Option<Player>, GameNotFound> {
        self.storage
            .read()
            .await
            .get(game_id)
            .map(|game| game.player.clone())
            .ok_or_else(|| GameNotFound(game_id.to_string()))
    }

    async fn count(&self) -> usize {
        self.storage.read().await.len()
    }
}

impl GameFlowHandler for HashMapGamesStorage {
    async fn apply_challenge(
        &self,
        game_id: &str,
        ticket: RoundTicket,
        challenge: Challenge,
    ) -> bool {
        self.with_game(game_id, |game| game.session.apply_challenge(ticket, challenge))
            .await
            .unwrap_or(false)
    }

    async fn fail_round(
        &self,
        game_id: &str,
        ticket: RoundTicket,
        reason: GenerationError,
    ) -> bool {
        self.with_game(game_id, |game| game.session.fail_round(ticket, reason))
            .await
            .unwrap_or(false)
    }

    async fn submit_guess(
        &self,
        game_id: &str,
        guess: Coordinate,
    ) -> Result<Option<RoundResult>, GameNotFound> {
        self.with_game(game_id, |game| game.session.submit_guess(guess))
            .await
    }

    async fn advance(&self, game_id: &str) -> Result<Advance, GameNotFound> {
        self.with_game(game_id, |game| game.session.advance()).await
    }

    async fn restart(&self, game_id: &str) -> Result<Option<RoundTicket>, GameNotFound> {
        self.with_game(game_id, |game| game.session.restart()).await
    }

    async fn retry_round(&self, game_id: &str) -> Result<Option<RoundTicket>, GameNotFound> {
        self.with_game(game_id, |game| game.session.retry_round())
            .await
    }

    async fn record_submission(
        &self,
        game_id: &str,
        generation: u64,
        outcome: ScoreSubmission,
    ) -> bool {
        self.with_game(game_id, |game| {
            game.session.record_submission(generation, outcome)
        })
        .await
        .unwrap_or(false)
    }
}
