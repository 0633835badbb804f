use crate::auth::models::Player;
use crate::scores::interface::{ScoreStore, ScoreStoreError};
use crate::scores::models::{PlayerRecord, ScoreRecord};
use crate::scores::unix_timestamp;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct HashMapScoreStorage {
    players: Arc<RwLock<HashMap<String, PlayerRecord>>>,
    scores: Arc<RwLock<Vec<ScoreRecord>>>,
}

#[cfg(test)]
impl HashMapScoreStorage {
    pub async fn scores_of(&self, player_id: &str) -> Vec<u64> {
        self.scores
            .read()
            .await
            .iter()
            .filter(|record| record.player_id == player_id)
            .map(|record| record.score)
            .collect()
    }

    pub async fn player(&self, player_id: &str) -> Option<PlayerRecord> {
        self.players.read().await.get(player_id).cloned()
    }
}

#[async_trait]
impl ScoreStore for HashMapScoreStorage {
    async fn ensure_player(&self, player: &Player) -> Result<(), ScoreStoreError> {
        self.players
            .write()
            .await
            .entry(player.id.clone())
            .or_insert_with(|| PlayerRecord {
                id: player.id.clone(),
                name: player.display_name.clone(),
            });
        Ok(())
    }

    async fn record_score(&self, player_id: &str, total_score: u64) -> Result<(), ScoreStoreError> {
        if !self.players.read().await.contains_key(player_id) {
            return Err(ScoreStoreError::UnknownPlayer(player_id.to_string()));
        }
        self.scores.write().await.push(ScoreRecord {
            player_id: player_id.to_string(),
            score: total_score,
            recorded_at: unix_timestamp(),
        });
        Ok(())
    }
}
