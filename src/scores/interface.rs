use crate::auth::models::Player;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoreStoreError {
    #[error("score store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode a record: {0}")]
    Encoding(#[from] serde_json::Error),
    #[error("unknown player `{0}`")]
    UnknownPlayer(String),
}

#[async_trait]
pub trait ScoreStore: Send + Sync {
    async fn ensure_player(&self, player: &Player) -> Result<(), ScoreStoreError>;

    async fn record_score(&self, player_id: &str, total_score: u64) -> Result<(), ScoreStoreError>;
}
