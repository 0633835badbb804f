use crate::auth::models::Player;
use crate::scores::interface::{ScoreStore, ScoreStoreError};
use crate::scores::models::{PlayerRecord, ScoreRecord};
use crate::scores::unix_timestamp;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum StoredRecord {
    Player(PlayerRecord),
    Score(ScoreRecord),
}

pub struct NdjsonScoreStorage {
    path: PathBuf,
    known_players: Mutex<HashSet<String>>,
}

impl NdjsonScoreStorage {
    pub async fn open(path: &Path) -> Result<Self, ScoreStoreError> {
        let mut known_players = HashSet::new();
        match tokio::fs::read_to_string(path).await {
            Ok(contents) => {
                for line in contents.lines().filter(|line| !line.trim().is_empty()) {
                    match serde_json::from_str::<StoredRecord>(line) {
                        Ok(StoredRecord::Player(player)) => {
                            known_players.insert(player.id);
                        }
                        Ok(StoredRecord::Score(_)) => {}
                        Err(err) => tracing::warn!(
                            "Ignoring a malformed line in `{}`: {}",
                            path.display(),
                            err,
                        ),
                    }
                }
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => return Err(err.into()),
        }
        Ok(Self {
            path: path.to_path_buf(),
            known_players: Mutex::new(known_players),
        })
    }

    async fn append(&self, record: &StoredRecord) -> Result<(), ScoreStoreError> {
        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(&line).await?;
        file.flush().await?;
        Ok(())
    }
}

#[async_trait]
impl ScoreStore for NdjsonScoreStorage {
    async fn ensure_player(&self, player: &Player) -> Result<(), ScoreStoreError> {
        let mut known_players = self.known_players.lock().await;
        if known_players.contains(&player.id) {
            return Ok(());
        }
        self.append(&StoredRecord::Player(PlayerRecord {
            id: player.id.clone(),
            name: player.display_name.clone(),
        }))
        .await?;
        known_players.insert(player.id.clone());
        Ok(())
    }

    async fn record_score(&self, player_id: &str, total_score: u64) -> Result<(), ScoreStoreError> {
        let known_players = self.known_players.lock().await;
        if !known_players.contains(player_id) {
            return Err(ScoreStoreError::UnknownPlayer(player_id.to_string()));
        }
        self.append(&StoredRecord::Score(ScoreRecord {
            player_id: player_id.to_string(),
            score: total_score,
            recorded_at: unix_timestamp(),
        }))
        .await
    }
}
