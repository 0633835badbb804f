use crate::cli::Args;
use crate::scores::interface::{ScoreStore, ScoreStoreError};
use crate::scores::memory::HashMapScoreStorage;
use crate::scores::ndjson::NdjsonScoreStorage;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

pub mod interface;
pub mod memory;
pub mod models;
pub mod ndjson;
pub mod submission;

pub async fn init(args: &Args) -> Result<Arc<dyn ScoreStore>, ScoreStoreError> {
    match &args.scores_file {
        Some(path) => {
            tracing::info!("Saving scores to `{}`.", path.display());
            Ok(Arc::new(NdjsonScoreStorage::open(path).await?))
        }
        None => {
            tracing::warn!("No scores file configured. Scores will be lost on restart.");
            Ok(Arc::new(HashMapScoreStorage::default()))
        }
    }
}

fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default()
}
