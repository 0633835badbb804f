use crate::auth::models::Player;
use crate::challenges::generator::RoundGenerator;
use crate::challenges::pool::PoolError;
use crate::cli::Args;
use crate::scores::interface::{ScoreStore, ScoreStoreError};
use crate::storage::games::HashMapGamesStorage;
use crate::storage::interface::IGameStorage;
use crate::{challenges, scores};
use std::sync::Arc;
use thiserror::Error;

#[derive(Clone)]
pub struct AppContext<GS: IGameStorage> {
    pub games: GS,
    pub generator: Arc<RoundGenerator>,
    pub scores: Arc<dyn ScoreStore>,
}

pub struct RequestContext {
    pub game_id: String,
    pub player: Option<Player>,
}

#[derive(Debug, Error)]
pub enum InitError {
    #[error("failed to load curated locations: {0}")]
    Locations(#[from] PoolError),
    #[error("failed to open score storage: {0}")]
    Scores(#[from] ScoreStoreError),
}

pub async fn init(args: &Args) -> Result<AppContext<HashMapGamesStorage>, InitError> {
    let generator = challenges::init(args)?;
    let scores = scores::init(args).await?;
    tracing::info!("Initialized application context.");
    Ok(AppContext {
        games: HashMapGamesStorage::default(),
        generator: Arc::new(generator),
        scores,
    })
}
