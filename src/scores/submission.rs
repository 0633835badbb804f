use crate::auth::models::Player;
use crate::scores::interface::ScoreStore;
use crate::scores::models::ScoreSubmission;

/// Never fails: anonymous games are skipped and store errors are logged.
pub async fn submit(
    store: &dyn ScoreStore,
    player: Option<&Player>,
    total_score: u64,
) -> ScoreSubmission {
    let Some(player) = player else {
        tracing::info!("No player signed in, skipping score submission.");
        return ScoreSubmission::SkippedAnonymous;
    };
    if let Err(err) = store.ensure_player(player).await {
        tracing::error!("Failed to create a record for player `{}`: {}", player.id, err);
        return ScoreSubmission::Failed;
    }
    match store.record_score(&player.id, total_score).await {
        Ok(()) => {
            tracing::info!("Saved score {} of player `{}`.", total_score, player.id);
            ScoreSubmission::Saved
        }
        Err(err) => {
            tracing::error!("Failed to save score of player `{}`: {}", player.id, err);
            ScoreSubmission::Failed
        }
    }
}
