use crate::challenges::models::ChallengeMode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetryRoundQueryParams {
    pub mode: Option<ChallengeMode>,
}
