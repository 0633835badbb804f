use crate::challenges::generator::GenerationError;
use crate::challenges::models::{Challenge, ChallengeMode};
use crate::games::consts::{MAX_TOTAL_SCORE, TOTAL_ROUNDS};
use crate::games::models::{GameSession, RoundState};
use crate::map::models::Coordinate;
use crate::map::scoring::RoundResult;
use crate::scores::models::ScoreSubmission;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResponse {
    pub error: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<GameResponseError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game: Option<GameView>,
}

impl GameResponse {
    pub fn ok(game: GameView) -> Self {
        Self {
            error: false,
            error_code: None,
            game: Some(game),
        }
    }

    pub fn err(error_code: GameResponseError) -> Self {
        Self {
            error: true,
            error_code: Some(error_code),
            game: None,
        }
    }
}

#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GameResponseError {
    GameNotFound,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExitGameResponse {
    pub error: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<GameResponseError>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameView {
    pub game_id: String,
    pub round_index: u32,
    pub total_rounds: u32,
    pub total_score: u64,
    pub max_total_score: u64,
    pub round_history: Vec<u64>,
    pub round: RoundView,
}

impl GameView {
    pub fn new(game_id: String, session: &GameSession) -> Self {
        Self {
            game_id,
            round_index: session.round_index(),
            total_rounds: TOTAL_ROUNDS,
            total_score: session.total_score(),
            max_total_score: MAX_TOTAL_SCORE,
            round_history: session.round_history().to_vec(),
            round: RoundView::from(session.state()),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum RoundView {
    Loading,
    Guessing {
        challenge: ChallengePrompt,
    },
    Result {
        challenge: Challenge,
        guess: Coordinate,
        result: RoundResult,
    },
    SetupFailed {
        reason: SetupFailureReason,
        message: String,
    },
    GameOver {
        score_submission: ScoreSubmission,
    },
}

impl From<&RoundState> for RoundView {
    fn from(state: &RoundState) -> Self {
        match state {
            RoundState::Loading { .. } => RoundView::Loading,
            RoundState::Guessing { challenge } => RoundView::Guessing {
                challenge: ChallengePrompt::from(challenge),
            },
            RoundState::Result {
                challenge,
                guess,
                result,
            } => RoundView::Result {
                challenge: challenge.clone(),
                guess: *guess,
                result: *result,
            },
            RoundState::SetupFailed { reason } => RoundView::SetupFailed {
                reason: SetupFailureReason::from(reason),
                message: reason.to_string(),
            },
            RoundState::GameOver { score_submission } => RoundView::GameOver {
                score_submission: *score_submission,
            },
        }
    }
}

/// A curated target stays hidden until the result. A panorama can't be opened without its position.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengePrompt {
    pub mode: ChallengeMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub panorama_position: Option<Coordinate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
}

impl From<&Challenge> for ChallengePrompt {
    fn from(challenge: &Challenge) -> Self {
        match challenge.mode {
            ChallengeMode::StreetLevel => Self {
                mode: challenge.mode,
                panorama_position: Some(challenge.target),
                image_ref: None,
            },
            ChallengeMode::CuratedImage => Self {
                mode: challenge.mode,
                panorama_position: None,
                image_ref: challenge.image_ref.clone(),
            },
        }
    }
}

#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SetupFailureReason {
    NoContent,
    Exhausted,
}

impl From<&GenerationError> for SetupFailureReason {
    fn from(error: &GenerationError) -> Self {
        match error {
            GenerationError::NoContent => SetupFailureReason::NoContent,
            GenerationError::Exhausted { .. } => SetupFailureReason::Exhausted,
        }
    }
}
