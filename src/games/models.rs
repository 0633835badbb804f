use crate::challenges::generator::GenerationError;
use crate::challenges::models::Challenge;
use crate::games::consts::TOTAL_ROUNDS;
use crate::map::models::Coordinate;
use crate::map::scoring::{self, RoundResult};
use crate::scores::models::ScoreSubmission;

/// Receipt for a requested challenge. Only the ticket of the session's current `Loading` state
/// can install a challenge, so a result that arrives after a restart or exit is dropped.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RoundTicket {
    generation: u64,
    round_index: u32,
}

impl RoundTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn round_index(&self) -> u32 {
        self.round_index
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum RoundState {
    Loading {
        ticket: RoundTicket,
    },
    Guessing {
        challenge: Challenge,
    },
    Result {
        challenge: Challenge,
        guess: Coordinate,
        result: RoundResult,
    },
    SetupFailed {
        reason: GenerationError,
    },
    GameOver {
        score_submission: ScoreSubmission,
    },
}

#[derive(Debug, PartialEq)]
pub enum Advance {
    Ignored,
    NextRound(RoundTicket),
    Finished(FinishedGame),
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FinishedGame {
    pub generation: u64,
    pub total_score: u64,
}

#[derive(Clone, Debug)]
pub struct GameSession {
    round_index: u32,
    total_score: u64,
    round_history: Vec<u64>,
    state: RoundState,
    generation: u64,
}

impl GameSession {
    pub fn new() -> (Self, RoundTicket) {
        let ticket = RoundTicket {
            generation: 1,
            round_index: 1,
        };
        let session = Self {
            round_index: 1,
            total_score: 0,
            round_history: Vec::with_capacity(TOTAL_ROUNDS as usize),
            state: RoundState::Loading { ticket },
            generation: 1,
        };
        (session, ticket)
    }

    pub fn round_index(&self) -> u32 {
        self.round_index
    }

    pub fn total_score(&self) -> u64 {
        self.total_score
    }

    pub fn round_history(&self) -> &[u64] {
        &self.round_history
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn request_challenge(&mut self) -> RoundTicket {
        self.generation += 1;
        let ticket = RoundTicket {
            generation: self.generation,
            round_index: self.round_index,
        };
        self.state = RoundState::Loading { ticket };
        ticket
    }

    fn is_loading(&self, ticket: RoundTicket) -> bool {
        matches!(self.state, RoundState::Loading { ticket: current } if current == ticket)
    }

    pub fn apply_challenge(&mut self, ticket: RoundTicket, challenge: Challenge) -> bool {
        if !self.is_loading(ticket) {
            return false;
        }
        self.state = RoundState::Guessing { challenge };
        true
    }

    pub fn fail_round(&mut self, ticket: RoundTicket, reason: GenerationError) -> bool {
        if !self.is_loading(ticket) {
            return false;
        }
        self.state = RoundState::SetupFailed { reason };
        true
    }

    pub fn submit_guess(&mut self, guess: Coordinate) -> Option<RoundResult> {
        let RoundState::Guessing { challenge } = &self.state else {
            return None;
        };
        let result = scoring::estimate_guess(guess, challenge.target);
        let challenge = challenge.clone();
        self.round_history.push(result.score);
        self.total_score += result.score;
        self.state = RoundState::Result {
            challenge,
            guess,
            result,
        };
        Some(result)
    }

    pub fn advance(&mut self) -> Advance {
        if !matches!(self.state, RoundState::Result { .. }) {
            return Advance::Ignored;
        }
        if self.round_index < TOTAL_ROUNDS {
            self.round_index += 1;
            return Advance::NextRound(self.request_challenge());
        }
        self.state = RoundState::GameOver {
            score_submission: ScoreSubmission::Pending,
        };
        Advance::Finished(FinishedGame {
            generation: self.generation,
            total_score: self.total_score,
        })
    }

    /// Starts over from round one. Allowed once the game is over, or when a round couldn't be
    /// set up.
    pub fn restart(&mut self) -> Option<RoundTicket> {
        if !matches!(
            self.state,
            RoundState::GameOver { .. } | RoundState::SetupFailed { .. }
        ) {
            return None;
        }
        self.round_index = 1;
        self.total_score = 0;
        self.round_history.clear();
        Some(self.request_challenge())
    }

    pub fn retry_round(&mut self) -> Option<RoundTicket> {
        if !matches!(self.state, RoundState::SetupFailed { .. }) {
            return None;
        }
        Some(self.request_challenge())
    }

    pub fn record_submission(&mut self, generation: u64, outcome: ScoreSubmission) -> bool {
        let current_generation = self.generation;
        match &mut self.state {
            RoundState::GameOver { score_submission }
                if generation == current_generation
                    && *score_submission == ScoreSubmission::Pending =>
            {
                *score_submission = outcome;
                true
            }
            _ => false,
        }
    }
}
