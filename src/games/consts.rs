use crate::map::consts::MAX_SCORE;

pub const TOTAL_ROUNDS: u32 = 5;
pub const MAX_TOTAL_SCORE: u64 = TOTAL_ROUNDS as u64 * MAX_SCORE;
