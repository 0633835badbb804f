pub const EARTH_RADIUS: f64 = 6371e3;
pub const MAX_SCORE: u64 = 5000;
pub const SCORING_SCALE: f64 = 2000.0;
