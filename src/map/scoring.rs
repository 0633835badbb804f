use crate::map::consts::{EARTH_RADIUS, MAX_SCORE, SCORING_SCALE};
use crate::map::models::Coordinate;
use serde::Serialize;

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundResult {
    pub distance_meters: f64,
    pub score: u64,
}

pub fn distance_meters(a: Coordinate, b: Coordinate) -> f64 {
    let phi_1 = a.lat().to_radians();
    let phi_2 = b.lat().to_radians();
    let delta_phi = (b.lat() - a.lat()).to_radians();
    let delta_lambda = (b.lng() - a.lng()).to_radians();
    let h = (delta_phi / 2.0).sin().powi(2)
        + phi_1.cos() * phi_2.cos() * (delta_lambda / 2.0).sin().powi(2);
    // Rounding can push `h` just past 1 for antipodal points.
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS * c
}

/// `round(max_score * e^(-distance / scale))`, rounding half away from zero.
pub fn score(distance_meters: f64, scale: f64, max_score: u64) -> u64 {
    if distance_meters.is_nan() {
        return 0;
    }
    let distance_meters = distance_meters.max(0.0);
    (max_score as f64 * (-distance_meters / scale).exp()).round() as u64
}

pub fn estimate_guess(guess: Coordinate, target: Coordinate) -> RoundResult {
    let distance_meters = distance_meters(target, guess);
    RoundResult {
        distance_meters,
        score: score(distance_meters, SCORING_SCALE, MAX_SCORE),
    }
}
