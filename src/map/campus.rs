//! Playable region: the UC Santa Cruz campus.

use crate::map::geofence::Boundary;
use crate::map::models::{Coordinate, GeoBounds};
use std::sync::LazyLock;

const CAMPUS_POLYGON_PATH: [(f64, f64); 10] = [
    (36.977234, -122.053746),
    (36.984544, -122.047447),
    (37.003, -122.05),
    (37.001932, -122.067281),
    (36.99133, -122.069093),
    (36.98782, -122.069142),
    (36.983775, -122.065923),
    (36.979755, -122.059507),
    (36.977064, -122.055945),
    (36.977234, -122.053746),
];

pub const CAMPUS_CENTER: (f64, f64) = (36.9915, -122.0583);

pub const GENERATOR_BOUNDS: GeoBounds = GeoBounds {
    north: 37.005,
    south: 36.975,
    east: -122.045,
    west: -122.072,
};

pub const VIEW_BOUNDS: GeoBounds = GeoBounds {
    north: 37.05,
    south: 36.95,
    east: -122.0,
    west: -122.1,
};

pub static CAMPUS_BOUNDARY: LazyLock<Boundary> = LazyLock::new(|| {
    let vertices = CAMPUS_POLYGON_PATH
        .iter()
        .map(|&(lat, lng)| Coordinate::new(lat, lng))
        .collect::<Result<Vec<_>, _>>()
        .expect("Campus polygon has out-of-range vertices.");
    Boundary::new(&vertices).expect("Campus polygon is not a valid boundary.")
});
