use crate::map::models::{Coordinate, GeoBounds};
use geo::algorithm::coordinate_position::{CoordPos, CoordinatePosition};
use geo::{BoundingRect, Coord, LineString, Polygon};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum BoundaryError {
    #[error("a boundary needs at least 3 distinct vertices, got {0}")]
    TooFewVertices(usize),
}

/// Closed polygon delimiting the playable region. Edges and vertices belong to the region.
#[derive(Clone, Debug)]
pub struct Boundary {
    polygon: Polygon<f64>,
}

impl Boundary {
    pub fn new(vertices: &[Coordinate]) -> Result<Self, BoundaryError> {
        let mut distinct = vertices.to_vec();
        if distinct.len() > 1 && distinct.first() == distinct.last() {
            distinct.pop();
        }
        distinct.dedup();
        if distinct.len() < 3 {
            return Err(BoundaryError::TooFewVertices(distinct.len()));
        }
        let ring = distinct
            .iter()
            .map(|vertex| Coord {
                x: vertex.lng(),
                y: vertex.lat(),
            })
            .collect::<Vec<_>>();
        // `Polygon::new` closes the exterior ring.
        let polygon = Polygon::new(LineString::from(ring), vec![]);
        Ok(Self { polygon })
    }

    pub fn contains(&self, point: Coordinate) -> bool {
        let coord = Coord {
            x: point.lng(),
            y: point.lat(),
        };
        match self.polygon.coordinate_position(&coord) {
            CoordPos::Inside | CoordPos::OnBoundary => true,
            CoordPos::Outside => false,
        }
    }

    pub fn vertices(&self) -> Vec<Coordinate> {
        self.polygon
            .exterior()
            .coords()
            .filter_map(|coord| Coordinate::new(coord.y, coord.x).ok())
            .collect()
    }

    pub fn bounding_box(&self) -> Option<GeoBounds> {
        self.polygon.bounding_rect().map(|rect| GeoBounds {
            north: rect.max().y,
            south: rect.min().y,
            east: rect.max().x,
            west: rect.min().x,
        })
    }
}

pub fn contains(point: Coordinate, boundary: &Boundary) -> bool {
    boundary.contains(point)
}
