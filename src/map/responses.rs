use crate::map::models::{Coordinate, GeoBounds};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapConfigResponse {
    pub center: Coordinate,
    pub view_bounds: GeoBounds,
    pub boundary: Vec<Coordinate>,
}
