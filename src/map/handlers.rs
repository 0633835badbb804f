use crate::map::campus::{CAMPUS_BOUNDARY, CAMPUS_CENTER, VIEW_BOUNDS};
use crate::map::models::Coordinate;
use crate::map::responses::MapConfigResponse;
use axum::http::StatusCode;
use axum::response::Json;

pub async fn config() -> Result<Json<MapConfigResponse>, StatusCode> {
    let (lat, lng) = CAMPUS_CENTER;
    let center = Coordinate::new(lat, lng).map_err(|err| {
        tracing::error!("Campus center is invalid: {err}");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Json(MapConfigResponse {
        center,
        view_bounds: VIEW_BOUNDS,
        boundary: CAMPUS_BOUNDARY.vertices(),
    }))
}
