use crate::map::models::Coordinate;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PanoramaLookupOutcome {
    Found { resolved: Coordinate },
    NotFound,
}

#[derive(Debug, Error)]
pub enum PanoramaError {
    #[error("panorama lookup request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("panorama provider answered with status `{0}`")]
    Provider(String),
    #[error("panorama provider returned an invalid location: {0}")]
    InvalidLocation(String),
}

#[async_trait]
pub trait PanoramaLookup: Send + Sync {
    async fn lookup(
        &self,
        location: Coordinate,
        radius_meters: u32,
    ) -> Result<PanoramaLookupOutcome, PanoramaError>;
}
