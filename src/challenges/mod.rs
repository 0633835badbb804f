use crate::challenges::generator::{GeneratorConfig, RoundGenerator};
use crate::challenges::panorama::PanoramaLookup;
use crate::challenges::pool::{CuratedPool, PoolError};
use crate::challenges::street_view::StreetViewMetadataLookup;
use crate::cli::Args;
use std::sync::Arc;

pub mod consts;
pub mod generator;
pub mod models;
pub mod panorama;
pub mod pool;
pub mod street_view;

pub fn init(args: &Args) -> Result<RoundGenerator, PoolError> {
    let pool = CuratedPool::load(&args.locations)?;
    let panorama = match &args.street_view_api_key {
        Some(api_key) => {
            Some(Arc::new(StreetViewMetadataLookup::new(api_key.clone())) as Arc<dyn PanoramaLookup>)
        }
        None => {
            tracing::warn!(
                "No Street View API key configured. Only curated image rounds will be generated."
            );
            None
        }
    };
    if pool.is_empty() && panorama.is_none() {
        tracing::warn!("Neither curated locations nor street-level imagery are available.");
    }
    let config = GeneratorConfig {
        curated_image_probability: args.curated_image_probability,
        lookup_timeout: args.lookup_timeout(),
        ..GeneratorConfig::default()
    };
    let generator = RoundGenerator::new(pool, panorama, config);
    if !generator.bounds_cover_boundary() {
        tracing::warn!("Street-level sampling bounds don't cover the whole campus boundary.");
    }
    Ok(generator)
}
