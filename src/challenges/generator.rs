use crate::challenges::consts::{
    DEFAULT_CURATED_IMAGE_PROBABILITY, DEFAULT_LOOKUP_TIMEOUT, MAX_GENERATION_ATTEMPTS,
    NO_IMAGERY_RETRY_DELAY, PANORAMA_SEARCH_RADIUS_METERS,
};
use crate::challenges::models::{Challenge, ChallengeMode};
use crate::challenges::panorama::{PanoramaLookup, PanoramaLookupOutcome};
use crate::challenges::pool::CuratedPool;
use crate::map::campus::{CAMPUS_BOUNDARY, GENERATOR_BOUNDS};
use crate::map::geofence::{self, Boundary};
use crate::map::models::{Coordinate, GeoBounds};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum GenerationError {
    #[error("no content available")]
    NoContent,
    #[error("round setup failed after {attempts} attempts")]
    Exhausted { attempts: u32 },
}

#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    pub curated_image_probability: f64,
    pub max_attempts: u32,
    pub search_radius_meters: u32,
    pub lookup_timeout: Duration,
    pub no_imagery_retry_delay: Duration,
    pub bounds: GeoBounds,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            curated_image_probability: DEFAULT_CURATED_IMAGE_PROBABILITY,
            max_attempts: MAX_GENERATION_ATTEMPTS,
            search_radius_meters: PANORAMA_SEARCH_RADIUS_METERS,
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
            no_imagery_retry_delay: NO_IMAGERY_RETRY_DELAY,
            bounds: GENERATOR_BOUNDS,
        }
    }
}

pub struct RoundGenerator {
    pool: CuratedPool,
    panorama: Option<Arc<dyn PanoramaLookup>>,
    boundary: &'static Boundary,
    config: GeneratorConfig,
    rng: Mutex<StdRng>,
}

impl RoundGenerator {
    pub fn new(
        pool: CuratedPool,
        panorama: Option<Arc<dyn PanoramaLookup>>,
        config: GeneratorConfig,
    ) -> Self {
        Self::with_rng(pool, panorama, config, StdRng::from_entropy())
    }

    pub fn with_rng(
        pool: CuratedPool,
        panorama: Option<Arc<dyn PanoramaLookup>>,
        config: GeneratorConfig,
        rng: StdRng,
    ) -> Self {
        Self {
            pool,
            panorama,
            boundary: &CAMPUS_BOUNDARY,
            config,
            rng: Mutex::new(rng),
        }
    }

    pub fn bounds_cover_boundary(&self) -> bool {
        let Some(bounding_box) = self.boundary.bounding_box() else {
            return false;
        };
        let corners = [
            Coordinate::new(bounding_box.north, bounding_box.east),
            Coordinate::new(bounding_box.south, bounding_box.west),
        ];
        corners.into_iter().all(|corner| {
            corner
                .map(|corner| self.config.bounds.contains(corner))
                .unwrap_or(false)
        })
    }

    pub async fn generate(&self, forced: Option<ChallengeMode>) -> Result<Challenge, GenerationError> {
        let mode = match forced {
            Some(mode) => mode,
            None => self.choose_mode()?,
        };
        let challenge = match mode {
            ChallengeMode::CuratedImage => self.curated_challenge(),
            ChallengeMode::StreetLevel => self.street_level_challenge().await,
        }?;
        tracing::info!(
            task = "round_generated",
            mode = ?challenge.mode,
            lat = challenge.target.lat(),
            lng = challenge.target.lng(),
        );
        Ok(challenge)
    }

    fn choose_mode(&self) -> Result<ChallengeMode, GenerationError> {
        match (self.pool.is_empty(), self.panorama.is_some()) {
            (true, false) => Err(GenerationError::NoContent),
            (true, true) => Ok(ChallengeMode::StreetLevel),
            (false, false) => Ok(ChallengeMode::CuratedImage),
            (false, true) => {
                let probability = self.config.curated_image_probability;
                let probability = if probability.is_nan() {
                    DEFAULT_CURATED_IMAGE_PROBABILITY
                } else {
                    probability.clamp(0.0, 1.0)
                };
                if self.with_rng_locked(|rng| rng.gen_bool(probability)) {
                    Ok(ChallengeMode::CuratedImage)
                } else {
                    Ok(ChallengeMode::StreetLevel)
                }
            }
        }
    }

    pub fn curated_challenge(&self) -> Result<Challenge, GenerationError> {
        self.with_rng_locked(|rng| self.pool.pick(rng).map(Challenge::from))
    }

    pub async fn street_level_challenge(&self) -> Result<Challenge, GenerationError> {
        let Some(panorama) = self.panorama.as_ref() else {
            return Err(GenerationError::NoContent);
        };
        for attempt in 1..=self.config.max_attempts {
            let candidate = self.sample_candidate();
            if !geofence::contains(candidate, self.boundary) {
                continue;
            }
            let lookup = panorama.lookup(candidate, self.config.search_radius_meters);
            match tokio::time::timeout(self.config.lookup_timeout, lookup).await {
                Ok(Ok(PanoramaLookupOutcome::Found { resolved })) => {
                    if geofence::contains(resolved, self.boundary) {
                        tracing::debug!("Found a panorama after {attempt} attempts.");
                        return Ok(Challenge::street_level(resolved));
                    }
                    tracing::debug!("Panorama near {candidate:?} resolved outside the boundary.");
                }
                Ok(Ok(PanoramaLookupOutcome::NotFound)) => {
                    tokio::time::sleep(self.config.no_imagery_retry_delay).await;
                }
                Ok(Err(err)) => {
                    tracing::warn!("Panorama lookup failed on attempt {attempt}: {err}");
                }
                Err(_elapsed) => {
                    tracing::warn!(
                        "Panorama lookup timed out after {:?} on attempt {attempt}.",
                        self.config.lookup_timeout,
                    );
                }
            }
        }
        tracing::warn!(
            "Gave up looking for a panorama after {} attempts.",
            self.config.max_attempts,
        );
        Err(GenerationError::Exhausted {
            attempts: self.config.max_attempts,
        })
    }

    fn with_rng_locked<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        // A panic while sampling leaves the RNG itself in a usable state.
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut rng)
    }

    fn sample_candidate(&self) -> Coordinate {
        self.with_rng_locked(|rng| self.config.bounds.sample(rng))
    }
}
