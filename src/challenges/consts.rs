use std::time::Duration;

pub const DEFAULT_CURATED_IMAGE_PROBABILITY: f64 = 0.5;
pub const MAX_GENERATION_ATTEMPTS: u32 = 50;
pub const PANORAMA_SEARCH_RADIUS_METERS: u32 = 50;
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(3);
pub const NO_IMAGERY_RETRY_DELAY: Duration = Duration::from_millis(50);
