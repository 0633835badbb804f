use crate::challenges::generator::GenerationError;
use crate::challenges::models::CuratedLocation;
use rand::Rng;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PoolError {
    #[error("failed to read the locations file: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Clone, Debug, Default)]
pub struct CuratedPool {
    locations: Vec<CuratedLocation>,
}

impl CuratedPool {
    pub fn new(locations: Vec<CuratedLocation>) -> Self {
        let locations = locations
            .into_iter()
            .filter(|location| !location.image_ref.trim().is_empty())
            .collect();
        Self { locations }
    }

    pub fn load(path: &Path) -> Result<Self, PoolError> {
        let reader = BufReader::new(File::open(path)?);
        let mut locations = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<CuratedLocation>(&line) {
                Ok(location) => locations.push(location),
                Err(err) => tracing::warn!(
                    "Skipping line {} of `{}`: {}",
                    index + 1,
                    path.display(),
                    err,
                ),
            }
        }
        let pool = Self::new(locations);
        tracing::info!(
            "Loaded {} curated locations from `{}`.",
            pool.len(),
            path.display(),
        );
        Ok(pool)
    }

    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&CuratedLocation, GenerationError> {
        if self.locations.is_empty() {
            return Err(GenerationError::NoContent);
        }
        let index = rng.gen_range(0..self.locations.len());
        Ok(&self.locations[index])
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}
