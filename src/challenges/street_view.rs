use crate::challenges::panorama::{PanoramaError, PanoramaLookup, PanoramaLookupOutcome};
use crate::map::models::Coordinate;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

const METADATA_URL: &str = "https://maps.googleapis.com/maps/api/streetview/metadata";

pub struct StreetViewMetadataLookup {
    http_client: Client,
    metadata_url: Url,
    api_key: String,
}

impl StreetViewMetadataLookup {
    pub fn new(api_key: String) -> Self {
        Self::with_metadata_url(
            Url::parse(METADATA_URL).expect("Street View metadata URL is invalid."),
            api_key,
        )
    }

    pub fn with_metadata_url(metadata_url: Url, api_key: String) -> Self {
        Self {
            http_client: Client::new(),
            metadata_url,
            api_key,
        }
    }
}

#[derive(Debug, Deserialize)]
struct MetadataResponse {
    status: String,
    location: Option<MetadataLocation>,
}

#[derive(Debug, Deserialize)]
struct MetadataLocation {
    lat: f64,
    lng: f64,
}

#[async_trait]
impl PanoramaLookup for StreetViewMetadataLookup {
    async fn lookup(
        &self,
        location: Coordinate,
        radius_meters: u32,
    ) -> Result<PanoramaLookupOutcome, PanoramaError> {
        let response = self
            .http_client
            .get(self.metadata_url.clone())
            .query(&[
                ("location", format!("{},{}", location.lat(), location.lng())),
                ("radius", radius_meters.to_string()),
                ("source", String::from("outdoor")),
                ("key", self.api_key.clone()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json::<MetadataResponse>()
            .await?;
        interpret(response)
    }
}

fn interpret(response: MetadataResponse) -> Result<PanoramaLookupOutcome, PanoramaError> {
    match response.status.as_str() {
        "OK" => {
            let resolved = response
                .location
                .ok_or_else(|| PanoramaError::InvalidLocation(String::from("missing")))?;
            let resolved = Coordinate::new(resolved.lat, resolved.lng)
                .map_err(|err| PanoramaError::InvalidLocation(err.to_string()))?;
            Ok(PanoramaLookupOutcome::Found { resolved })
        }
        "ZERO_RESULTS" | "NOT_FOUND" => Ok(PanoramaLookupOutcome::NotFound),
        other => Err(PanoramaError::Provider(other.to_string())),
    }
}
