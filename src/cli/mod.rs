use crate::challenges::consts::DEFAULT_CURATED_IMAGE_PROBABILITY;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

#[derive(Debug, Parser)]
pub struct Args {
    /// Quickwit instance to ship structured logs to. Logs only go to stdout when omitted.
    #[arg(long)]
    pub quickwit_url: Option<Url>,
    #[arg(long)]
    #[arg(default_value = "0.0.0.0:3030")]
    pub listen_address: SocketAddr,
    #[arg(long)]
    pub jwt_signing_key: String,
    /// NDJSON file with curated image locations.
    #[arg(long)]
    #[arg(default_value = "locations.example.ndjson")]
    pub locations: PathBuf,
    #[arg(long = "allowed-origin")]
    #[arg(default_values_t = [
        String::from("http://127.0.0.1:5173"),
        String::from("http://localhost:5173"),
        String::from("http://localhost:3000"),
    ])]
    pub allowed_origins: Vec<String>,
    #[arg(long, value_parser = parse_probability)]
    #[arg(default_value_t = DEFAULT_CURATED_IMAGE_PROBABILITY)]
    pub curated_image_probability: f64,
    #[arg(long)]
    #[arg(default_value_t = 3000)]
    pub lookup_timeout_ms: u64,
    /// Street-level rounds are disabled without a key.
    #[arg(long, env = "GOOGLE_MAPS_API_KEY", hide_env_values = true)]
    pub street_view_api_key: Option<String>,
    /// Append finished games' scores to this NDJSON file instead of keeping them in memory.
    #[arg(long)]
    pub scores_file: Option<PathBuf>,
}

impl Args {
    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_millis(self.lookup_timeout_ms)
    }
}

fn parse_probability(raw: &str) -> Result<f64, String> {
    let probability = raw
        .parse::<f64>()
        .map_err(|err| format!("`{raw}` isn't a number: {err}"))?;
    if !(0.0..=1.0).contains(&probability) {
        return Err(format!("`{raw}` is outside of [0, 1]"));
    }
    Ok(probability)
}
