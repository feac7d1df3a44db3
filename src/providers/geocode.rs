//! Forward geocoding via the OpenCage Data API.

use crate::flag;
use anyhow::{bail, Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Sentinel shipped in sample configs; treated the same as "no key at all".
pub const PLACEHOLDER_KEY: &str = "YOUR_OPENCAGE_API_KEY";

/// Rendered for every field the enrichment step could not resolve.
pub const UNKNOWN: &str = "Unknown";

/// Map link used when no coordinates are known.
pub const DEFAULT_MAP_URL: &str = "https://www.openstreetmap.org/";

const OPENCAGE_ENDPOINT: &str = "https://api.opencagedata.com/geocode/v1/json";

/// OpenCage JSON response (only the fields this tool consumes).
#[derive(Debug, Deserialize)]
struct ApiResponse {
  results: Vec<ApiResult>,
}

#[derive(Debug, Deserialize)]
struct ApiResult {
  geometry: Geometry,
  annotations: Option<Annotations>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
  lat: f64,
  lng: f64,
}

#[derive(Debug, Deserialize, Default)]
struct Annotations {
  currency: Option<Named>,
  timezone: Option<Named>,
}

#[derive(Debug, Deserialize)]
struct Named {
  name: String,
}

/// A successfully geocoded place.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
  pub latitude: f64,
  pub longitude: f64,
  pub currency: Option<String>,
  pub timezone: Option<String>,
}

/// Every way a geocoding attempt can end. `lookup` is total over this
/// enum so callers can apply one degrade rule instead of catch-alls.
#[derive(Debug)]
pub enum GeoOutcome {
  Found(Place),
  NoMatch,
  Unavailable(String),
}

/// Geocoding client with an injected HTTP client and endpoint.
pub struct Geocoder {
  client: Client,
  endpoint: String,
}

impl Geocoder {
  pub fn new(client: Client) -> Self {
    Self::with_endpoint(client, OPENCAGE_ENDPOINT)
  }

  /// Mainly for tests pointing at a mock server.
  pub fn with_endpoint(client: Client, endpoint: impl Into<String>) -> Self {
    Self {
      client,
      endpoint: endpoint.into(),
    }
  }

  /// Resolves a place name to coordinates and annotations.
  ///
  /// Never fails: transport errors, timeouts, and non-success API statuses
  /// all collapse into [`GeoOutcome::Unavailable`]; an empty match list is
  /// [`GeoOutcome::NoMatch`].
  pub async fn lookup(&self, place: &str, api_key: &str) -> GeoOutcome {
    match self.request(place, api_key).await {
      Ok(Some(found)) => GeoOutcome::Found(found),
      Ok(None) => GeoOutcome::NoMatch,
      Err(e) => GeoOutcome::Unavailable(format!("{e:#}")),
    }
  }

  async fn request(&self, place: &str, api_key: &str) -> Result<Option<Place>> {
    let response = self
      .client
      .get(&self.endpoint)
      .query(&[("q", place), ("key", api_key), ("limit", "1")])
      .send()
      .await
      .with_context(|| format!("failed to reach {}", self.endpoint))?;

    if !response.status().is_success() {
      bail!(
        "geocoding API request failed with status: {}",
        response.status()
      );
    }

    let body = response
      .json::<ApiResponse>()
      .await
      .context("failed to deserialize geocoding API response")?;

    Ok(body.results.into_iter().next().map(|result| {
      let annotations = result.annotations.unwrap_or_default();
      Place {
        latitude: result.geometry.lat,
        longitude: result.geometry.lng,
        currency: annotations.currency.map(|c| c.name),
        timezone: annotations.timezone.map(|t| t.name),
      }
    }))
  }
}

/// Geographic enrichment for the final report. Either fully populated from
/// a successful geocode or entirely defaulted; never a mix of the two.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoInfo {
  pub latitude: Option<f64>,
  pub longitude: Option<f64>,
  pub currency: String,
  pub timezone: String,
  pub flag: String,
  pub map_url: String,
}

impl GeoInfo {
  /// The all-"Unknown" fallback used whenever enrichment is unavailable.
  pub fn unknown() -> Self {
    Self {
      latitude: None,
      longitude: None,
      currency: UNKNOWN.to_string(),
      timezone: UNKNOWN.to_string(),
      flag: flag::PLACEHOLDER.to_string(),
      map_url: DEFAULT_MAP_URL.to_string(),
    }
  }

  /// The single degrade rule: only a found place yields real data, every
  /// other outcome yields [`GeoInfo::unknown`].
  pub fn from_outcome(outcome: &GeoOutcome, region_code: Option<&str>) -> Self {
    match outcome {
      GeoOutcome::Found(place) => Self {
        latitude: Some(place.latitude),
        longitude: Some(place.longitude),
        currency: place
          .currency
          .clone()
          .unwrap_or_else(|| UNKNOWN.to_string()),
        timezone: place
          .timezone
          .clone()
          .unwrap_or_else(|| UNKNOWN.to_string()),
        flag: region_code
          .map_or_else(|| flag::PLACEHOLDER.to_string(), flag::flag_glyph),
        map_url: format!(
          "https://www.openstreetmap.org/?lat={}&lon={}",
          place.latitude, place.longitude
        ),
      },
      GeoOutcome::NoMatch | GeoOutcome::Unavailable(_) => Self::unknown(),
    }
  }
}
