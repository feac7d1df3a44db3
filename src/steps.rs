use crate::providers::{
  geocode::{self, GeoInfo, GeoOutcome, Geocoder},
  phone::{self, LookupResult, NumberError},
};
use phonenumber::{country, PhoneNumber};

/// How the enrichment step ended. Enrichment itself never fails the run;
/// this only tells the caller what to report.
#[derive(Debug)]
pub enum EnrichStatus {
  Enriched,
  MissingKey,
  Failed(String),
}

/// Parses and validates the raw input. The only step allowed to abort the
/// pipeline: on error nothing downstream runs.
pub fn validate_step(
  raw: &str,
  default_region: Option<country::Id>,
) -> Result<PhoneNumber, NumberError> {
  phone::validate(raw, default_region)
}

/// Resolves region, carrier, and timezone metadata. Total over validated
/// numbers.
pub fn resolve_step(number: &PhoneNumber) -> LookupResult {
  phone::resolve(number)
}

/// Best-effort geo enrichment keyed by the resolved region name.
///
/// A missing or placeholder API key short-circuits without touching the
/// network; every other failure mode is absorbed into the all-"Unknown"
/// [`GeoInfo`] via the single degrade rule.
pub async fn enrich_step(
  geocoder: &Geocoder,
  api_key: Option<&str>,
  lookup: &LookupResult,
) -> (GeoInfo, EnrichStatus) {
  let Some(key) =
    api_key.filter(|key| !key.is_empty() && *key != geocode::PLACEHOLDER_KEY)
  else {
    return (GeoInfo::unknown(), EnrichStatus::MissingKey);
  };

  let outcome = geocoder.lookup(&lookup.region_name, key).await;
  let status = match &outcome {
    GeoOutcome::Unavailable(reason) => EnrichStatus::Failed(reason.clone()),
    GeoOutcome::Found(_) | GeoOutcome::NoMatch => EnrichStatus::Enriched,
  };

  (
    GeoInfo::from_outcome(&outcome, lookup.region_code.as_deref()),
    status,
  )
}

#[cfg(test)]
mod tests {
  use super::*;
  use httpmock::prelude::*;
  use reqwest::Client;

  fn indonesia_lookup() -> LookupResult {
    LookupResult {
      region_code: Some("ID".to_string()),
      region_name: "Indonesia".to_string(),
      carrier: "Telkomsel".to_string(),
      timezones: vec!["Asia/Jakarta".to_string()],
    }
  }

  // Points at a closed port so any accidental request fails loudly.
  fn offline_geocoder() -> Geocoder {
    Geocoder::with_endpoint(Client::new(), "http://127.0.0.1:1/geocode")
  }

  #[tokio::test]
  async fn test_enrich_without_key_short_circuits() {
    let (info, status) =
      enrich_step(&offline_geocoder(), None, &indonesia_lookup()).await;
    assert_eq!(info, GeoInfo::unknown());
    assert!(matches!(status, EnrichStatus::MissingKey));
  }

  #[tokio::test]
  async fn test_enrich_with_placeholder_key_short_circuits() {
    let (info, status) = enrich_step(
      &offline_geocoder(),
      Some(geocode::PLACEHOLDER_KEY),
      &indonesia_lookup(),
    )
    .await;
    assert_eq!(info, GeoInfo::unknown());
    assert!(matches!(status, EnrichStatus::MissingKey));
  }

  #[tokio::test]
  async fn test_enrich_network_failure_degrades() {
    let (info, status) =
      enrich_step(&offline_geocoder(), Some("realkey"), &indonesia_lookup())
        .await;
    assert_eq!(info, GeoInfo::unknown());
    assert!(matches!(status, EnrichStatus::Failed(_)));
  }

  #[tokio::test]
  async fn test_enrich_success_populates_geo() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
      when
        .method(GET)
        .path("/geocode/v1/json")
        .query_param("q", "Indonesia");
      then
        .status(200)
        .header("Content-Type", "application/json")
        .json_body(serde_json::json!({
          "results": [{
            "geometry": {"lat": -6.2, "lng": 106.8},
            "annotations": {
              "currency": {"name": "Indonesian Rupiah"},
              "timezone": {"name": "Asia/Jakarta"}
            }
          }]
        }));
    });

    let geocoder =
      Geocoder::with_endpoint(Client::new(), server.url("/geocode/v1/json"));
    let (info, status) =
      enrich_step(&geocoder, Some("realkey"), &indonesia_lookup()).await;

    mock.assert();
    assert!(matches!(status, EnrichStatus::Enriched));
    assert_eq!(info.latitude, Some(-6.2));
    assert_eq!(info.longitude, Some(106.8));
    assert_eq!(info.currency, "Indonesian Rupiah");
    assert_eq!(info.flag, "🇮🇩");
  }

  #[tokio::test]
  async fn test_enrich_empty_match_treated_like_no_key() {
    let server = MockServer::start();
    server.mock(|when, then| {
      when.method(GET).path("/geocode/v1/json");
      then
        .status(200)
        .header("Content-Type", "application/json")
        .json_body(serde_json::json!({"results": []}));
    });

    let geocoder =
      Geocoder::with_endpoint(Client::new(), server.url("/geocode/v1/json"));
    let (info, status) =
      enrich_step(&geocoder, Some("realkey"), &indonesia_lookup()).await;

    assert!(matches!(status, EnrichStatus::Enriched));
    assert_eq!(info, GeoInfo::unknown());
  }

  #[test]
  fn test_validate_step_rejects_before_any_lookup() {
    let err = validate_step("not-a-number", None)
      .expect_err("malformed input must fail validation");
    assert!(matches!(err, NumberError::Invalid(_)));
  }
}
