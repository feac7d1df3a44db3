//! Phone-number validation and metadata lookup.
//!
//! Parsing and structural validation are delegated to the `phonenumber`
//! crate; region names, carrier names, and timezone identifiers come from
//! compact built-in tables keyed by region code or number prefix.

use phonenumber::{country, PhoneNumber};
use serde::Serialize;
use thiserror::Error;

/// Region name reported when no description is available for a number.
pub const DEFAULT_REGION_NAME: &str = "Indonesia";

/// Carrier name reported when the prefix matches no known carrier.
pub const UNKNOWN_CARRIER: &str = "Unknown";

#[derive(Debug, Error)]
pub enum NumberError {
  /// The input is not a structurally valid phone number.
  #[error("invalid phone number: {0}")]
  Invalid(String),
}

/// Parses and validates a raw phone number string.
///
/// The country is inferred from a leading `+`; numbers in national format
/// need `default_region` to be set. The returned number is guaranteed to
/// have passed the numbering-plan validity check, so downstream metadata
/// lookups never fail.
///
/// # Errors
///
/// Returns [`NumberError::Invalid`] (carrying the parser's message) when the
/// input cannot be parsed or fails the structural-validity check.
pub fn validate(
  raw: &str,
  default_region: Option<country::Id>,
) -> Result<PhoneNumber, NumberError> {
  let parsed = phonenumber::parse(default_region, raw)
    .map_err(|e| NumberError::Invalid(e.to_string()))?;

  if !phonenumber::is_valid(&parsed) {
    return Err(NumberError::Invalid(format!(
      "{raw} does not match the numbering plan of its region"
    )));
  }

  Ok(parsed)
}

/// Metadata derived from a validated phone number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupResult {
  /// Two-letter ISO region code, when one could be derived.
  pub region_code: Option<String>,
  /// English country/region name; falls back to [`DEFAULT_REGION_NAME`].
  pub region_name: String,
  /// Carrier name; falls back to [`UNKNOWN_CARRIER`].
  pub carrier: String,
  /// Timezone identifiers for the number's region. May be empty.
  pub timezones: Vec<String>,
}

/// Resolves region, carrier, and timezone metadata for a validated number.
///
/// Infallible: every field degrades to its documented fallback instead of
/// erroring, so a valid number always produces a complete `LookupResult`.
pub fn resolve(number: &PhoneNumber) -> LookupResult {
  let region_code = number.country().id().map(|id| format!("{id:?}"));

  let region_name = region_code
    .as_deref()
    .and_then(region_name)
    .unwrap_or(DEFAULT_REGION_NAME)
    .to_string();

  let e164 = format!("+{}{}", number.country().code(), number.national().value());
  let carrier = carrier_name(&e164).unwrap_or(UNKNOWN_CARRIER).to_string();

  let timezones = region_code
    .as_deref()
    .map(time_zones)
    .unwrap_or_default()
    .iter()
    .map(ToString::to_string)
    .collect();

  LookupResult {
    region_code,
    region_name,
    carrier,
    timezones,
  }
}

/// English name for a region code. Covers the regions the tool is most
/// commonly pointed at; anything else falls back to the configured default.
fn region_name(code: &str) -> Option<&'static str> {
  let name = match code {
    "AE" => "United Arab Emirates",
    "AR" => "Argentina",
    "AT" => "Austria",
    "AU" => "Australia",
    "BD" => "Bangladesh",
    "BE" => "Belgium",
    "BR" => "Brazil",
    "CA" => "Canada",
    "CH" => "Switzerland",
    "CL" => "Chile",
    "CN" => "China",
    "CO" => "Colombia",
    "CZ" => "Czechia",
    "DE" => "Germany",
    "DK" => "Denmark",
    "EG" => "Egypt",
    "ES" => "Spain",
    "FI" => "Finland",
    "FR" => "France",
    "GB" => "United Kingdom",
    "GR" => "Greece",
    "HK" => "Hong Kong",
    "ID" => "Indonesia",
    "IE" => "Ireland",
    "IN" => "India",
    "IT" => "Italy",
    "JP" => "Japan",
    "KE" => "Kenya",
    "KR" => "South Korea",
    "MX" => "Mexico",
    "MY" => "Malaysia",
    "NG" => "Nigeria",
    "NL" => "Netherlands",
    "NO" => "Norway",
    "NZ" => "New Zealand",
    "PE" => "Peru",
    "PH" => "Philippines",
    "PK" => "Pakistan",
    "PL" => "Poland",
    "PT" => "Portugal",
    "RU" => "Russia",
    "SA" => "Saudi Arabia",
    "SE" => "Sweden",
    "SG" => "Singapore",
    "TH" => "Thailand",
    "TR" => "Turkey",
    "TW" => "Taiwan",
    "UA" => "Ukraine",
    "US" => "United States",
    "VN" => "Vietnam",
    "ZA" => "South Africa",
    _ => return None,
  };
  Some(name)
}

/// Mobile carrier prefixes in E.164 form, longest match wins.
///
/// Indonesian ranges are covered in full; a handful of neighbouring
/// markets are included where prefix-to-carrier mapping is stable.
const CARRIER_PREFIXES: &[(&str, &str)] = &[
  // Telkomsel
  ("+62811", "Telkomsel"),
  ("+62812", "Telkomsel"),
  ("+62813", "Telkomsel"),
  ("+62821", "Telkomsel"),
  ("+62822", "Telkomsel"),
  ("+62823", "Telkomsel"),
  ("+62851", "Telkomsel"),
  ("+62852", "Telkomsel"),
  ("+62853", "Telkomsel"),
  // Indosat Ooredoo
  ("+62814", "Indosat Ooredoo"),
  ("+62815", "Indosat Ooredoo"),
  ("+62816", "Indosat Ooredoo"),
  ("+62855", "Indosat Ooredoo"),
  ("+62856", "Indosat Ooredoo"),
  ("+62857", "Indosat Ooredoo"),
  ("+62858", "Indosat Ooredoo"),
  // XL Axiata
  ("+62817", "XL Axiata"),
  ("+62818", "XL Axiata"),
  ("+62819", "XL Axiata"),
  ("+62859", "XL Axiata"),
  ("+62877", "XL Axiata"),
  ("+62878", "XL Axiata"),
  // Axis
  ("+62831", "Axis"),
  ("+62832", "Axis"),
  ("+62833", "Axis"),
  ("+62838", "Axis"),
  // Smartfren
  ("+62881", "Smartfren"),
  ("+62882", "Smartfren"),
  ("+62883", "Smartfren"),
  ("+62884", "Smartfren"),
  ("+62885", "Smartfren"),
  ("+62886", "Smartfren"),
  ("+62887", "Smartfren"),
  ("+62888", "Smartfren"),
  ("+62889", "Smartfren"),
  // Tri (3)
  ("+62895", "Tri"),
  ("+62896", "Tri"),
  ("+62897", "Tri"),
  ("+62898", "Tri"),
  ("+62899", "Tri"),
  // Singapore
  ("+6583", "M1"),
  ("+6584", "M1"),
  ("+6590", "StarHub"),
  ("+6596", "Singtel"),
  ("+6597", "Singtel"),
  ("+6598", "Singtel"),
  // Malaysia
  ("+60102", "Maxis"),
  ("+60103", "Maxis"),
  ("+6012", "Maxis"),
  ("+6013", "Celcom"),
  ("+6014", "DiGi"),
  ("+6016", "DiGi"),
  ("+6019", "Celcom"),
];

fn carrier_name(e164: &str) -> Option<&'static str> {
  CARRIER_PREFIXES
    .iter()
    .filter(|(prefix, _)| e164.starts_with(prefix))
    .max_by_key(|(prefix, _)| prefix.len())
    .map(|(_, carrier)| *carrier)
}

/// Timezone identifiers per region. Regions with several zones list them
/// west-to-east agnostically; unknown regions yield an empty list.
fn time_zones(code: &str) -> &'static [&'static str] {
  match code {
    "ID" => &["Asia/Jakarta", "Asia/Makassar", "Asia/Jayapura"],
    "US" => &[
      "America/New_York",
      "America/Chicago",
      "America/Denver",
      "America/Los_Angeles",
      "America/Anchorage",
      "Pacific/Honolulu",
    ],
    "CA" => &[
      "America/Toronto",
      "America/Winnipeg",
      "America/Edmonton",
      "America/Vancouver",
    ],
    "BR" => &["America/Sao_Paulo", "America/Manaus"],
    "RU" => &[
      "Europe/Moscow",
      "Asia/Yekaterinburg",
      "Asia/Novosibirsk",
      "Asia/Vladivostok",
    ],
    "AU" => &[
      "Australia/Sydney",
      "Australia/Adelaide",
      "Australia/Perth",
    ],
    "MX" => &["America/Mexico_City", "America/Tijuana"],
    "CN" => &["Asia/Shanghai"],
    "IN" => &["Asia/Kolkata"],
    "JP" => &["Asia/Tokyo"],
    "KR" => &["Asia/Seoul"],
    "SG" => &["Asia/Singapore"],
    "MY" => &["Asia/Kuala_Lumpur"],
    "TH" => &["Asia/Bangkok"],
    "VN" => &["Asia/Ho_Chi_Minh"],
    "PH" => &["Asia/Manila"],
    "HK" => &["Asia/Hong_Kong"],
    "TW" => &["Asia/Taipei"],
    "PK" => &["Asia/Karachi"],
    "BD" => &["Asia/Dhaka"],
    "AE" => &["Asia/Dubai"],
    "SA" => &["Asia/Riyadh"],
    "TR" => &["Europe/Istanbul"],
    "GB" => &["Europe/London"],
    "IE" => &["Europe/Dublin"],
    "FR" => &["Europe/Paris"],
    "DE" => &["Europe/Berlin"],
    "NL" => &["Europe/Amsterdam"],
    "BE" => &["Europe/Brussels"],
    "CH" => &["Europe/Zurich"],
    "AT" => &["Europe/Vienna"],
    "ES" => &["Europe/Madrid"],
    "PT" => &["Europe/Lisbon"],
    "IT" => &["Europe/Rome"],
    "GR" => &["Europe/Athens"],
    "PL" => &["Europe/Warsaw"],
    "CZ" => &["Europe/Prague"],
    "SE" => &["Europe/Stockholm"],
    "NO" => &["Europe/Oslo"],
    "DK" => &["Europe/Copenhagen"],
    "FI" => &["Europe/Helsinki"],
    "UA" => &["Europe/Kyiv"],
    "EG" => &["Africa/Cairo"],
    "NG" => &["Africa/Lagos"],
    "KE" => &["Africa/Nairobi"],
    "ZA" => &["Africa/Johannesburg"],
    "AR" => &["America/Argentina/Buenos_Aires"],
    "CL" => &["America/Santiago"],
    "CO" => &["America/Bogota"],
    "PE" => &["America/Lima"],
    "NZ" => &["Pacific/Auckland"],
    _ => &[],
  }
}
