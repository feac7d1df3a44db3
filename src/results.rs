use crate::providers::{geocode::GeoInfo, phone::LookupResult};
use anyhow::{Context, Result};
use console::{style, Style};
use serde::Serialize;
use std::fmt::Write as _;

/// Everything a single invocation produced, for both output modes.
#[derive(Debug, Serialize, Default)]
pub struct Report {
  pub number: NumberSummary,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub lookup: Option<LookupResult>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub geo: Option<GeoInfo>,

  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub skipped_steps: Vec<String>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub errors: Vec<String>,
}

/// The validated number as the parser saw it.
#[derive(Debug, Serialize, Default, Clone)]
pub struct NumberSummary {
  pub raw: String,
  pub country_code: u16,
  pub national_number: u64,
}

/// Renders the fixed-layout report block.
///
/// Field order and separators are deterministic; latitude/longitude lines
/// appear only when coordinates are known, everything else renders verbatim
/// with "Unknown" for unresolved fields. Calling this twice with the same
/// inputs yields byte-identical strings.
pub fn render(lookup: &LookupResult, geo: &GeoInfo) -> String {
  let mut out = String::new();
  let _ = writeln!(out, "{}", "=".repeat(50));
  let _ = writeln!(out, "Country Name => {}", lookup.region_name);
  let _ = writeln!(out, "{}", "-".repeat(25));
  let _ = writeln!(out, "Telecom Company Name => {}", lookup.carrier);
  let _ = writeln!(out, "{}", "-".repeat(25));

  if let (Some(lat), Some(lng)) = (geo.latitude, geo.longitude) {
    let _ = writeln!(out, "Latitude: {lat}");
    let _ = writeln!(out, "Longitude: {lng}");
  }

  let _ = writeln!(out, "Currency: {}", geo.currency);
  let _ = writeln!(out, "Timezone: {}", geo.timezone);
  let _ = writeln!(out, "Flag: {}", geo.flag);
  let _ = writeln!(out, "Map: {}", geo.map_url);
  let _ = write!(out, "{}", "=".repeat(50));
  out
}

/// Helper: print a section header ("⚠ Skipped Steps") once.
fn header(title: &str, emoji: &str) {
  println!(
    "\n{} {}",
    style(emoji).bold(),
    Style::new().bold().underlined().apply_to(title)
  );
}

pub fn print_human_readable(report: &Report) {
  println!(
    "{} {}",
    style("•").magenta(),
    Style::new()
      .bold()
      .magenta()
      .apply_to(format!("Lookup results for: {}", report.number.raw))
  );

  match (report.lookup.as_ref(), report.geo.as_ref()) {
    (Some(lookup), Some(geo)) => println!("\n{}\n", render(lookup, geo)),
    _ => println!("  {}", style("Not available").dim()),
  }

  if !report.skipped_steps.is_empty() {
    header("Skipped Steps", "⚠");
    for skipped in &report.skipped_steps {
      println!("  {}", style(skipped).yellow());
    }
  }

  if !report.errors.is_empty() {
    header("Errors Encountered", "❌");
    for error in &report.errors {
      eprintln!("  {}", style(error).red().bold());
    }
  }
}

pub fn print_json(report: &Report) -> Result<()> {
  serde_json::to_string_pretty(report)
    .map(|s| println!("{s}"))
    .context("Failed to serialize results to JSON")
}
