use crate::cli::Cli;
use crate::providers::geocode::{self, GeoInfo, Geocoder};
use crate::providers::phone::LookupResult;
use crate::results::{self, NumberSummary, Report};
use crate::steps::{self, EnrichStatus};
use crate::user_config;
use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use console::style;
use phonenumber::country;
use reqwest::Client;
use std::env;
use std::io::Write as _;
use std::str::FromStr;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Bound on the single outbound geocoding call; a timeout degrades like
/// any other enrichment failure.
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

pub struct App {
  cli: Cli,
  geocoder: Geocoder,
  report: Report,
  geo_api_key: Option<String>,
}

impl App {
  pub fn new() -> Result<Self> {
    Self::with_cli(Cli::parse())
  }

  pub fn with_cli(cli: Cli) -> Result<Self> {
    let client = Client::builder()
      .user_agent(format!("nomor/{}", env!("CARGO_PKG_VERSION")))
      .timeout(HTTP_TIMEOUT)
      .build()?;

    // Key resolution order: flag, environment, user config file.
    let geo_api_key = cli
      .geo_api_key_flag
      .clone()
      .or_else(|| env::var("OPENCAGE_API_KEY").ok())
      .or_else(|| user_config::load().opencage_api_key)
      .filter(|key| !key.is_empty() && key != geocode::PLACEHOLDER_KEY);

    Ok(Self {
      cli,
      geocoder: Geocoder::new(client),
      report: Report::default(),
      geo_api_key,
    })
  }

  pub async fn run(&mut self) -> Result<()> {
    if self.cli.config_show {
      return Self::show_config();
    }
    if self.cli.save_keys {
      self.save_keys()?;
    }

    let raw = self.acquire_number().await?;
    let number = steps::validate_step(&raw, self.default_region()?)?;

    self.report.number = NumberSummary {
      raw,
      country_code: number.country().code(),
      national_number: number.national().value(),
    };

    let lookup = steps::resolve_step(&number);
    self.run_geo_lookup(&lookup).await;
    self.report.lookup = Some(lookup);

    self.print_results()
  }

  /// Takes the number from the positional argument, or prompts for one.
  async fn acquire_number(&self) -> Result<String> {
    if let Some(number) = &self.cli.number {
      return Ok(number.trim().to_string());
    }

    print!("Phone number (e.g. +6281234567890): ");
    std::io::stdout().flush().context("failed to flush stdout")?;

    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
      .read_line(&mut line)
      .await
      .context("failed to read phone number from stdin")?;

    let trimmed = line.trim();
    if trimmed.is_empty() {
      bail!("no phone number provided");
    }
    Ok(trimmed.to_string())
  }

  fn default_region(&self) -> Result<Option<country::Id>> {
    self
      .cli
      .region
      .as_deref()
      .map(|code| {
        country::Id::from_str(&code.to_uppercase())
          .map_err(|_| anyhow!("unknown region code: {code}"))
      })
      .transpose()
  }

  async fn run_geo_lookup(&mut self, lookup: &LookupResult) {
    if self.cli.no_geo {
      self
        .report
        .skipped_steps
        .push("geocoding (skipped by --no-geo flag)".to_string());
      self.report.geo = Some(GeoInfo::unknown());
      return;
    }

    if !self.cli.json && self.geo_api_key.is_some() {
      println!("Fetching location info...");
    }

    let (info, status) = steps::enrich_step(
      &self.geocoder,
      self.geo_api_key.as_deref(),
      lookup,
    )
    .await;

    match status {
      EnrichStatus::Enriched => {}
      EnrichStatus::MissingKey => {
        if !self.cli.json {
          println!(
            "{}",
            style(
              "⚠️ OpenCage API key not configured. Location details will be limited."
            )
            .yellow()
          );
          println!(
            "{}",
            style("Get a free API key at https://opencagedata.com/").yellow()
          );
        }
        self
          .report
          .skipped_steps
          .push("geocoding (no API key configured)".to_string());
      }
      EnrichStatus::Failed(reason) => self
        .report
        .errors
        .push(format!("Geocoding lookup failed: {reason}")),
    }

    self.report.geo = Some(info);
  }

  fn save_keys(&self) -> Result<()> {
    let Some(key) = &self.cli.geo_api_key_flag else {
      println!(
        "{}",
        style("--save-keys given but no --geo-api-key to persist.").yellow()
      );
      return Ok(());
    };

    let mut cfg = user_config::load();
    cfg.opencage_api_key = Some(key.clone());
    user_config::store(&cfg)?;

    if !self.cli.json {
      println!(
        "{}",
        style("Saved the OpenCage API key to the user config file.").green()
      );
    }
    Ok(())
  }

  fn show_config() -> Result<()> {
    let cfg = user_config::load();
    let rendered = serde_json::to_string_pretty(&cfg)
      .context("Failed to serialize configuration")?;
    println!("{rendered}");
    Ok(())
  }

  fn print_results(&self) -> Result<()> {
    if self.cli.json {
      results::print_json(&self.report)
    } else {
      results::print_human_readable(&self.report);
      Ok(())
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn app_with_args(args: &[&str]) -> App {
    let argv: Vec<String> = std::iter::once("nomor".to_string())
      .chain(args.iter().map(std::string::ToString::to_string))
      .collect();
    let cli = Cli::try_parse_from(argv).expect("valid args");
    App::with_cli(cli).expect("app builds")
  }

  #[test]
  fn test_default_region_parses_known_code() {
    let app = app_with_args(&["0812", "--region", "id"]);
    let region = app.default_region().expect("known code");
    assert_eq!(region, Some(country::ID));
  }

  #[test]
  fn test_default_region_rejects_unknown_code() {
    let app = app_with_args(&["0812", "--region", "Q1"]);
    assert!(app.default_region().is_err());
  }

  #[test]
  fn test_default_region_absent() {
    let app = app_with_args(&["+6281234567890"]);
    assert_eq!(app.default_region().expect("ok"), None);
  }

  #[tokio::test]
  async fn test_no_geo_flag_skips_enrichment() {
    let mut app = app_with_args(&["+6281234567890", "--no-geo", "--json"]);
    let lookup = LookupResult {
      region_code: Some("ID".to_string()),
      region_name: "Indonesia".to_string(),
      carrier: "Telkomsel".to_string(),
      timezones: vec![],
    };

    app.run_geo_lookup(&lookup).await;

    assert_eq!(app.report.geo, Some(GeoInfo::unknown()));
    assert_eq!(app.report.skipped_steps.len(), 1);
    assert!(app.report.skipped_steps[0].contains("--no-geo"));
    assert!(app.report.errors.is_empty());
  }

  #[tokio::test]
  async fn test_full_pipeline_without_key_yields_unknown_geo() {
    let mut app = app_with_args(&["+6281234567890", "--json"]);
    app.geo_api_key = None; // Whatever the environment says, force "no key".

    let number = steps::validate_step("+6281234567890", None).expect("valid");
    let lookup = steps::resolve_step(&number);
    app.run_geo_lookup(&lookup).await;

    assert_eq!(lookup.region_name, "Indonesia");
    assert_eq!(lookup.carrier, "Telkomsel");
    assert_eq!(app.report.geo, Some(GeoInfo::unknown()));
    assert_eq!(app.report.skipped_steps.len(), 1);
  }
}
