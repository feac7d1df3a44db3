use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "nomor", version)]
#[command(
  about = "Look up a phone number's country, carrier, timezones, and approximate location.",
  long_about = "A command-line utility to look up information about a phone number: the country it belongs to, the telecom carrier, its timezones, and (via the OpenCage geocoding API) approximate coordinates, currency, and a map link."
)]
pub struct Cli {
  /// The phone number to look up, e.g. `+6281234567890`.
  /// Prompted for interactively when omitted.
  pub number: Option<String>,

  /// Default two-letter region code (e.g. `ID`, `US`) used to parse
  /// numbers written without a leading `+`.
  #[arg(long, value_name = "CODE")]
  pub region: Option<String>,

  /// `OpenCage` geocoding API key.
  /// Overrides the `OPENCAGE_API_KEY` environment variable if both are set.
  #[arg(long = "geo-api-key", value_name = "API_KEY")]
  pub geo_api_key_flag: Option<String>,

  /// Output results in JSON format instead of human-readable text.
  #[arg(long)]
  pub json: bool,

  /// Skip the geocoding enrichment step.
  #[arg(long)]
  pub no_geo: bool,

  /// Persist any api-key flags that are present into the user config file.
  #[arg(long)]
  pub save_keys: bool,

  /// Print the current merged configuration and exit.
  #[arg(long)]
  pub config_show: bool,
}
