#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

use anyhow::Result;

// Declare library modules
mod app;
mod cli;
mod flag;
pub mod providers;
mod results;
mod steps;
mod user_config;

/// Runs the main application logic.
///
/// This function parses command-line arguments, initializes the application
/// state, executes the lookup pipeline (validation, metadata resolution,
/// optional geocoding), and prints the results.
///
/// A Ctrl-C while the pipeline runs (e.g. during the interactive prompt or
/// the outbound geocoding call) is reported as a clean termination instead
/// of a panic or a half-printed report.
///
/// # Errors
///
/// Returns an error if initialization fails (e.g., building the HTTP client),
/// if the input is not a valid phone number, or if printing the final results
/// in JSON format fails.
pub async fn run() -> Result<()> {
  tokio::select! {
    result = run_pipeline() => result,
    _ = tokio::signal::ctrl_c() => {
      eprintln!("\nProgram terminated by user");
      std::process::exit(130);
    }
  }
}

async fn run_pipeline() -> Result<()> {
  let mut app = app::App::new()?;
  app.run().await
}
