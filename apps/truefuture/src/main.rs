mod handler;
mod request;

use anyhow::Context;
use clap::Parser;
use pythia::InterpretationClient;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::process::ExitCode;
use urania::SwissEphemerisProvider;

#[derive(Parser, Debug)]
#[command(author, version, about = "Compute a whole-sign chart and an AI interpretation")]
struct Args {
    /// Birth date, ISO format (YYYY-MM-DD or YYYY-MM-DDTHH:mm:ss, UTC unless an offset is given).
    #[arg(long)]
    birth_date: Option<String>,

    /// Latitude in degrees, -90..=90.
    #[arg(long, allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Longitude in degrees, -180..=180.
    #[arg(long, allow_hyphen_values = true)]
    lng: Option<f64>,

    /// Report type (daily, weekly, monthly, yearly, synastry, general, or any other tag).
    #[arg(long, default_value = request::DEFAULT_REPORT_TYPE)]
    report_type: String,

    /// Read a JSON request `{birthDate, lat, lng, reportType?}` from a file, or `-` for stdin.
    /// Overrides the individual flags.
    #[arg(long)]
    request: Option<PathBuf>,

    /// Config file (default: configs/truefuture.toml if present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Compute the chart only; no interpretation request is made.
    #[arg(long)]
    chart_only: bool,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

impl Args {
    fn request_body(&self) -> anyhow::Result<Value> {
        match &self.request {
            Some(source) => request::read_request_body(source),
            None => Ok(json!({
                "birthDate": self.birth_date,
                "lat": self.lat,
                "lng": self.lng,
                "reportType": self.report_type,
            })),
        }
    }
}

async fn run(args: Args) -> anyhow::Result<bool> {
    let settings = truefuture_config::load_settings(args.config.as_deref())?;
    if let Some(source) = &settings.source {
        log::info!("Loaded settings from {}", source.display());
    }

    let provider = SwissEphemerisProvider::new(settings.ephemeris_path.clone())
        .context("Failed to initialize the ephemeris")?;
    let client = InterpretationClient::new(settings.gemini, settings.credentials);

    let body = args.request_body()?;
    let response = handler::calculate(&provider, &client, &body, args.chart_only).await;

    let output = if args.pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    println!("{}", output);

    Ok(response.is_success())
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    match run(args).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            log::error!("{:#}", e);
            ExitCode::from(2)
        }
    }
}
