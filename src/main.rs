mod databank;
mod web;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use crate::databank::{
    LocationService, SectorContext, SectorId, SectorLocator, Telemetry, TelemetryRequest,
};
use crate::web::Config;

#[derive(Parser)]
#[command(name = "databank-locator")]
#[command(about = "Routes robots to the nearest databank of their sector")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP service
    Serve {
        /// YAML config file; the DNS_*/DSN_* environment is used when omitted
        #[arg(long)]
        config: Option<String>,
    },
    /// Compute a databank location offline
    Locate {
        #[arg(long, allow_hyphen_values = true)]
        x: String,
        #[arg(long, allow_hyphen_values = true)]
        y: String,
        #[arg(long, allow_hyphen_values = true)]
        z: String,
        #[arg(long, allow_hyphen_values = true)]
        vel: String,
        #[arg(long, default_value_t = SectorId::default().get())]
        sector: u32,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => serve(config.as_deref()),
        Commands::Locate {
            x,
            y,
            z,
            vel,
            sector,
        } => locate(
            TelemetryRequest {
                x: Some(x),
                y: Some(y),
                z: Some(z),
                vel: Some(vel),
            },
            sector,
        ),
    }
}

fn serve(config_path: Option<&str>) -> ExitCode {
    let config = match config_path {
        Some(path) => Config::from_file(path),
        None => Config::from_env(),
    };
    let config = match config {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    env_logger::Builder::new()
        .filter_level(config.log_level)
        .parse_default_env()
        .init();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            log::error!("could not start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(web::run_server(config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("error running server: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn locate(request: TelemetryRequest, sector: u32) -> ExitCode {
    let Some(sector_id) = SectorId::new(sector) else {
        eprintln!("Invalid sector ID, must be a positive integer");
        return ExitCode::FAILURE;
    };

    let telemetry = match Telemetry::try_from(request) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let location = match SectorLocator.nearest_databank(&telemetry, SectorContext::new(sector_id)) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match serde_json::to_string(&location) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error encoding location: {}", e);
            ExitCode::FAILURE
        }
    }
}
