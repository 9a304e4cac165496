//! Tourguide Service Entry Point
//!
//! Boots the tour API server. All settings come from the environment, so
//! the binary runs unconfigured with sensible defaults.
//!
//! # Usage
//!
//! ```bash
//! # Run with defaults (127.0.0.1:3100, config/tours.yaml)
//! tourguide
//!
//! # Listen on another port
//! TOURGUIDE_PORT=8080 tourguide
//!
//! # Serve a different configuration file
//! TOURGUIDE_TOURS=/etc/tourguide/tours.yaml tourguide
//!
//! # Debug logging
//! RUST_LOG=debug tourguide
//! ```

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use log::{info, warn};

use tourguide::api::{self, ServerConfig};
use tourguide::tour::load_tours;
use tourguide::{APP_NAME, VERSION};

/// Environment variable naming the listen host.
const ENV_HOST: &str = "TOURGUIDE_HOST";

/// Environment variable naming the listen port.
const ENV_PORT: &str = "TOURGUIDE_PORT";

/// Environment variable naming the tour configuration file.
const ENV_TOURS: &str = "TOURGUIDE_TOURS";

/// Configures the logging system with appropriate formatting.
fn setup_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            use std::io::Write;

            match record.level() {
                log::Level::Warn | log::Level::Error => {
                    writeln!(buf, "[{}] {}", record.level(), record.args())
                }
                _ => writeln!(buf, "{}", record.args()),
            }
        })
        .init();
}

/// Prints the application banner with version information.
fn print_banner() {
    println!();
    println!("{} v{}", APP_NAME, VERSION);
    println!("Guided Tour Engine");
    println!();
}

/// Builds the server configuration from the environment.
fn config_from_env() -> Result<ServerConfig, String> {
    let mut config = ServerConfig::default();

    if let Ok(host) = env::var(ENV_HOST) {
        config.host = host;
    }

    if let Ok(port) = env::var(ENV_PORT) {
        config.port = port
            .parse()
            .map_err(|_| format!("{} must be a port number, got '{}'", ENV_PORT, port))?;
    }

    if let Ok(path) = env::var(ENV_TOURS) {
        config.tours_path = PathBuf::from(path);
    }

    Ok(config)
}

/// Checks the tour configuration once at startup.
///
/// A broken or missing file is reported but does not stop the server:
/// handlers re-read the file per request, so fixing it on disk is enough.
fn probe_tours(config: &ServerConfig) {
    match load_tours(&config.tours_path) {
        Ok(tours) => {
            let ids: Vec<&str> = tours.iter().map(|t| t.id.as_str()).collect();
            info!(
                "Tour configuration: {} tours ({})",
                tours.len(),
                ids.join(", ")
            );
        }
        Err(e) => {
            warn!(
                "Tour configuration at '{}' is not loadable yet: {}",
                config.tours_path.display(),
                e
            );
        }
    }
}

/// Main application entry point.
async fn run() -> Result<(), Box<dyn std::error::Error>> {
    setup_logging();
    print_banner();

    let config = config_from_env()?;

    info!("Serving tours from: {}", config.tours_path.display());
    probe_tours(&config);

    api::serve(config).await
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!();
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
