use clap::Parser;
use linkpulse::{Config, Pulse, logger};
use std::path::PathBuf;

/// Define command line arguments using clap
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file; the built-in link list is used without it
    #[arg(short, long, value_name = "FILE", env = "LINKPULSE_CONFIG")]
    config: Option<PathBuf>,
}

/// Main entry point
///
/// This function:
/// 1. Loads `.env` and parses command line arguments
/// 2. Initializes the logging system
/// 3. Loads the configuration
/// 4. Runs the checker until SIGINT or SIGTERM
#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let _logger = logger::init();

    let conf = match &cli.config {
        Some(path) => {
            tracing::debug!("Config path: {:?}", path);
            Config::new(path)
        }
        None => Ok(Config::default()),
    };
    let conf = match conf {
        Ok(conf) => conf,
        Err(e) => {
            eprintln!("Failed to initialize configuration: {:?}", e);
            std::process::exit(1);
        }
    };

    let pulse = match Pulse::new(conf) {
        Ok(pulse) => pulse,
        Err(e) => {
            eprintln!("Failed to start: {:?}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = pulse.start().await {
        eprintln!("{:?}", e);
        std::process::exit(1);
    }
}
