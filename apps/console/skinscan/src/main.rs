use skinscan::cli::Cli;
use skinscan::console_page::{Screen, SharedInput};
use skinscan::error::ConsoleError;
use skinscan::logger::{initialize as LoggerInitialize, level_for};
use skinscan::session::Session;

use client_core::config::AppConfig;
use client_core::scan_client::ScanClient;

use std::io::{BufRead, BufReader};
use std::process::ExitCode;
use std::sync::{Arc, Mutex};

use clap::Parser;
use log::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("skinscan: {}", e.message());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), ConsoleError> {
    // Logger first so config loading is traced.
    LoggerInitialize(&cli.log_dir(), level_for(cli.verbose))?;

    let config_dir = cli.config_dir();
    info!("Skinscan console starting");
    info!("Config directory: {}", config_dir.display());

    let mut config = AppConfig::load_with_env(&config_dir)?;
    if let Some(base_url) = cli.base_url.clone() {
        info!("Using base URL from command line: {base_url}");
        config.server.base_url = base_url;
        config.validate()?;
    }
    cli.persist(&config)?;

    let client = ScanClient::from_config(&config.server)?;
    info!("Service base URL: {}", client.base_url());

    let reader: Box<dyn BufRead + Send> = Box::new(BufReader::new(std::io::stdin()));
    let input: SharedInput = Arc::new(Mutex::new(reader));
    let mut session = Session::start(client, config, Screen::stdout(), input).await;
    session.run().await
}
