use std::path::PathBuf;

use pack_wizard::config::AppConfig;
use pack_wizard::core::logging::{self, LogOutput};
use pack_wizard::core::pack::dry_run::{run_scenario, Scenario};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (config, config_source) = AppConfig::read();

    // Initialize logging
    let _log_guard = logging::init(&config.log_dir(), LogOutput::FileAndStdout);
    log::info!("{} v{} starting", pack_wizard::NAME, pack_wizard::VERSION);
    config_source.log();

    let Some(path) = std::env::args().nth(1).map(PathBuf::from) else {
        eprintln!("Usage: pack-wizard <scenario.json>");
        std::process::exit(2);
    };

    let scenario = Scenario::from_file(&path)?;
    let report = run_scenario(scenario, &config).await?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
